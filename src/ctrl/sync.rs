//! 控制器间的定向同步
//!
//! `a.sync_toward(&mut b)` 把 a 的视图推给 b，唯一例外是 b 独占管辖的链路：
//! a 对这些链路没有发言权，b 的实时测量值不能被覆盖。

use super::controller::Controller;
use crate::error::{Error, Result};
use tracing::{debug, trace};

impl Controller {
    /// 把自身视图推送到 `other`，返回被写入的链路数。
    ///
    /// 同一对控制器之间重复调用是幂等的；反方向调用一般得到不同结果。
    #[tracing::instrument(skip(self, other), fields(from = ?self.sw(), to = ?other.sw()))]
    pub fn sync_toward(&self, other: &mut Controller) -> Result<usize> {
        if !self.graph().same_shape(other.graph()) {
            return Err(Error::TopologyMismatch {
                reason: format!(
                    "view of {:?} ({} nodes, {} links) differs from view of {:?} ({} nodes, {} links)",
                    self.sw(),
                    self.graph().node_count(),
                    self.graph().edge_count(),
                    other.sw(),
                    other.graph().node_count(),
                    other.graph().edge_count(),
                ),
            });
        }

        let mut written = 0;
        for e in self.graph().edge_ids() {
            if other.governs(e) && !self.governs(e) {
                trace!(edge = ?e, "目标独占管辖，跳过");
                continue;
            }
            let src = *self.graph().attrs(e);
            let dst = other.graph_mut().attrs_mut(e);
            dst.used = src.used;
            dst.capacity = src.capacity;
            written += 1;
        }

        debug!(written, "🔁 同步完成");
        Ok(written)
    }
}

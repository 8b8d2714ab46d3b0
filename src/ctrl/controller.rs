//! 控制器：所有权与本地视图
//!
//! 控制器持有拓扑的私有副本。与它同处一地的交换机所关联的链路（`mylinks`）
//! 由它直接测量，始终准确；其余链路只能通过同步获得，可能陈旧。

use super::opts::CtrlOpts;
use crate::error::Result;
use crate::graph::{EdgeId, NodeId, NodeKind, Topology};
use tracing::{debug, trace};

/// 负载均衡控制器
#[derive(Debug, Clone)]
pub struct Controller {
    opts: CtrlOpts,
    graph: Topology,
    sw_ids: Vec<NodeId>,
    srv_ids: Vec<NodeId>,
    mylinks: Vec<EdgeId>,
    governed: Vec<bool>,
}

impl Controller {
    /// 创建尚未挂接到仿真的控制器（视图为空）
    pub fn new(opts: CtrlOpts) -> Self {
        Self {
            opts,
            graph: Topology::default(),
            sw_ids: Vec::new(),
            srv_ids: Vec::new(),
            mylinks: Vec::new(),
            governed: Vec::new(),
        }
    }

    /// 挂接到拓扑：复制私有视图，并一次性计算 `mylinks`。
    #[tracing::instrument(skip(self, topo), fields(sw = ?self.opts.sw))]
    pub fn attach(&mut self, topo: &Topology) -> Result<()> {
        let sw_ids = self
            .opts
            .sw
            .iter()
            .map(|name| topo.require_kind(name, NodeKind::Switch))
            .collect::<Result<Vec<_>>>()?;
        let srv_ids = self
            .opts
            .srv
            .iter()
            .map(|name| topo.require_kind(name, NodeKind::Server))
            .collect::<Result<Vec<_>>>()?;

        let mut governed = vec![false; topo.edge_count()];
        let mut mylinks = Vec::new();
        for &sw in &sw_ids {
            for &e in topo.out_edges(sw).iter().chain(topo.in_edges(sw)) {
                if !governed[e.0] {
                    governed[e.0] = true;
                    mylinks.push(e);
                }
            }
        }

        debug!(mylinks = mylinks.len(), edges = topo.edge_count(), "控制器挂接完成");

        self.graph = topo.clone();
        self.sw_ids = sw_ids;
        self.srv_ids = srv_ids;
        self.mylinks = mylinks;
        self.governed = governed;
        Ok(())
    }

    pub fn opts(&self) -> &CtrlOpts {
        &self.opts
    }

    pub fn sw(&self) -> &[String] {
        &self.opts.sw
    }

    pub fn srv(&self) -> &[String] {
        &self.opts.srv
    }

    pub fn greedy(&self) -> bool {
        self.opts.greedy
    }

    pub fn greedylimit(&self) -> f64 {
        self.opts.greedylimit
    }

    pub(crate) fn sw_ids(&self) -> &[NodeId] {
        &self.sw_ids
    }

    pub(crate) fn srv_ids(&self) -> &[NodeId] {
        &self.srv_ids
    }

    /// 控制器当前的拓扑视图
    pub fn graph(&self) -> &Topology {
        &self.graph
    }

    /// 直接修改视图（实验/测试中用于制造陈旧或偏差）
    pub fn graph_mut(&mut self) -> &mut Topology {
        &mut self.graph
    }

    /// 本控制器管辖的链路
    pub fn mylinks(&self) -> &[EdgeId] {
        &self.mylinks
    }

    /// `mylinks` 的名称形式 (from, to)
    pub fn mylinks_named(&self) -> Vec<(&str, &str)> {
        self.mylinks
            .iter()
            .map(|&e| {
                let (from, to) = self.graph.endpoints(e);
                (self.graph.name(from), self.graph.name(to))
            })
            .collect()
    }

    pub fn governs(&self, e: EdgeId) -> bool {
        self.governed.get(e.0).copied().unwrap_or(false)
    }

    pub fn owns_switch(&self, sw: NodeId) -> bool {
        self.sw_ids.contains(&sw)
    }

    /// 实时测量：把真值同步写入本控制器管辖链路的视图。
    pub(crate) fn observe(&mut self, e: EdgeId, used: f64) {
        debug_assert!(self.governs(e), "observe on a link not governed");
        trace!(edge = ?e, used, "更新本地测量值");
        self.graph.set_used(e, used);
    }
}

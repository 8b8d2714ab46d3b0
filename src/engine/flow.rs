//! 在途流
//!
//! 记录撤销一条已接纳流所需的全部信息：精确的链路集合与当初加上的大小。

use crate::graph::{EdgeId, NodeId};
use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub id: u64,
    /// 对应的工作负载下标
    pub index: usize,
    pub arrival: SimTime,
    pub ingress: NodeId,
    /// 处理该请求的控制器下标
    pub ctrl: usize,
    pub size: f64,
    pub duration: SimTime,
    pub server: NodeId,
    pub path: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Flow {
    pub fn expires_at(&self) -> SimTime {
        self.arrival.saturating_add(self.duration)
    }
}

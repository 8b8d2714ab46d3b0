//! 到达 / 离开事件
//!
//! 两个事件只负责把控制权交给 `LbWorld`，具体处理在 world 中完成。

use super::world::LbWorld;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::trace;

fn lb_world(world: &mut dyn World) -> Result<&mut LbWorld> {
    world
        .as_any_mut()
        .downcast_mut::<LbWorld>()
        .ok_or(Error::WorldMismatch)
}

/// 事件：一条工作负载请求到达入口交换机。
#[derive(Debug, Clone)]
pub struct Arrival {
    pub index: usize,
    pub switch: NodeId,
    pub size: f64,
    pub duration: SimTime,
}

impl Event for Arrival {
    #[tracing::instrument(skip(self, sim, world), fields(index = self.index, switch = ?self.switch, size = self.size))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<()> {
        trace!(now = ?sim.now(), "📥 请求到达");
        lb_world(world)?.on_arrival(*self, sim)
    }
}

/// 事件：一条已接纳的流到期，释放其占用。
#[derive(Debug, Clone, Copy)]
pub struct Departure {
    pub flow_id: u64,
}

impl Event for Departure {
    #[tracing::instrument(skip(self, sim, world), fields(flow_id = self.flow_id))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<()> {
        trace!(now = ?sim.now(), "📤 流到期");
        lb_world(world)?.on_departure(self.flow_id, sim)
    }
}

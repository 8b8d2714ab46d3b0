//! 负载均衡仿真引擎
//!
//! 事件驱动地处理请求的到达与离开：到达时交给入口交换机的归属控制器选路，
//! 把占用加到真值与管辖控制器的视图上，并在 time + duration 释放。

// 子模块声明
mod events;
mod flow;
mod lb_sim;
mod stats;
mod world;

// 重新导出公共接口
pub use events::{Arrival, Departure};
pub use flow::Flow;
pub use lb_sim::{CtrlView, LinkBalancerSim, RunReport};
pub use stats::{DropRecord, Stats, UtilSample};
pub use world::LbWorld;

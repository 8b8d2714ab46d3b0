//! 控制器模块
//!
//! 每个控制器管辖一部分交换机，基于自己（可能陈旧）的链路利用率视图做服务器选择，
//! 并通过定向同步与其他控制器交换视图。

// 子模块声明
mod controller;
mod opts;
mod routing;
mod sync;

// 重新导出公共接口
pub use controller::Controller;
pub use opts::CtrlOpts;
pub use routing::Route;

//! 拓扑图模块
//!
//! 此模块包含拓扑的基本组件：节点、链路属性和有向图本身。

// 子模块声明
mod id;
mod link;
mod node;
mod topology;

// 重新导出公共接口
pub use id::{EdgeId, NodeId};
pub use link::{EdgeAttrs, Link, LinkSnapshot};
pub use node::{Node, NodeKind};
pub use topology::Topology;

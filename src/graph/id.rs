//! 标识符类型
//!
//! 定义节点和链路的唯一标识符。

/// 节点标识符（拓扑内的稠密下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// 链路标识符（按插入顺序编号，即“拓扑顺序”）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

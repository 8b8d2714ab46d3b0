//! 错误类型
//!
//! 整个 crate 共用一个错误枚举：路由失败可被引擎吸收为丢弃，其余均为致命错误。

use thiserror::Error;

use crate::graph::NodeKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 控制器视图中没有任何可达服务器（引擎把它记为丢弃，而非失败）
    #[error("no reachable server for ingress switch `{switch}`")]
    NoPath { switch: String },

    /// 两个控制器的拓扑副本形状不一致
    #[error("topology mismatch: {reason}")]
    TopologyMismatch { reason: String },

    #[error("workload entry #{index} is malformed: {reason}")]
    MalformedWorkload { index: usize, reason: String },

    #[error("unknown node `{name}`")]
    UnknownNode { name: String },

    #[error("node `{name}` is not a {expected}")]
    WrongKind { name: String, expected: NodeKind },

    #[error("node `{name}` already exists")]
    DuplicateNode { name: String },

    #[error("link {from} -> {to} already exists")]
    DuplicateLink { from: String, to: String },

    #[error("link {from} -> {to} has invalid capacity {capacity}")]
    InvalidCapacity {
        from: String,
        to: String,
        capacity: f64,
    },

    #[error("no controller with index {index}")]
    UnknownController { index: usize },

    /// 事件在错误类型的 World 上执行
    #[error("event executed against an unexpected world type")]
    WorldMismatch,

    #[error("invalid experiment: {0}")]
    Config(String),

    #[error("failed to read experiment: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse experiment JSON: {0}")]
    Json(#[from] serde_json::Error),
}

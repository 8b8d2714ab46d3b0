//! 节点类型
//!
//! 交换机是流量入口/中继点，服务器是流量的汇点。

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Switch,
    Server,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Switch => f.write_str("switch"),
            NodeKind::Server => f.write_str("server"),
        }
    }
}

/// 拓扑节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_switch(&self) -> bool {
        self.kind == NodeKind::Switch
    }

    pub fn is_server(&self) -> bool {
        self.kind == NodeKind::Server
    }
}

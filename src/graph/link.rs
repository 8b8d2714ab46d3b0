//! 链路类型
//!
//! 有向链路及其固定形状的属性记录（capacity / used）。

use serde::{Deserialize, Serialize};

use super::id::NodeId;

/// 链路属性：容量在构建时确定，`used` 是唯一可变字段。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    pub capacity: f64,
    pub used: f64,
}

impl EdgeAttrs {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            used: 0.0,
        }
    }

    /// 当前利用率 used / capacity
    pub fn utilization(&self) -> f64 {
        self.used / self.capacity
    }

    /// 接纳 `size` 之后的利用率
    pub fn utilization_with(&self, size: f64) -> f64 {
        (self.used + size) / self.capacity
    }
}

/// 有向链路
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub attrs: EdgeAttrs,
}

impl Link {
    /// 创建新链路
    pub fn new(from: NodeId, to: NodeId, capacity: f64) -> Self {
        Self {
            from,
            to,
            attrs: EdgeAttrs::new(capacity),
        }
    }
}

/// 对外报告用的只读链路快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub from: String,
    pub to: String,
    pub capacity: f64,
    pub used: f64,
}

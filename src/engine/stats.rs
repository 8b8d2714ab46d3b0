//! 统计信息
//!
//! 定义负载均衡仿真的统计数据结构。

use serde::{Deserialize, Serialize};

/// 一次被丢弃的请求（无可达服务器）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropRecord {
    pub time: f64,
    pub switch: String,
    pub ctrl: usize,
}

/// 每个事件之后的利用率采样
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilSample {
    pub t: f64,
    /// 所有链路中的最大利用率
    pub max_util: f64,
    /// 服务器接入链路利用率相对其均值的均方根偏差
    pub server_rmse: f64,
}

/// 仿真统计信息
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub arrivals: u64,
    pub admitted: u64,
    pub dropped: u64,
    pub departures: u64,
    pub admitted_by_ctrl: Vec<u64>,
    pub drops: Vec<DropRecord>,
    pub peak_util: f64,
    pub samples: Vec<UtilSample>,
}

impl Stats {
    pub(crate) fn with_ctrls(n: usize) -> Self {
        Self {
            admitted_by_ctrl: vec![0; n],
            ..Self::default()
        }
    }

    /// 被丢弃请求占全部到达的比例
    pub fn drop_ratio(&self) -> f64 {
        if self.arrivals == 0 {
            return 0.0;
        }
        self.dropped as f64 / self.arrivals as f64
    }

    /// 采样期间服务器负载偏差的均值
    pub fn mean_server_rmse(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.server_rmse).sum::<f64>() / self.samples.len() as f64
    }
}

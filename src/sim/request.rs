//! 工作负载请求
//!
//! 一条工作负载记录 (time, switch, size, duration)，由外部生成器产出。

use serde::{Deserialize, Serialize};

/// 到达请求：时间与持续时间单位为秒
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub time: f64,
    pub switch: String,
    pub size: f64,
    pub duration: f64,
}

impl Request {
    pub fn new(time: f64, switch: impl Into<String>, size: f64, duration: f64) -> Self {
        Self {
            time,
            switch: switch.into(),
            size,
            duration,
        }
    }
}

impl<S: Into<String>> From<(f64, S, f64, f64)> for Request {
    fn from((time, switch, size, duration): (f64, S, f64, f64)) -> Self {
        Self::new(time, switch, size, duration)
    }
}

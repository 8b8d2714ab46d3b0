//! 控制器构造参数

use serde::{Deserialize, Serialize};

/// 控制器配置：恰好四个可识别选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtrlOpts {
    /// 与控制器同处一地的交换机
    pub sw: Vec<String>,
    /// 控制器知道并可路由到的服务器
    pub srv: Vec<String>,
    #[serde(default)]
    pub greedy: bool,
    #[serde(default = "default_greedylimit")]
    pub greedylimit: f64,
}

fn default_greedylimit() -> f64 {
    1.0
}

impl CtrlOpts {
    pub fn new<S, T>(sw: S, srv: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            sw: sw.into_iter().map(Into::into).collect(),
            srv: srv.into_iter().map(Into::into).collect(),
            greedy: false,
            greedylimit: default_greedylimit(),
        }
    }

    /// 开启本地优先策略
    pub fn greedy(mut self, greedylimit: f64) -> Self {
        self.greedy = true;
        self.greedylimit = greedylimit;
        self
    }
}

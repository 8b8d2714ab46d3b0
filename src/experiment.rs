//! 实验描述与驱动
//!
//! 用 JSON 描述一次实验（拓扑、控制器、工作负载、同步计划），并负责在运行期间
//! 按计划显式调用同步。同步调度属于实验参数，而不是引擎行为。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ctrl::{Controller, CtrlOpts};
use crate::engine::{LinkBalancerSim, RunReport};
use crate::error::{Error, Result};
use crate::graph::Topology;
use crate::sim::{Request, SimTime};
use crate::topo::{self, FatTreeOpts};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub topology: TopologyConfig,
    pub controllers: Vec<CtrlOpts>,
    pub workload: WorkloadConfig,
    #[serde(default)]
    pub sync: Option<SyncPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyConfig {
    OneSwitch,
    TwoSwitch,
    TwoSwitchNarrow,
    ThreeSwitch,
    Greedy,
    FatTree {
        k: usize,
        #[serde(default)]
        server_capacity: Option<f64>,
        #[serde(default)]
        fabric_capacity: Option<f64>,
    },
    Custom {
        switches: Vec<String>,
        servers: Vec<String>,
        links: Vec<LinkConfig>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    pub from: String,
    pub to: String,
    pub capacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkloadConfig {
    /// 第 i 个请求在时刻 i 到达 `switches[i % len]`
    Unit {
        switches: Vec<String>,
        size: f64,
        duration: f64,
        numreqs: usize,
        /// 追加一条大小为 0 的请求，把剩余活动流推进到结束
        #[serde(default)]
        flush_at: Option<f64>,
    },
    Explicit {
        requests: Vec<Request>,
    },
}

/// 每隔 `period` 秒（仿真时间）在所有控制器之间做一次全量同步
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub period: f64,
}

impl ExperimentConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl TopologyConfig {
    pub fn build(&self) -> Result<Topology> {
        match self {
            TopologyConfig::OneSwitch => topo::one_switch(),
            TopologyConfig::TwoSwitch => topo::two_switch(),
            TopologyConfig::TwoSwitchNarrow => topo::two_switch_narrow(),
            TopologyConfig::ThreeSwitch => topo::three_switch(),
            TopologyConfig::Greedy => topo::greedy_line(),
            TopologyConfig::FatTree {
                k,
                server_capacity,
                fabric_capacity,
            } => {
                let defaults = FatTreeOpts::default();
                let opts = FatTreeOpts {
                    k: *k,
                    server_capacity: server_capacity.unwrap_or(defaults.server_capacity),
                    fabric_capacity: fabric_capacity.unwrap_or(defaults.fabric_capacity),
                };
                Ok(topo::build_fat_tree(&opts)?.0)
            }
            TopologyConfig::Custom {
                switches,
                servers,
                links,
            } => {
                let mut g = Topology::new();
                for name in switches {
                    g.add_switch(name.as_str())?;
                }
                for name in servers {
                    g.add_server(name.as_str())?;
                }
                for link in links {
                    g.connect_named(&link.from, &link.to, link.capacity)?;
                }
                Ok(g)
            }
        }
    }
}

impl WorkloadConfig {
    pub fn requests(&self) -> Result<Vec<Request>> {
        match self {
            WorkloadConfig::Unit {
                switches,
                size,
                duration,
                numreqs,
                flush_at,
            } => {
                let mut reqs = unit_workload(switches, *size, *duration, *numreqs)?;
                if let Some(t) = flush_at {
                    reqs.push(Request::new(*t, switches[0].as_str(), 0.0, 1.0));
                }
                Ok(reqs)
            }
            WorkloadConfig::Explicit { requests } => Ok(requests.clone()),
        }
    }
}

/// 单位负载：第 i 个请求在时刻 i 到达 `switches[i % len]`。
pub fn unit_workload(
    switches: &[String],
    size: f64,
    duration: f64,
    numreqs: usize,
) -> Result<Vec<Request>> {
    if switches.is_empty() {
        return Err(Error::Config(
            "unit workload needs at least one switch".to_string(),
        ));
    }
    Ok((0..numreqs)
        .map(|i| Request::new(i as f64, switches[i % switches.len()].as_str(), size, duration))
        .collect())
}

/// 运行一次实验。`until` 给出时提前停止；否则运行到事件队列为空。
#[tracing::instrument(skip(cfg), fields(name = ?cfg.name))]
pub fn run_experiment(cfg: &ExperimentConfig, until: Option<f64>) -> Result<RunReport> {
    let graph = cfg.topology.build()?;
    let ctrls = cfg
        .controllers
        .iter()
        .cloned()
        .map(Controller::new)
        .collect();
    let mut sim = LinkBalancerSim::new(graph, ctrls)?;
    let workload = cfg.workload.requests()?;
    sim.load(&workload)?;

    let until = until.map(SimTime::from_secs_f64);
    match cfg.sync {
        Some(SyncPlan { period }) => {
            if !(period.is_finite() && period > 0.0) {
                return Err(Error::Config(format!("sync period must be > 0, got {period}")));
            }
            let step = SimTime::from_secs_f64(period).max(SimTime(1));
            let mut next = step;
            while let Some(at) = sim.next_event_at() {
                if until.is_some_and(|u| at > u) {
                    break;
                }
                while next < at {
                    next = next.saturating_add(step);
                }
                let stop = until.map_or(next, |u| u.min(next));
                sim.run_until(stop)?;
                if stop == next {
                    sim.sync_all()?;
                    debug!(at = ?next, "按计划同步");
                    next = next.saturating_add(step);
                }
            }
        }
        None => match until {
            Some(u) => sim.run_until(u)?,
            None => sim.drain()?,
        },
    }

    let report = sim.report(cfg.name.clone());
    info!(
        arrivals = report.stats.arrivals,
        admitted = report.stats.admitted,
        dropped = report.stats.dropped,
        syncs = report.syncs,
        "📊 实验结束"
    );
    Ok(report)
}

//! 负载均衡仿真
//!
//! 把 `Simulator` 与 `LbWorld` 组合在一起：校验并装载工作负载、推进事件、
//! 以及由实验驱动方显式触发的控制器同步（引擎本身从不同步）。

use serde::{Deserialize, Serialize};

use super::flow::Flow;
use super::stats::Stats;
use super::world::LbWorld;
use super::events::Arrival;
use crate::ctrl::Controller;
use crate::error::{Error, Result};
use crate::graph::{LinkSnapshot, NodeKind, Topology};
use crate::sim::{Request, SimTime, Simulator};
use tracing::{debug, info};

/// 单个控制器视图的只读快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtrlView {
    pub sw: Vec<String>,
    pub srv: Vec<String>,
    pub mylinks: Vec<(String, String)>,
    pub links: Vec<LinkSnapshot>,
}

/// 一次运行的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(default)]
    pub name: Option<String>,
    pub now: f64,
    pub events: u64,
    pub syncs: u64,
    pub stats: Stats,
    pub ground_truth: Vec<LinkSnapshot>,
    pub views: Vec<CtrlView>,
}

pub struct LinkBalancerSim {
    sim: Simulator,
    world: LbWorld,
    syncs: u64,
}

impl LinkBalancerSim {
    /// 以真值拓扑和控制器集合建立仿真；每个控制器在此处挂接并计算 `mylinks`。
    pub fn new(graph: Topology, ctrls: Vec<Controller>) -> Result<Self> {
        Ok(Self {
            sim: Simulator::default(),
            world: LbWorld::new(graph, ctrls)?,
            syncs: 0,
        })
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    /// 真值拓扑
    pub fn graph(&self) -> &Topology {
        self.world.graph()
    }

    pub fn ctrls(&self) -> &[Controller] {
        self.world.ctrls()
    }

    pub fn ctrl(&self, index: usize) -> Result<&Controller> {
        self.world
            .ctrls()
            .get(index)
            .ok_or(Error::UnknownController { index })
    }

    pub fn ctrl_mut(&mut self, index: usize) -> Result<&mut Controller> {
        self.world
            .ctrls_mut()
            .get_mut(index)
            .ok_or(Error::UnknownController { index })
    }

    pub fn stats(&self) -> &Stats {
        &self.world.stats
    }

    pub fn active_flows(&self) -> impl Iterator<Item = &Flow> {
        self.world.active_flows()
    }

    /// 队列中是否还有事件
    pub fn is_idle(&self) -> bool {
        self.sim.pending() == 0
    }

    pub fn next_event_at(&self) -> Option<SimTime> {
        self.sim.next_at()
    }

    pub fn syncs(&self) -> u64 {
        self.syncs
    }

    /// 校验全部请求后按顺序调度到达事件；任一条非法则什么都不调度。
    #[tracing::instrument(skip(self, workload), fields(len = workload.len()))]
    pub fn load(&mut self, workload: &[Request]) -> Result<()> {
        let mut arrivals = Vec::with_capacity(workload.len());
        let mut last = self.sim.now();
        for (index, req) in workload.iter().enumerate() {
            let malformed = |reason: String| Error::MalformedWorkload { index, reason };
            if !(req.time.is_finite() && req.time >= 0.0) {
                return Err(malformed(format!("invalid time {}", req.time)));
            }
            if !(req.size.is_finite() && req.size >= 0.0) {
                return Err(malformed(format!("invalid size {}", req.size)));
            }
            if !(req.duration.is_finite() && req.duration >= 0.0) {
                return Err(malformed(format!("invalid duration {}", req.duration)));
            }
            let at = SimTime::from_secs_f64(req.time);
            if at < last {
                return Err(malformed(format!(
                    "time {} goes backwards (previous {})",
                    req.time,
                    last.as_secs_f64()
                )));
            }
            last = at;

            let graph = self.world.graph();
            let switch = match graph.id(&req.switch) {
                Some(id) if graph.kind(id) == NodeKind::Switch => id,
                _ => return Err(malformed(format!("unknown switch `{}`", req.switch))),
            };
            if self.world.owner_of(switch).is_none() {
                return Err(malformed(format!(
                    "switch `{}` is not governed by any controller",
                    req.switch
                )));
            }

            arrivals.push((
                at,
                Arrival {
                    index,
                    switch,
                    size: req.size,
                    duration: SimTime::from_secs_f64(req.duration),
                },
            ));
        }

        for (at, arrival) in arrivals {
            self.sim.schedule(at, arrival);
        }
        debug!(pending = self.sim.pending(), "工作负载已装载");
        Ok(())
    }

    /// 装载工作负载并运行到事件队列为空。
    pub fn run(&mut self, workload: &[Request]) -> Result<&Stats> {
        self.load(workload)?;
        self.drain()?;
        Ok(&self.world.stats)
    }

    /// 运行所有剩余事件
    pub fn drain(&mut self) -> Result<()> {
        self.sim.run(&mut self.world)
    }

    /// 运行到 `until`（含该时刻的事件）
    pub fn run_until(&mut self, until: SimTime) -> Result<()> {
        self.sim.run_until(until, &mut self.world)
    }

    /// `ctrls[from].sync_toward(ctrls[to])`
    pub fn sync(&mut self, from: usize, to: usize) -> Result<usize> {
        let ctrls = self.world.ctrls_mut();
        let len = ctrls.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::UnknownController { index });
            }
        }
        if from == to {
            return Ok(0);
        }
        let written = if from < to {
            let (head, tail) = ctrls.split_at_mut(to);
            head[from].sync_toward(&mut tail[0])?
        } else {
            let (head, tail) = ctrls.split_at_mut(from);
            tail[0].sync_toward(&mut head[to])?
        };
        self.syncs += 1;
        Ok(written)
    }

    /// 所有有序对 (i, j), i != j，按下标顺序依次同步。
    pub fn sync_all(&mut self) -> Result<()> {
        let n = self.world.ctrls().len();
        for from in 0..n {
            for to in 0..n {
                if from != to {
                    self.sync(from, to)?;
                }
            }
        }
        info!(ctrls = n, now = ?self.sim.now(), "🔁 全体控制器已同步");
        Ok(())
    }

    /// 当前状态的报告
    pub fn report(&self, name: Option<String>) -> RunReport {
        RunReport {
            name,
            now: self.sim.now().as_secs_f64(),
            events: self.sim.processed(),
            syncs: self.syncs,
            stats: self.world.stats.clone(),
            ground_truth: self.world.graph().snapshot(),
            views: self
                .world
                .ctrls()
                .iter()
                .map(|c| CtrlView {
                    sw: c.sw().to_vec(),
                    srv: c.srv().to_vec(),
                    mylinks: c
                        .mylinks_named()
                        .into_iter()
                        .map(|(a, b)| (a.to_string(), b.to_string()))
                        .collect(),
                    links: c.graph().snapshot(),
                })
                .collect(),
        }
    }
}

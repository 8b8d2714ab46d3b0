//! 负载均衡世界
//!
//! 持有真值拓扑、控制器集合与在途流。真值的每次变更都会立即写入管辖该链路的
//! 所有控制器视图（控制器直接测量自己的交换机），其余视图只能靠同步更新。

use std::any::Any;
use std::collections::BTreeMap;

use super::events::{Arrival, Departure};
use super::flow::Flow;
use super::stats::{DropRecord, Stats, UtilSample};
use crate::ctrl::Controller;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, NodeId, Topology};
use crate::sim::{SimTime, Simulator, World};
use tracing::{debug, info, trace, warn};

pub struct LbWorld {
    truth: Topology,
    ctrls: Vec<Controller>,
    /// 每条链路的管辖控制器下标
    governors: Vec<Vec<usize>>,
    /// 每个交换机的归属控制器（第一个声明它的控制器）
    owner: Vec<Option<usize>>,
    server_links: Vec<EdgeId>,
    flows: BTreeMap<u64, Flow>,
    next_flow_id: u64,
    pub stats: Stats,
}

impl LbWorld {
    /// 把每个控制器挂接到真值拓扑上，并建立管辖/归属索引。
    pub fn new(truth: Topology, mut ctrls: Vec<Controller>) -> Result<Self> {
        let mut governors = vec![Vec::new(); truth.edge_count()];
        let mut owner = vec![None; truth.node_count()];

        for (idx, ctrl) in ctrls.iter_mut().enumerate() {
            ctrl.attach(&truth)?;
            for &e in ctrl.mylinks() {
                governors[e.0].push(idx);
            }
            for &sw in ctrl.sw_ids() {
                match owner[sw.0] {
                    None => owner[sw.0] = Some(idx),
                    Some(prev) => warn!(
                        switch = truth.name(sw),
                        owner = prev,
                        ctrl = idx,
                        "交换机被多个控制器声明，请求仍分派给第一个"
                    ),
                }
            }
        }

        let server_links = truth
            .edge_ids()
            .filter(|&e| truth.node(truth.endpoints(e).0).is_server())
            .collect();

        info!(
            nodes = truth.node_count(),
            links = truth.edge_count(),
            ctrls = ctrls.len(),
            "🌐 负载均衡世界已建立"
        );

        Ok(Self {
            stats: Stats::with_ctrls(ctrls.len()),
            truth,
            ctrls,
            governors,
            owner,
            server_links,
            flows: BTreeMap::new(),
            next_flow_id: 0,
        })
    }

    /// 真值拓扑
    pub fn graph(&self) -> &Topology {
        &self.truth
    }

    pub fn ctrls(&self) -> &[Controller] {
        &self.ctrls
    }

    pub(crate) fn ctrls_mut(&mut self) -> &mut [Controller] {
        &mut self.ctrls
    }

    pub fn active_flows(&self) -> impl Iterator<Item = &Flow> {
        self.flows.values()
    }

    pub fn owner_of(&self, sw: NodeId) -> Option<usize> {
        self.owner.get(sw.0).copied().flatten()
    }

    pub fn governors(&self, e: EdgeId) -> &[usize] {
        &self.governors[e.0]
    }

    pub(crate) fn on_arrival(&mut self, arrival: Arrival, sim: &mut Simulator) -> Result<()> {
        let Arrival {
            index,
            switch,
            size,
            duration,
        } = arrival;
        let now = sim.now();
        self.stats.arrivals += 1;

        let Some(ctrl) = self.owner_of(switch) else {
            return Err(Error::MalformedWorkload {
                index,
                reason: format!(
                    "switch `{}` is not governed by any controller",
                    self.truth.name(switch)
                ),
            });
        };

        let route = match self.ctrls[ctrl].route_at(switch, size) {
            Ok(route) => route,
            Err(Error::NoPath { switch: name }) => {
                debug!(index, switch = %name, ctrl, "🚫 无可达服务器，请求被丢弃");
                self.stats.dropped += 1;
                self.stats.drops.push(DropRecord {
                    time: now.as_secs_f64(),
                    switch: name,
                    ctrl,
                });
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        self.commit(&route.edges, size);

        let id = self.next_flow_id;
        self.next_flow_id += 1;
        let flow = Flow {
            id,
            index,
            arrival: now,
            ingress: switch,
            ctrl,
            size,
            duration,
            server: route.server,
            path: route.nodes,
            edges: route.edges,
        };
        let expires = flow.expires_at();
        debug!(
            flow_id = id,
            ctrl,
            server = self.truth.name(flow.server),
            hops = flow.edges.len(),
            expires = ?expires,
            "✅ 流已接纳"
        );
        self.flows.insert(id, flow);
        self.stats.admitted += 1;
        self.stats.admitted_by_ctrl[ctrl] += 1;

        sim.schedule(expires, Departure { flow_id: id });
        Ok(())
    }

    pub(crate) fn on_departure(&mut self, flow_id: u64, sim: &mut Simulator) -> Result<()> {
        let Some(flow) = self.flows.remove(&flow_id) else {
            warn!(flow_id, now = ?sim.now(), "离开事件对应的流不存在");
            return Ok(());
        };
        self.commit(&flow.edges, -flow.size);
        self.stats.departures += 1;
        debug!(flow_id, now = ?sim.now(), "流已释放");
        Ok(())
    }

    /// 把 `delta` 加到真值链路上，并同步写入每个管辖控制器的视图。
    fn commit(&mut self, edges: &[EdgeId], delta: f64) {
        for &e in edges {
            let attrs = self.truth.attrs_mut(e);
            attrs.used = (attrs.used + delta).max(0.0);
            let used = attrs.used;
            trace!(edge = ?e, delta, used, "更新真值");
            for &c in &self.governors[e.0] {
                self.ctrls[c].observe(e, used);
            }
        }
    }

    fn sample(&self, now: SimTime) -> UtilSample {
        let max_util = self
            .truth
            .edge_ids()
            .map(|e| self.truth.utilization(e))
            .fold(0.0, f64::max);

        let n = self.server_links.len();
        let server_rmse = if n == 0 {
            0.0
        } else {
            let utils: Vec<f64> = self
                .server_links
                .iter()
                .map(|&e| self.truth.utilization(e))
                .collect();
            let mean = utils.iter().sum::<f64>() / n as f64;
            (utils.iter().map(|u| (u - mean).powi(2)).sum::<f64>() / n as f64).sqrt()
        };

        UtilSample {
            t: now.as_secs_f64(),
            max_util,
            server_rmse,
        }
    }
}

impl World for LbWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, sim: &mut Simulator) {
        let sample = self.sample(sim.now());
        self.stats.peak_util = self.stats.peak_util.max(sample.max_util);
        self.stats.samples.push(sample);
    }
}

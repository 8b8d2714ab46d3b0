//! 路径选择
//!
//! 控制器只依据自己的本地视图（非管辖链路可能陈旧）为到达请求选择服务器与路径。
//!
//! 链路代价取接纳该请求后的利用率 `(used + size) / capacity`，路径代价取瓶颈
//! （路径上代价的最大值）。对每个候选服务器：先用 minimax Dijkstra 求最小瓶颈
//! `B*`，再只沿代价不超过 `B*` 的链路做 BFS，得到达到 `B*` 的最少跳路径。
//! 候选之间按 (瓶颈, 跳数, 服务器名) 升序比较，结果完全确定。

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::controller::Controller;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, NodeId, NodeKind, Topology};
use crate::sim::SimTime;
use tracing::{debug, trace};

/// 一次路由决策：从服务器到入口交换机的有序路径。
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub server: NodeId,
    /// 从服务器到入口交换机的节点序列
    pub nodes: Vec<NodeId>,
    /// 与 `nodes` 相邻节点对应的链路
    pub edges: Vec<EdgeId>,
    /// 接纳后的瓶颈利用率
    pub bottleneck: f64,
}

impl Route {
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// 节点名称序列
    pub fn names<'a>(&self, topo: &'a Topology) -> Vec<&'a str> {
        self.nodes.iter().map(|&n| topo.name(n)).collect()
    }

    fn cmp_with(&self, other: &Route, topo: &Topology) -> Ordering {
        self.bottleneck
            .total_cmp(&other.bottleneck)
            .then(self.hops().cmp(&other.hops()))
            .then_with(|| topo.name(self.server).cmp(topo.name(other.server)))
    }
}

impl Controller {
    /// 处理到达 `ingress` 的请求，返回选中的路径；不修改任何 `used`。
    #[tracing::instrument(skip(self), fields(ctrl = ?self.sw()))]
    pub fn handle_request(
        &self,
        ingress: &str,
        size: f64,
        duration: f64,
        now: SimTime,
    ) -> Result<Route> {
        let sw = self.graph().require_kind(ingress, NodeKind::Switch)?;
        self.route_at(sw, size)
    }

    pub(crate) fn route_at(&self, ingress: NodeId, size: f64) -> Result<Route> {
        let topo = self.graph();

        if self.greedy() {
            if let Some(local) = self.best_local(ingress, size) {
                if local.bottleneck <= self.greedylimit() {
                    debug!(
                        server = topo.name(local.server),
                        util = local.bottleneck,
                        greedylimit = self.greedylimit(),
                        "🏠 本地服务器未超阈值，直接选用"
                    );
                    return Ok(local);
                }
                trace!(util = local.bottleneck, "本地服务器超出阈值，转入全局比较");
            }
        }

        let mut best: Option<Route> = None;
        for &srv in self.srv_ids() {
            let Some(route) = least_loaded_path(topo, srv, ingress, size) else {
                trace!(server = topo.name(srv), "服务器不可达");
                continue;
            };
            trace!(
                server = topo.name(srv),
                bottleneck = route.bottleneck,
                hops = route.hops(),
                "候选路径"
            );
            let better = match &best {
                None => true,
                Some(cur) => route.cmp_with(cur, topo) == Ordering::Less,
            };
            if better {
                best = Some(route);
            }
        }

        match best {
            Some(route) => {
                debug!(
                    server = topo.name(route.server),
                    bottleneck = route.bottleneck,
                    hops = route.hops(),
                    "✅ 选中路径"
                );
                Ok(route)
            }
            None => {
                debug!(ingress = topo.name(ingress), "❌ 无可达服务器");
                Err(Error::NoPath {
                    switch: topo.name(ingress).to_string(),
                })
            }
        }
    }

    /// 直连入口交换机的已知服务器中接纳后利用率最低的一个。
    fn best_local(&self, ingress: NodeId, size: f64) -> Option<Route> {
        let topo = self.graph();
        let mut best: Option<Route> = None;
        for &srv in self.srv_ids() {
            let Some(e) = topo.edge_between(srv, ingress) else {
                continue;
            };
            let route = Route {
                server: srv,
                nodes: vec![srv, ingress],
                edges: vec![e],
                bottleneck: topo.attrs(e).utilization_with(size),
            };
            let better = match &best {
                None => true,
                Some(cur) => route.cmp_with(cur, topo) == Ordering::Less,
            };
            if better {
                best = Some(route);
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

// BinaryHeap 是 max-heap；我们需要最小代价优先，因此反向比较。
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.cost.total_cmp(&other.cost) {
            Ordering::Equal => self.node.cmp(&other.node),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// 只有源节点可以是服务器，中继必须是交换机。
fn relays(topo: &Topology, src: NodeId, node: NodeId) -> bool {
    node == src || topo.node(node).is_switch()
}

/// 从 `src` 到 `dst` 的最小瓶颈路径，同瓶颈下取最少跳。
fn least_loaded_path(topo: &Topology, src: NodeId, dst: NodeId, size: f64) -> Option<Route> {
    if src == dst {
        return None;
    }
    let n = topo.node_count();

    // 1) minimax Dijkstra：best[v] 为到 v 的最小瓶颈
    let mut best = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();
    best[src.0] = f64::NEG_INFINITY;
    heap.push(Frontier {
        cost: f64::NEG_INFINITY,
        node: src,
    });
    while let Some(Frontier { cost, node }) = heap.pop() {
        if done[node.0] {
            continue;
        }
        done[node.0] = true;
        if node == dst {
            break;
        }
        if !relays(topo, src, node) {
            continue;
        }
        for &e in topo.out_edges(node) {
            let (_, next) = topo.endpoints(e);
            let c = cost.max(topo.attrs(e).utilization_with(size));
            if c < best[next.0] {
                best[next.0] = c;
                heap.push(Frontier { cost: c, node: next });
            }
        }
    }
    let bound = best[dst.0];
    if bound == f64::INFINITY {
        return None;
    }

    // 2) 代价不超过 bound 的子图上做 BFS，出边按插入顺序，先到先得
    let mut prev: Vec<Option<EdgeId>> = vec![None; n];
    let mut seen = vec![false; n];
    let mut q = VecDeque::new();
    seen[src.0] = true;
    q.push_back(src);
    while let Some(node) = q.pop_front() {
        if node == dst {
            break;
        }
        if !relays(topo, src, node) {
            continue;
        }
        for &e in topo.out_edges(node) {
            let (_, next) = topo.endpoints(e);
            if seen[next.0] || topo.attrs(e).utilization_with(size) > bound {
                continue;
            }
            seen[next.0] = true;
            prev[next.0] = Some(e);
            q.push_back(next);
        }
    }

    let mut edges = Vec::new();
    let mut cur = dst;
    while cur != src {
        let e = prev[cur.0]?;
        edges.push(e);
        cur = topo.endpoints(e).0;
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(src);
    nodes.extend(edges.iter().map(|&e| topo.endpoints(e).1));
    let bottleneck = edges
        .iter()
        .map(|&e| topo.attrs(e).utilization_with(size))
        .fold(f64::NEG_INFINITY, f64::max);

    Some(Route {
        server: src,
        nodes,
        edges,
        bottleneck,
    })
}

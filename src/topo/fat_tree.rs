//! Fat-tree 拓扑构建
//!
//! 交换机之间双向连接；每台服务器以一条 server -> edge 的链路接入。

use crate::error::Result;
use crate::graph::{NodeId, Topology};

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
    pub server_capacity: f64,
    pub fabric_capacity: f64,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self {
            k: 4,
            server_capacity: 100.0,
            fabric_capacity: 100.0,
        }
    }
}

/// 各层节点 id，按 (pod, 下标) 排列
#[derive(Debug, Clone)]
pub struct FatTreeLayout {
    pub k: usize,
    pub servers: Vec<NodeId>,
    pub edge_switches: Vec<NodeId>,
    pub agg_switches: Vec<NodeId>,
    pub core_switches: Vec<NodeId>,
}

impl FatTreeLayout {
    fn half(&self) -> usize {
        self.k / 2
    }

    pub fn server(&self, pod: usize, edge: usize, server: usize) -> NodeId {
        let half = self.half();
        self.servers[(pod * half + edge) * half + server]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        self.edge_switches[pod * self.half() + edge]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        self.agg_switches[pod * self.half() + agg]
    }

    pub fn core(&self, group: usize, index: usize) -> NodeId {
        self.core_switches[group * self.half() + index]
    }
}

/// 构建 k 叉 fat-tree（k 为 >= 2 的偶数，否则返回配置错误）。
pub fn build_fat_tree(opts: &FatTreeOpts) -> Result<(Topology, FatTreeLayout)> {
    let k = opts.k;
    if k < 2 || k % 2 != 0 {
        return Err(crate::error::Error::Config(format!(
            "fat-tree k must be even and >= 2, got {k}"
        )));
    }

    let half = k / 2;
    let mut g = Topology::new();

    let mut core_switches = Vec::with_capacity(half * half);
    for group in 0..half {
        for index in 0..half {
            core_switches.push(g.add_switch(format!("c{group}_{index}"))?);
        }
    }

    let mut servers = Vec::with_capacity(k * half * half);
    let mut edge_switches = Vec::with_capacity(k * half);
    let mut agg_switches = Vec::with_capacity(k * half);

    for pod in 0..k {
        let edges = (0..half)
            .map(|e| g.add_switch(format!("p{pod}_e{e}")))
            .collect::<Result<Vec<_>>>()?;
        let aggs = (0..half)
            .map(|a| g.add_switch(format!("p{pod}_a{a}")))
            .collect::<Result<Vec<_>>>()?;

        for (edge_idx, &edge_id) in edges.iter().enumerate() {
            for s in 0..half {
                let server = g.add_server(format!("s{pod}_{edge_idx}_{s}"))?;
                g.connect(server, edge_id, opts.server_capacity)?;
                servers.push(server);
            }
        }

        for &edge_id in &edges {
            for &agg_id in &aggs {
                g.connect(edge_id, agg_id, opts.fabric_capacity)?;
                g.connect(agg_id, edge_id, opts.fabric_capacity)?;
            }
        }

        for (agg_idx, &agg_id) in aggs.iter().enumerate() {
            for index in 0..half {
                let core_id = core_switches[agg_idx * half + index];
                g.connect(agg_id, core_id, opts.fabric_capacity)?;
                g.connect(core_id, agg_id, opts.fabric_capacity)?;
            }
        }

        edge_switches.extend(edges);
        agg_switches.extend(aggs);
    }

    let layout = FatTreeLayout {
        k,
        servers,
        edge_switches,
        agg_switches,
        core_switches,
    };
    Ok((g, layout))
}

//! 小型测试拓扑
//!
//! 服务器只有指向交换机的单向接入链路（流量方向为 server -> switch），
//! 交换机之间双向连接。

use crate::error::Result;
use crate::graph::Topology;

/// 单交换机：s1 -> sw1, s2 -> sw1
pub fn one_switch() -> Result<Topology> {
    let mut g = Topology::new();
    let sw1 = g.add_switch("sw1")?;
    let s1 = g.add_server("s1")?;
    let s2 = g.add_server("s2")?;
    g.connect(s1, sw1, 100.0)?;
    g.connect(s2, sw1, 100.0)?;
    Ok(g)
}

fn two_switch_with(server_cap: f64, cross_cap: f64) -> Result<Topology> {
    let mut g = Topology::new();
    let sw1 = g.add_switch("sw1")?;
    let sw2 = g.add_switch("sw2")?;
    let s1 = g.add_server("s1")?;
    let s2 = g.add_server("s2")?;
    g.connect(s1, sw1, server_cap)?;
    // sw1 <-> sw2
    g.connect(sw1, sw2, cross_cap)?;
    g.connect(sw2, sw1, cross_cap)?;
    g.connect(s2, sw2, server_cap)?;
    Ok(g)
}

/// 双交换机：s1 -> sw1 <-> sw2 <- s2，交换机间链路足够宽
pub fn two_switch() -> Result<Topology> {
    two_switch_with(100.0, 1001.0)
}

/// 双交换机，交换机间链路是瓶颈
pub fn two_switch_narrow() -> Result<Topology> {
    two_switch_with(101.0, 10.0)
}

/// 三交换机直线：sw1 <-> sw2 <-> sw3，每个交换机挂一台服务器
pub fn three_switch() -> Result<Topology> {
    let mut g = Topology::new();
    let sw = ["sw1", "sw2", "sw3"]
        .into_iter()
        .map(|n| g.add_switch(n))
        .collect::<Result<Vec<_>>>()?;
    let srv = ["s1", "s2", "s3"]
        .into_iter()
        .map(|n| g.add_server(n))
        .collect::<Result<Vec<_>>>()?;

    g.connect(srv[0], sw[0], 100.0)?;
    g.connect(sw[0], sw[1], 50.0)?;
    g.connect(sw[1], sw[0], 50.0)?;
    g.connect(sw[1], sw[2], 50.0)?;
    g.connect(sw[2], sw[1], 50.0)?;
    g.connect(srv[1], sw[1], 100.0)?;
    g.connect(srv[2], sw[2], 100.0)?;
    Ok(g)
}

/// 四交换机直线，sw1 下挂两台服务器、sw2 下没有服务器，用于考察本地优先策略。
pub fn greedy_line() -> Result<Topology> {
    let mut g = Topology::new();
    for name in ["sw1", "sw2", "sw3", "sw4"] {
        g.add_switch(name)?;
    }
    for name in ["s1a", "s1b", "s3", "s4"] {
        g.add_server(name)?;
    }

    g.connect_named("s1a", "sw1", 100.0)?;
    g.connect_named("s1b", "sw1", 100.0)?;
    for (a, b) in [("sw1", "sw2"), ("sw2", "sw3"), ("sw3", "sw4")] {
        g.connect_named(a, b, 50.0)?;
        g.connect_named(b, a, 50.0)?;
    }
    g.connect_named("s3", "sw3", 100.0)?;
    g.connect_named("s4", "sw4", 100.0)?;
    Ok(g)
}

use super::two_ctrls;
use crate::ctrl::{Controller, CtrlOpts};
use crate::engine::LinkBalancerSim;
use crate::error::Error;
use crate::graph::{EdgeId, NodeKind};
use crate::sim::Request;
use crate::topo::{one_switch, three_switch, two_switch};
use std::collections::HashSet;

#[test]
fn ctrl_learns_its_links() {
    let sim = LinkBalancerSim::new(two_switch().expect("topo"), two_ctrls()).expect("sim");
    let a = sim.ctrl(0).expect("a");
    let b = sim.ctrl(1).expect("b");

    assert_eq!(
        a.mylinks_named(),
        vec![("sw1", "sw2"), ("s1", "sw1"), ("sw2", "sw1")]
    );
    assert_eq!(
        b.mylinks_named(),
        vec![("sw2", "sw1"), ("sw1", "sw2"), ("s2", "sw2")]
    );
    assert!(a.governs(EdgeId(0)));
    assert!(!a.governs(EdgeId(3)));
}

#[test]
fn mylinks_is_exactly_the_incident_edge_set() {
    let topo = three_switch().expect("topo");
    let mut ctrl = Controller::new(CtrlOpts::new(["sw1", "sw2"], ["s1"]));
    ctrl.attach(&topo).expect("attach");

    let sw: HashSet<_> = ["sw1", "sw2"]
        .iter()
        .map(|n| topo.id(n).expect("switch"))
        .collect();
    let expected: HashSet<EdgeId> = topo
        .edge_ids()
        .filter(|&e| {
            let (u, v) = topo.endpoints(e);
            sw.contains(&u) || sw.contains(&v)
        })
        .collect();
    let got: HashSet<EdgeId> = ctrl.mylinks().iter().copied().collect();

    // a link between two owned switches is listed once
    assert_eq!(ctrl.mylinks().len(), got.len());
    assert_eq!(got, expected);
    assert!(!got.contains(&topo.edge_named("s3", "sw3").expect("s3->sw3")));
}

#[test]
fn unattached_ctrl_has_empty_view() {
    let ctrl = Controller::new(CtrlOpts::new(["sw1"], ["s1"]));
    assert!(ctrl.mylinks().is_empty());
    assert_eq!(ctrl.graph().edge_count(), 0);
    assert!(!ctrl.governs(EdgeId(0)));
    assert!(!ctrl.greedy());
    assert_eq!(ctrl.greedylimit(), 1.0);
}

#[test]
fn attach_validates_switch_and_server_names() {
    let topo = two_switch().expect("topo");

    let mut ctrl = Controller::new(CtrlOpts::new(["sw9"], ["s1"]));
    assert!(matches!(
        ctrl.attach(&topo),
        Err(Error::UnknownNode { name }) if name == "sw9"
    ));

    let mut ctrl = Controller::new(CtrlOpts::new(["s1"], ["s2"]));
    assert!(matches!(
        ctrl.attach(&topo),
        Err(Error::WrongKind { expected: NodeKind::Switch, .. })
    ));

    let mut ctrl = Controller::new(CtrlOpts::new(["sw1"], ["sw2"]));
    assert!(matches!(
        ctrl.attach(&topo),
        Err(Error::WrongKind { expected: NodeKind::Server, .. })
    ));

    assert!(LinkBalancerSim::new(topo, vec![Controller::new(CtrlOpts::new(["sw9"], ["s1"]))]).is_err());
}

#[test]
fn ctrl_view_is_a_private_copy() {
    let mut sim = LinkBalancerSim::new(two_switch().expect("topo"), two_ctrls()).expect("sim");
    sim.ctrl_mut(0)
        .expect("a")
        .graph_mut()
        .link_mut("s1", "sw1")
        .expect("link")
        .used = 95.0;

    assert_eq!(sim.graph().link("s1", "sw1").expect("link").used, 0.0);
    let b = sim.ctrl(1).expect("b");
    assert_eq!(b.graph().link("s1", "sw1").expect("link").used, 0.0);
}

#[test]
fn update_ctrl_state() {
    let mut workload: Vec<Request> = (0..10)
        .map(|t| Request::new(t as f64, "sw1", 1.0, 2.0))
        .collect();
    // a final arrival at time 20 flushes out any remaining active flows
    workload.push(Request::new(20.0, "sw1", 0.0, 1.0));

    let ctrls = vec![Controller::new(CtrlOpts::new(["sw1"], ["s1", "s2"]))];
    let mut sim = LinkBalancerSim::new(one_switch().expect("topo"), ctrls).expect("sim");
    sim.run(&workload).expect("run");

    let ctrl = sim.ctrl(0).expect("ctrl");
    assert_eq!(ctrl.graph().snapshot(), sim.graph().snapshot());
    for e in sim.graph().edge_ids() {
        assert_eq!(sim.graph().used(e), 0.0);
    }
}

mod controller;
mod experiment;
mod graph;
mod simulator;

use crate::ctrl::{Controller, CtrlOpts};

/// 两个控制器：a 管 sw1，b 管 sw2，都知道 s1/s2
fn two_ctrls() -> Vec<Controller> {
    vec![
        Controller::new(CtrlOpts::new(["sw1"], ["s1", "s2"])),
        Controller::new(CtrlOpts::new(["sw2"], ["s1", "s2"])),
    ]
}

fn two_greedy_ctrls(greedylimit: f64) -> Vec<Controller> {
    vec![
        Controller::new(CtrlOpts::new(["sw1"], ["s1", "s2"]).greedy(greedylimit)),
        Controller::new(CtrlOpts::new(["sw2"], ["s1", "s2"]).greedy(greedylimit)),
    ]
}

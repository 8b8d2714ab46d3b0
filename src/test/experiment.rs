use crate::error::Error;
use crate::experiment::{
    ExperimentConfig, SyncPlan, TopologyConfig, WorkloadConfig, run_experiment, unit_workload,
};
use crate::sim::Request;

fn two_switch_experiment(sync: Option<f64>) -> ExperimentConfig {
    let raw = r#"
    {
        "name": "two-switch",
        "topology": { "kind": "two_switch" },
        "controllers": [
            { "sw": ["sw1"], "srv": ["s1", "s2"] },
            { "sw": ["sw2"], "srv": ["s1", "s2"], "greedy": true, "greedylimit": 0.5 }
        ],
        "workload": {
            "kind": "unit",
            "switches": ["sw1", "sw2"],
            "size": 5,
            "duration": 3,
            "numreqs": 12,
            "flush_at": 30
        }
    }
    "#;
    let mut cfg = ExperimentConfig::from_json(raw).expect("parse experiment");
    cfg.sync = sync.map(|period| SyncPlan { period });
    cfg
}

#[test]
fn experiment_parses_with_controller_defaults() {
    let cfg = two_switch_experiment(None);
    assert_eq!(cfg.name.as_deref(), Some("two-switch"));
    assert!(matches!(cfg.topology, TopologyConfig::TwoSwitch));
    assert_eq!(cfg.controllers.len(), 2);
    assert!(!cfg.controllers[0].greedy);
    assert_eq!(cfg.controllers[0].greedylimit, 1.0);
    assert!(cfg.controllers[1].greedy);
    assert_eq!(cfg.controllers[1].greedylimit, 0.5);
    assert!(cfg.sync.is_none());
}

#[test]
fn unit_workload_alternates_switches_and_appends_flush() {
    let switches = vec!["sw1".to_string(), "sw2".to_string()];
    let reqs = unit_workload(&switches, 1.0, 2.0, 3).expect("workload");
    assert_eq!(
        reqs,
        vec![
            Request::new(0.0, "sw1", 1.0, 2.0),
            Request::new(1.0, "sw2", 1.0, 2.0),
            Request::new(2.0, "sw1", 1.0, 2.0),
        ]
    );
    assert!(matches!(unit_workload(&[], 1.0, 1.0, 1), Err(Error::Config(_))));

    let cfg = two_switch_experiment(None);
    let reqs = cfg.workload.requests().expect("requests");
    assert_eq!(reqs.len(), 13);
    assert_eq!(reqs[12], Request::new(30.0, "sw1", 0.0, 1.0));
}

#[test]
fn run_without_sync_plan_never_syncs() {
    let report = run_experiment(&two_switch_experiment(None), None).expect("run");
    assert_eq!(report.syncs, 0);
    assert_eq!(report.stats.arrivals, 13);
    assert_eq!(report.stats.admitted, 13);
    assert_eq!(report.stats.departures, 13);
    assert_eq!(report.now, 31.0);
    assert!(report.ground_truth.iter().all(|l| l.used == 0.0));
}

#[test]
fn sync_plan_syncs_every_period_while_events_remain() {
    let report = run_experiment(&two_switch_experiment(Some(10.0)), None).expect("run");
    // rounds at 10, 20, 30 and 40 (the flush departs at 31), two ordered pairs each
    assert_eq!(report.syncs, 8);
    assert_eq!(report.stats.departures, 13);
    // fully synced and drained: every view agrees with ground truth
    for view in &report.views {
        assert_eq!(view.links, report.ground_truth);
    }
}

#[test]
fn until_stops_early() {
    let report = run_experiment(&two_switch_experiment(None), Some(4.5)).expect("run");
    assert_eq!(report.now, 4.5);
    assert_eq!(report.stats.arrivals, 5);
    assert!(report.stats.departures < 5);
}

#[test]
fn bad_sync_period_is_a_config_error() {
    let cfg = two_switch_experiment(Some(0.0));
    assert!(matches!(run_experiment(&cfg, None), Err(Error::Config(_))));
}

#[test]
fn custom_topology_and_explicit_workload() {
    let raw = r#"
    {
        "topology": {
            "kind": "custom",
            "switches": ["edge"],
            "servers": ["web1", "web2"],
            "links": [
                { "from": "web1", "to": "edge", "capacity": 10 },
                { "from": "web2", "to": "edge", "capacity": 20 }
            ]
        },
        "controllers": [ { "sw": ["edge"], "srv": ["web1", "web2"] } ],
        "workload": {
            "kind": "explicit",
            "requests": [
                { "time": 0, "switch": "edge", "size": 4, "duration": 10 },
                { "time": 1, "switch": "edge", "size": 4, "duration": 10 }
            ]
        }
    }
    "#;
    let cfg = ExperimentConfig::from_json(raw).expect("parse");
    assert!(matches!(cfg.workload, WorkloadConfig::Explicit { .. }));
    let report = run_experiment(&cfg, Some(2.0)).expect("run");
    // web2: 4/20 = 0.2 < web1: 4/10; then web2 8/20 = 0.4 == web1 0.4, web1 wins on name
    let used: Vec<f64> = report.ground_truth.iter().map(|l| l.used).collect();
    assert_eq!(used, vec![4.0, 4.0]);
}

#[test]
fn fat_tree_experiment_runs() {
    let raw = r#"
    {
        "topology": { "kind": "fat_tree", "k": 4 },
        "controllers": [
            { "sw": ["p0_e0", "p0_e1"], "srv": ["s0_0_0", "s0_0_1", "s1_0_0"] },
            { "sw": ["p1_e0", "p1_e1"], "srv": ["s0_0_0", "s1_0_0", "s1_1_1"] }
        ],
        "workload": {
            "kind": "unit",
            "switches": ["p0_e1", "p1_e0"],
            "size": 10,
            "duration": 4,
            "numreqs": 20
        },
        "sync": { "period": 5 }
    }
    "#;
    let cfg = ExperimentConfig::from_json(raw).expect("parse");
    let report = run_experiment(&cfg, None).expect("run");
    assert_eq!(report.stats.admitted, 20);
    assert_eq!(report.stats.dropped, 0);
    assert!(report.syncs > 0);
    assert!(report.stats.peak_util > 0.0);
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        ExperimentConfig::from_json("{ \"topology\": 3 }"),
        Err(Error::Json(_))
    ));
}

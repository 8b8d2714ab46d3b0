use crate::error::Error;
use crate::graph::{EdgeId, NodeKind, Topology};

fn tiny() -> Topology {
    let mut g = Topology::new();
    let sw1 = g.add_switch("sw1").expect("sw1");
    let sw2 = g.add_switch("sw2").expect("sw2");
    let s1 = g.add_server("s1").expect("s1");
    g.connect(s1, sw1, 100.0).expect("s1->sw1");
    g.connect(sw1, sw2, 10.0).expect("sw1->sw2");
    g.connect(sw2, sw1, 10.0).expect("sw2->sw1");
    g
}

#[test]
fn topology_keeps_insertion_order_for_edges_and_adjacency() {
    let g = tiny();
    let sw1 = g.id("sw1").expect("sw1");

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.kind(sw1), NodeKind::Switch);
    assert_eq!(g.edge_named("s1", "sw1"), Some(EdgeId(0)));
    assert_eq!(g.edge_named("sw1", "sw2"), Some(EdgeId(1)));
    assert_eq!(g.edge_named("sw2", "s1"), None);
    assert_eq!(g.out_edges(sw1), &[EdgeId(1)]);
    assert_eq!(g.in_edges(sw1), &[EdgeId(0), EdgeId(2)]);
}

#[test]
fn topology_rejects_duplicates_and_bad_capacity() {
    let mut g = tiny();
    assert!(matches!(
        g.add_server("sw1"),
        Err(Error::DuplicateNode { name }) if name == "sw1"
    ));
    assert!(matches!(
        g.connect_named("s1", "sw1", 5.0),
        Err(Error::DuplicateLink { .. })
    ));
    assert!(matches!(
        g.connect_named("s1", "sw2", 0.0),
        Err(Error::InvalidCapacity { .. })
    ));
    assert!(matches!(
        g.connect_named("s1", "nope", 1.0),
        Err(Error::UnknownNode { name }) if name == "nope"
    ));
    assert!(matches!(
        g.require_kind("s1", NodeKind::Switch),
        Err(Error::WrongKind { expected: NodeKind::Switch, .. })
    ));
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn link_attrs_are_mutable_by_name_and_reflected_in_snapshot() {
    let mut g = tiny();
    g.link_mut("sw1", "sw2").expect("link").used = 4.0;

    let attrs = g.link("sw1", "sw2").expect("link");
    assert_eq!(attrs.used, 4.0);
    assert_eq!(attrs.utilization(), 0.4);
    assert_eq!(attrs.utilization_with(1.0), 0.5);

    let snap = g.snapshot();
    assert_eq!(snap.len(), 3);
    assert_eq!((snap[1].from.as_str(), snap[1].to.as_str()), ("sw1", "sw2"));
    assert_eq!(snap[1].used, 4.0);
    assert_eq!(snap[1].capacity, 10.0);
}

#[test]
fn same_shape_ignores_usage_but_not_structure() {
    let a = tiny();
    let mut b = a.clone();
    b.link_mut("s1", "sw1").expect("link").used = 50.0;
    assert!(a.same_shape(&b));

    let mut c = tiny();
    c.connect_named("sw2", "s1", 1.0).expect("extra link");
    assert!(!a.same_shape(&c));
    assert!(!a.same_shape(&Topology::new()));
}

use crate::error::{Error, Result};
use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DummyWorld {
    ticks: usize,
}

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

struct Push {
    id: u32,
    log: Arc<Mutex<Vec<u32>>>,
}

impl Event for Push {
    fn execute(self: Box<Self>, _sim: &mut Simulator, _world: &mut dyn World) -> Result<()> {
        let Push { id, log } = *self;
        log.lock().expect("log lock").push(id);
        Ok(())
    }
}

struct PushThenScheduleNow {
    id: u32,
    next_id: u32,
    log: Arc<Mutex<Vec<u32>>>,
}

impl Event for PushThenScheduleNow {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) -> Result<()> {
        let PushThenScheduleNow { id, next_id, log } = *self;
        log.lock().expect("log lock").push(id);
        sim.schedule(sim.now(), Push { id: next_id, log });
        Ok(())
    }
}

struct Fail;

impl Event for Fail {
    fn execute(self: Box<Self>, _sim: &mut Simulator, _world: &mut dyn World) -> Result<()> {
        Err(Error::WorldMismatch)
    }
}

fn push(id: u32, log: &Arc<Mutex<Vec<u32>>>) -> Push {
    Push {
        id,
        log: Arc::clone(log),
    }
}

#[test]
fn scheduled_events_order_by_time_then_insertion() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(10), push(1, &log));
    sim.schedule(SimTime(5), push(2, &log));
    sim.schedule(SimTime(10), push(3, &log));
    sim.schedule(SimTime(10), push(4, &log));
    assert_eq!(sim.pending(), 4);
    assert_eq!(sim.next_at(), Some(SimTime(5)));

    let mut world = DummyWorld::default();
    sim.run(&mut world).expect("run");

    assert_eq!(&*log.lock().expect("log lock"), &[2, 1, 3, 4]);
    assert_eq!(world.ticks, 4);
    assert_eq!(sim.processed(), 4);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn event_scheduled_at_same_time_inside_event_runs_after_current_event() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime::ZERO,
        PushThenScheduleNow {
            id: 1,
            next_id: 2,
            log: Arc::clone(&log),
        },
    );
    sim.schedule(SimTime::ZERO, push(3, &log));

    let mut world = DummyWorld::default();
    sim.run(&mut world).expect("run");

    assert_eq!(&*log.lock().expect("log lock"), &[1, 3, 2]);
    assert_eq!(world.ticks, 3);
}

#[test]
fn run_until_is_inclusive_and_advances_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(5), push(1, &log));
    sim.schedule(SimTime(10), push(2, &log));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime(5), &mut world).expect("run_until");
    assert_eq!(&*log.lock().expect("log lock"), &[1]);
    assert_eq!(sim.now(), SimTime(5));

    sim.run_until(SimTime(7), &mut world).expect("run_until");
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(world.ticks, 1);

    sim.run(&mut world).expect("run");
    assert_eq!(&*log.lock().expect("log lock"), &[1, 2]);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn failing_event_aborts_run_and_leaves_later_events_queued() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(1), push(1, &log));
    sim.schedule(SimTime(2), Fail);
    sim.schedule(SimTime(3), push(2, &log));

    let mut world = DummyWorld::default();
    let err = sim.run(&mut world).expect_err("second event fails");
    assert!(matches!(err, Error::WorldMismatch));
    assert_eq!(&*log.lock().expect("log lock"), &[1]);
    assert_eq!(sim.now(), SimTime(2));
    assert_eq!(sim.pending(), 1);
    // tick is skipped for the failed event
    assert_eq!(world.ticks, 1);
}

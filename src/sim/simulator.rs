//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::queued::QueuedEvent;
use super::time::SimTime;
use super::world::World;
use crate::error::Result;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace, warn};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    processed: u64,
    q: BinaryHeap<QueuedEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行的事件总数
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// 下一个事件的时间
    pub fn next_at(&self) -> Option<SimTime> {
        self.q.peek().map(|item| item.at)
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(QueuedEvent {
            at,
            seq,
            ev: Box::new(ev),
        });
    }

    /// 运行直到事件队列为空或到达 `until`（含 `until` 时刻的事件）。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) -> Result<()> {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            self.step(item, world)?;
        }
        self.now = self.now.max(until);
        Ok(())
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> Result<()> {
        info!(queue_size = self.q.len(), "▶️  开始运行仿真");

        let start = self.processed;
        while let Some(item) = self.q.pop() {
            self.step(item, world)?;
        }

        info!(
            total_events = self.processed - start,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
        Ok(())
    }

    fn step(&mut self, item: QueuedEvent, world: &mut dyn World) -> Result<()> {
        self.now = item.at;
        self.processed += 1;
        debug!(
            event_num = self.processed,
            now = ?self.now,
            seq = item.seq,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        if let Err(err) = item.ev.execute(self, world) {
            warn!(error = %err, now = ?self.now, "事件执行失败，中止仿真");
            return Err(err);
        }
        world.on_tick(self);
        Ok(())
    }
}

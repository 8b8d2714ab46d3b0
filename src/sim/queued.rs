//! 队列中的事件
//!
//! 事件队列按 (时间, 序号) 构成严格全序：同一时刻的事件按入队顺序 FIFO 执行。

use super::event::Event;
use super::time::SimTime;
use std::cmp::Ordering;

pub(crate) struct QueuedEvent {
    pub(crate) at: SimTime,
    pub(crate) seq: u64,
    pub(crate) ev: Box<dyn Event>,
}

// BinaryHeap 是 max-heap；这里反向比较，使最早的事件位于堆顶。
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        (self.at, self.seq) == (other.at, other.seq)
    }
}

impl Eq for QueuedEvent {}

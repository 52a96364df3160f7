//! Pending-write queue and the flush guard
//!
//! The queue is a FIFO of [`PendingWrite`]s shared by a logger and all of its
//! scoped derivatives. The guard tracks whether a flush cycle is active:
//!
//! ```text
//! Idle --(first request)--> Active --(queue drained, under lock)--> Idle
//! ```
//!
//! The transition back to Idle happens while the queue lock is held, so a
//! concurrent push is either observed by the running cycle or finds the guard
//! Idle and starts a new one.

use super::log_entry::LogEntry;
use super::output::Output;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One deferred rendering instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Entry(Arc<LogEntry>),
    Title(String),
    Blank(usize),
    Clear,
}

impl WriteOp {
    /// The entry carried by this op, if any
    pub fn entry(&self) -> Option<&Arc<LogEntry>> {
        match self {
            WriteOp::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WriteOp::Entry(_) => "entry",
            WriteOp::Title(_) => "title",
            WriteOp::Blank(_) => "blank",
            WriteOp::Clear => "clear",
        }
    }
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Entry(entry) => write!(f, "entry({})", entry),
            WriteOp::Title(title) => write!(f, "title({})", title),
            WriteOp::Blank(count) => write!(f, "blank({})", count),
            WriteOp::Clear => f.write_str("clear"),
        }
    }
}

/// A [`WriteOp`] bound to the output that will execute it.
pub struct PendingWrite {
    pub(crate) output: Arc<Output>,
    pub(crate) op: WriteOp,
    /// Scope of the logger that queued the write
    pub(crate) scope: Option<String>,
}

impl PendingWrite {
    pub fn output_name(&self) -> &str {
        self.output.name()
    }

    pub fn op(&self) -> &WriteOp {
        &self.op
    }
}

/// Snapshot of one queued write, for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedWrite {
    pub output: String,
    pub op: WriteOp,
}

/// Result of offering a write to the queue
#[derive(Debug)]
pub(crate) enum Enqueued {
    Accepted,
    Rejected(PendingWrite),
}

pub(crate) struct WriteQueue {
    items: Mutex<VecDeque<PendingWrite>>,
    capacity: Option<usize>,
    flushing: AtomicBool,
    idle: Condvar,
}

impl WriteQueue {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity,
            flushing: AtomicBool::new(false),
            idle: Condvar::new(),
        }
    }

    /// O(1) append, rejecting the write when the queue is at capacity
    pub(crate) fn push(&self, write: PendingWrite) -> Enqueued {
        let mut items = self.items.lock();
        if let Some(capacity) = self.capacity {
            if items.len() >= capacity {
                return Enqueued::Rejected(write);
            }
        }
        items.push_back(write);
        Enqueued::Accepted
    }

    /// Next write of the active cycle. Returns `None` and marks the guard Idle
    /// when the queue is empty.
    pub(crate) fn pop_or_idle(&self) -> Option<PendingWrite> {
        let mut items = self.items.lock();
        match items.pop_front() {
            Some(write) => Some(write),
            None => {
                self.flushing.store(false, Ordering::Release);
                self.idle.notify_all();
                None
            }
        }
    }

    /// Idle -> Active. `false` when a cycle is already active.
    pub(crate) fn try_activate(&self) -> bool {
        self.flushing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.flushing.load(Ordering::Acquire)
    }

    /// Block until the queue is empty and no cycle is active.
    /// Returns `false` on timeout.
    pub(crate) fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut items = self.items.lock();
        while !items.is_empty() || self.is_active() {
            if self.idle.wait_until(&mut items, deadline).timed_out() {
                return items.is_empty() && !self.is_active();
            }
        }
        true
    }

    /// Remove everything still queued, without running it
    pub(crate) fn take_all(&self) -> Vec<PendingWrite> {
        self.items.lock().drain(..).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub(crate) fn snapshot(&self) -> Vec<QueuedWrite> {
        self.items
            .lock()
            .iter()
            .map(|w| QueuedWrite {
                output: w.output.name().to_string(),
                op: w.op.clone(),
            })
            .collect()
    }
}

impl fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingWrite")
            .field("output", &self.output.name())
            .field("op", &self.op)
            .field("scope", &self.scope)
            .finish()
    }
}

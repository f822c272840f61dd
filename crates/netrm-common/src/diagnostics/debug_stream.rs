//! Queue-backed trace listener

use super::{TraceListener, TraceSource};
use crossbeam::queue::SegQueue;
use std::sync::Arc;

/// Unbounded MPMC queue of captured trace messages
pub type TraceQueue = Arc<SegQueue<String>>;

/// Listener that appends every write to a shared queue.
///
/// The queue is owned by the caller; it can be drained from another thread
/// while the listener is attached.
#[derive(Debug, Clone)]
pub struct DebugStreamTraceListener {
    messages: TraceQueue,
}

impl DebugStreamTraceListener {
    /// Create listener writing into `queue`
    pub fn new(queue: TraceQueue) -> Self {
        Self { messages: queue }
    }

    /// Create a listener over `queue` and attach it to `source`
    pub fn register(source: &TraceSource, queue: TraceQueue) -> Arc<Self> {
        let listener = Arc::new(Self::new(queue));
        source.attach(listener.clone());
        listener
    }

    /// Detach `listener` from `source`
    pub fn unregister(source: &TraceSource, listener: &Arc<Self>) -> bool {
        source.detach(listener)
    }

    /// The queue this listener writes into
    pub fn messages(&self) -> &TraceQueue {
        &self.messages
    }

    /// Pop everything currently queued, oldest first
    pub fn drain(&self) -> Vec<String> {
        std::iter::from_fn(|| self.messages.pop()).collect()
    }
}

impl TraceListener for DebugStreamTraceListener {
    fn write(&self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn write_line(&self, message: &str) {
        self.write(&format!("{message}\n"));
    }
}

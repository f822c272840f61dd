//! Diagnostics plumbing
//!
//! A [`TraceSource`] is a named producer of diagnostic strings with a set of
//! attached [`TraceListener`]s. It is an ordinary value: whoever needs to emit
//! or capture diagnostics gets a handle to it (usually `Arc<TraceSource>`).
//!
//! The authentication code of the CLI emits `tracing` events; the
//! [`TraceSourceLayer`] turns those into writes on a trace source, and a
//! [`DebugStreamTraceListener`] collects them in a queue.

mod debug_stream;
mod layer;

pub use debug_stream::{DebugStreamTraceListener, TraceQueue};
pub use layer::{TraceSourceLayer, AUTH_TRACE_TARGET};

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Verbosity switch of a trace source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SourceLevel {
    /// Nothing passes
    Off = 0,
    /// Critical only
    Critical = 1,
    /// Errors and above
    Error = 2,
    /// Warnings and above
    Warning = 3,
    /// Informational and above
    Information = 4,
    /// Everything but activity tracing
    Verbose = 5,
    /// Everything
    All = 6,
}

impl SourceLevel {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Off,
            1 => Self::Critical,
            2 => Self::Error,
            3 => Self::Warning,
            4 => Self::Information,
            5 => Self::Verbose,
            _ => Self::All,
        }
    }

    /// Whether an event at `event` passes a switch set to `self`
    pub fn allows(self, event: SourceLevel) -> bool {
        event != SourceLevel::Off && event <= self
    }

    /// Upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Critical => "Critical",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Information => "Information",
            Self::Verbose => "Verbose",
            Self::All => "All",
        }
    }
}

impl From<&tracing::Level> for SourceLevel {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::INFO => Self::Information,
            _ => Self::Verbose,
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of trace output
pub trait TraceListener: Send + Sync {
    /// Write a raw message
    fn write(&self, message: &str);

    /// Write a message followed by a newline
    fn write_line(&self, message: &str) {
        self.write(&format!("{message}\n"));
    }
}

/// Named diagnostic producer with attachable listeners
pub struct TraceSource {
    name: String,
    level: AtomicU8,
    listeners: RwLock<Vec<Arc<dyn TraceListener>>>,
}

impl TraceSource {
    /// Create source with its switch off and no listeners
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: AtomicU8::new(SourceLevel::Off as u8),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Source name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current switch level
    pub fn level(&self) -> SourceLevel {
        SourceLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Set switch level
    pub fn set_level(&self, level: SourceLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Attach a listener and open the switch fully
    pub fn attach(&self, listener: Arc<dyn TraceListener>) {
        self.listeners.write().push(listener);
        self.set_level(SourceLevel::All);
        tracing::debug!(source = %self.name, "trace listener attached");
    }

    /// Detach a listener by identity. Returns false if it was not attached.
    pub fn detach<L>(&self, listener: &Arc<L>) -> bool
    where
        L: TraceListener + ?Sized,
    {
        let removed = {
            let mut listeners = self.listeners.write();
            let before = listeners.len();
            listeners.retain(|l| !std::ptr::addr_eq(Arc::as_ptr(l), Arc::as_ptr(listener)));
            listeners.len() != before
        };
        if removed {
            tracing::debug!(source = %self.name, "trace listener detached");
        }
        removed
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Forward a raw write to every listener
    pub fn write(&self, message: &str) {
        for listener in self.listeners.read().iter() {
            listener.write(message);
        }
    }

    /// Forward a line write to every listener
    pub fn write_line(&self, message: &str) {
        for listener in self.listeners.read().iter() {
            listener.write_line(message);
        }
    }

    /// Emit an event if the switch allows `level`
    pub fn trace_event(&self, level: SourceLevel, message: &str) {
        if self.level().allows(level) {
            self.write_line(message);
        }
    }
}

impl fmt::Debug for TraceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSource")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

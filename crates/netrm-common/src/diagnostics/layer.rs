//! Bridge from `tracing` events to a [`TraceSource`]

use super::{SourceLevel, TraceSource};
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Target prefix used by authentication code
pub const AUTH_TRACE_TARGET: &str = "netrm::auth";

/// Layer forwarding events under a target prefix into a trace source
#[derive(Debug, Clone)]
pub struct TraceSourceLayer {
    source: Arc<TraceSource>,
    target_prefix: String,
}

impl TraceSourceLayer {
    /// Forward events under the [`AUTH_TRACE_TARGET`] module path
    pub fn new(source: Arc<TraceSource>) -> Self {
        Self::with_target(source, AUTH_TRACE_TARGET)
    }

    /// Forward events whose target is `target_prefix` or one of its
    /// `::` submodules
    pub fn with_target(source: Arc<TraceSource>, target_prefix: impl Into<String>) -> Self {
        Self {
            source,
            target_prefix: target_prefix.into(),
        }
    }

    fn wants(&self, target: &str) -> bool {
        target
            .strip_prefix(self.target_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl<S> Layer<S> for TraceSourceLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.wants(metadata.target()) {
            return;
        }
        let level = SourceLevel::from(metadata.level());
        if !self.source.level().allows(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.source.trace_event(level, &visitor.finish());
    }
}

/// Renders `message` followed by ` key=value` for other fields
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message;
        out.push_str(&self.fields);
        out
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in apkget
//!
//! Library crates never print. They emit typed events through an
//! explicit `EventSender`; the front ends drain the receiver and forward
//! each event to `tracing` (see [`logging`]).

pub mod events;
pub mod logging;

pub use events::{AppEvent, GeneralEvent, ResolverEvent, TransferEvent};

use apkget_types::{ResolutionStrategy, Url};
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout apkget
///
/// Works the same whether you hold a raw `EventSender` or a struct that
/// carries one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }

    /// Emit a resolution completed event
    fn emit_resolved(
        &self,
        package: impl Into<String>,
        url: &Url,
        strategy: ResolutionStrategy,
        source_page: impl Into<String>,
    ) {
        self.emit(AppEvent::Resolver(ResolverEvent::Resolved {
            package: package.into(),
            url: url.to_string(),
            strategy,
            source_page: source_page.into(),
        }));
    }

    /// Emit a transfer started event
    fn emit_transfer_started(
        &self,
        url: impl Into<String>,
        filename: impl Into<String>,
        content_length: Option<u64>,
    ) {
        self.emit(AppEvent::Transfer(TransferEvent::Started {
            url: url.into(),
            filename: filename.into(),
            content_length,
        }));
    }

    /// Emit a transfer completed event
    fn emit_transfer_completed(&self, url: impl Into<String>, bytes: u64, path: Option<String>) {
        self.emit(AppEvent::Transfer(TransferEvent::Completed {
            url: url.into(),
            bytes,
            path,
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

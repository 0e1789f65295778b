//! Typed event dispatch.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::event::{EventKind, WebhookEvent};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type Handler<E> = Box<dyn Fn(WebhookEvent) -> BoxFuture<Result<(), E>> + Send + Sync>;

/// What a dispatch call did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler ran to completion.
    Handled,
    /// No handler is registered for the event's kind, or the kind is
    /// unknown to this SDK. Ignoring is deliberate: new provider-side
    /// event types may arrive before the caller upgrades its handler set.
    Ignored,
}

/// Routes decoded events to caller-supplied handlers.
///
/// One optional handler slot per known [`EventKind`]; exactly one handler
/// runs per dispatched event, and events with no matching slot are
/// ignored. Handler failures propagate unchanged: the router never wraps,
/// swallows, or retries them.
///
/// # Type Parameters
///
/// * `E` - The error type shared by all registered handlers.
///
/// # Example
///
/// ```
/// use singlekey::webhook::{DispatchOutcome, EventKind, EventRouter};
///
/// # async fn example(event: singlekey::webhook::WebhookEvent) -> Result<(), String> {
/// let router: EventRouter<String> = EventRouter::new()
///     .on(EventKind::ScreeningCompleted, |event| async move {
///         println!("report ready: {}", event.webhook_id);
///         Ok(())
///     })
///     .on(EventKind::ScreeningFailed, |event| async move {
///         eprintln!("screening failed: {}", event.webhook_id);
///         Ok(())
///     });
///
/// let outcome = router.dispatch(event).await?;
/// assert!(matches!(outcome, DispatchOutcome::Handled | DispatchOutcome::Ignored));
/// # Ok(())
/// # }
/// ```
pub struct EventRouter<E> {
    handlers: [Option<Handler<E>>; EventKind::COUNT],
}

impl<E> EventRouter<E> {
    /// Creates a router with no handlers registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|_| None),
        }
    }

    /// Registers the handler for one event kind, replacing any previous
    /// handler for that kind.
    #[must_use]
    pub fn on<F, Fut>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(WebhookEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        self.handlers[kind.index()] = Some(Box::new(move |event| Box::pin(handler(event))));
        self
    }

    /// Returns true when a handler is registered for the given kind.
    #[must_use]
    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers[kind.index()].is_some()
    }

    /// Dispatches one event to its registered handler.
    ///
    /// Awaits the handler to completion before returning. Events of
    /// unknown kind, or of a kind with no registered handler, return
    /// [`DispatchOutcome::Ignored`] without error.
    ///
    /// # Errors
    ///
    /// Whatever the handler returned, unchanged and unwrapped.
    pub async fn dispatch(&self, event: WebhookEvent) -> Result<DispatchOutcome, E> {
        let Some(kind) = event.kind() else {
            return Ok(DispatchOutcome::Ignored);
        };

        match &self.handlers[kind.index()] {
            Some(handler) => handler(event).await.map(|()| DispatchOutcome::Handled),
            None => Ok(DispatchOutcome::Ignored),
        }
    }
}

impl<E> Default for EventRouter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventRouter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = EventKind::ALL
            .into_iter()
            .filter(|kind| self.handles(*kind))
            .map(EventKind::as_str)
            .collect();
        f.debug_struct("EventRouter")
            .field("handlers", &registered)
            .finish()
    }
}

//! Listener contract for the notification bus.

use std::sync::Arc;

use boarding_core::result::AppResult;

use super::event::NotificationEvent;

/// Receives notifications delivered by a [`NotificationBus`](super::bus::NotificationBus).
///
/// Each call gets its own copy of the event. Returning `Err` (or panicking)
/// is logged by the bus and does not affect other listeners.
pub trait NotificationListener: Send + Sync {
    /// Handle one delivered event.
    fn on_notification(&self, event: NotificationEvent) -> AppResult<()>;
}

/// Shared listener handle. The `Arc` allocation is the subscription identity.
pub type Listener = Arc<dyn NotificationListener>;

struct FnListener<F>(F);

impl<F> NotificationListener for FnListener<F>
where
    F: Fn(NotificationEvent) -> AppResult<()> + Send + Sync,
{
    fn on_notification(&self, event: NotificationEvent) -> AppResult<()> {
        (self.0)(event)
    }
}

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(NotificationEvent) -> AppResult<()> + Send + Sync + 'static,
{
    Arc::new(FnListener(f))
}

/// Whether two handles refer to the same listener allocation.
pub(crate) fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

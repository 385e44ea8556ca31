use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Lifecycle notifications from the messaging session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new pairing code to show the operator (rotates until scanned)
    Qr(String),

    /// Pairing accepted, session is loading
    Authenticated,

    /// Session can serve requests
    Ready,

    /// The session refused the stored or scanned credentials
    AuthFailure(String),

    /// The session dropped after authenticating
    Disconnected(String),
}

/// Fan-out of [`SessionEvent`]s plus a readiness flag that is set once.
///
/// Subscribe before starting the session so no pairing code is missed.
#[derive(Clone)]
pub struct SessionEvents {
    inner: Arc<SessionEventsInner>,
}

struct SessionEventsInner {
    broadcast_tx: broadcast::Sender<SessionEvent>,
    ready: AtomicBool,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(SessionEventsInner {
                broadcast_tx,
                ready: AtomicBool::new(false),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.broadcast_tx.subscribe()
    }

    /// Deliver an event to all subscribers. `Ready` also sets the readiness
    /// flag; later events never clear it.
    pub fn publish(&self, event: SessionEvent) {
        if event == SessionEvent::Ready {
            self.inner.ready.store(true, Ordering::SeqCst);
        }
        let _ = self.inner.broadcast_tx.send(event);
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_events_in_order() {
        let events = SessionEvents::new();
        let mut rx = events.subscribe();

        events.publish(SessionEvent::Qr("code-1".into()));
        events.publish(SessionEvent::Authenticated);
        events.publish(SessionEvent::Ready);

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Qr("code-1".into()));
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Authenticated);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Ready);
    }

    #[test]
    fn ready_flag_flips_only_on_ready() {
        let events = SessionEvents::new();
        assert!(!events.is_ready());

        events.publish(SessionEvent::Qr("x".into()));
        events.publish(SessionEvent::Authenticated);
        assert!(!events.is_ready());

        events.publish(SessionEvent::Ready);
        assert!(events.is_ready());
    }

    #[test]
    fn readiness_is_sticky() {
        let events = SessionEvents::new();
        events.publish(SessionEvent::Ready);
        events.publish(SessionEvent::Disconnected("phone offline".into()));
        assert!(events.is_ready());
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let events = SessionEvents::new();
        events.publish(SessionEvent::AuthFailure("bad".into()));
        assert!(!events.is_ready());
    }
}

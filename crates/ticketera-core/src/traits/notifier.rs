//! Session-expired notification.

/// Told when the session can no longer be recovered.
///
/// The gateway calls this exactly once per failed refresh cycle, after the
/// stored session has been cleared. The host decides what to do (navigate to
/// a login screen, print a hint, ...).
pub trait SessionExpiredNotifier: Send + Sync {
    fn session_expired(&self);
}

impl<F> SessionExpiredNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self()
    }
}

/// A notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl SessionExpiredNotifier for NoopNotifier {
    fn session_expired(&self) {}
}

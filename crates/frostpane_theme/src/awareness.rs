//! Per-window theme awareness
//!
//! A window either follows OS theme-change notifications, or suspends
//! them while the caller drives the theme manually. The two modes are
//! never active together: activating one deactivates the other first,
//! so a stale subscription can never fight a manual override for the
//! same brushes.
//!
//! The engine does not pump OS messages itself. The embedding
//! application publishes scheme changes into [`scheme_events`] (for
//! example from winit's `WindowEvent::ThemeChanged`), and every
//! following window reacts independently; delivery order across windows
//! is unspecified.

use std::sync::OnceLock;

use frostpane_core::{ColorScheme, EventHub, Subscription};

/// Hub carrying OS color-scheme change notifications.
pub type SchemeEvents = EventHub<ColorScheme>;

static SCHEME_EVENTS: OnceLock<SchemeEvents> = OnceLock::new();

/// The process-wide scheme notification hub.
pub fn scheme_events() -> &'static SchemeEvents {
    SCHEME_EVENTS.get_or_init(SchemeEvents::new)
}

/// Reachable states of a window's awareness controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwarenessState {
    /// Neither following the OS nor waiting for a manual change.
    Inactive,
    /// Subscribed to scheme notifications.
    AutoFollowing,
    /// OS notifications suspended until an explicit theme change.
    AwaitingManualOverride,
}

/// Per-window awareness state machine.
///
/// Created with its window and torn down (unsubscribed) when the window
/// closes or awareness is explicitly disabled. Releasing a subscription
/// is the only cancellation primitive.
pub struct ThemeAwareness {
    events: SchemeEvents,
    subscription: Option<Subscription>,
    awaiting: bool,
}

impl ThemeAwareness {
    pub fn new(events: SchemeEvents) -> Self {
        Self {
            events,
            subscription: None,
            awaiting: false,
        }
    }

    pub fn state(&self) -> AwarenessState {
        if self.awaiting {
            AwarenessState::AwaitingManualOverride
        } else if self.subscription.is_some() {
            AwarenessState::AutoFollowing
        } else {
            AwarenessState::Inactive
        }
    }

    pub fn is_auto_following(&self) -> bool {
        self.state() == AwarenessState::AutoFollowing
    }

    pub fn is_awaiting_manual_override(&self) -> bool {
        self.awaiting
    }

    /// Start following scheme notifications with `callback`.
    ///
    /// The callback carries everything it reacts with (notably the
    /// backdrop type) in its closure; the owning window rebuilds the
    /// subscription whenever those captured parameters change. A manual
    /// wait in progress is cancelled first.
    pub fn follow(&mut self, callback: impl FnMut(&ColorScheme) + Send + 'static) {
        if self.awaiting {
            tracing::debug!("cancelling manual wait before auto-follow");
            self.awaiting = false;
        }
        self.unfollow();
        tracing::debug!("subscribing to scheme notifications");
        self.subscription = Some(self.events.subscribe(callback));
    }

    /// Stop following scheme notifications. Safe to call repeatedly.
    pub fn unfollow(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            tracing::debug!("releasing scheme subscription");
            subscription.release();
        }
    }

    /// Suspend auto-following and wait for an explicit theme change.
    ///
    /// While waiting, published schemes are ignored. The owning window
    /// performs the one re-application on the explicit change and then
    /// resumes whichever mode its flags request.
    pub fn begin_manual_override(&mut self) {
        if self.subscription.is_some() {
            tracing::debug!("suspending auto-follow for manual override");
            self.unfollow();
        }
        self.awaiting = true;
    }

    /// Cancel the manual wait. Safe to call repeatedly.
    pub fn end_manual_override(&mut self) {
        self.awaiting = false;
    }
}

impl Drop for ThemeAwareness {
    fn drop(&mut self) {
        self.unfollow();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn counting_callback(hits: &Arc<Mutex<u32>>) -> impl FnMut(&ColorScheme) + Send + 'static {
        let hits = Arc::clone(hits);
        move |_| *hits.lock().unwrap() += 1
    }

    #[test]
    fn follow_reacts_until_unfollowed() {
        let hub = SchemeEvents::new();
        let hits = Arc::new(Mutex::new(0));
        let mut awareness = ThemeAwareness::new(hub.clone());

        awareness.follow(counting_callback(&hits));
        assert_eq!(awareness.state(), AwarenessState::AutoFollowing);
        hub.publish(&ColorScheme::Dark);
        assert_eq!(*hits.lock().unwrap(), 1);

        awareness.unfollow();
        awareness.unfollow();
        assert_eq!(awareness.state(), AwarenessState::Inactive);
        hub.publish(&ColorScheme::Light);
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn manual_override_suspends_auto_follow() {
        let hub = SchemeEvents::new();
        let hits = Arc::new(Mutex::new(0));
        let mut awareness = ThemeAwareness::new(hub.clone());

        awareness.follow(counting_callback(&hits));
        awareness.begin_manual_override();
        assert_eq!(awareness.state(), AwarenessState::AwaitingManualOverride);
        assert_eq!(hub.subscriber_count(), 0);

        hub.publish(&ColorScheme::Dark);
        assert_eq!(*hits.lock().unwrap(), 0);

        awareness.end_manual_override();
        assert_eq!(awareness.state(), AwarenessState::Inactive);
    }

    #[test]
    fn following_cancels_a_pending_manual_wait() {
        let hub = SchemeEvents::new();
        let hits = Arc::new(Mutex::new(0));
        let mut awareness = ThemeAwareness::new(hub.clone());

        awareness.begin_manual_override();
        awareness.follow(counting_callback(&hits));
        assert_eq!(awareness.state(), AwarenessState::AutoFollowing);
        assert!(!awareness.is_awaiting_manual_override());
    }

    #[test]
    fn dropping_the_controller_unsubscribes() {
        let hub = SchemeEvents::new();
        {
            let mut awareness = ThemeAwareness::new(hub.clone());
            awareness.follow(|_| {});
            assert_eq!(hub.subscriber_count(), 1);
        }
        assert_eq!(hub.subscriber_count(), 0);
    }
}

use std::cell::RefCell;
use std::rc::Weak;

use super::hub::{Registry, SignalKind};

/// Handle to one attached listener.
///
/// Detaches on [`unsubscribe`](Self::unsubscribe) or on drop, whichever comes
/// first. Holding it never keeps the hub alive.
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    kind: SignalKind,
    id: u64,
}

impl Subscription {
    pub(super) fn new(registry: Weak<RefCell<Registry>>, kind: SignalKind, id: u64) -> Self {
        Self { registry, kind, id }
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Detaches the listener. Consumes the handle, so it runs at most once.
    pub fn unsubscribe(self) {
        drop(self);
    }

    fn detach(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if registry.borrow_mut().remove(self.kind, self.id) {
            log::trace!("{:?} listener {} detached", self.kind, self.id);
        }
        self.registry = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

/// All subscriptions of one mount, disposed as a unit.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Detaches every listener in the set.
    pub fn dispose(&mut self) {
        let n = self.subscriptions.len();
        self.subscriptions.clear();
        if n > 0 {
            log::debug!("disposed {n} host subscriptions");
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.dispose();
    }
}

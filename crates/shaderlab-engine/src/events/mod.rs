//! Host event subscriptions.
//!
//! The host owns a [`HostEvents`] hub and emits resize and pointer signals into
//! it. Consumers subscribe callbacks and get back a [`Subscription`] that
//! removes the callback when unsubscribed or dropped. A [`SubscriptionSet`]
//! groups the subscriptions of one mount so teardown detaches all of them at
//! once.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Dispatch takes each
//! callback out of its slot while it runs, so callbacks may subscribe,
//! unsubscribe, or emit without tripping a `RefCell` borrow.

mod hub;
mod subscription;

pub use hub::{HostEvents, SignalKind};
pub use subscription::{Subscription, SubscriptionSet};

//! Notification plumbing between models and presenters.
//!
//! The observable provides:
//! - Publish-subscribe with listeners invoked synchronously, in subscription
//!   order, before `notify` returns
//! - Ordered listener handles with safe unsubscription, including from
//!   inside a notification
//!
//! # Architecture
//!
//! Models own an `Observable` and republish every confirmed mutation through
//! it as an `(UpdateType, payload)` pair; the board presenter subscribes and
//! re-derives its visible set from the models on each notification.

mod observable;

pub use observable::{ListenerId, Observable};

//! Subscribers - Observer registry for store notifications
//!
//! Stores publish one event per state change. Views either register a
//! callback or poll a channel.

use crossbeam_channel::{Receiver, Sender};
use std::fmt;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Synchronous fan-out registry
pub struct Subscribers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
    channels: Vec<Sender<E>>,
}

impl<E: Clone> Subscribers<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Register a callback invoked after every state change
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Subscribe through an unbounded channel
    ///
    /// Dropping the receiver ends the subscription on the next publish.
    pub fn subscribe_channel(&mut self) -> Receiver<E> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.channels.push(tx);
        rx
    }

    /// Deliver an event to every callback, then to every live channel
    pub fn publish(&mut self, event: &E) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
        self.channels.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of active subscriptions (callbacks and channels)
    pub fn len(&self) -> usize {
        self.callbacks.len() + self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("callbacks", &self.callbacks.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callbacks_receive_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();

        let first = seen.clone();
        subs.subscribe(move |e: &u32| first.borrow_mut().push(("first", *e)));
        let second = seen.clone();
        subs.subscribe(move |e: &u32| second.borrow_mut().push(("second", *e)));

        subs.publish(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::new();

        let counter = count.clone();
        let id = subs.subscribe(move |_: &u32| *counter.borrow_mut() += 1);
        subs.publish(&1);
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.publish(&2);

        assert_eq!(*count.borrow(), 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn dropped_channel_is_pruned() {
        let mut subs: Subscribers<u32> = Subscribers::new();
        let kept = subs.subscribe_channel();
        let dropped = subs.subscribe_channel();
        assert_eq!(subs.len(), 2);

        drop(dropped);
        subs.publish(&3);

        assert_eq!(subs.len(), 1);
        assert_eq!(kept.try_recv().ok(), Some(3));
    }
}

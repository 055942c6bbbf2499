// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronous publish/subscribe notifications

use std::fmt;

/// Callback invoked when an event fires
pub type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// Handle returned by [`EventEmitter::subscribe`], used to unsubscribe
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

/// How long a subscription stays registered
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubscriptionMode {
    /// Until explicitly unsubscribed
    Persistent,
    /// Removed after its first delivery
    Once,
}

struct Subscription<T> {
    id: SubscriptionId,
    mode: SubscriptionMode,
    listener: Listener<T>,
}

/// An ordered list of subscribers for one event
///
/// Dispatch is synchronous and in registration order, to the subscribers
/// present when [`fire`](Self::fire) is called.
pub struct EventEmitter<T> {
    subscriptions: Vec<Subscription<T>>,
    next_id: u64,
}

impl<T> EventEmitter<T> {
    /// Create an emitter with no subscribers
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a persistent subscriber
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.add(SubscriptionMode::Persistent, Box::new(listener))
    }

    /// Register a subscriber that is dropped after one delivery
    pub fn once<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.add(SubscriptionMode::Once, Box::new(listener))
    }

    /// Remove a subscriber, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `value` to every current subscriber
    pub fn fire(&mut self, value: &T) {
        for subscription in &mut self.subscriptions {
            (subscription.listener)(value);
        }
        self.subscriptions
            .retain(|s| s.mode == SubscriptionMode::Persistent);
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    fn add(&mut self, mode: SubscriptionMode, listener: Listener<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, mode, listener });
        id
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribers", &self.subscriptions.len())
            .finish()
    }
}

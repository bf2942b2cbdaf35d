//! Topic-based publish/subscribe with an immediate and a queued lane.
//!
//! Topics are hierarchical strings segmented by [`TOPIC_DELIMITER`]:
//! publishing to `"MATERIAL_ADDED:MAT_STANDARD"` notifies subscribers of
//! `"MATERIAL_ADDED"` and of the full topic, shortest prefix first, so a
//! list view can watch a whole class while a detail panel watches one
//! kind. Each `(topic, owner)` pair holds exactly one callback, and a
//! publisher never receives its own message.
//!
//! [`Delivery::Immediate`] publishes run their fan-out inline;
//! [`Delivery::Queued`] publishes are buffered FIFO and delivered only
//! when [`EventBus::flush`] is invoked, which the project does once per
//! tick. That lets a whole input/render tick complete before
//! mutation-triggering callbacks run. No lock is held while callbacks
//! execute, so subscribers may publish, subscribe, or mutate stores
//! reentrantly; publishes made during a flush land in the next flush.

use parking_lot::RwLock;
use sceneloom_types::OwnerId;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Segment separator for hierarchical topics.
pub const TOPIC_DELIMITER: char = ':';

/// When a published message reaches its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Fan out synchronously, before `publish` returns. Used where
    /// deferred delivery would let dependent UI observe a stale store
    /// for a frame.
    Immediate,
    /// Buffer FIFO until the next [`EventBus::flush`].
    Queued,
}

/// A published message together with the full topic it was published to.
///
/// Subscribers at a prefix receive the full topic so they can tell which
/// narrower subject actually fired.
#[derive(Debug, Clone)]
pub struct Envelope<M> {
    pub topic: String,
    pub message: M,
}

type Callback<M> = Arc<dyn Fn(&Envelope<M>) + Send + Sync>;

struct QueuedPublish<M> {
    publisher: OwnerId,
    envelope: Envelope<M>,
}

struct BusInner<M> {
    subscribers: HashMap<String, HashMap<OwnerId, Callback<M>>>,
    queue: VecDeque<QueuedPublish<M>>,
}

/// Cheap-to-clone handle to one event bus.
pub struct EventBus<M> {
    inner: Arc<RwLock<BusInner<M>>>,
}

impl<M> Clone for EventBus<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> Default for EventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> EventBus<M> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BusInner {
                subscribers: HashMap::new(),
                queue: VecDeque::new(),
            })),
        }
    }

    /// Registers `callback` for `(topic, owner)`, silently replacing any
    /// previous callback registered under the same pair.
    pub fn subscribe(
        &self,
        owner: impl Into<OwnerId>,
        topic: impl Into<String>,
        callback: impl Fn(&Envelope<M>) + Send + Sync + 'static,
    ) {
        let mut inner = self.inner.write();
        inner
            .subscribers
            .entry(topic.into())
            .or_default()
            .insert(owner.into(), Arc::new(callback));
    }

    /// Removes the owner's callback for one topic. The topic entry is
    /// dropped once its last subscriber leaves.
    pub fn unsubscribe(&self, owner: &str, topic: &str) -> bool {
        let mut inner = self.inner.write();
        let Some(subs) = inner.subscribers.get_mut(topic) else {
            return false;
        };
        let removed = subs.remove(owner).is_some();
        if subs.is_empty() {
            inner.subscribers.remove(topic);
        }
        removed
    }

    /// Removes the owner's callbacks from every topic, returning how
    /// many were dropped. Used when a panel or tool is torn down.
    pub fn unsubscribe_all(&self, owner: &str) -> usize {
        let mut inner = self.inner.write();
        let mut removed = 0;
        inner.subscribers.retain(|_, subs| {
            if subs.remove(owner).is_some() {
                removed += 1;
            }
            !subs.is_empty()
        });
        removed
    }

    /// Publishes a message. The publishing owner is excluded from the
    /// fan-out at every prefix.
    ///
    /// Delivery is not panic-contained: if a subscriber panics, the
    /// remaining subscribers of that delivery are not invoked.
    pub fn publish(
        &self,
        publisher: &OwnerId,
        topic: impl Into<String>,
        message: M,
        delivery: Delivery,
    ) {
        let envelope = Envelope {
            topic: topic.into(),
            message,
        };
        match delivery {
            Delivery::Immediate => self.deliver(publisher, &envelope),
            Delivery::Queued => {
                let mut inner = self.inner.write();
                inner.queue.push_back(QueuedPublish {
                    publisher: publisher.clone(),
                    envelope,
                });
            }
        }
    }

    /// Delivers every queued publish in FIFO order and returns how many
    /// were delivered. Queued publishes made by subscribers during this
    /// flush are deferred to the next one.
    pub fn flush(&self) -> usize {
        let drained: Vec<QueuedPublish<M>> = {
            let mut inner = self.inner.write();
            inner.queue.drain(..).collect()
        };
        if !drained.is_empty() {
            debug!("Flushing {} queued publish(es)", drained.len());
        }
        for queued in &drained {
            self.deliver(&queued.publisher, &queued.envelope);
        }
        drained.len()
    }

    /// Number of subscribers registered on exactly `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .read()
            .subscribers
            .get(topic)
            .map_or(0, HashMap::len)
    }

    /// Number of publishes waiting for the next [`flush`](Self::flush).
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.inner.read().queue.len()
    }

    fn deliver(&self, publisher: &OwnerId, envelope: &Envelope<M>) {
        // Snapshot the targets, then invoke with no lock held: callbacks
        // may re-enter the bus. Subscriptions changed by a callback take
        // effect from the next delivery.
        let callbacks: Vec<Callback<M>> = {
            let inner = self.inner.read();
            let mut targets = Vec::new();
            for prefix in topic_prefixes(&envelope.topic) {
                if let Some(subs) = inner.subscribers.get(prefix) {
                    for (owner, callback) in subs {
                        if owner != publisher {
                            targets.push(Arc::clone(callback));
                        }
                    }
                }
            }
            targets
        };
        for callback in callbacks {
            callback(envelope);
        }
    }
}

/// Yields every prefix of a topic that ends on a segment boundary,
/// shortest first, finishing with the full topic.
fn topic_prefixes(topic: &str) -> impl Iterator<Item = &str> {
    topic
        .match_indices(TOPIC_DELIMITER)
        .map(|(idx, _)| &topic[..idx])
        .chain(std::iter::once(topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_of_a_three_segment_topic() {
        let prefixes: Vec<&str> = topic_prefixes("A:B:C").collect();
        assert_eq!(prefixes, vec!["A", "A:B", "A:B:C"]);
    }

    #[test]
    fn prefixes_of_a_flat_topic() {
        let prefixes: Vec<&str> = topic_prefixes("PROJECT").collect();
        assert_eq!(prefixes, vec!["PROJECT"]);
    }
}

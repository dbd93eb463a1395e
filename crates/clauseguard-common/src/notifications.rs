use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for transient notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A transient, auto-dismissing notice shown alongside normal output.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    /// Creates an info notice with a 5-second TTL.
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            body: body.into(),
            created_at: Instant::now(),
            ttl: Duration::from_secs(5),
        }
    }

    /// Creates a warning notice with an 8-second TTL.
    pub fn warning(body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            body: body.into(),
            created_at: Instant::now(),
            ttl: Duration::from_secs(8),
        }
    }

    /// Creates an error notice with an 8-second TTL (errors auto-hide on the
    /// same delay the rest of the notices do; nothing sticks around).
    pub fn error(body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            body: body.into(),
            created_at: Instant::now(),
            ttl: Duration::from_secs(8),
        }
    }

    /// Returns `true` if this notice has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// A bounded queue of transient notices that auto-evicts expired entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notice, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Returns all currently visible (non-expired) notices.
    pub fn visible(&mut self) -> Vec<&Notification> {
        self.evict_expired();
        self.items.iter().collect()
    }

    /// Returns the number of notices currently in the queue (including expired).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_and_ttls() {
        let n = Notification::info("analysis started");
        assert_eq!(n.level, NotificationLevel::Info);
        assert_eq!(n.ttl, Duration::from_secs(5));

        let n = Notification::error("upload failed");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.ttl, Duration::from_secs(8));
        assert!(!n.is_expired());
    }

    #[test]
    fn queue_caps_at_capacity() {
        let mut q = NotificationQueue::new(2);
        q.push(Notification::info("one"));
        q.push(Notification::info("two"));
        q.push(Notification::info("three"));
        assert_eq!(q.len(), 2);
        let visible = q.visible();
        assert_eq!(visible[0].body, "two");
        assert_eq!(visible[1].body, "three");
    }

    #[test]
    fn expired_notices_are_evicted() {
        let mut q = NotificationQueue::new(4);
        let mut stale = Notification::error("old failure");
        stale.created_at = Instant::now() - Duration::from_secs(30);
        q.push(stale);
        q.push(Notification::error("fresh failure"));

        let visible = q.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].body, "fresh failure");
    }
}

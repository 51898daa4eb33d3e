//! Transient notifications shown in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum toasts kept on screen; the oldest is dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into(), Instant::now());
    }

    fn push(&mut self, kind: ToastKind, message: String, now: Instant) {
        if self.items.len() == MAX_VISIBLE {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            kind,
            message,
            expires_at: now + self.lifetime,
        });
    }

    /// Drops expired toasts. Returns true if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at > now);
        before != self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let now = Instant::now();
        queue.push(ToastKind::Error, "boom".into(), now);

        assert!(!queue.prune(now + Duration::from_secs(4)));
        assert_eq!(queue.len(), 1);
        assert!(queue.prune(now + Duration::from_secs(5)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        for i in 0..6 {
            queue.success(format!("t{i}"));
        }
        assert_eq!(queue.len(), MAX_VISIBLE);
        assert_eq!(queue.last().unwrap().message, "t5");
        assert_eq!(queue.iter().next().unwrap().message, "t2");
    }
}

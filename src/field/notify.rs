use std::time::{Duration, Instant};

pub type SubscriberId = u64;

/// Coalesced rerender notification.
///
/// Field edits arrive in bursts (one per keystroke); rebuilding the grid tree
/// per edit is wasteful, so hosts mark the notifier dirty on every store
/// mutation and poll it from their scheduler. Subscribers fire once per burst,
/// after `window` has elapsed since the burst began. The clock is passed in
/// explicitly, which keeps the coalescing logic deterministic under test and
/// free of any global timer facility.
///
/// This is purely a backpressure measure: the resolver and builder are pure
/// functions of store state and are safe to re-run redundantly.
pub struct RenderNotifier {
    window: Duration,
    dirty_since: Option<Instant>,
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut()>)>,
}

impl RenderNotifier {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            dirty_since: None,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Records that store state changed. Repeated calls within one burst keep
    /// the original timestamp so a long stream of edits cannot starve the
    /// flush forever.
    pub fn mark_dirty(&mut self, now: Instant) {
        if self.dirty_since.is_none() {
            self.dirty_since = Some(now);
        }
    }

    pub fn pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Fires all subscribers if a burst is pending and the coalescing window
    /// has elapsed. Returns whether a flush happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.duration_since(since) >= self.window => {
                self.dirty_since = None;
                for (_, callback) in &mut self.subscribers {
                    callback();
                }
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for RenderNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderNotifier")
            .field("window", &self.window)
            .field("dirty_since", &self.dirty_since)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// What a frame callback reports. Errors are logged and the callback stays scheduled.
pub type TickResult = Result<(), Box<dyn std::error::Error>>;

type Callback = Box<dyn FnMut(u64) -> TickResult>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: usize,
    callbacks: BTreeMap<u64, Callback>,
    ticking: bool,
    // Ids cancelled while their callback was taken out for a tick.
    cancelled: Vec<u64>,
}

/// A cooperative, single-threaded frame callback registry.
///
/// The host calls [`Ticker::tick`] once per display refresh; every subscribed callback runs
/// once, in subscription order. Callbacks may subscribe, cancel (including themselves) or
/// drop subscriptions while a tick is running:
/// - a callback subscribed during a tick first runs on the next tick
/// - a callback cancelled during a tick does not run for the rest of it
#[derive(Clone, Default)]
pub struct Ticker {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("callbacks", &self.len())
            .finish_non_exhaustive()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run on every tick until the returned [`Subscription`] is
    /// dropped or cancelled.
    pub fn subscribe(&self, callback: impl FnMut(u64) -> TickResult + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.live += 1;
        registry.callbacks.insert(id, Box::new(callback));
        atrace!(id, "subscribed");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
            active: true,
        }
    }

    /// Runs every subscribed callback once and returns how many ran.
    ///
    /// A nested call from inside a callback does nothing and returns 0. If a callback panics,
    /// the schedule is restored before the panic propagates.
    pub fn tick(&self, now_ms: u64) -> usize {
        let running = {
            let mut registry = self.registry.borrow_mut();
            if registry.ticking {
                return 0;
            }
            registry.ticking = true;
            std::mem::take(&mut registry.callbacks)
        };
        let mut guard = TickGuard {
            registry: &self.registry,
            running,
        };

        let mut ran = 0;
        for (&id, callback) in guard.running.iter_mut() {
            if self.registry.borrow().cancelled.contains(&id) {
                continue;
            }
            ran += 1;
            if let Err(_err) = callback(now_ms) {
                awarn!(id, error = %_err, "frame callback failed");
            }
        }
        ran
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.borrow().live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Puts the callbacks taken out for a tick back into the registry, dropping the ones
/// cancelled meanwhile.
struct TickGuard<'a> {
    registry: &'a RefCell<Registry>,
    running: BTreeMap<u64, Callback>,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        let mut running = std::mem::take(&mut self.running);
        // Dropped after the borrow ends; a callback may own subscriptions.
        let dropped: Vec<Callback> = {
            let mut registry = self.registry.borrow_mut();
            let cancelled = std::mem::take(&mut registry.cancelled);
            let dropped = cancelled
                .iter()
                .filter_map(|id| running.remove(id))
                .collect();
            running.append(&mut registry.callbacks);
            registry.callbacks = running;
            registry.ticking = false;
            dropped
        };
        drop(dropped);
    }
}

/// Keeps a frame callback scheduled. Dropping it (or calling [`Subscription::cancel`])
/// deregisters the callback exactly once.
#[must_use = "dropping a Subscription cancels the callback"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
    active: bool,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// `false` once cancelled or once the ticker is gone.
    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    pub fn cancel(mut self) {
        self.deregister();
    }

    fn deregister(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let mut registry = registry.borrow_mut();
            registry.live -= 1;
            let removed = registry.callbacks.remove(&self.id);
            if removed.is_none() && registry.ticking {
                registry.cancelled.push(self.id);
            }
            removed
        };
        atrace!(id = self.id, "unsubscribed");
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.deregister();
    }
}

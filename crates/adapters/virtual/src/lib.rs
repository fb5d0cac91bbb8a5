//! # joinbridge-adapter-virtual
//!
//! A simulated control processor: an in-memory join space that implements
//! the [`Gateway`] port.
//!
//! ## Behaviour
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `write_*` | Stores the value, records it in the write log and, when echo is on, pushes it back to listeners |
//! | `inject_*` | Stores a value as if the processor reported it and pushes it when it changed |
//! | `set_available` | Flips connectivity and pushes an availability change |
//!
//! Unset joins read as `false` / `0`, like a processor that has not reported them yet.
//!
//! ## Dependency rule
//!
//! Depends on `joinbridge-app` (port traits) and `joinbridge-domain` only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use joinbridge_app::ports::{Gateway, Listener, ListenerId};
use joinbridge_domain::join::{AnalogJoin, DigitalJoin, SignalChange};

/// One write issued through the gateway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteRecord {
    pub change: SignalChange,
    pub at: Instant,
}

#[derive(Default)]
struct JoinSpace {
    digital: HashMap<DigitalJoin, bool>,
    analog: HashMap<AnalogJoin, u16>,
}

/// In-memory gateway.
pub struct InMemoryGateway {
    joins: Mutex<JoinSpace>,
    available: AtomicBool,
    echo: bool,
    log: Mutex<Vec<WriteRecord>>,
    listeners: Mutex<HashMap<ListenerId, Listener>>,
    next_id: AtomicU64,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new(true)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryGateway {
    /// A connected gateway. With `echo`, every write is pushed back to the
    /// listeners as the processor's feedback.
    #[must_use]
    pub fn new(echo: bool) -> Self {
        Self {
            joins: Mutex::new(JoinSpace::default()),
            available: AtomicBool::new(true),
            echo,
            log: Mutex::new(Vec::new()),
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn notify(&self, change: SignalChange) {
        let listeners: Vec<Listener> = lock(&self.listeners).values().cloned().collect();
        tracing::trace!(?change, listeners = listeners.len(), "push");
        for listener in listeners {
            listener(change);
        }
    }

    fn record(&self, change: SignalChange) {
        lock(&self.log).push(WriteRecord {
            change,
            at: Instant::now(),
        });
        if self.echo {
            self.notify(change);
        }
    }

    /// Report a digital value from the processor side.
    pub fn inject_digital(&self, join: DigitalJoin, value: bool) {
        let previous = lock(&self.joins).digital.insert(join, value);
        if previous.unwrap_or_default() != value {
            self.notify(SignalChange::Digital { join, value });
        }
    }

    /// Report an analog value from the processor side.
    pub fn inject_analog(&self, join: AnalogJoin, value: u16) {
        let previous = lock(&self.joins).analog.insert(join, value);
        if previous.unwrap_or_default() != value {
            self.notify(SignalChange::Analog { join, value });
        }
    }

    /// Connect or disconnect the simulated processor.
    pub fn set_available(&self, available: bool) {
        let previous = self.available.swap(available, Ordering::SeqCst);
        if previous != available {
            tracing::info!(available, "gateway availability changed");
            self.notify(SignalChange::Availability { available });
        }
    }

    /// Every write so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<WriteRecord> {
        lock(&self.log).clone()
    }

    /// Digital joins that received a rising edge, in order.
    #[must_use]
    pub fn rising_edges(&self) -> Vec<DigitalJoin> {
        self.writes()
            .into_iter()
            .filter_map(|record| match record.change {
                SignalChange::Digital { join, value: true } => Some(join),
                _ => None,
            })
            .collect()
    }

    /// Values written to `join`, oldest first.
    #[must_use]
    pub fn analog_writes(&self, join: AnalogJoin) -> Vec<u16> {
        self.writes()
            .into_iter()
            .filter_map(|record| match record.change {
                SignalChange::Analog {
                    join: written,
                    value,
                } if written == join => Some(value),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

impl Gateway for InMemoryGateway {
    fn read_digital(&self, join: DigitalJoin) -> bool {
        lock(&self.joins)
            .digital
            .get(&join)
            .copied()
            .unwrap_or_default()
    }

    fn read_analog(&self, join: AnalogJoin) -> u16 {
        lock(&self.joins)
            .analog
            .get(&join)
            .copied()
            .unwrap_or_default()
    }

    fn write_digital(&self, join: DigitalJoin, value: bool) {
        lock(&self.joins).digital.insert(join, value);
        self.record(SignalChange::Digital { join, value });
    }

    fn write_analog(&self, join: AnalogJoin, value: u16) {
        lock(&self.joins).analog.insert(join, value);
        self.record(SignalChange::Analog { join, value });
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.listeners).insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        lock(&self.listeners).remove(&id);
    }
}

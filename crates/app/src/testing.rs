//! Recording gateway shared by the translator tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use joinbridge_domain::join::{AnalogJoin, DigitalJoin, SignalChange};
use tokio::time::Instant;

use crate::ports::{Gateway, Listener, ListenerId};

/// A write issued through the gateway, stamped with the (paused) clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Write {
    Digital {
        join: DigitalJoin,
        value: bool,
        at: Instant,
    },
    Analog {
        join: AnalogJoin,
        value: u16,
        at: Instant,
    },
}

/// In-memory gateway that records every write.
pub struct FakeGateway {
    digital: Mutex<HashMap<DigitalJoin, bool>>,
    analog: Mutex<HashMap<AnalogJoin, u16>>,
    available: AtomicBool,
    writes: Mutex<Vec<Write>>,
    listeners: Mutex<HashMap<ListenerId, Listener>>,
    next_id: AtomicU64,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            digital: Mutex::new(HashMap::new()),
            analog: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            writes: Mutex::new(Vec::new()),
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl FakeGateway {
    /// Set a digital join as if the processor reported it (not recorded).
    pub fn set_digital(&self, join: u32, value: bool) {
        self.digital
            .lock()
            .unwrap()
            .insert(DigitalJoin::new(join), value);
    }

    /// Set an analog join as if the processor reported it (not recorded).
    pub fn set_analog(&self, join: u32, value: u16) {
        self.analog.lock().unwrap().insert(AnalogJoin::new(join), value);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Deliver a change to every listener.
    pub fn push(&self, change: SignalChange) {
        let listeners: Vec<Listener> = self.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener(change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    /// Joins that received a rising edge, in order.
    pub fn pulsed_joins(&self) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter_map(|write| match write {
                Write::Digital {
                    join, value: true, ..
                } => Some(join.number()),
                _ => None,
            })
            .collect()
    }

    /// Values written to an analog join, in order.
    pub fn analog_writes(&self, join: u32) -> Vec<u16> {
        self.writes()
            .into_iter()
            .filter_map(|write| match write {
                Write::Analog {
                    join: written,
                    value,
                    ..
                } if written.number() == join => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn digital(&self, join: u32) -> bool {
        self.read_digital(DigitalJoin::new(join))
    }

    pub fn analog(&self, join: u32) -> u16 {
        self.read_analog(AnalogJoin::new(join))
    }
}

impl Gateway for FakeGateway {
    fn read_digital(&self, join: DigitalJoin) -> bool {
        self.digital
            .lock()
            .unwrap()
            .get(&join)
            .copied()
            .unwrap_or_default()
    }

    fn read_analog(&self, join: AnalogJoin) -> u16 {
        self.analog
            .lock()
            .unwrap()
            .get(&join)
            .copied()
            .unwrap_or_default()
    }

    fn write_digital(&self, join: DigitalJoin, value: bool) {
        self.digital.lock().unwrap().insert(join, value);
        self.writes.lock().unwrap().push(Write::Digital {
            join,
            value,
            at: Instant::now(),
        });
    }

    fn write_analog(&self, join: AnalogJoin, value: u16) {
        self.analog.lock().unwrap().insert(join, value);
        self.writes.lock().unwrap().push(Write::Analog {
            join,
            value,
            at: Instant::now(),
        });
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().unwrap().insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(&id);
    }
}

//! Gateway port — live access to the control processor's join space.
//!
//! The gateway owns every join value and the connection to the processor.
//! Translators never store join values; they read through this trait each
//! time they derive state and write through it to issue commands. Writes are
//! fire-and-forget: there is no acknowledgement channel.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use joinbridge_domain::join::{AnalogJoin, DigitalJoin, SignalChange};

/// Width of the pulse emitted by [`Gateway::write_digital_pulsed`].
pub const PULSE_WIDTH: Duration = Duration::from_millis(50);

/// Callback invoked by the gateway for every pushed change.
pub type Listener = Arc<dyn Fn(SignalChange) + Send + Sync>;

/// Handle identifying a registered [`Listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Read/write access to joins plus change notifications.
pub trait Gateway: Send + Sync {
    /// Current value of a digital join (`false` if never set).
    fn read_digital(&self, join: DigitalJoin) -> bool;

    /// Current value of an analog join (`0` if never set).
    fn read_analog(&self, join: AnalogJoin) -> u16;

    /// Drive a digital join to a level.
    fn write_digital(&self, join: DigitalJoin, value: bool);

    /// Drive an analog join to a value.
    fn write_analog(&self, join: AnalogJoin, value: u16);

    /// Whether the connection to the control processor is live.
    fn is_available(&self) -> bool;

    /// Register a listener for pushed changes.
    fn subscribe(&self, listener: Listener) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);

    /// Assert `join`, hold it for `width`, then release it.
    fn pulse(&self, join: DigitalJoin, width: Duration) -> impl Future<Output = ()> + Send {
        async move {
            self.write_digital(join, true);
            tokio::time::sleep(width).await;
            self.write_digital(join, false);
        }
    }

    /// Write `value`, or when `pulsed` ignore it and emit a [`PULSE_WIDTH`] pulse.
    fn write_digital_pulsed(
        &self,
        join: DigitalJoin,
        value: bool,
        pulsed: bool,
    ) -> impl Future<Output = ()> + Send {
        async move {
            if pulsed {
                self.pulse(join, PULSE_WIDTH).await;
            } else {
                self.write_digital(join, value);
            }
        }
    }
}

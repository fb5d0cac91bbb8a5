//! Join addresses and the values they carry.
//!
//! A join is a numbered slot in the control processor's signal space. Digital
//! joins carry a boolean, analog joins an unsigned 16-bit integer. Digital and
//! analog joins live in separate address spaces, so join 12 digital and join
//! 12 analog are unrelated signals.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_join {
    ($(#[doc = $doc:expr])* $name:ident, $prefix:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw join number.
            #[must_use]
            pub const fn new(number: u32) -> Self {
                Self(number)
            }

            /// Access the raw join number.
            #[must_use]
            pub const fn number(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_join!(
    /// Address of a boolean signal.
    DigitalJoin,
    "d"
);

define_join!(
    /// Address of an unsigned 16-bit signal.
    AnalogJoin,
    "a"
);

/// A change pushed by the gateway to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalChange {
    /// A digital join changed value.
    Digital { join: DigitalJoin, value: bool },
    /// An analog join changed value.
    Analog { join: AnalogJoin, value: u16 },
    /// Connectivity to the control processor changed.
    Availability { available: bool },
}

//! Translators — one per device kind.
//!
//! Each translator holds its immutable configuration and a handle to the
//! gateway. Apart from a few latched flags (a cover's manual stop, an
//! elevator's last command) it stores nothing: every read goes back to the
//! gateway.

mod button;
mod climate;
mod cover;
mod elevator;
mod light;
mod media_player;
mod switch;

pub use button::ButtonDevice;
pub use climate::ClimateDevice;
pub use cover::CoverDevice;
pub use elevator::ElevatorDevice;
pub use light::LightDevice;
pub use media_player::MediaPlayerDevice;
pub use switch::SwitchDevice;

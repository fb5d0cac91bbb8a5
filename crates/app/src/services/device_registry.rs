//! Device registry — builds translators from configuration and dispatches
//! named service calls to them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tokio::sync::broadcast;

use joinbridge_domain::device::{DeviceConfig, DeviceKind, DeviceSnapshot, validate_all};
use joinbridge_domain::error::{BridgeError, InvalidArgumentError, NotFoundError};

use crate::capabilities::{
    Button, Climate, Cover, Device, Elevator, Light, MediaPlayer, Switch, TemperatureRequest,
};
use crate::devices::{
    ButtonDevice, ClimateDevice, CoverDevice, ElevatorDevice, LightDevice, MediaPlayerDevice,
    SwitchDevice,
};
use crate::event_bus::{InvalidationBus, StateInvalidated};
use crate::ports::Gateway;
use crate::services::service_call::ServiceArgs;
use crate::subscription::Subscription;

const BUS_CAPACITY: usize = 256;

/// A translator of any kind.
pub enum DeviceHandle<G> {
    Climate(ClimateDevice<G>),
    Cover(CoverDevice<G>),
    Elevator(ElevatorDevice<G>),
    Light(LightDevice<G>),
    Switch(SwitchDevice<G>),
    MediaPlayer(MediaPlayerDevice<G>),
    Button(ButtonDevice<G>),
}

impl<G: Gateway> DeviceHandle<G> {
    /// Build the translator described by `config`.
    pub fn from_config(config: DeviceConfig, gateway: Arc<G>) -> Self {
        tracing::debug!(name = config.name(), kind = ?config.kind(), "building translator");
        match config {
            DeviceConfig::Climate(c) => Self::Climate(ClimateDevice::new(c, gateway)),
            DeviceConfig::Cover(c) => Self::Cover(CoverDevice::new(c, gateway)),
            DeviceConfig::Elevator(c) => Self::Elevator(ElevatorDevice::new(c, gateway)),
            DeviceConfig::Light(c) => Self::Light(LightDevice::new(c, gateway)),
            DeviceConfig::Switch(c) => Self::Switch(SwitchDevice::new(c, gateway)),
            DeviceConfig::MediaPlayer(c) => Self::MediaPlayer(MediaPlayerDevice::new(c, gateway)),
            DeviceConfig::Button(c) => Self::Button(ButtonDevice::new(c, gateway)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Climate(_) => DeviceKind::Climate,
            Self::Cover(_) => DeviceKind::Cover,
            Self::Elevator(_) => DeviceKind::Elevator,
            Self::Light(_) => DeviceKind::Light,
            Self::Switch(_) => DeviceKind::Switch,
            Self::MediaPlayer(_) => DeviceKind::MediaPlayer,
            Self::Button(_) => DeviceKind::Button,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Climate(d) => d.name(),
            Self::Cover(d) => d.name(),
            Self::Elevator(d) => d.name(),
            Self::Light(d) => d.name(),
            Self::Switch(d) => d.name(),
            Self::MediaPlayer(d) => d.name(),
            Self::Button(d) => d.name(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        match self {
            Self::Climate(d) => d.snapshot(),
            Self::Cover(d) => d.snapshot(),
            Self::Elevator(d) => d.snapshot(),
            Self::Light(d) => d.snapshot(),
            Self::Switch(d) => d.snapshot(),
            Self::MediaPlayer(d) => d.snapshot(),
            Self::Button(d) => d.snapshot(),
        }
    }

    /// Run `service` with `args` on this device.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidArgument`] for an unknown service or a
    /// rejected argument, or whatever the translator reports.
    pub async fn call(&self, service: &str, args: &ServiceArgs) -> Result<(), BridgeError> {
        match self {
            Self::Climate(d) => call_climate(d, service, args).await,
            Self::Cover(d) => call_cover(d, service, args).await,
            Self::Elevator(d) => call_elevator(d, service).await,
            Self::Light(d) => call_light(d, service, args).await,
            Self::Switch(d) => call_switch(d, service).await,
            Self::MediaPlayer(d) => call_media_player(d, service, args).await,
            Self::Button(d) => call_button(d, service).await,
        }
    }
}

fn unknown(service: &str) -> BridgeError {
    InvalidArgumentError::UnknownService(service.to_string()).into()
}

async fn call_climate<D: Climate>(
    device: &D,
    service: &str,
    args: &ServiceArgs,
) -> Result<(), BridgeError> {
    match service {
        "set_hvac_mode" => device.set_hvac_mode(args.require_mode("hvac_mode")?).await,
        "set_fan_mode" => device.set_fan_mode(args.require_mode("fan_mode")?).await,
        "set_temperature" => {
            let request = TemperatureRequest {
                target: args.f64("temperature")?,
                low: args.f64("target_temp_low")?,
                high: args.f64("target_temp_high")?,
            };
            device.set_temperature(request).await
        }
        "turn_on" => Climate::turn_on(device).await,
        "turn_off" => Climate::turn_off(device).await,
        other => Err(unknown(other)),
    }
}

async fn call_cover<D: Cover>(
    device: &D,
    service: &str,
    args: &ServiceArgs,
) -> Result<(), BridgeError> {
    match service {
        "open_cover" => device.open().await,
        "close_cover" => device.close().await,
        "stop_cover" => Cover::stop(device).await,
        "set_cover_position" => device.set_position(args.require_f64("position")?).await,
        other => Err(unknown(other)),
    }
}

async fn call_elevator<D: Elevator>(device: &D, service: &str) -> Result<(), BridgeError> {
    match service {
        "move_up" => device.move_up().await,
        "move_down" => device.move_down().await,
        "stop" => Elevator::stop(device).await,
        other => Err(unknown(other)),
    }
}

async fn call_light<D: Light>(
    device: &D,
    service: &str,
    args: &ServiceArgs,
) -> Result<(), BridgeError> {
    match service {
        "turn_on" => {
            let brightness = args.brightness()?;
            let transition = args.f64("transition")?;
            Light::turn_on(device, brightness, transition).await
        }
        "turn_off" => Light::turn_off(device, args.f64("transition")?).await,
        "toggle" => {
            if Light::is_on(device) {
                Light::turn_off(device, None).await
            } else {
                Light::turn_on(device, None, None).await
            }
        }
        other => Err(unknown(other)),
    }
}

async fn call_switch<D: Switch>(device: &D, service: &str) -> Result<(), BridgeError> {
    match service {
        "turn_on" => Switch::turn_on(device).await,
        "turn_off" => Switch::turn_off(device).await,
        "toggle" => {
            if Switch::is_on(device) {
                Switch::turn_off(device).await
            } else {
                Switch::turn_on(device).await
            }
        }
        other => Err(unknown(other)),
    }
}

async fn call_media_player<D: MediaPlayer>(
    device: &D,
    service: &str,
    args: &ServiceArgs,
) -> Result<(), BridgeError> {
    match service {
        "turn_on" => MediaPlayer::turn_on(device).await,
        "turn_off" => MediaPlayer::turn_off(device).await,
        "volume_mute" => device.mute(args.require_bool("is_volume_muted")?).await,
        "volume_set" => device.set_volume(args.require_f64("volume_level")?).await,
        "volume_up" => device.volume_up().await,
        "volume_down" => device.volume_down().await,
        "select_source" => device.select_source(args.require_str("source")?).await,
        other => Err(unknown(other)),
    }
}

async fn call_button<D: Button>(device: &D, service: &str) -> Result<(), BridgeError> {
    match service {
        "press" => device.press().await,
        other => Err(unknown(other)),
    }
}

/// Every configured device, addressable by name.
pub struct DeviceRegistry<G: Gateway> {
    gateway: Arc<G>,
    devices: Vec<Arc<DeviceHandle<G>>>,
    index: HashMap<String, usize>,
    bus: InvalidationBus,
    subscriptions: Mutex<Vec<Subscription<G>>>,
}

impl<G: Gateway> DeviceRegistry<G> {
    /// Build one translator per configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] when a name is empty or duplicated.
    pub fn new(gateway: Arc<G>, configs: Vec<DeviceConfig>) -> Result<Self, BridgeError> {
        validate_all(&configs)?;
        let devices: Vec<Arc<DeviceHandle<G>>> = configs
            .into_iter()
            .map(|config| Arc::new(DeviceHandle::from_config(config, Arc::clone(&gateway))))
            .collect();
        let index = devices
            .iter()
            .enumerate()
            .map(|(position, device)| (device.name().to_string(), position))
            .collect();
        tracing::info!(count = devices.len(), "device registry built");
        Ok(Self {
            gateway,
            devices,
            index,
            bus: InvalidationBus::new(BUS_CAPACITY),
            subscriptions: Mutex::new(Vec::new()),
        })
    }

    /// Register one gateway listener per device; every pushed change
    /// publishes a [`StateInvalidated`] for that device.
    ///
    /// Calling it again replaces the previous registrations.
    pub fn attach(&self) {
        let subscriptions: Vec<Subscription<G>> = self
            .devices
            .iter()
            .map(|device| {
                let bus = self.bus.clone();
                let name = device.name().to_string();
                Subscription::attach(
                    Arc::clone(&self.gateway),
                    Arc::new(move |change| {
                        bus.publish(StateInvalidated {
                            device: name.clone(),
                            change,
                        });
                    }),
                )
            })
            .collect();
        tracing::info!(count = subscriptions.len(), "device listeners attached");
        *self.lock_subscriptions() = subscriptions;
    }

    /// Remove every listener registered by [`attach`](Self::attach).
    pub fn detach(&self) {
        let removed = std::mem::take(&mut *self.lock_subscriptions());
        tracing::info!(count = removed.len(), "device listeners detached");
    }

    fn lock_subscriptions(&self) -> std::sync::MutexGuard<'_, Vec<Subscription<G>>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to state invalidations published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateInvalidated> {
        self.bus.subscribe()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.gateway.is_available()
    }

    /// Snapshots of every device, in configuration order.
    #[must_use]
    pub fn list(&self) -> Vec<DeviceSnapshot> {
        self.devices.iter().map(|device| device.snapshot()).collect()
    }

    /// The translator registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] when no device has that name.
    pub fn device(&self, name: &str) -> Result<Arc<DeviceHandle<G>>, BridgeError> {
        self.index
            .get(name)
            .and_then(|position| self.devices.get(*position))
            .cloned()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Device",
                    id: name.to_string(),
                }
                .into()
            })
    }

    /// Snapshot of the device registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] when no device has that name.
    pub fn get(&self, name: &str) -> Result<DeviceSnapshot, BridgeError> {
        Ok(self.device(name)?.snapshot())
    }

    /// Run `service` on the device named `name` and return its new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] for an unknown device,
    /// [`BridgeError::GatewayUnavailable`] while the gateway is down,
    /// [`BridgeError::InvalidArgument`] for a malformed payload or unknown
    /// service, or the translator's own error.
    pub async fn handle_service_call(
        &self,
        name: &str,
        service: &str,
        data: Value,
    ) -> Result<DeviceSnapshot, BridgeError> {
        let device = self.device(name)?;
        if !self.gateway.is_available() {
            tracing::warn!(device = name, service, "gateway unavailable, command rejected");
            return Err(BridgeError::GatewayUnavailable);
        }
        let args = ServiceArgs::try_from(data)?;
        tracing::debug!(device = name, kind = ?device.kind(), service, "service call");
        device.call(service, &args).await?;
        Ok(device.snapshot())
    }
}

use std::sync::Arc;
use std::time::Duration;

use joinbridge_adapter_virtual::InMemoryGateway;
use joinbridge_app::capabilities::{Climate, Cover, Elevator, Light, Switch};
use joinbridge_app::devices::{ClimateDevice, CoverDevice, ElevatorDevice, LightDevice, SwitchDevice};
use joinbridge_app::services::device_registry::DeviceRegistry;
use joinbridge_domain::device::DeviceConfig;
use joinbridge_domain::device::climate::{ClimateConfig, HvacMode};
use joinbridge_domain::device::cover::{CoverConfig, CoverKind};
use joinbridge_domain::device::elevator::ElevatorConfig;
use joinbridge_domain::device::light::{LightConfig, LightKind};
use joinbridge_domain::device::switch::SwitchConfig;
use joinbridge_domain::join::{AnalogJoin, DigitalJoin, SignalChange};
use joinbridge_domain::scaling::Divisor;
use joinbridge_app::ports::Gateway;

fn d(join: u32) -> DigitalJoin {
    DigitalJoin::new(join)
}

fn a(join: u32) -> AnalogJoin {
    AnalogJoin::new(join)
}

fn gateway() -> Arc<InMemoryGateway> {
    Arc::new(InMemoryGateway::new(false))
}

fn switch_config(pulsed: bool) -> SwitchConfig {
    SwitchConfig {
        name: "Pool pump".to_string(),
        join: d(40),
        pulsed,
        device_class: None,
    }
}

fn climate_config() -> ClimateConfig {
    ClimateConfig {
        name: "Upstairs".to_string(),
        pulsed: false,
        divisor: Divisor::try_from(10).unwrap(),
        heat_setpoint_join: Some(a(1)),
        cool_setpoint_join: Some(a(2)),
        current_temperature_join: Some(a(3)),
        mode_heat_join: Some(d(1)),
        mode_cool_join: Some(d(2)),
        mode_auto_join: Some(d(3)),
        mode_off_join: Some(d(4)),
        fan_on_join: None,
        fan_auto_join: None,
        heat_stage_1_join: None,
        heat_stage_2_join: None,
        cool_stage_1_join: None,
        cool_stage_2_join: None,
        fan_active_join: None,
    }
}

fn elevator_config() -> ElevatorConfig {
    ElevatorConfig {
        name: "Car lift".to_string(),
        up_join: d(50),
        down_join: d(51),
        main_engine_join: d(52),
        up_set_join: d(53),
        up_reset_join: d(54),
        down_set_join: d(55),
        down_reset_join: d(56),
        top_join: Some(d(57)),
        bottom_join: Some(d(58)),
        obstruction_join: Some(d(59)),
    }
}

#[tokio::test(start_paused = true)]
async fn should_read_back_maintained_writes_for_every_level() {
    let gateway = gateway();
    let switch = SwitchDevice::new(switch_config(false), Arc::clone(&gateway));

    for on in [true, false, true, false] {
        if on {
            switch.turn_on().await.unwrap();
        } else {
            switch.turn_off().await.unwrap();
        }
        assert_eq!(switch.is_on(), on);
    }
}

#[tokio::test(start_paused = true)]
async fn should_keep_pulsed_switch_idempotent() {
    let gateway = gateway();
    let switch = SwitchDevice::new(switch_config(true), Arc::clone(&gateway));

    gateway.inject_digital(d(40), true);
    switch.turn_on().await.unwrap();
    assert!(gateway.writes().is_empty());

    gateway.inject_digital(d(40), false);
    switch.turn_on().await.unwrap();

    let writes = gateway.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[1].at - writes[0].at, Duration::from_millis(50));
    assert!(!gateway.read_digital(d(40)));
}

#[tokio::test(start_paused = true)]
async fn should_assert_exactly_one_mode_join() {
    let gateway = gateway();
    let climate = ClimateDevice::new(climate_config(), Arc::clone(&gateway));

    for mode in [HvacMode::HeatCool, HvacMode::Heat, HvacMode::Cool, HvacMode::Off] {
        for join in 1..=4 {
            gateway.inject_digital(d(join), true);
        }

        climate.set_hvac_mode(mode).await.unwrap();

        let asserted: Vec<u32> = (1..=4)
            .filter(|join| gateway.read_digital(d(*join)))
            .collect();
        assert_eq!(asserted.len(), 1, "{mode:?} left {asserted:?} asserted");
        assert_eq!(climate.hvac_mode(), mode);
    }
}

#[tokio::test(start_paused = true)]
async fn should_let_auto_win_over_heat() {
    let gateway = gateway();
    let climate = ClimateDevice::new(climate_config(), Arc::clone(&gateway));

    gateway.inject_digital(d(3), true);
    gateway.inject_digital(d(1), true);

    assert_eq!(climate.hvac_mode(), HvacMode::HeatCool);
}

#[tokio::test(start_paused = true)]
async fn should_keep_analog_cover_write_and_read_scales_apart() {
    let gateway = gateway();
    let cover = CoverDevice::new(
        CoverConfig {
            name: "Bay window".to_string(),
            kind: CoverKind::AnalogShade,
            is_opening_join: d(10),
            is_closing_join: d(11),
            stop_join: d(12),
            is_moving_join: None,
            is_closed_join: None,
            position_join: Some(a(10)),
            open_full_join: None,
            close_full_join: None,
        },
        Arc::clone(&gateway),
    );

    cover.set_position(50.0).await.unwrap();

    assert_eq!(gateway.analog_writes(a(10)), vec![32_750]);
    let position = cover.position().unwrap();
    assert!(position < 50.0);
    assert!((position - 32_750.0 / 655.35).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn should_not_write_while_elevator_obstructed() {
    let gateway = gateway();
    let elevator = ElevatorDevice::new(elevator_config(), Arc::clone(&gateway));
    gateway.inject_digital(d(59), true);

    elevator.move_up().await.unwrap();

    assert!(gateway.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn should_plan_elevator_up_for_each_precondition() {
    // (down latched, engine running) -> expected rising edges
    let cases = [
        (false, false, vec![53, 52]),
        (true, false, vec![53, 56, 52]),
        (false, true, vec![53]),
        (true, true, vec![53, 56]),
    ];

    for (down, engine, expected) in cases {
        let gateway = gateway();
        let elevator = ElevatorDevice::new(elevator_config(), Arc::clone(&gateway));
        gateway.inject_digital(d(51), down);
        gateway.inject_digital(d(52), engine);

        elevator.move_up().await.unwrap();

        let edges: Vec<u32> = gateway
            .rising_edges()
            .into_iter()
            .map(DigitalJoin::number)
            .collect();
        assert_eq!(edges, expected, "down={down} engine={engine}");
    }
}

#[tokio::test(start_paused = true)]
async fn should_ramp_dimmer_in_twenty_ticks() {
    let gateway = gateway();
    let light = LightDevice::new(
        LightConfig {
            name: "Dining".to_string(),
            kind: LightKind::Brightness,
            join: 30,
        },
        Arc::clone(&gateway),
    );

    light.turn_on(None, Some(1.0)).await.unwrap();

    let writes = gateway.writes();
    let values = gateway.analog_writes(a(30));
    assert_eq!(values.len(), 20);
    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(values.last(), Some(&65_535));
    assert!(
        writes
            .windows(2)
            .all(|pair| pair[1].at - pair[0].at == Duration::from_millis(50))
    );
}

#[tokio::test]
async fn should_invalidate_devices_and_reflect_unavailability() {
    let gateway = gateway();
    let registry = DeviceRegistry::new(
        Arc::clone(&gateway),
        vec![DeviceConfig::Switch(switch_config(false))],
    )
    .unwrap();
    registry.attach();
    let mut rx = registry.subscribe();

    gateway.set_available(false);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.device, "Pool pump");
    assert_eq!(event.change, SignalChange::Availability { available: false });
    assert!(!registry.get("Pool pump").unwrap().available);

    registry.detach();
    assert_eq!(gateway.listener_count(), 0);
}

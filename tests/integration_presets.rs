//! Integration tests for the built-in panel presets.

mod common;

use panel_sim::config::PanelConfig;
use panel_sim::sim::engine::Engine;
use panel_sim::sim::flow::BuzzerState;

#[test]
fn every_preset_builds_an_engine() {
    for name in PanelConfig::PRESETS {
        let config = PanelConfig::from_preset(name).unwrap();
        assert!(config.validate().is_empty(), "preset \"{name}\" invalid");
        assert!(Engine::from_config(&config).is_ok(), "preset \"{name}\" should build");
    }
}

#[test]
fn overnight_battery_recovers_off_peak() {
    let config = PanelConfig::from_preset("overnight").unwrap();
    let mut engine = Engine::from_config(&config).unwrap();

    // One off-peak hour at 1%/min lifts the level from 5% to 65%
    let snapshots = engine.run(common::at(22, 0, 0), 3600);
    let last = snapshots.last().unwrap();
    assert!((last.battery_pct - 65.0).abs() < 0.1);
}

#[test]
fn low_flow_preset_never_trips_the_buzzer() {
    let config = PanelConfig::from_preset("low_flow").unwrap();
    let mut engine = Engine::from_config(&config).unwrap();

    let snapshots = engine.run(common::midday(), 60);
    for s in &snapshots {
        assert!(s.flow_lps < 5.0);
        assert_eq!(s.buzzer, BuzzerState::Safe);
    }
}

#[test]
fn baseline_and_low_flow_differ_only_in_flow() {
    let mut baseline = common::baseline_engine();
    let mut low_flow =
        Engine::from_config(&PanelConfig::from_preset("low_flow").unwrap()).unwrap();

    let b = baseline.run(common::midday(), 10);
    let l = low_flow.run(common::midday(), 10);

    for (sb, sl) in b.iter().zip(l.iter()) {
        assert_eq!(sb.battery_pct, sl.battery_pct);
        assert_eq!(sb.motor_rpm, sl.motor_rpm);
        assert_eq!(sb.ats_mode, sl.ats_mode);
        assert_ne!(sb.buzzer, sl.buzzer);
    }
}

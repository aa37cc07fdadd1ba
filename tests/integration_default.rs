//! Integration tests for the baseline panel.

mod common;

use panel_sim::config::PanelConfig;
use panel_sim::io::export::write_csv;
use panel_sim::sim::ats::AtsMode;
use panel_sim::sim::battery::BatteryDirection;
use panel_sim::sim::engine::Engine;
use panel_sim::sim::flow::BuzzerState;

#[test]
fn full_run_produces_one_snapshot_per_tick() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::midday(), 60);
    assert_eq!(snapshots.len(), 60);
    for (i, s) in snapshots.iter().enumerate() {
        assert_eq!(s.tick, i);
    }
    // The engine's own state matches the last rendered snapshot
    assert_eq!(
        engine.battery().percent,
        snapshots.last().unwrap().battery_pct
    );
}

#[test]
fn determinism_two_identical_runs_produce_identical_results() {
    let mut engine1 = common::baseline_engine();
    let mut engine2 = common::baseline_engine();

    let run1 = engine1.run(common::midday(), 120);
    let run2 = engine2.run(common::midday(), 120);

    assert_eq!(run1.len(), run2.len());
    for (s1, s2) in run1.iter().zip(run2.iter()) {
        assert_eq!(s1.timestamp, s2.timestamp);
        assert_eq!(s1.peak, s2.peak);
        assert_eq!(s1.battery_pct, s2.battery_pct);
        assert_eq!(s1.ats_mode, s2.ats_mode);
        assert_eq!(s1.buzzer, s2.buzzer);
    }
}

#[test]
fn first_peak_tick_drops_level_by_one_sixtieth() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::midday(), 1);
    assert!((snapshots[0].battery_pct - (50.0 - 1.0 / 60.0)).abs() < 1e-5);
}

#[test]
fn first_off_peak_tick_raises_level_by_half_sixtieth() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::early_morning(), 1);
    assert!((snapshots[0].battery_pct - (50.0 + 0.5 / 60.0)).abs() < 1e-5);
}

#[test]
fn battery_stays_in_bounds_across_a_long_mixed_run() {
    let mut engine = common::baseline_engine();
    // Two hours straddling the window boundary
    let snapshots = engine.run(common::at(9, 0, 0), 7200);
    for s in &snapshots {
        assert!(
            (0.0..=100.0).contains(&s.battery_pct),
            "battery out of bounds at t={}: {}",
            s.tick,
            s.battery_pct
        );
    }
}

#[test]
fn sustained_peak_drains_to_zero_and_holds() {
    let mut engine = common::baseline_engine();
    // 50% at 1%/min is 3000 ticks; run an hour straight inside the window
    let snapshots = engine.run(common::at(11, 0, 0), 3600);
    assert_eq!(snapshots[3599].battery_pct, 0.0);
    // Held at zero once drained, never negative
    for s in &snapshots[3000..] {
        assert!(s.battery_pct >= 0.0);
    }
    assert_eq!(snapshots[3300].battery_pct, 0.0);
}

#[test]
fn sustained_off_peak_fills_to_hundred_and_holds() {
    let mut engine = common::baseline_engine();
    // 50% at 0.5%/min is 6000 ticks; evening hours stay off-peak
    let snapshots = engine.run(common::at(19, 0, 0), 6200);
    assert_eq!(snapshots[6199].battery_pct, 100.0);
    assert_eq!(snapshots[6100].battery_pct, 100.0);
}

#[test]
fn window_boundaries_flip_exactly_on_the_hour() {
    let mut engine = common::baseline_engine();
    let opening = engine.run(common::at(9, 59, 58), 4);
    assert!(!opening[0].peak); // 09:59:58
    assert!(!opening[1].peak); // 09:59:59
    assert!(opening[2].peak); // 10:00:00 — inclusive
    assert!(opening[3].peak); // 10:00:01

    let mut engine = common::baseline_engine();
    let closing = engine.run(common::at(17, 59, 58), 4);
    assert!(closing[0].peak); // 17:59:58
    assert!(closing[1].peak); // 17:59:59
    assert!(!closing[2].peak); // 18:00:00 — exclusive
    assert!(!closing[3].peak);
}

#[test]
fn ats_mode_and_battery_direction_track_the_peak_flag() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::at(9, 59, 0), 180);
    for s in &snapshots {
        if s.peak {
            assert_eq!(s.ats_mode, AtsMode::Bess);
            assert_eq!(s.battery_direction, BatteryDirection::Discharging);
        } else {
            assert_eq!(s.ats_mode, AtsMode::Grid);
            assert_eq!(s.battery_direction, BatteryDirection::Charging);
        }
    }
}

#[test]
fn baseline_flow_exceeds_threshold_on_every_tick() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::midday(), 30);
    for s in &snapshots {
        assert!((s.flow_lps - 19.635).abs() < 1e-2);
        assert_eq!(s.buzzer, BuzzerState::Alert);
        assert_eq!(s.motor_rpm, 1200.0);
    }
}

#[test]
fn snapshot_display_round_trips_key_fields() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::midday(), 1);
    let line = format!("{}", snapshots[0]);
    assert!(line.contains("12:00:00"));
    assert!(line.contains("ats=bess"));
    assert!(line.contains("1200 RPM"));
    assert!(line.contains("19.63 L/s"));
}

#[test]
fn csv_export_covers_the_full_run() {
    let mut engine = common::baseline_engine();
    let snapshots = engine.run(common::midday(), 25);

    let mut buf = Vec::new();
    write_csv(&snapshots, &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 26); // header + 25 rows
    assert!(lines[0].starts_with("tick,timestamp,peak"));
    assert!(lines[1].contains("bess"));
}

#[test]
fn custom_window_from_toml_drives_classification() {
    let toml = r#"
[peak_hours]
start = "09:00:00"
end = "17:30:00"
"#;
    let config = PanelConfig::from_toml_str(toml).unwrap();
    assert!(config.validate().is_empty());
    let mut engine = Engine::from_config(&config).unwrap();

    let snapshots = engine.run(common::at(8, 59, 59), 2);
    assert!(!snapshots[0].peak); // 08:59:59
    assert!(snapshots[1].peak); // 09:00:00
}

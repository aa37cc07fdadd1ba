//! TUI layout and panel-region rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full panel frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // ATS status bar
            Constraint::Min(8),    // battery level chart
            Constraint::Length(4), // battery gauge + status
            Constraint::Length(5), // motor / flow / buzzer readouts
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_ats(frame, app, chunks[1]);
    render_battery_chart(frame, app, chunks[2]);
    render_battery(frame, app, chunks[3]);
    render_readouts(frame, app, chunks[4]);
    render_footer(frame, chunks[5]);
}

/// Header bar: preset name, tick count, clock, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state_label = if app.paused { "PAUSED" } else { "RUNNING" };
    let state_icon = if app.paused { "‖" } else { "▶" };

    let clock = app
        .last_snapshot()
        .map_or_else(|| "--:--:--".to_string(), |s| {
            s.timestamp.format("%H:%M:%S").to_string()
        });

    let header = Line::from(vec![
        Span::styled(
            " PANEL-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ t={} │ {clock} │ {state_icon} {state_label} ",
            app.tick_count,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// ATS status bar: mode label with the mode's color.
fn render_ats(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(s) = app.last_snapshot() {
        Line::from(Span::styled(
            format!("ATS Switch is in: {}", s.ats_mode.label()),
            Style::default()
                .fg(style::ats_color(s.ats_mode))
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("Waiting for first tick...")
    };

    let block = Block::default().title(" ATS Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Battery level history chart.
fn render_battery_chart(frame: &mut Frame, app: &App, area: Rect) {
    let level_data: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|s| (s.tick as f64, f64::from(s.battery_pct)))
        .collect();

    let x_lo = level_data.first().map_or(0.0, |p| p.0);
    let x_hi = level_data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let color = app
        .last_snapshot()
        .map_or(style::CHARGING, |s| style::battery_color(s.battery_direction));

    let datasets = vec![
        Dataset::default()
            .name("Level %")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(color))
            .data(&level_data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Battery Level History ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("tick")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{}", x_lo as u64), format!("{}", x_hi as u64)]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds([0.0, 100.0])
                .labels(vec!["0".to_string(), "50".to_string(), "100".to_string()]),
        );

    frame.render_widget(chart, area);
}

/// Battery gauge with the status and percentage lines beside it.
fn render_battery(frame: &mut Frame, app: &App, area: Rect) {
    let pct = app.battery_pct();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(area);

    let color = app
        .last_snapshot()
        .map_or(style::CHARGING, |s| style::battery_color(s.battery_direction));

    let gauge = Gauge::default()
        .block(Block::default().title(" Battery ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio((f64::from(pct) / 100.0).clamp(0.0, 1.0))
        .label(format!("{pct:.1}%"));
    frame.render_widget(gauge, chunks[0]);

    let lines = if let Some(s) = app.last_snapshot() {
        vec![
            Line::from(format!("Battery Status: {}", s.battery_direction.label())),
            Line::from(s.battery_display()),
        ]
    } else {
        vec![Line::from("Waiting for first tick...")]
    };
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}

/// Motor speed, flow rate, and buzzer readouts.
fn render_readouts(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_unit_readout(
        frame,
        chunks[0],
        " Motor Speed ",
        app.last_snapshot().map(|s| format!("{:.0}", s.motor_rpm)),
        "RPM",
    );
    render_unit_readout(
        frame,
        chunks[1],
        " Flow Rate ",
        app.last_snapshot().map(|s| format!("{:.2}", s.flow_lps)),
        "L/s",
    );
    render_buzzer(frame, app, chunks[2]);
}

/// A bordered value-plus-unit readout.
fn render_unit_readout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: Option<String>,
    unit: &str,
) {
    let line = match value {
        Some(v) => Line::from(vec![
            Span::styled(v, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(unit.to_string(), Style::default().fg(style::FOOTER_FG)),
        ]),
        None => Line::from("--"),
    };
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Buzzer region: safe/alert label with matching color.
fn render_buzzer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(s) = app.last_snapshot() {
        Line::from(Span::styled(
            s.buzzer.label(),
            Style::default()
                .fg(style::buzzer_color(s.buzzer))
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("--")
    };
    let block = Block::default().title(" Buzzer ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

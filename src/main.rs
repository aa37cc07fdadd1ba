//! Panel simulator entry point — CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use chrono::{Local, NaiveDateTime};

use panel_sim::config::PanelConfig;
use panel_sim::io::export::export_csv;
use panel_sim::sim::engine::Engine;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    ticks_override: Option<usize>,
    start_override: Option<String>,
    telemetry_out: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("panel-sim — Plant-panel dashboard simulator (ATS / battery / motor / flow)");
    eprintln!();
    eprintln!("Usage: panel-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load panel config from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, overnight, low_flow)");
    eprintln!("  --ticks <n>              Override the number of headless ticks");
    eprintln!("  --start <timestamp>      Override the start instant (YYYY-MM-DDTHH:MM:SS)");
    eprintln!("  --telemetry-out <path>   Export tick snapshots to CSV");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Run the live dashboard instead of a headless run");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        ticks_override: None,
        start_override: None,
        telemetry_out: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--ticks" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ticks requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.ticks_override = Some(n);
                } else {
                    eprintln!("error: --ticks value \"{}\" is not a valid count", args[i]);
                    process::exit(1);
                }
            }
            "--start" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --start requires a timestamp argument");
                    process::exit(1);
                }
                cli.start_override = Some(args[i].clone());
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Resolves the headless start instant: CLI override, config, then "now".
fn resolve_start(cli: &CliArgs, config: &PanelConfig) -> NaiveDateTime {
    if let Some(ref s) = cli.start_override {
        match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            Ok(start) => return start,
            Err(e) => {
                eprintln!("error: --start value \"{s}\" is not a valid timestamp: {e}");
                process::exit(1);
            }
        }
    }
    match config.simulation.start_instant() {
        Ok(Some(start)) => start,
        Ok(None) => Local::now().naive_local(),
        Err(e) => {
            // validate() already rejected this; unreachable in practice
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = parse_args();

    // Load config: --config takes priority, then --preset, then baseline default
    let mut config = if let Some(ref path) = cli.config_path {
        match PanelConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match PanelConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        PanelConfig::baseline()
    };

    // Apply tick-count override
    if let Some(n) = cli.ticks_override {
        config.simulation.ticks = n;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Live dashboard mode
    #[cfg(feature = "tui")]
    if cli.tui {
        if cli.config_path.is_some() {
            eprintln!("error: --tui runs from a preset; --config is not supported with it");
            process::exit(1);
        }
        let preset = cli.preset.as_deref().unwrap_or("baseline");
        panel_sim::tui::run(preset);
        return;
    }

    // Headless run
    let start = resolve_start(&cli, &config);
    let ticks = config.simulation.ticks;

    let mut engine = match Engine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let snapshots = engine.run(start, ticks);

    // Print per-tick snapshots
    for s in &snapshots {
        println!("{s}");
    }

    // Final panel state
    if let Some(last) = snapshots.last() {
        println!(
            "\nFinal: battery {:.1}% ({}) | ats {} | {:.0} RPM | {:.2} L/s [{}]",
            last.battery_pct,
            last.battery_direction.label(),
            last.ats_mode.name(),
            last.motor_rpm,
            last.flow_lps,
            last.buzzer.name(),
        );
    }

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&snapshots, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(panel_sim::api::AppState { config, snapshots });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(panel_sim::api::serve(state, addr));
    }
}

//! CSV export for panel tick snapshots.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickSnapshot;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "tick,timestamp,peak,ats_mode,battery_pct,battery_status,\
                      motor_rpm,flow_lps,buzzer";

/// Exports tick snapshots to a CSV file at the given path.
///
/// Writes a header row followed by one data row per tick using the schema v1
/// column layout. Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `snapshots` - Complete run snapshots
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(snapshots: &[TickSnapshot], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(snapshots, buf)
}

/// Writes tick snapshots as CSV to any writer.
///
/// # Arguments
///
/// * `snapshots` - Complete run snapshots
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(snapshots: &[TickSnapshot], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for s in snapshots {
        wtr.write_record(&[
            s.tick.to_string(),
            s.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            s.peak.to_string(),
            s.ats_mode.name().to_string(),
            format!("{:.4}", s.battery_pct),
            s.battery_direction.label().to_string(),
            format!("{:.0}", s.motor_rpm),
            format!("{:.4}", s.flow_lps),
            s.buzzer.name().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

//! Telemetry output formats.

/// CSV export for panel tick snapshots.
pub mod export;

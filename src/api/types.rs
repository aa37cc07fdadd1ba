//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;
use crate::sim::types::TickSnapshot;

/// Combined state response: config and the latest tick snapshot.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Panel configuration.
    pub config: PanelConfig,
    /// Most recent tick snapshot, absent for an empty run.
    pub latest_tick: Option<TickSnapshot>,
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start tick (inclusive).
    pub from: Option<usize>,
    /// End tick (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

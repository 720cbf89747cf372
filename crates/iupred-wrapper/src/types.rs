//! Core data types for predictions returned by the service.

use serde::{Deserialize, Serialize};

/// Structured result fetched from `/raw_json<id>`.
///
/// The service sends more fields than these; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// The submitted sequence as echoed by the service.
    pub sequence: String,
    /// One IUPred2 disorder score per residue, in sequence order.
    #[serde(rename = "iupred2")]
    pub scores: Vec<f64>,
}

/// Machine-readable output record for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutput<'a> {
    pub sequence: &'a str,
    pub mask: String,
    pub scores: &'a [f64],
}

//! Text rendering of disorder predictions.

use crate::types::{PredictionOutput, ResultDocument};

/// Scores strictly above this are called disordered.
pub const DISORDER_THRESHOLD: f64 = 0.5;

/// Mask character for a disordered residue.
pub const DISORDERED: char = 'D';
/// Mask character for an ordered residue.
pub const ORDERED: char = '-';

/// One mask character per score.
pub fn disorder_mask(scores: &[f64]) -> String {
    scores
        .iter()
        .map(|&s| if s > DISORDER_THRESHOLD { DISORDERED } else { ORDERED })
        .collect()
}

/// Sequence line followed by mask line, no trailing newline.
pub fn render(result: &ResultDocument) -> String {
    format!("{}\n{}", result.sequence, disorder_mask(&result.scores))
}

/// JSON line for `--json` output.
pub fn render_json(result: &ResultDocument) -> serde_json::Result<String> {
    serde_json::to_string(&PredictionOutput {
        sequence: &result.sequence,
        mask: disorder_mask(&result.scores),
        scores: &result.scores,
    })
}

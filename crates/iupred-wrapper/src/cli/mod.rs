//! CLI command implementations for the iupred3-wrapper binary.

pub mod output;
pub mod predict_cmd;

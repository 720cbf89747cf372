//! Output helpers: results go to stdout, diagnostics to stderr.

use crate::render;
use crate::types::ResultDocument;

/// Program name used as the prefix of error messages.
pub const PROG: &str = "iupred3-wrapper";

/// How results are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// One JSON object per line instead of sequence/mask pairs.
    pub json: bool,
    /// Show error causes and progress.
    pub verbose: bool,
}

/// Print every result to stdout, in order.
pub fn print_results(results: &[ResultDocument], mode: OutputMode) -> serde_json::Result<()> {
    for result in results {
        if mode.json {
            println!("{}", render::render_json(result)?);
        } else {
            println!("{}", render::render(result));
        }
    }
    Ok(())
}

/// Report an error the way every message of this tool looks.
pub fn print_error(message: &str) {
    eprintln!("{PROG}: error: {message}");
}

/// Print the chain of causes under an error (verbose mode only).
pub fn print_causes(err: &(dyn std::error::Error + 'static), mode: OutputMode) {
    if !mode.verbose {
        return;
    }
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

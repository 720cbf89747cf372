//! FASTA input.
//!
//! Only sequences are kept. Record headers are parsed by the reader but
//! discarded; request order is the only link between input and output.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use crate::error::{WrapperError, WrapperResult};

/// Read every sequence from a FASTA file, in file order.
pub fn read_sequences(path: &Path) -> WrapperResult<Vec<String>> {
    if !path.exists() {
        return Err(WrapperError::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    parse_sequences(file)
}

/// Read every sequence from any FASTA source.
pub fn parse_sequences<R: Read>(source: R) -> WrapperResult<Vec<String>> {
    let mut sequences = Vec::new();
    for record in fasta::Reader::new(source).records() {
        let record = record.map_err(|e| WrapperError::Fasta(e.to_string()))?;
        let seq = String::from_utf8_lossy(record.seq()).into_owned();
        sequences.push(seq);
    }
    Ok(sequences)
}

//! Lynx acquisition files (.tem, .ltx, .ltd)
//!
//! The Lynx binary layout is only exposed through the vendor's Windows COM
//! component (`LynxFile.FileTS`), which this crate does not bind. The reader
//! still claims the extensions so these files are reported as unreadable
//! rather than as an unknown type.

use super::{FileReader, RawRecord, ReadError};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LynxReader;

impl FileReader for LynxReader {
    fn format_name(&self) -> &'static str {
        "Lynx"
    }

    fn read(&self, path: &Path) -> Result<RawRecord, ReadError> {
        tracing::debug!("Lynx reader invoked for {}", path.display());
        Err(ReadError::Unsupported {
            format: self.format_name(),
            reason: "the LynxFile.FileTS COM runtime is required; export the file as CSV"
                .to_string(),
        })
    }
}

/// Normalize a raw name or unit: whitespace runs become `_`, anything other
/// than alphanumerics and `_ - . /` is dropped
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/') {
            out.push(ch);
        }
    }

    out
}

/// Column label for Lynx channel `index` (0-based): `"<index+1>:<name>[<unit>]"`
///
/// The unit suffix is omitted when the unit is blank after sanitizing.
pub fn channel_label(index: usize, name: &str, unit: &str) -> String {
    let name = sanitize(name);
    let unit = sanitize(unit);

    if unit.is_empty() {
        format!("{}:{}", index + 1, name)
    } else {
        format!("{}:{}[{}]", index + 1, name, unit)
    }
}

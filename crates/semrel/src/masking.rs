//! Secret redaction for log output.
//!
//! The hosting-service clients expose the literal values that must never
//! appear in logs; the writer installed at startup consults the registered
//! set on every write, so secrets learned after logging is initialized are
//! still covered.

use std::io::{self, Write};
use std::sync::{LazyLock, PoisonError, RwLock};

use tracing_subscriber::fmt::MakeWriter;

const REDACTION: &str = "*****";

static MASKS: LazyLock<RwLock<Vec<String>>> = LazyLock::new(|| RwLock::new(Vec::new()));

/// Registers literal values to redact from all subsequent log output.
///
/// Very short values are skipped, they would redact half the alphabet.
pub fn add_masks(values: impl IntoIterator<Item = String>) {
    let mut masks = MASKS.write().unwrap_or_else(PoisonError::into_inner);
    for value in values {
        if value.len() >= 4 && !masks.contains(&value) {
            masks.push(value);
        }
    }
}

/// Replaces every registered secret in `input` with a placeholder.
#[must_use]
pub fn redact(input: &str) -> String {
    let masks = MASKS.read().unwrap_or_else(PoisonError::into_inner);
    let mut output = input.to_string();
    for mask in masks.iter() {
        if output.contains(mask.as_str()) {
            output = output.replace(mask.as_str(), REDACTION);
        }
    }
    output
}

/// A `MakeWriter` producing stderr writers that redact registered secrets.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskingStderr;

/// The per-event writer; redacts each chunk before it reaches stderr.
pub struct RedactingWriter {
    inner: io::Stderr,
}

impl Write for RedactingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(redact(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<'a> MakeWriter<'a> for MaskingStderr {
    type Writer = RedactingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: io::stderr(),
        }
    }
}

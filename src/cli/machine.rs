//! Machine-readable (JSON) output
//!
//! When `-o json` is in effect, errors are emitted to stderr as a single
//! structured object instead of prose. The create flow does not emit a
//! structured success object.

use crate::infrastructure::constants::{MACHINE_OUTPUT_API_VERSION, MACHINE_OUTPUT_KIND_ERROR};
use serde::Serialize;

/// Structured error for machine-readable output
#[derive(Debug, Serialize)]
pub struct MachineError {
    pub kind: &'static str,
    #[serde(rename = "apiVersion")]
    pub api_version: &'static str,
    pub message: String,
}

impl MachineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: MACHINE_OUTPUT_KIND_ERROR,
            api_version: MACHINE_OUTPUT_API_VERSION,
            message: message.into(),
        }
    }
}

/// Emit a structured error object on the error stream.
pub fn output_error(error: &MachineError) {
    match serde_json::to_string(error) {
        Ok(json) => eprintln!("{}", json),
        // No structured channel left if serialization itself fails.
        Err(e) => eprintln!("Unable to marshal JSON: {}", e),
    }
}

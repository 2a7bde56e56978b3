//! Telemetry envelope decoding.
//!
//! The envelope is the JSON dump produced by gNMI clients such as `gnmic`:
//!
//! ```text
//! [{ "source": "...", "time": "...", "updates": [{ "Path": "...", "values": { ... } }] }]
//! ```
//!
//! Decoding is all-or-nothing: either every response is returned, in
//! document order, or an [`Error::EnvelopeDecode`] is raised.

use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use gnmi_rdf_common::{Format, decode, detect_format};

use crate::error::{Error, Result};

/// One notification from a gNMI target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryResponse {
    /// Target address or name (e.g. "192.168.151.7:6030").
    #[serde(alias = "Source")]
    pub source: String,

    /// Notification time as reported by the collector.
    #[serde(alias = "Time")]
    pub time: String,

    /// Path/value updates in the order they were received.
    #[serde(alias = "Updates")]
    pub updates: Vec<TelemetryUpdate>,
}

impl TelemetryResponse {
    /// Parse [`time`](Self::time) as RFC 3339.
    ///
    /// Returns `None` when the collector used another format.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.time).ok()
    }
}

/// A single path/value update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryUpdate {
    /// XPath-like path, e.g. `interfaces/interface[name=Ethernet8]/state/counters`.
    #[serde(rename = "Path", alias = "path")]
    pub path: String,

    /// Values keyed by schema path.
    #[serde(default, alias = "Values")]
    pub values: Map<String, Value>,
}

/// Encoding of the input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Detect JSON or CBOR from the first byte.
    #[default]
    Auto,
    Json,
    Cbor,
}

impl InputFormat {
    /// Resolve to a concrete wire format for the given payload.
    pub fn resolve(&self, data: &[u8]) -> Format {
        match self {
            InputFormat::Auto => detect_format(data),
            InputFormat::Json => Format::Json,
            InputFormat::Cbor => Format::Cbor,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "json" => Ok(InputFormat::Json),
            "cbor" => Ok(InputFormat::Cbor),
            other => Err(format!("unknown input format: {}", other)),
        }
    }
}

/// Decode a complete envelope from bytes.
///
/// Empty or whitespace-only input is rejected with [`Error::EmptyEnvelope`]
/// before format detection.
pub fn parse_envelope(data: &[u8], format: InputFormat) -> Result<Vec<TelemetryResponse>> {
    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(Error::EmptyEnvelope);
    }

    let format = format.resolve(data);
    debug!("Decoding {} byte envelope as {}", data.len(), format);
    decode(data, format).map_err(Error::EnvelopeDecode)
}

/// Read a stream to the end and decode it as an envelope.
pub fn read_envelope<R: Read>(mut reader: R, format: InputFormat) -> Result<Vec<TelemetryResponse>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_envelope(&data, format)
}

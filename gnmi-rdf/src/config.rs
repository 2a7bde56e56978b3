//! Converter configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use gnmi_rdf_common::LoggingConfig;

use crate::envelope::InputFormat;
use crate::triples::CounterSelection;

/// Top-level configuration for the converter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Input decoding settings
    #[serde(default)]
    pub input: InputSettings,

    /// RDF output settings
    #[serde(default)]
    pub rdf: RdfSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the envelope is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    /// Envelope encoding
    #[serde(default)]
    pub format: InputFormat,
}

/// What gets emitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RdfSettings {
    /// Which counters become triples
    #[serde(default)]
    pub counters: CounterSelection,
}

impl ConverterConfig {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: impl AsRef<Path>) -> gnmi_rdf_common::Result<Self> {
        gnmi_rdf_common::load_config(path)
    }
}

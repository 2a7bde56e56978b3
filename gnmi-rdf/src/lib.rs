//! gNMI counters to RDF converter
//!
//! Reads gNMI telemetry dumps and emits OpenConfig interface counters as
//! RDF N-Triples.
//!
//! # Pipeline
//!
//! ```text
//! envelope -> counters updates -> CounterRecord + interface name -> triples
//! ```
//!
//! # Output
//!
//! ```text
//! <http://example.net/interfaces/Ethernet8> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://openconfig.net/rdf/Interface> .
//! <http://example.net/interfaces/Ethernet8> <http://openconfig.net/rdf/inOctets> "25833637"^^<http://www.w3.org/2001/XMLSchema#integer> .
//! ```

pub mod config;
pub mod converter;
pub mod counters;
pub mod envelope;
pub mod error;
pub mod path;
pub mod triples;

pub use config::ConverterConfig;
pub use converter::{ConversionSummary, Converter, ResponseConversion};
pub use counters::{CounterField, CounterRecord, extract_counters};
pub use envelope::{InputFormat, TelemetryResponse, TelemetryUpdate, parse_envelope, read_envelope};
pub use error::{Error, Result, UpdateError};
pub use path::parse_interface_name;
pub use triples::{CounterSelection, InterfaceEntity, Term, Triple};

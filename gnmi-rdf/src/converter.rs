//! Response-to-triples pipeline.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::counters::extract_counters;
use crate::envelope::{TelemetryResponse, TelemetryUpdate};
use crate::error::{Error, Result, UpdateError};
use crate::path::{is_counters_path, parse_interface_name};
use crate::triples::{CounterSelection, InterfaceEntity, Triple, write_ntriples};

/// Counts accumulated over a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub responses: usize,
    pub updates_converted: usize,
    pub updates_skipped: usize,
    pub updates_failed: usize,
    pub triples: usize,
}

/// Result of converting one response.
///
/// Failed updates contribute no triples; their errors are kept here so the
/// caller can decide how to surface them.
#[derive(Debug, Default)]
pub struct ResponseConversion {
    pub triples: Vec<Triple>,
    pub converted: usize,
    pub skipped: usize,
    pub failures: Vec<Error>,
}

/// Converts telemetry responses into RDF triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    selection: CounterSelection,
}

impl Converter {
    pub fn new(selection: CounterSelection) -> Self {
        Self { selection }
    }

    /// Convert a single update.
    ///
    /// Returns `Ok(None)` when the update is not a counters update.
    pub fn convert_update(
        &self,
        update: &TelemetryUpdate,
    ) -> std::result::Result<Option<Vec<Triple>>, UpdateError> {
        if !is_counters_path(&update.path) {
            return Ok(None);
        }

        let counters = extract_counters(update)?;

        let name = parse_interface_name(&update.path)
            .ok_or_else(|| UpdateError::InvalidInterfaceName(update.path.clone()))?;

        let iface = InterfaceEntity::new(name, Some(counters));
        iface.to_triples(self.selection).map(Some)
    }

    /// Convert every update of a response, in order.
    ///
    /// A failing update is logged with the response source and skipped;
    /// its siblings are still converted.
    pub fn convert_response(&self, response: &TelemetryResponse) -> ResponseConversion {
        let mut result = ResponseConversion::default();

        if response.timestamp().is_none() {
            debug!(
                "Response from {} has a non RFC 3339 time: {}",
                response.source, response.time
            );
        }

        for update in &response.updates {
            match self.convert_update(update) {
                Ok(Some(triples)) => {
                    debug!(
                        "Converted {} into {} triples",
                        update.path,
                        triples.len()
                    );
                    result.triples.extend(triples);
                    result.converted += 1;
                }
                Ok(None) => {
                    debug!("Skipping non-counters update {}", update.path);
                    result.skipped += 1;
                }
                Err(e) => {
                    let err = Error::update(&response.source, &update.path, e);
                    warn!("{}", err);
                    result.failures.push(err);
                }
            }
        }

        result
    }

    /// Convert all responses and write the triples as N-Triples.
    ///
    /// Only I/O errors on `out` abort the run; per-update failures are
    /// logged and counted in the summary.
    pub fn convert<W: Write>(
        &self,
        responses: &[TelemetryResponse],
        out: &mut W,
    ) -> Result<ConversionSummary> {
        let mut summary = ConversionSummary::default();

        for response in responses {
            let converted = self.convert_response(response);
            write_ntriples(out, &converted.triples)?;

            summary.responses += 1;
            summary.updates_converted += converted.converted;
            summary.updates_skipped += converted.skipped;
            summary.updates_failed += converted.failures.len();
            summary.triples += converted.triples.len();
        }

        info!(
            "Converted {} responses: {} updates converted, {} skipped, {} failed, {} triples",
            summary.responses,
            summary.updates_converted,
            summary.updates_skipped,
            summary.updates_failed,
            summary.triples
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(path: &str, values: serde_json::Value) -> TelemetryUpdate {
        TelemetryUpdate {
            path: path.to_string(),
            values: values.as_object().cloned().unwrap_or_default(),
        }
    }

    fn counters_update(name: &str, in_octets: &str) -> TelemetryUpdate {
        update(
            &format!("interfaces/interface[name={}]/state/counters", name),
            json!({
                "interfaces/interface/state/counters": {
                    "openconfig-interfaces:in-octets": in_octets
                }
            }),
        )
    }

    fn response(updates: Vec<TelemetryUpdate>) -> TelemetryResponse {
        TelemetryResponse {
            source: "192.168.151.7:6030".to_string(),
            time: "1970-01-01T01:00:00+01:00".to_string(),
            updates,
        }
    }

    #[test]
    fn test_non_counters_update_is_skipped() {
        let converter = Converter::default();
        let result = converter
            .convert_update(&update(
                "interfaces/interface[name=eth0]/state/oper-status",
                json!({}),
            ))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let converter = Converter::default();
        let err = converter
            .convert_update(&update(
                "interfaces/interface/state/counters",
                json!({ "interfaces/interface/state/counters": { "in-octets": "1" } }),
            ))
            .unwrap_err();
        assert!(matches!(err, UpdateError::InvalidInterfaceName(_)));
    }

    #[test]
    fn test_failed_update_does_not_stop_siblings() {
        let converter = Converter::default();
        let resp = response(vec![
            counters_update("eth0", "10"),
            update(
                "interfaces/interface[name=eth1]/state/counters",
                json!({ "something/else": {} }),
            ),
            counters_update("eth2", "not-a-number"),
            counters_update("eth3", "30"),
        ]);

        let result = converter.convert_response(&resp);
        assert_eq!(result.converted, 2);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.triples.len(), 4);
        assert_eq!(result.triples[0].subject, "http://example.net/interfaces/eth0");
        assert_eq!(result.triples[2].subject, "http://example.net/interfaces/eth3");

        match &result.failures[0] {
            Error::Update {
                source_id,
                path,
                error: UpdateError::MissingCounters,
            } => {
                assert_eq!(source_id, "192.168.151.7:6030");
                assert!(path.contains("eth1"));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
        assert!(matches!(
            &result.failures[1],
            Error::Update {
                error: UpdateError::CounterDecode(_),
                ..
            }
        ));
    }

    #[test]
    fn test_convert_writes_and_summarizes() {
        let converter = Converter::new(CounterSelection::Reference);
        let responses = vec![
            response(vec![
                counters_update("eth0", "10"),
                update("interfaces/interface[name=eth0]/state", json!({})),
            ]),
            response(vec![update(
                "interfaces/interface/state/counters",
                json!({ "interfaces/interface/state/counters": {} }),
            )]),
        ];

        let mut out = Vec::new();
        let summary = converter.convert(&responses, &mut out).unwrap();

        assert_eq!(
            summary,
            ConversionSummary {
                responses: 2,
                updates_converted: 1,
                updates_skipped: 1,
                updates_failed: 1,
                triples: 2,
            }
        );
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_convert_is_deterministic() {
        let converter = Converter::new(CounterSelection::All);
        let responses = vec![response(vec![
            counters_update("eth0", "10"),
            counters_update("eth1", "20"),
        ])];

        let mut first = Vec::new();
        let mut second = Vec::new();
        converter.convert(&responses, &mut first).unwrap();
        converter.convert(&responses, &mut second).unwrap();
        assert_eq!(first, second);
    }
}

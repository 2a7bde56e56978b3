//! RDF triple model and N-Triples output.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::counters::{CounterField, CounterRecord};
use crate::error::UpdateError;

/// Fixed RDF vocabulary.
pub mod vocab {
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// Namespace for OpenConfig classes and properties.
    pub const OPENCONFIG_NS: &str = "http://openconfig.net/rdf/";

    /// Class of every interface subject.
    pub const INTERFACE_CLASS: &str = "http://openconfig.net/rdf/Interface";

    pub const IN_OCTETS: &str = "http://openconfig.net/rdf/inOctets";
    pub const IN_BROADCAST_PKTS: &str = "http://openconfig.net/rdf/inBroadcastPkts";

    /// Interface subjects are `<INTERFACE_BASE_URI><name>`.
    pub const INTERFACE_BASE_URI: &str = "http://example.net/interfaces/";
}

/// Subject IRI for an interface. The name is inserted as-is.
pub fn interface_uri(name: &str) -> String {
    format!("{}{}", vocab::INTERFACE_BASE_URI, name)
}

/// Predicate IRI for a counter (e.g. `http://openconfig.net/rdf/inOctets`).
pub fn counter_predicate(field: CounterField) -> String {
    match field {
        CounterField::InOctets => vocab::IN_OCTETS.to_string(),
        CounterField::InBroadcastPkts => vocab::IN_BROADCAST_PKTS.to_string(),
        other => format!("{}{}", vocab::OPENCONFIG_NS, other.rdf_name()),
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    TypedLiteral { value: String, datatype: String },
}

impl Term {
    /// An `xsd:integer` literal.
    pub fn integer(value: u64) -> Self {
        Term::TypedLiteral {
            value: value.to_string(),
            datatype: vocab::XSD_INTEGER.to_string(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::TypedLiteral { value, datatype } => write!(f, "\"{}\"^^<{}>", value, datatype),
        }
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// Formats the triple as one N-Triples statement, without the line break.
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Write triples as N-Triples, one statement per line.
pub fn write_ntriples<W: Write>(out: &mut W, triples: &[Triple]) -> io::Result<()> {
    for triple in triples {
        writeln!(out, "{}", triple)?;
    }
    Ok(())
}

/// Which counters become triples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterSelection {
    /// Only `inOctets` and `inBroadcastPkts`.
    #[default]
    Reference,

    /// Every counter present in the record.
    All,
}

impl CounterSelection {
    /// Counters covered by this selection, in emission order.
    pub fn fields(&self) -> &'static [CounterField] {
        const REFERENCE: [CounterField; 2] =
            [CounterField::InOctets, CounterField::InBroadcastPkts];

        match self {
            CounterSelection::Reference => &REFERENCE,
            CounterSelection::All => &CounterField::ALL,
        }
    }
}

/// An interface and the counters reported for it in one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntity {
    pub name: String,
    pub counters: Option<CounterRecord>,
}

impl InterfaceEntity {
    pub fn new(name: impl Into<String>, counters: Option<CounterRecord>) -> Self {
        Self {
            name: name.into(),
            counters,
        }
    }

    /// Map the interface to triples.
    ///
    /// The `rdf:type` statement always comes first, followed by one
    /// statement per selected counter that is present.
    pub fn to_triples(&self, selection: CounterSelection) -> Result<Vec<Triple>, UpdateError> {
        if self.name.is_empty() {
            return Err(UpdateError::EmptyInterfaceName);
        }

        let subject = interface_uri(&self.name);
        let mut triples = vec![Triple::new(
            subject.clone(),
            vocab::RDF_TYPE,
            Term::Iri(vocab::INTERFACE_CLASS.to_string()),
        )];

        if let Some(counters) = &self.counters {
            for field in selection.fields() {
                if let Some(value) = counters.get(*field) {
                    triples.push(Triple::new(
                        subject.clone(),
                        counter_predicate(*field),
                        Term::integer(value),
                    ));
                }
            }
        }

        Ok(triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(triples: &[Triple]) -> Vec<String> {
        triples.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_reference_counters() {
        let counters = CounterRecord {
            in_octets: Some(25833637),
            in_broadcast_pkts: Some(2367884),
            out_octets: Some(2451633129),
            ..Default::default()
        };
        let iface = InterfaceEntity::new("Ethernet8", Some(counters));

        let triples = iface.to_triples(CounterSelection::Reference).unwrap();
        assert_eq!(
            lines(&triples),
            vec![
                "<http://example.net/interfaces/Ethernet8> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://openconfig.net/rdf/Interface> .",
                "<http://example.net/interfaces/Ethernet8> <http://openconfig.net/rdf/inOctets> \"25833637\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
                "<http://example.net/interfaces/Ethernet8> <http://openconfig.net/rdf/inBroadcastPkts> \"2367884\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
            ]
        );
    }

    #[test]
    fn test_sparse_emission() {
        let only_octets = CounterRecord {
            in_octets: Some(1),
            ..Default::default()
        };
        let triples = InterfaceEntity::new("eth0", Some(only_octets))
            .to_triples(CounterSelection::Reference)
            .unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].predicate, vocab::IN_OCTETS);

        let neither = CounterRecord {
            out_octets: Some(9),
            ..Default::default()
        };
        let triples = InterfaceEntity::new("eth0", Some(neither))
            .to_triples(CounterSelection::Reference)
            .unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].predicate, vocab::RDF_TYPE);
    }

    #[test]
    fn test_no_counters_record() {
        let triples = InterfaceEntity::new("eth0", None)
            .to_triples(CounterSelection::All)
            .unwrap();
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn test_all_counters_in_schema_order() {
        let counters = CounterRecord {
            in_octets: Some(1),
            in_errors: Some(0),
            out_unicast_pkts: Some(8177),
            ..Default::default()
        };
        let triples = InterfaceEntity::new("eth0", Some(counters))
            .to_triples(CounterSelection::All)
            .unwrap();

        let predicates: Vec<_> = triples.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(
            predicates,
            vec![
                vocab::RDF_TYPE,
                "http://openconfig.net/rdf/inOctets",
                "http://openconfig.net/rdf/inErrors",
                "http://openconfig.net/rdf/outUnicastPkts",
            ]
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = InterfaceEntity::new("", None)
            .to_triples(CounterSelection::Reference)
            .unwrap_err();
        assert!(matches!(err, UpdateError::EmptyInterfaceName));
    }

    #[test]
    fn test_counter_predicates_match_vocabulary() {
        assert_eq!(counter_predicate(CounterField::InOctets), vocab::IN_OCTETS);
        assert_eq!(
            counter_predicate(CounterField::InBroadcastPkts),
            vocab::IN_BROADCAST_PKTS
        );
        assert_eq!(interface_uri("Ethernet8"), "http://example.net/interfaces/Ethernet8");

        // Fixed predicates agree with the generic namespace + local name form
        for field in [CounterField::InOctets, CounterField::InBroadcastPkts] {
            assert_eq!(
                counter_predicate(field),
                format!("{}{}", vocab::OPENCONFIG_NS, field.rdf_name())
            );
        }
    }

    #[test]
    fn test_write_ntriples() {
        let triples = vec![
            Triple::new("http://a", "http://b", Term::Iri("http://c".to_string())),
            Triple::new("http://a", "http://d", Term::integer(0)),
        ];

        let mut out = Vec::new();
        write_ntriples(&mut out, &triples).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<http://a> <http://b> <http://c> .\n\
             <http://a> <http://d> \"0\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n"
        );
    }
}

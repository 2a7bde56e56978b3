//! OpenConfig interface counters.
//!
//! Counters arrive as a JSON object keyed by OpenConfig leaf names, with or
//! without the `openconfig-interfaces:` module prefix. gNMI JSON encodes
//! 64-bit integers as strings, but plain numbers are accepted too.

use serde::{Deserialize, Deserializer, de};

use crate::envelope::TelemetryUpdate;
use crate::error::UpdateError;

/// Key under which the counters object is stored in an update's values.
pub const COUNTERS_KEY: &str = "interfaces/interface/state/counters";

/// A counter defined by the OpenConfig interfaces model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    InOctets,
    InUnicastPkts,
    InBroadcastPkts,
    InMulticastPkts,
    InDiscards,
    InErrors,
    InFcsErrors,
    OutOctets,
    OutUnicastPkts,
    OutBroadcastPkts,
    OutMulticastPkts,
    OutDiscards,
    OutErrors,
}

impl CounterField {
    /// Every counter, in schema order.
    pub const ALL: [CounterField; 13] = [
        CounterField::InOctets,
        CounterField::InUnicastPkts,
        CounterField::InBroadcastPkts,
        CounterField::InMulticastPkts,
        CounterField::InDiscards,
        CounterField::InErrors,
        CounterField::InFcsErrors,
        CounterField::OutOctets,
        CounterField::OutUnicastPkts,
        CounterField::OutBroadcastPkts,
        CounterField::OutMulticastPkts,
        CounterField::OutDiscards,
        CounterField::OutErrors,
    ];

    /// YANG leaf name (e.g. "in-octets").
    pub fn leaf_name(&self) -> &'static str {
        match self {
            Self::InOctets => "in-octets",
            Self::InUnicastPkts => "in-unicast-pkts",
            Self::InBroadcastPkts => "in-broadcast-pkts",
            Self::InMulticastPkts => "in-multicast-pkts",
            Self::InDiscards => "in-discards",
            Self::InErrors => "in-errors",
            Self::InFcsErrors => "in-fcs-errors",
            Self::OutOctets => "out-octets",
            Self::OutUnicastPkts => "out-unicast-pkts",
            Self::OutBroadcastPkts => "out-broadcast-pkts",
            Self::OutMulticastPkts => "out-multicast-pkts",
            Self::OutDiscards => "out-discards",
            Self::OutErrors => "out-errors",
        }
    }

    /// Local name used for the RDF predicate (e.g. "inOctets").
    pub fn rdf_name(&self) -> &'static str {
        match self {
            Self::InOctets => "inOctets",
            Self::InUnicastPkts => "inUnicastPkts",
            Self::InBroadcastPkts => "inBroadcastPkts",
            Self::InMulticastPkts => "inMulticastPkts",
            Self::InDiscards => "inDiscards",
            Self::InErrors => "inErrors",
            Self::InFcsErrors => "inFcsErrors",
            Self::OutOctets => "outOctets",
            Self::OutUnicastPkts => "outUnicastPkts",
            Self::OutBroadcastPkts => "outBroadcastPkts",
            Self::OutMulticastPkts => "outMulticastPkts",
            Self::OutDiscards => "outDiscards",
            Self::OutErrors => "outErrors",
        }
    }
}

impl std::fmt::Display for CounterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.leaf_name())
    }
}

/// Interface counters; any of them may be missing from a given update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CounterRecord {
    #[serde(
        rename = "openconfig-interfaces:in-octets",
        alias = "in-octets",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_octets: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-unicast-pkts",
        alias = "in-unicast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_unicast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-broadcast-pkts",
        alias = "in-broadcast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_broadcast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-multicast-pkts",
        alias = "in-multicast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_multicast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-discards",
        alias = "in-discards",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_discards: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-errors",
        alias = "in-errors",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_errors: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:in-fcs-errors",
        alias = "in-fcs-errors",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub in_fcs_errors: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-octets",
        alias = "out-octets",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_octets: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-unicast-pkts",
        alias = "out-unicast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_unicast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-broadcast-pkts",
        alias = "out-broadcast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_broadcast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-multicast-pkts",
        alias = "out-multicast-pkts",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_multicast_pkts: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-discards",
        alias = "out-discards",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_discards: Option<u64>,

    #[serde(
        rename = "openconfig-interfaces:out-errors",
        alias = "out-errors",
        default,
        deserialize_with = "deserialize_counter"
    )]
    pub out_errors: Option<u64>,
}

impl CounterRecord {
    /// Value of a single counter, if present.
    pub fn get(&self, field: CounterField) -> Option<u64> {
        match field {
            CounterField::InOctets => self.in_octets,
            CounterField::InUnicastPkts => self.in_unicast_pkts,
            CounterField::InBroadcastPkts => self.in_broadcast_pkts,
            CounterField::InMulticastPkts => self.in_multicast_pkts,
            CounterField::InDiscards => self.in_discards,
            CounterField::InErrors => self.in_errors,
            CounterField::InFcsErrors => self.in_fcs_errors,
            CounterField::OutOctets => self.out_octets,
            CounterField::OutUnicastPkts => self.out_unicast_pkts,
            CounterField::OutBroadcastPkts => self.out_broadcast_pkts,
            CounterField::OutMulticastPkts => self.out_multicast_pkts,
            CounterField::OutDiscards => self.out_discards,
            CounterField::OutErrors => self.out_errors,
        }
    }

    /// Present counters in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (CounterField, u64)> + '_ {
        CounterField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// True when no counter is present.
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}

/// Accept a u64 encoded either as a JSON number or a decimal string.
fn deserialize_counter<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Number(n)) => Ok(Some(n)),
        Some(Repr::Text(s)) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid counter value {:?}: {}", s, e))),
    }
}

/// Decode the counters object carried by an update.
///
/// Fails with [`UpdateError::MissingCounters`] when the update has no value
/// under [`COUNTERS_KEY`], and with [`UpdateError::CounterDecode`] when that
/// value does not fit [`CounterRecord`].
pub fn extract_counters(update: &TelemetryUpdate) -> Result<CounterRecord, UpdateError> {
    let value = update
        .values
        .get(COUNTERS_KEY)
        .ok_or(UpdateError::MissingCounters)?;

    let counters = CounterRecord::deserialize(value)?;
    Ok(counters)
}

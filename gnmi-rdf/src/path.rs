//! gNMI path helpers.

/// Substring that marks an interface counters subtree.
pub const COUNTERS_PATH_MARKER: &str = "/state/counters";

const NAME_KEY_MARKER: &str = "[name=";

/// Whether an update path points at an interface counters subtree.
pub fn is_counters_path(path: &str) -> bool {
    path.contains(COUNTERS_PATH_MARKER)
}

/// Extract the interface name from a path such as
/// `interfaces/interface[name=Ethernet8]/state/counters`.
///
/// Returns the text between `[name=` and the next `]`. The name is not
/// validated beyond being non-empty, so `[name=eth0,unit=0]` yields
/// `eth0,unit=0`.
pub fn parse_interface_name(path: &str) -> Option<&str> {
    let start = path.find(NAME_KEY_MARKER)? + NAME_KEY_MARKER.len();
    let len = path[start..].find(']')?;
    let name = &path[start..start + len];
    (!name.is_empty()).then_some(name)
}

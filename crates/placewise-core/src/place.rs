//! Execution places.
//!
//! A [`Place`] names where elementwise work should run: the host CPU or a
//! specific accelerator device. Places are cheap to copy and compare; the
//! dispatcher tests a place exactly once per call.

use std::fmt;

/// Identifies the execution context for a transform call.
///
/// Any non-host place is routed to the CUDA backend; the index selects the
/// device ordinal. There is currently no way to distinguish between several
/// kinds of accelerator — if a second accelerator backend is ever added,
/// this type grows a variant rather than reinterpreting `Device`.
///
/// # Example
///
/// ```
/// use placewise_core::Place;
///
/// let host = Place::Host;
/// assert!(host.is_host());
///
/// let gpu = Place::Device(0);
/// assert_eq!(gpu.device_index(), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Place {
    /// The host CPU (default).
    #[default]
    Host,
    /// An accelerator device, identified by ordinal.
    Device(usize),
}

impl Place {
    /// Returns `true` if this place denotes the host CPU.
    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host)
    }

    /// Returns `true` if this place denotes an accelerator device.
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }

    /// Returns the device ordinal, or `None` for the host.
    pub fn device_index(&self) -> Option<usize> {
        match self {
            Self::Host => None,
            Self::Device(index) => Some(*index),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Device(index) => write!(f, "device:{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Place::Host.is_host());
        assert!(!Place::Host.is_device());
        assert!(Place::Device(1).is_device());
        assert!(!Place::Device(1).is_host());
    }

    #[test]
    fn test_device_index() {
        assert_eq!(Place::Host.device_index(), None);
        assert_eq!(Place::Device(0).device_index(), Some(0));
        assert_eq!(Place::Device(3).device_index(), Some(3));
    }

    #[test]
    fn test_default_is_host() {
        assert_eq!(Place::default(), Place::Host);
    }

    #[test]
    fn test_display() {
        assert_eq!(Place::Host.to_string(), "host");
        assert_eq!(Place::Device(2).to_string(), "device:2");
    }

    #[test]
    fn test_comparable_and_hashable() {
        use std::collections::HashSet;

        let mut places = HashSet::new();
        places.insert(Place::Host);
        places.insert(Place::Device(0));
        places.insert(Place::Device(0));
        assert_eq!(places.len(), 2);
    }
}

//! Backend capability detection.
//!
//! The set of backends a binary can dispatch to is fixed when it is built:
//! the host backend is always present, the CUDA backend only when the
//! `cuda` feature was compiled in. This module reports that capability set,
//! plus how many devices the driver actually exposes, for diagnostics and
//! for callers that want to validate a place before committing work to it.
//!
//! The dispatcher itself never consults this module — its hot path branches
//! on the place tag alone.

use crate::place::Place;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// The backends available to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// The host backend is always present.
    pub host: bool,
    /// Whether the CUDA backend was compiled into this binary.
    pub cuda_compiled: bool,
    /// Number of CUDA devices visible at first probe (0 without `cuda`).
    pub cuda_device_count: usize,
}

impl BackendCapabilities {
    /// Detect the capability set of the running binary.
    pub fn detect() -> Self {
        Self {
            host: true,
            cuda_compiled: cfg!(feature = "cuda"),
            cuda_device_count: {
                #[cfg(feature = "cuda")]
                {
                    crate::compute::gpu::cuda::device_count()
                }
                #[cfg(not(feature = "cuda"))]
                {
                    0
                }
            },
        }
    }

    /// Whether a call tagged with `place` can dispatch in this build.
    ///
    /// This mirrors the dispatcher's own branch: device places need only
    /// the compiled-in CUDA backend; whether the ordinal exists is left to
    /// the driver at call time.
    pub fn supports(&self, place: Place) -> bool {
        match place {
            Place::Host => self.host,
            Place::Device(_) => self.cuda_compiled,
        }
    }

    /// Whether an accelerator is both compiled in and physically present.
    pub fn has_accelerator(&self) -> bool {
        self.cuda_compiled && self.cuda_device_count > 0
    }
}

/// Global capability set, probed once at first use.
static CAPABILITIES: Lazy<Arc<BackendCapabilities>> =
    Lazy::new(|| Arc::new(BackendCapabilities::detect()));

/// Get the detected backend capabilities.
pub fn capabilities() -> &'static BackendCapabilities {
    &CAPABILITIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_always_supported() {
        let caps = BackendCapabilities::detect();
        assert!(caps.host);
        assert!(caps.supports(Place::Host));
    }

    #[test]
    fn test_cuda_matches_build() {
        let caps = BackendCapabilities::detect();
        assert_eq!(caps.cuda_compiled, cfg!(feature = "cuda"));
        assert_eq!(caps.supports(Place::Device(0)), cfg!(feature = "cuda"));

        #[cfg(not(feature = "cuda"))]
        {
            assert_eq!(caps.cuda_device_count, 0);
            assert!(!caps.has_accelerator());
        }
    }

    #[test]
    fn test_global_capabilities() {
        let caps1 = capabilities();
        let caps2 = capabilities();
        assert!(std::ptr::eq(caps1, caps2));
    }
}

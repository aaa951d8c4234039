//! Error types for transform dispatch.
//!
//! Dispatch has a deliberately small failure surface. Length mismatches and
//! faults inside user operations are the caller's responsibility and are
//! never validated, wrapped, or translated here; what remains is the build
//! or deployment asking for a backend this binary cannot provide, plus the
//! CUDA runtime's own failures.

use crate::compute::gpu::GpuError;
use crate::place::Place;
use thiserror::Error;

/// Errors that can occur while dispatching a transform.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A device-tagged call reached a build without accelerator support.
    ///
    /// This indicates a build/deployment misconfiguration, not a
    /// data-dependent fault. Callers that cannot continue without the
    /// accelerator should treat it as fatal; it is never downgraded to a
    /// silent host substitution or a no-op.
    #[error("place `{place}` requires accelerator support, but this build has no `cuda` feature")]
    UnsupportedBackend {
        /// The place the caller asked for.
        place: Place,
    },

    /// A device-tagged call used an operation with no device kernel.
    ///
    /// Closure-backed operations and operations that only implement the
    /// host path fall in this category.
    #[error("operation `{op}` provides no device kernel")]
    KernelUnavailable {
        /// Name of the offending operation.
        op: String,
    },

    /// Propagated CUDA backend failure.
    #[error("CUDA backend failure: {0}")]
    Gpu(#[from] GpuError),
}

impl DispatchError {
    /// Create an `UnsupportedBackend` error for the given place.
    pub fn unsupported_backend(place: Place) -> Self {
        Self::UnsupportedBackend { place }
    }

    /// Create a `KernelUnavailable` error for the named operation.
    pub fn kernel_unavailable<S: Into<String>>(op: S) -> Self {
        Self::KernelUnavailable { op: op.into() }
    }
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DispatchError::unsupported_backend(Place::Device(1));
        assert!(matches!(err, DispatchError::UnsupportedBackend { .. }));
        assert_eq!(
            err.to_string(),
            "place `device:1` requires accelerator support, but this build has no `cuda` feature"
        );

        let err = DispatchError::kernel_unavailable("square");
        assert!(matches!(err, DispatchError::KernelUnavailable { .. }));
        assert_eq!(err.to_string(), "operation `square` provides no device kernel");
    }

    #[test]
    fn test_gpu_error_propagation() {
        let gpu_err = GpuError::NotAvailable;
        let err: DispatchError = gpu_err.into();

        assert!(matches!(err, DispatchError::Gpu(_)));
        assert!(err.to_string().contains("CUDA backend failure"));
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            DispatchError::unsupported_backend(Place::Device(0)),
            DispatchError::kernel_unavailable("relu"),
            DispatchError::Gpu(GpuError::NotAvailable),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}

//! Device (CUDA) elementwise execution.
//!
//! This module provides the accelerator side of transform dispatch using
//! cudarc. Kernels arrive as CUDA C source attached to an operation (see
//! [`crate::op::KernelSpec`]), are NVRTC-compiled on first use, and run
//! with a grid-stride launch configuration.
//!
//! # Requirements
//!
//! - CUDA toolkit installed
//! - Enable the `cuda` feature flag
//!
//! Without the feature, only [`GpuError`] and [`is_available`] exist here;
//! device-tagged dispatch fails with
//! [`UnsupportedBackend`](crate::DispatchError::UnsupportedBackend) before
//! ever reaching this module.

#[cfg(feature = "cuda")]
pub mod cuda;

use thiserror::Error;

/// CUDA backend errors.
#[derive(Debug, Clone, Error)]
pub enum GpuError {
    /// No usable CUDA device.
    #[error("GPU not available")]
    NotAvailable,

    /// Device or context initialization failed.
    #[error("CUDA initialization failed: {0}")]
    Init(String),

    /// NVRTC compilation of a kernel source failed.
    #[error("kernel compilation failed for `{module}`: {reason}")]
    Compile {
        /// Module whose source failed to compile.
        module: String,
        /// Compiler diagnostics.
        reason: String,
    },

    /// A compiled module does not expose the requested function.
    #[error("kernel `{function}` not found in module `{module}`")]
    KernelMissing {
        /// Module that was loaded.
        module: String,
        /// Function that was looked up.
        function: String,
    },

    /// Device memory allocation failed.
    #[error("device allocation failed: {0}")]
    Allocation(String),

    /// Host/device memory transfer failed.
    #[error("memory transfer failed: {0}")]
    Transfer(String),

    /// Kernel launch failed.
    #[error("kernel launch failed: {0}")]
    Launch(String),
}

/// Check whether a CUDA device can be used by this build.
///
/// Always `false` when the `cuda` feature is not compiled in.
pub fn is_available() -> bool {
    #[cfg(feature = "cuda")]
    {
        cuda::is_available()
    }
    #[cfg(not(feature = "cuda"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_matches_build() {
        #[cfg(not(feature = "cuda"))]
        assert!(!is_available());

        #[cfg(feature = "cuda")]
        println!("CUDA available: {}", is_available());
    }

    #[test]
    fn test_gpu_error_display() {
        let errors = vec![
            GpuError::NotAvailable,
            GpuError::Init("driver version mismatch".to_string()),
            GpuError::Compile {
                module: "square_f32".to_string(),
                reason: "syntax error".to_string(),
            },
            GpuError::KernelMissing {
                module: "square_f32".to_string(),
                function: "square_f32".to_string(),
            },
            GpuError::Allocation("out of memory".to_string()),
            GpuError::Transfer("invalid pointer".to_string()),
            GpuError::Launch("invalid configuration".to_string()),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}

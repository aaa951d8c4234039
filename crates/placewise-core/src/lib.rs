//! Place-tagged elementwise transform dispatch.
//!
//! This crate selects, via a compile-time capability (the `cuda` feature)
//! and a runtime [`Place`] tag, between a host (CPU) elementwise transform
//! and a device (CUDA) elementwise transform, presenting one uniform call
//! signature for unary and binary elementwise operations. Higher-level
//! tensor and operator code calls [`transform`] without needing separate
//! host and device call sites.
//!
//! # Key Concepts
//!
//! - **Places**: where a call should run — the host CPU or a CUDA device
//!   ordinal
//! - **Operations**: pure elementwise functions, optionally carrying a CUDA
//!   kernel so the same value can run on either backend
//! - **Dispatch**: a single branch on the place tag; a device-tagged call
//!   in a build without CUDA support fails loudly, never silently
//!
//! # Modules
//!
//! - [`compute`]: the host and CUDA execution backends
//! - [`config`]: backend capability detection
//! - [`error`]: dispatch error types
//! - [`op`]: elementwise operation traits and closure adapters
//! - [`place`]: execution place tags
//! - [`transform`]: the dispatcher entry points
//! - [`types`]: element type bounds

pub mod compute;
pub mod config;
pub mod error;
pub mod op;
pub mod place;
pub mod transform;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{DispatchError, Result};
pub use place::Place;
pub use types::Element;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use placewise_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{capabilities, BackendCapabilities};
    pub use crate::error::{DispatchError, Result};
    pub use crate::op::{BinaryFn, BinaryOp, KernelSpec, UnaryFn, UnaryOp};
    pub use crate::place::Place;
    pub use crate::transform;
    pub use crate::types::Element;
}

//! Ready-made elementwise operations for placewise dispatch.
//!
//! Every operation here implements the core
//! [`UnaryOp`](placewise_core::op::UnaryOp)/[`BinaryOp`](placewise_core::op::BinaryOp)
//! traits for `f32` and `f64`. The `f32` implementations carry a CUDA
//! kernel, so the same operation value runs on a host or device place
//! unchanged; `f64` operations are host-only and report no device kernel.
//!
//! # Modules
//!
//! - [`arith`]: binary arithmetic and scalar arithmetic operations
//! - [`activation`]: common activation functions
//! - [`update`]: optimizer parameter updates
//!
//! # Example
//!
//! ```
//! use placewise_core::{transform, Place};
//! use placewise_ops::arith::Add;
//!
//! let lhs = [1.0_f32, 2.0, 3.0];
//! let rhs = [10.0_f32, 20.0, 30.0];
//! let mut out = [0.0; 3];
//! transform::binary(Place::Host, &lhs, &rhs, &mut out, Add)?;
//! assert_eq!(out, [11.0, 22.0, 33.0]);
//! # Ok::<(), placewise_core::DispatchError>(())
//! ```

pub mod activation;
pub mod arith;
pub mod update;

pub use activation::{Clamp, Relu, Sigmoid, Square, Tanh};
pub use arith::{Add, Axpy, Div, Mul, Scale, Shift, Sub};
pub use update::{sgd_step, SgdUpdate};

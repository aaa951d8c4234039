//! Element type bounds.
//!
//! The dispatcher is generic over the element type of the sequences it
//! maps. [`Element`] gathers the bounds every backend needs; in CUDA builds
//! it additionally requires the type to be representable in device memory,
//! so the transform entry points keep one signature across build
//! configurations.

use std::fmt::Debug;

/// Trait for element types the dispatcher can move through a backend.
#[cfg(not(feature = "cuda"))]
pub trait Element: Copy + Send + Sync + Debug + 'static {}

/// Trait for element types the dispatcher can move through a backend.
///
/// CUDA builds require elements to be valid device-memory values.
#[cfg(feature = "cuda")]
pub trait Element:
    Copy
    + Send
    + Sync
    + Debug
    + Unpin
    + 'static
    + cudarc::driver::DeviceRepr
    + cudarc::driver::ValidAsZeroBits
{
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(impl Element for $t {})*
    };
}

impl_element!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

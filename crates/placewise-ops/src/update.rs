//! Optimizer parameter updates.
//!
//! The simplest update is plain SGD:
//!
//! ```text
//! param_out = param - learning_rate * grad
//! ```
//!
//! expressed as a binary elementwise operation so it dispatches through the
//! same host/device machinery as everything else.

use placewise_core::op::{BinaryOp, KernelSpec};
use placewise_core::{transform, Element, Place, Result};

const SGD_SRC: &str = r#"
extern "C" __global__ void sgd_update_f32(
    const float* __restrict__ param,
    const float* __restrict__ grad,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = param[i] - p0 * grad[i];
    }
}
"#;

static SGD_F32: KernelSpec = KernelSpec {
    module: "sgd_update_f32",
    function: "sgd_update_f32",
    source: SGD_SRC,
};

/// SGD update step: `param - learning_rate * grad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdUpdate<T> {
    /// Learning rate of the update.
    pub learning_rate: T,
}

impl<T> SgdUpdate<T> {
    /// Creates an update with the given learning rate.
    pub fn new(learning_rate: T) -> Self {
        Self { learning_rate }
    }
}

impl BinaryOp<f32> for SgdUpdate<f32> {
    #[inline]
    fn apply(&self, param: f32, grad: f32) -> f32 {
        param - self.learning_rate * grad
    }

    fn name(&self) -> &'static str {
        "sgd_update"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SGD_F32)
    }

    fn device_params(&self) -> [f32; 2] {
        [self.learning_rate, 0.0]
    }
}

impl BinaryOp<f64> for SgdUpdate<f64> {
    #[inline]
    fn apply(&self, param: f64, grad: f64) -> f64 {
        param - self.learning_rate * grad
    }

    fn name(&self) -> &'static str {
        "sgd_update"
    }
}

/// Applies one SGD step to `param` in place on the given place.
///
/// # Example
///
/// ```
/// use placewise_core::Place;
/// use placewise_ops::update::sgd_step;
///
/// let mut param = [1.0_f32, 2.0, 3.0];
/// let grad = [0.5_f32, 0.5, 0.5];
/// sgd_step(Place::Host, &mut param, &grad, 0.1)?;
/// assert_eq!(param, [0.95, 1.95, 2.95]);
/// # Ok::<(), placewise_core::DispatchError>(())
/// ```
pub fn sgd_step<T>(place: Place, param: &mut [T], grad: &[T], learning_rate: T) -> Result<()>
where
    T: Element,
    SgdUpdate<T>: BinaryOp<T> + Sync,
{
    transform::binary_in_place(place, param, grad, SgdUpdate::new(learning_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sgd_update_apply() {
        let update = SgdUpdate::new(0.1_f64);
        assert_relative_eq!(update.apply(1.0, 0.5), 0.95);
        assert_relative_eq!(update.apply(-1.0, -2.0), -0.8);
    }

    #[test]
    fn test_sgd_step_on_host() {
        let mut param = [1.0_f64, 2.0, 3.0];
        let grad = [10.0_f64, 10.0, 10.0];
        sgd_step(Place::Host, &mut param, &grad, 0.01).unwrap();
        assert_relative_eq!(param[0], 0.9);
        assert_relative_eq!(param[1], 1.9);
        assert_relative_eq!(param[2], 2.9);
    }

    #[test]
    fn test_zero_learning_rate_is_identity() {
        let mut param = [1.0_f64, -2.0, 3.0];
        let grad = [5.0_f64, 5.0, 5.0];
        sgd_step(Place::Host, &mut param, &grad, 0.0).unwrap();
        assert_eq!(param, [1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_f32_kernel_binds_learning_rate() {
        let update = SgdUpdate::new(0.05_f32);
        assert!(BinaryOp::<f32>::device_kernel(&update).is_some());
        assert_eq!(BinaryOp::<f32>::device_params(&update), [0.05, 0.0]);
    }
}

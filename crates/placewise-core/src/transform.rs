//! Place-dispatched elementwise transforms.
//!
//! One uniform call signature for unary and binary elementwise maps,
//! executed on whichever backend the place tag designates. The dispatch is
//! a single branch on [`Place::is_host`], evaluated once per call: host
//! places run the host backend, everything else runs the CUDA backend. No
//! fallback, no retry, no mixed execution — a device-tagged call in a build
//! without the `cuda` feature fails with
//! [`DispatchError::UnsupportedBackend`] rather than silently running on
//! the host.
//!
//! # Preconditions
//!
//! Output slices must be at least as long as the first input slice, and a
//! binary call's second input must cover the first input's span. These are
//! debug-asserted, not validated: out-of-contract spans are the caller's
//! bug, exactly as with the standard library's slice zips. Faults inside a
//! user operation propagate unchanged.
//!
//! # Example
//!
//! ```
//! use placewise_core::op::UnaryFn;
//! use placewise_core::{transform, Place};
//!
//! let input = [1.0_f64, 2.0, 3.0];
//! let mut output = [0.0; 3];
//! transform::unary(Place::Host, &input, &mut output, UnaryFn(|x: f64| x * x))?;
//! assert_eq!(output, [1.0, 4.0, 9.0]);
//! # Ok::<(), placewise_core::DispatchError>(())
//! ```

use crate::compute::cpu;
use crate::error::Result;
use crate::op::{BinaryOp, UnaryOp};
use crate::place::Place;
use crate::types::Element;

#[cfg(not(feature = "cuda"))]
use crate::error::DispatchError;

/// Applies `op` to each element of `input` in order, writing each result to
/// the corresponding position of `output`.
pub fn unary<T, Op>(place: Place, input: &[T], output: &mut [T], op: Op) -> Result<()>
where
    T: Element,
    Op: UnaryOp<T> + Sync,
{
    debug_assert!(
        output.len() >= input.len(),
        "output shorter than input span"
    );
    if place.is_host() {
        cpu::unary_map(input, output, &op);
        Ok(())
    } else {
        device_unary(place, input, output, op)
    }
}

/// Overwrites each element of `data` with `op` applied to its old value.
///
/// The in-place form of [`unary`] for the output == input aliasing case;
/// each position is read before it is written.
pub fn unary_in_place<T, Op>(place: Place, data: &mut [T], op: Op) -> Result<()>
where
    T: Element,
    Op: UnaryOp<T> + Sync,
{
    if place.is_host() {
        cpu::unary_map_in_place(data, &op);
        Ok(())
    } else {
        device_unary_in_place(place, data, op)
    }
}

/// Applies `op` pairwise to `lhs` and `rhs` in order, writing each result
/// to the corresponding position of `output`.
pub fn binary<T, Op>(place: Place, lhs: &[T], rhs: &[T], output: &mut [T], op: Op) -> Result<()>
where
    T: Element,
    Op: BinaryOp<T> + Sync,
{
    debug_assert!(rhs.len() >= lhs.len(), "rhs shorter than lhs span");
    debug_assert!(output.len() >= lhs.len(), "output shorter than lhs span");
    if place.is_host() {
        cpu::binary_map(lhs, rhs, output, &op);
        Ok(())
    } else {
        device_binary(place, lhs, rhs, output, op)
    }
}

/// Overwrites each element of `data` with `op(data[i], rhs[i])`.
pub fn binary_in_place<T, Op>(place: Place, data: &mut [T], rhs: &[T], op: Op) -> Result<()>
where
    T: Element,
    Op: BinaryOp<T> + Sync,
{
    debug_assert!(rhs.len() >= data.len(), "rhs shorter than data span");
    if place.is_host() {
        cpu::binary_map_in_place(data, rhs, &op);
        Ok(())
    } else {
        device_binary_in_place(place, data, rhs, op)
    }
}

#[cfg(feature = "cuda")]
mod device {
    use super::{BinaryOp, Element, Place, Result, UnaryOp};
    use crate::compute::gpu::cuda;
    use crate::error::DispatchError;

    pub fn device_unary<T, Op>(place: Place, input: &[T], output: &mut [T], op: Op) -> Result<()>
    where
        T: Element,
        Op: UnaryOp<T>,
    {
        let spec = op
            .device_kernel()
            .ok_or_else(|| DispatchError::kernel_unavailable(op.name()))?;
        let ctx = cuda::context(place.device_index().unwrap_or(0))?;
        ctx.launch_unary(spec, op.device_params(), input, output)?;
        Ok(())
    }

    pub fn device_unary_in_place<T, Op>(place: Place, data: &mut [T], op: Op) -> Result<()>
    where
        T: Element,
        Op: UnaryOp<T>,
    {
        let spec = op
            .device_kernel()
            .ok_or_else(|| DispatchError::kernel_unavailable(op.name()))?;
        let ctx = cuda::context(place.device_index().unwrap_or(0))?;
        ctx.launch_unary_in_place(spec, op.device_params(), data)?;
        Ok(())
    }

    pub fn device_binary<T, Op>(
        place: Place,
        lhs: &[T],
        rhs: &[T],
        output: &mut [T],
        op: Op,
    ) -> Result<()>
    where
        T: Element,
        Op: BinaryOp<T>,
    {
        let spec = op
            .device_kernel()
            .ok_or_else(|| DispatchError::kernel_unavailable(op.name()))?;
        let ctx = cuda::context(place.device_index().unwrap_or(0))?;
        ctx.launch_binary(spec, op.device_params(), lhs, rhs, output)?;
        Ok(())
    }

    pub fn device_binary_in_place<T, Op>(
        place: Place,
        data: &mut [T],
        rhs: &[T],
        op: Op,
    ) -> Result<()>
    where
        T: Element,
        Op: BinaryOp<T>,
    {
        let spec = op
            .device_kernel()
            .ok_or_else(|| DispatchError::kernel_unavailable(op.name()))?;
        let ctx = cuda::context(place.device_index().unwrap_or(0))?;
        ctx.launch_binary_in_place(spec, op.device_params(), data, rhs)?;
        Ok(())
    }
}

#[cfg(feature = "cuda")]
use device::{device_binary, device_binary_in_place, device_unary, device_unary_in_place};

#[cfg(not(feature = "cuda"))]
fn device_unary<T, Op>(place: Place, _input: &[T], _output: &mut [T], _op: Op) -> Result<()>
where
    T: Element,
    Op: UnaryOp<T>,
{
    Err(DispatchError::unsupported_backend(place))
}

#[cfg(not(feature = "cuda"))]
fn device_unary_in_place<T, Op>(place: Place, _data: &mut [T], _op: Op) -> Result<()>
where
    T: Element,
    Op: UnaryOp<T>,
{
    Err(DispatchError::unsupported_backend(place))
}

#[cfg(not(feature = "cuda"))]
fn device_binary<T, Op>(
    place: Place,
    _lhs: &[T],
    _rhs: &[T],
    _output: &mut [T],
    _op: Op,
) -> Result<()>
where
    T: Element,
    Op: BinaryOp<T>,
{
    Err(DispatchError::unsupported_backend(place))
}

#[cfg(not(feature = "cuda"))]
fn device_binary_in_place<T, Op>(place: Place, _data: &mut [T], _rhs: &[T], _op: Op) -> Result<()>
where
    T: Element,
    Op: BinaryOp<T>,
{
    Err(DispatchError::unsupported_backend(place))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{BinaryFn, UnaryFn};

    #[test]
    fn test_host_unary_square() {
        let input = [1.0_f64, 2.0, 3.0];
        let mut output = [0.0; 3];
        unary(Place::Host, &input, &mut output, UnaryFn(|x: f64| x * x)).unwrap();
        assert_eq!(output, [1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_host_binary_add() {
        let lhs = [1.0_f64, 2.0, 3.0];
        let rhs = [10.0_f64, 20.0, 30.0];
        let mut output = [0.0; 3];
        binary(
            Place::Host,
            &lhs,
            &rhs,
            &mut output,
            BinaryFn(|a: f64, b: f64| a + b),
        )
        .unwrap();
        assert_eq!(output, [11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_empty_input_is_a_no_op() {
        let input: [f64; 0] = [];
        let mut output = [42.0_f64; 2];
        unary(Place::Host, &input, &mut output, UnaryFn(|x: f64| x * x)).unwrap();
        assert_eq!(output, [42.0, 42.0]);
    }

    #[test]
    fn test_unary_in_place() {
        let mut data = [1.0_f64, 2.0, 3.0];
        unary_in_place(Place::Host, &mut data, UnaryFn(|x: f64| x * x)).unwrap();
        assert_eq!(data, [1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_binary_in_place() {
        let mut param = [1.0_f64, 2.0, 3.0];
        let rhs = [0.5_f64, 0.5, 0.5];
        binary_in_place(Place::Host, &mut param, &rhs, BinaryFn(|a: f64, b: f64| a - b)).unwrap();
        assert_eq!(param, [0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let input: Vec<f64> = (0..64).map(f64::from).collect();
        let op = UnaryFn(|x: f64| x.sin());

        let mut first = vec![0.0; input.len()];
        unary(Place::Host, &input, &mut first, op).unwrap();

        let mut second = vec![0.0; input.len()];
        unary(Place::Host, &input, &mut second, op).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_integer_elements() {
        let input = [1_i32, -2, 3];
        let mut output = [0; 3];
        unary(Place::Host, &input, &mut output, UnaryFn(|x: i32| x.abs())).unwrap();
        assert_eq!(output, [1, 2, 3]);
    }

    #[cfg(not(feature = "cuda"))]
    mod without_cuda {
        use super::*;
        use crate::error::DispatchError;

        #[test]
        fn test_device_place_fails() {
            let input = [1.0_f64, 2.0];
            let mut output = [0.0; 2];
            let err = unary(
                Place::Device(0),
                &input,
                &mut output,
                UnaryFn(|x: f64| x * x),
            )
            .unwrap_err();
            assert!(matches!(err, DispatchError::UnsupportedBackend { .. }));
        }

        #[test]
        fn test_device_place_fails_even_for_empty_input() {
            let input: [f64; 0] = [];
            let mut output: [f64; 0] = [];
            let result = unary(
                Place::Device(0),
                &input,
                &mut output,
                UnaryFn(|x: f64| x * x),
            );
            assert!(result.is_err());
        }

        #[test]
        fn test_device_binary_fails() {
            let lhs = [1.0_f64];
            let rhs = [2.0_f64];
            let mut output = [0.0];
            let err = binary(
                Place::Device(1),
                &lhs,
                &rhs,
                &mut output,
                BinaryFn(|a: f64, b: f64| a + b),
            )
            .unwrap_err();
            assert!(matches!(
                err,
                DispatchError::UnsupportedBackend {
                    place: Place::Device(1)
                }
            ));
        }
    }
}

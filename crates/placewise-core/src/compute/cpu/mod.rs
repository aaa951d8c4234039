//! Host (CPU) elementwise execution.
//!
//! The host backend maps an operation over slices either sequentially or
//! with Rayon, chosen by a length threshold. Both strategies produce
//! identical output; the threshold only decides when the fork/join overhead
//! is worth paying.

use crate::op::{BinaryOp, UnaryOp};
use crate::types::Element;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Configuration for the parallel host path.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Minimum number of elements to trigger parallel execution.
    pub min_len_for_parallel: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_len_for_parallel: 32_768,
        }
    }
}

impl ParallelConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length for parallel execution.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len_for_parallel = min_len;
        self
    }

    /// Check if parallel execution should be used for the given length.
    pub fn should_parallelize(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && len >= self.min_len_for_parallel
    }
}

/// Applies `op` to each element of `input`, writing results to `output`.
///
/// Requires `output.len() >= input.len()`; elements of `output` beyond the
/// input span are left untouched.
pub fn unary_map<T, Op>(input: &[T], output: &mut [T], op: &Op)
where
    T: Element,
    Op: UnaryOp<T> + Sync,
{
    unary_map_with(&ParallelConfig::default(), input, output, op);
}

/// [`unary_map`] with an explicit parallelism configuration.
pub fn unary_map_with<T, Op>(config: &ParallelConfig, input: &[T], output: &mut [T], op: &Op)
where
    T: Element,
    Op: UnaryOp<T> + Sync,
{
    let out = &mut output[..input.len()];

    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(input.len()) {
            out.par_iter_mut()
                .zip(input.par_iter())
                .for_each(|(y, &x)| *y = op.apply(x));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for (y, &x) in out.iter_mut().zip(input.iter()) {
        *y = op.apply(x);
    }
}

/// Overwrites each element of `data` with `op` applied to its old value.
pub fn unary_map_in_place<T, Op>(data: &mut [T], op: &Op)
where
    T: Element,
    Op: UnaryOp<T> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if ParallelConfig::default().should_parallelize(data.len()) {
            data.par_iter_mut().for_each(|x| *x = op.apply(*x));
            return;
        }
    }

    for x in data.iter_mut() {
        *x = op.apply(*x);
    }
}

/// Applies `op` pairwise over `lhs` and `rhs`, writing results to `output`.
///
/// Requires `rhs.len() >= lhs.len()` and `output.len() >= lhs.len()`.
pub fn binary_map<T, Op>(lhs: &[T], rhs: &[T], output: &mut [T], op: &Op)
where
    T: Element,
    Op: BinaryOp<T> + Sync,
{
    binary_map_with(&ParallelConfig::default(), lhs, rhs, output, op);
}

/// [`binary_map`] with an explicit parallelism configuration.
pub fn binary_map_with<T, Op>(
    config: &ParallelConfig,
    lhs: &[T],
    rhs: &[T],
    output: &mut [T],
    op: &Op,
) where
    T: Element,
    Op: BinaryOp<T> + Sync,
{
    let rhs = &rhs[..lhs.len()];
    let out = &mut output[..lhs.len()];

    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(lhs.len()) {
            out.par_iter_mut()
                .zip(lhs.par_iter().zip(rhs.par_iter()))
                .for_each(|(y, (&a, &b))| *y = op.apply(a, b));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for (y, (&a, &b)) in out.iter_mut().zip(lhs.iter().zip(rhs.iter())) {
        *y = op.apply(a, b);
    }
}

/// Overwrites each element of `data` with `op(data[i], rhs[i])`.
pub fn binary_map_in_place<T, Op>(data: &mut [T], rhs: &[T], op: &Op)
where
    T: Element,
    Op: BinaryOp<T> + Sync,
{
    let rhs = &rhs[..data.len()];

    #[cfg(feature = "parallel")]
    {
        if ParallelConfig::default().should_parallelize(data.len()) {
            data.par_iter_mut()
                .zip(rhs.par_iter())
                .for_each(|(x, &b)| *x = op.apply(*x, b));
            return;
        }
    }

    for (x, &b) in data.iter_mut().zip(rhs.iter()) {
        *x = op.apply(*x, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{BinaryFn, UnaryFn};

    #[test]
    fn test_unary_map_sequential() {
        let input = [1.0_f64, 2.0, 3.0];
        let mut output = [0.0; 3];
        unary_map(&input, &mut output, &UnaryFn(|x: f64| x * x));
        assert_eq!(output, [1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_unary_map_leaves_tail_untouched() {
        let input = [1.0_f64, 2.0];
        let mut output = [7.0; 4];
        unary_map(&input, &mut output, &UnaryFn(|x: f64| x + 1.0));
        assert_eq!(output, [2.0, 3.0, 7.0, 7.0]);
    }

    #[test]
    fn test_binary_map_sequential() {
        let lhs = [1.0_f64, 2.0, 3.0];
        let rhs = [10.0_f64, 20.0, 30.0];
        let mut output = [0.0; 3];
        binary_map(&lhs, &rhs, &mut output, &BinaryFn(|a: f64, b: f64| a + b));
        assert_eq!(output, [11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input: Vec<f64> = (0..10_000).map(f64::from).collect();
        let op = UnaryFn(|x: f64| x.mul_add(2.0, 1.0));

        let mut sequential = vec![0.0; input.len()];
        unary_map_with(
            &ParallelConfig::new().with_min_len(usize::MAX),
            &input,
            &mut sequential,
            &op,
        );

        let mut parallel = vec![0.0; input.len()];
        unary_map_with(
            &ParallelConfig::new().with_min_len(1),
            &input,
            &mut parallel,
            &op,
        );

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_binary_parallel_matches_sequential() {
        let lhs: Vec<f64> = (0..5_000).map(f64::from).collect();
        let rhs: Vec<f64> = (0..5_000).map(|i| f64::from(i) * 0.5).collect();
        let op = BinaryFn(|a: f64, b: f64| a - b);

        let mut sequential = vec![0.0; lhs.len()];
        binary_map_with(
            &ParallelConfig::new().with_min_len(usize::MAX),
            &lhs,
            &rhs,
            &mut sequential,
            &op,
        );

        let mut parallel = vec![0.0; lhs.len()];
        binary_map_with(
            &ParallelConfig::new().with_min_len(1),
            &lhs,
            &rhs,
            &mut parallel,
            &op,
        );

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_in_place_maps() {
        let mut data = [1.0_f64, -2.0, 3.0];
        unary_map_in_place(&mut data, &UnaryFn(|x: f64| -x));
        assert_eq!(data, [-1.0, 2.0, -3.0]);

        let rhs = [1.0_f64, 1.0, 1.0];
        binary_map_in_place(&mut data, &rhs, &BinaryFn(|a: f64, b: f64| a + b));
        assert_eq!(data, [0.0, 3.0, -2.0]);
    }

    #[test]
    fn test_empty_input() {
        let input: [f64; 0] = [];
        let mut output = [5.0_f64; 2];
        unary_map(&input, &mut output, &UnaryFn(|x: f64| x * x));
        assert_eq!(output, [5.0, 5.0]);
    }

    #[test]
    fn test_should_parallelize_threshold() {
        let config = ParallelConfig::new().with_min_len(100);
        assert!(!config.should_parallelize(99));
        assert_eq!(config.should_parallelize(100), cfg!(feature = "parallel"));
    }
}

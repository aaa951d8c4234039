//! Elementwise activation functions.

use num_traits::Float;
use placewise_core::op::{KernelSpec, UnaryOp};

const RELU_SRC: &str = r#"
extern "C" __global__ void relu_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = fmaxf(0.0f, x[i]);
    }
}
"#;

const SIGMOID_SRC: &str = r#"
extern "C" __global__ void sigmoid_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = 1.0f / (1.0f + expf(-x[i]));
    }
}
"#;

const TANH_SRC: &str = r#"
extern "C" __global__ void tanh_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = tanhf(x[i]);
    }
}
"#;

const SQUARE_SRC: &str = r#"
extern "C" __global__ void square_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = x[i] * x[i];
    }
}
"#;

const CLAMP_SRC: &str = r#"
extern "C" __global__ void clamp_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = fminf(fmaxf(x[i], p0), p1);
    }
}
"#;

static RELU_F32: KernelSpec = KernelSpec {
    module: "relu_f32",
    function: "relu_f32",
    source: RELU_SRC,
};

static SIGMOID_F32: KernelSpec = KernelSpec {
    module: "sigmoid_f32",
    function: "sigmoid_f32",
    source: SIGMOID_SRC,
};

static TANH_F32: KernelSpec = KernelSpec {
    module: "tanh_f32",
    function: "tanh_f32",
    source: TANH_SRC,
};

static SQUARE_F32: KernelSpec = KernelSpec {
    module: "square_f32",
    function: "square_f32",
    source: SQUARE_SRC,
};

static CLAMP_F32: KernelSpec = KernelSpec {
    module: "clamp_f32",
    function: "clamp_f32",
    source: CLAMP_SRC,
};

#[inline]
fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Rectified linear unit: `max(0, x)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relu;

impl UnaryOp<f32> for Relu {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x.max(0.0)
    }

    fn name(&self) -> &'static str {
        "relu"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&RELU_F32)
    }
}

impl UnaryOp<f64> for Relu {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x.max(0.0)
    }

    fn name(&self) -> &'static str {
        "relu"
    }
}

/// Logistic sigmoid: `1 / (1 + exp(-x))`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sigmoid;

impl UnaryOp<f32> for Sigmoid {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        sigmoid(x)
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SIGMOID_F32)
    }
}

impl UnaryOp<f64> for Sigmoid {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        sigmoid(x)
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }
}

/// Hyperbolic tangent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tanh;

impl UnaryOp<f32> for Tanh {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x.tanh()
    }

    fn name(&self) -> &'static str {
        "tanh"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&TANH_F32)
    }
}

impl UnaryOp<f64> for Tanh {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x.tanh()
    }

    fn name(&self) -> &'static str {
        "tanh"
    }
}

/// Elementwise square: `x * x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Square;

impl UnaryOp<f32> for Square {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x * x
    }

    fn name(&self) -> &'static str {
        "square"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SQUARE_F32)
    }
}

impl UnaryOp<f64> for Square {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x * x
    }

    fn name(&self) -> &'static str {
        "square"
    }
}

/// Clamps each element into `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamp<T> {
    /// Lower bound.
    pub lo: T,
    /// Upper bound.
    pub hi: T,
}

impl UnaryOp<f32> for Clamp<f32> {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x.clamp(self.lo, self.hi)
    }

    fn name(&self) -> &'static str {
        "clamp"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&CLAMP_F32)
    }

    fn device_params(&self) -> [f32; 2] {
        [self.lo, self.hi]
    }
}

impl UnaryOp<f64> for Clamp<f64> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x.clamp(self.lo, self.hi)
    }

    fn name(&self) -> &'static str {
        "clamp"
    }
}

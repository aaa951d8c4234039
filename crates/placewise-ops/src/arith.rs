//! Elementwise arithmetic operations.
//!
//! Binary operations take same-length operands; broadcasting belongs to the
//! caller. CUDA kernels use grid-stride loops and share the fixed launch
//! signature described in [`placewise_core::op::KernelSpec`]; scalar
//! parameters ride in the trailing `p0`/`p1` floats.

use placewise_core::op::{BinaryOp, KernelSpec, UnaryOp};

const ADD_SRC: &str = r#"
extern "C" __global__ void add_f32(
    const float* __restrict__ a,
    const float* __restrict__ b,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = a[i] + b[i];
    }
}
"#;

const SUB_SRC: &str = r#"
extern "C" __global__ void sub_f32(
    const float* __restrict__ a,
    const float* __restrict__ b,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = a[i] - b[i];
    }
}
"#;

const MUL_SRC: &str = r#"
extern "C" __global__ void mul_f32(
    const float* __restrict__ a,
    const float* __restrict__ b,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = a[i] * b[i];
    }
}
"#;

const DIV_SRC: &str = r#"
extern "C" __global__ void div_f32(
    const float* __restrict__ a,
    const float* __restrict__ b,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = a[i] / b[i];
    }
}
"#;

const SCALE_SRC: &str = r#"
extern "C" __global__ void scale_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = p0 * x[i];
    }
}
"#;

const SHIFT_SRC: &str = r#"
extern "C" __global__ void shift_f32(
    const float* __restrict__ x,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = x[i] + p0;
    }
}
"#;

const AXPY_SRC: &str = r#"
extern "C" __global__ void axpy_f32(
    const float* __restrict__ x,
    const float* __restrict__ y,
    float* __restrict__ out,
    int n,
    float p0,
    float p1)
{
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    for (int i = idx; i < n; i += blockDim.x * gridDim.x) {
        out[i] = p0 * x[i] + y[i];
    }
}
"#;

static ADD_F32: KernelSpec = KernelSpec {
    module: "add_f32",
    function: "add_f32",
    source: ADD_SRC,
};

static SUB_F32: KernelSpec = KernelSpec {
    module: "sub_f32",
    function: "sub_f32",
    source: SUB_SRC,
};

static MUL_F32: KernelSpec = KernelSpec {
    module: "mul_f32",
    function: "mul_f32",
    source: MUL_SRC,
};

static DIV_F32: KernelSpec = KernelSpec {
    module: "div_f32",
    function: "div_f32",
    source: DIV_SRC,
};

static SCALE_F32: KernelSpec = KernelSpec {
    module: "scale_f32",
    function: "scale_f32",
    source: SCALE_SRC,
};

static SHIFT_F32: KernelSpec = KernelSpec {
    module: "shift_f32",
    function: "shift_f32",
    source: SHIFT_SRC,
};

static AXPY_F32: KernelSpec = KernelSpec {
    module: "axpy_f32",
    function: "axpy_f32",
    source: AXPY_SRC,
};

/// Elementwise addition: `out[i] = a[i] + b[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Add;

impl BinaryOp<f32> for Add {
    #[inline]
    fn apply(&self, a: f32, b: f32) -> f32 {
        a + b
    }

    fn name(&self) -> &'static str {
        "add"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&ADD_F32)
    }
}

impl BinaryOp<f64> for Add {
    #[inline]
    fn apply(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

/// Elementwise subtraction: `out[i] = a[i] - b[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sub;

impl BinaryOp<f32> for Sub {
    #[inline]
    fn apply(&self, a: f32, b: f32) -> f32 {
        a - b
    }

    fn name(&self) -> &'static str {
        "sub"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SUB_F32)
    }
}

impl BinaryOp<f64> for Sub {
    #[inline]
    fn apply(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    fn name(&self) -> &'static str {
        "sub"
    }
}

/// Elementwise multiplication: `out[i] = a[i] * b[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mul;

impl BinaryOp<f32> for Mul {
    #[inline]
    fn apply(&self, a: f32, b: f32) -> f32 {
        a * b
    }

    fn name(&self) -> &'static str {
        "mul"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&MUL_F32)
    }
}

impl BinaryOp<f64> for Mul {
    #[inline]
    fn apply(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    fn name(&self) -> &'static str {
        "mul"
    }
}

/// Elementwise division: `out[i] = a[i] / b[i]`.
///
/// Division by zero follows IEEE 754, as in the host loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Div;

impl BinaryOp<f32> for Div {
    #[inline]
    fn apply(&self, a: f32, b: f32) -> f32 {
        a / b
    }

    fn name(&self) -> &'static str {
        "div"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&DIV_F32)
    }
}

impl BinaryOp<f64> for Div {
    #[inline]
    fn apply(&self, a: f64, b: f64) -> f64 {
        a / b
    }

    fn name(&self) -> &'static str {
        "div"
    }
}

/// Scalar multiplication: `out[i] = factor * x[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale<T>(pub T);

impl UnaryOp<f32> for Scale<f32> {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        self.0 * x
    }

    fn name(&self) -> &'static str {
        "scale"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SCALE_F32)
    }

    fn device_params(&self) -> [f32; 2] {
        [self.0, 0.0]
    }
}

impl UnaryOp<f64> for Scale<f64> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        self.0 * x
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Scalar addition: `out[i] = x[i] + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shift<T>(pub T);

impl UnaryOp<f32> for Shift<f32> {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x + self.0
    }

    fn name(&self) -> &'static str {
        "shift"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&SHIFT_F32)
    }

    fn device_params(&self) -> [f32; 2] {
        [self.0, 0.0]
    }
}

impl UnaryOp<f64> for Shift<f64> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x + self.0
    }

    fn name(&self) -> &'static str {
        "shift"
    }
}

/// Scaled addition: `out[i] = a * x[i] + y[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axpy<T> {
    /// The scale applied to the first operand.
    pub a: T,
}

impl BinaryOp<f32> for Axpy<f32> {
    #[inline]
    fn apply(&self, x: f32, y: f32) -> f32 {
        self.a.mul_add(x, y)
    }

    fn name(&self) -> &'static str {
        "axpy"
    }

    fn device_kernel(&self) -> Option<&'static KernelSpec> {
        Some(&AXPY_F32)
    }

    fn device_params(&self) -> [f32; 2] {
        [self.a, 0.0]
    }
}

impl BinaryOp<f64> for Axpy<f64> {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> f64 {
        self.a.mul_add(x, y)
    }

    fn name(&self) -> &'static str {
        "axpy"
    }
}

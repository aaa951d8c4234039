//! cudarc-backed CUDA execution.

use super::GpuError;
use crate::op::KernelSpec;
use crate::types::Element;
use cudarc::driver::{CudaDevice, CudaFunction, LaunchAsync, LaunchConfig};
use cudarc::nvrtc::compile_ptx;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

/// One context per device ordinal, created on first use.
static CONTEXTS: Lazy<Mutex<HashMap<usize, Arc<CudaContext>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// A CUDA device together with its cache of compiled kernel modules.
pub struct CudaContext {
    device: Arc<CudaDevice>,
    loaded: Mutex<HashSet<&'static str>>,
}

/// Check if any CUDA device can be initialized.
pub fn is_available() -> bool {
    CudaDevice::new(0).is_ok()
}

/// Number of visible CUDA devices, zero when the driver is unusable.
pub fn device_count() -> usize {
    CudaDevice::count().map(|n| n as usize).unwrap_or(0)
}

/// Returns the shared context for a device ordinal, initializing it on
/// first use.
pub fn context(ordinal: usize) -> Result<Arc<CudaContext>, GpuError> {
    let mut contexts = CONTEXTS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(ctx) = contexts.get(&ordinal) {
        return Ok(Arc::clone(ctx));
    }

    let device = CudaDevice::new(ordinal)
        .map_err(|e| GpuError::Init(format!("device {ordinal}: {e}")))?;
    let ctx = Arc::new(CudaContext {
        device,
        loaded: Mutex::new(HashSet::new()),
    });
    contexts.insert(ordinal, Arc::clone(&ctx));
    Ok(ctx)
}

impl CudaContext {
    /// Resolves a kernel, compiling and loading its module on first use.
    fn function(&self, spec: &KernelSpec) -> Result<CudaFunction, GpuError> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if !loaded.contains(spec.module) {
            let ptx = compile_ptx(spec.source).map_err(|e| GpuError::Compile {
                module: spec.module.to_string(),
                reason: e.to_string(),
            })?;
            self.device
                .load_ptx(ptx, spec.module, &[spec.function])
                .map_err(|e| GpuError::Init(format!("loading `{}`: {e}", spec.module)))?;
            loaded.insert(spec.module);
        }
        self.device
            .get_func(spec.module, spec.function)
            .ok_or_else(|| GpuError::KernelMissing {
                module: spec.module.to_string(),
                function: spec.function.to_string(),
            })
    }

    fn run_unary<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        input: &[T],
    ) -> Result<Vec<T>, GpuError> {
        let n = input.len();
        let d_in = self
            .device
            .htod_sync_copy(input)
            .map_err(|e| GpuError::Transfer(format!("H2D copy failed: {e}")))?;
        let mut d_out = self
            .device
            .alloc_zeros::<T>(n)
            .map_err(|e| GpuError::Allocation(e.to_string()))?;

        let func = self.function(spec)?;
        let cfg = LaunchConfig::for_num_elems(n as u32);
        unsafe { func.launch(cfg, (&d_in, &mut d_out, n as i32, params[0], params[1])) }
            .map_err(|e| GpuError::Launch(e.to_string()))?;

        self.device
            .dtoh_sync_copy(&d_out)
            .map_err(|e| GpuError::Transfer(format!("D2H copy failed: {e}")))
    }

    fn run_binary<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        lhs: &[T],
        rhs: &[T],
    ) -> Result<Vec<T>, GpuError> {
        let n = lhs.len();
        let d_lhs = self
            .device
            .htod_sync_copy(lhs)
            .map_err(|e| GpuError::Transfer(format!("H2D copy failed: {e}")))?;
        let d_rhs = self
            .device
            .htod_sync_copy(&rhs[..n])
            .map_err(|e| GpuError::Transfer(format!("H2D copy failed: {e}")))?;
        let mut d_out = self
            .device
            .alloc_zeros::<T>(n)
            .map_err(|e| GpuError::Allocation(e.to_string()))?;

        let func = self.function(spec)?;
        let cfg = LaunchConfig::for_num_elems(n as u32);
        unsafe {
            func.launch(
                cfg,
                (&d_lhs, &d_rhs, &mut d_out, n as i32, params[0], params[1]),
            )
        }
        .map_err(|e| GpuError::Launch(e.to_string()))?;

        self.device
            .dtoh_sync_copy(&d_out)
            .map_err(|e| GpuError::Transfer(format!("D2H copy failed: {e}")))
    }

    /// Runs a unary kernel over `input`, writing results to `output`.
    pub fn launch_unary<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        input: &[T],
        output: &mut [T],
    ) -> Result<(), GpuError> {
        if input.is_empty() {
            return Ok(());
        }
        let result = self.run_unary(spec, params, input)?;
        output[..input.len()].copy_from_slice(&result);
        Ok(())
    }

    /// Runs a unary kernel over `data`, writing results back into `data`.
    pub fn launch_unary_in_place<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        data: &mut [T],
    ) -> Result<(), GpuError> {
        if data.is_empty() {
            return Ok(());
        }
        let result = self.run_unary(spec, params, data)?;
        data.copy_from_slice(&result);
        Ok(())
    }

    /// Runs a binary kernel pairwise over `lhs` and `rhs`.
    pub fn launch_binary<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        lhs: &[T],
        rhs: &[T],
        output: &mut [T],
    ) -> Result<(), GpuError> {
        if lhs.is_empty() {
            return Ok(());
        }
        let result = self.run_binary(spec, params, lhs, rhs)?;
        output[..lhs.len()].copy_from_slice(&result);
        Ok(())
    }

    /// Runs a binary kernel, writing results back into `data`.
    pub fn launch_binary_in_place<T: Element>(
        &self,
        spec: &KernelSpec,
        params: [f32; 2],
        data: &mut [T],
        rhs: &[T],
    ) -> Result<(), GpuError> {
        if data.is_empty() {
            return Ok(());
        }
        let result = self.run_binary(spec, params, data, rhs)?;
        data.copy_from_slice(&result);
        Ok(())
    }
}

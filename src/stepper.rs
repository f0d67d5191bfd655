//! Fixed-step explicit Euler integration over the state variables of a registry.
//!
//! Each step takes a snapshot of the state vector, evaluates the derivatives,
//! advances `x += dt * dx` and writes the result back, marking the states dirty.
//! The buffers are sized once from the registry, so a step does not allocate.

use log::{info, warn};
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

use crate::error::SimVarError;
use crate::registry::VariableRegistry;

#[derive(Debug, Clone)]
pub struct EulerStepper {
    x: Array1<f64>,
    dx: Array1<f64>,
}

impl EulerStepper {
    pub fn new(registry: &VariableRegistry) -> Self {
        let n = registry.state_count();
        Self {
            x: Array1::zeros(n),
            dx: Array1::zeros(n),
        }
    }

    pub fn n_states(&self) -> usize {
        self.x.len()
    }

    /// The state vector after the last step.
    pub fn states(&self) -> ArrayView1<f64> {
        self.x.view()
    }

    /// Advance the states by one step of size `dt` from time `t`.
    ///
    /// `rhs(t, registry, x, dx)` must fill `dx` with the derivative of each state, in the
    /// order of [`VariableRegistry::snapshot_states`].
    pub fn step<F, E>(
        &mut self,
        registry: &mut VariableRegistry,
        t: f64,
        dt: f64,
        rhs: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(f64, &VariableRegistry, ArrayView1<f64>, ArrayViewMut1<f64>) -> Result<(), E>,
        E: From<SimVarError>,
    {
        registry.snapshot_states_view(self.x.view_mut())?;
        self.dx.fill(0.0);
        rhs(t, registry, self.x.view(), self.dx.view_mut())?;
        self.x.scaled_add(dt, &self.dx);
        registry.restore_states_view(self.x.view())?;
        Ok(())
    }

    /// Take `steps` steps from `t0`, calling `observer(t, registry)` after each one.
    /// The first error from either closure or the registry aborts the run. Returns the
    /// final time.
    pub fn run<F, O, E>(
        &mut self,
        registry: &mut VariableRegistry,
        t0: f64,
        dt: f64,
        steps: usize,
        mut rhs: F,
        mut observer: O,
    ) -> Result<f64, E>
    where
        F: FnMut(f64, &VariableRegistry, ArrayView1<f64>, ArrayViewMut1<f64>) -> Result<(), E>,
        O: FnMut(f64, &mut VariableRegistry) -> Result<(), E>,
        E: From<SimVarError> + std::fmt::Display,
    {
        let mut t = t0;
        for n in 0..steps {
            let result = self.step(registry, t, dt, &mut rhs).and_then(|_| {
                // recompute from t0 so the time grid does not drift
                t = t0 + (n + 1) as f64 * dt;
                observer(t, registry)
            });
            if let Err(err) = result {
                warn!("Run aborted at step {} (t = {}): {}", n, t, err);
                return Err(err);
            }
        }
        info!("Completed {} steps, t = {}", steps, t);
        Ok(t)
    }
}

/// For each state variable `x`, the index of a variable named `der_x`, if declared.
pub fn der_indices(registry: &VariableRegistry) -> Vec<Option<usize>> {
    registry
        .state_indices()
        .iter()
        .map(|&i| {
            registry
                .variable(i)
                .ok()
                .and_then(|var| registry.resolve(&format!("der_{}", var.name())).ok())
        })
        .collect()
}

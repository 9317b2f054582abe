//! Phase-field synthesis for steering a plate array.
//!
//! Every cell `(i, j, k)` receives `θ = k_w · (d̂ · r) mod 2π` with `r = (i, j, k) · spacing`
//! and `k_w = 2π / (spacing · 1000)`. The field is a pure function of the cell index, so
//! large grids can be summarised by streaming cells without ever materialising them.

mod field;
mod stats;

pub use field::PhaseField;
pub use stats::{PhaseSummary, RunningStats};

use std::f64::consts::{PI, TAU};

use thiserror::Error;
use tracing::debug;

use modulator_array::ArrayGeometry;
use modulator_core::vector::{self, Vector3};

/// Calibration divisor in the steering wave number `2π / (spacing · 1000)`.
pub const WAVE_NUMBER_DIVISOR: f64 = 1000.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhaseError {
    #[error("phase field of {cells} cells exceeds the ceiling of {ceiling} cells")]
    ResourceLimitExceeded { cells: u64, ceiling: u64 },
    #[error("steering direction must be a finite, non-zero vector")]
    InvalidDirection,
    #[error("cell index {index:?} lies outside grid {dimensions:?}")]
    IndexOutOfBounds {
        index: [u32; 3],
        dimensions: [u32; 3],
    },
}

/// Cell-count ceilings guarding phase-field work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLimits {
    /// Largest grid that may be materialised as a dense field.
    pub dense_cells: u64,
    /// Largest grid that may be streamed for summary statistics.
    pub stream_cells: u64,
}

impl Default for PhaseLimits {
    fn default() -> Self {
        Self {
            dense_cells: 10_000_000,
            stream_cells: 1_000_000_000,
        }
    }
}

/// Synthesises per-cell phases for a fixed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseController {
    dimensions: [u32; 3],
    spacing_m: f64,
    wave_number: f64,
    limits: PhaseLimits,
}

/// Phase gradient per unit cell index for one resolved direction.
#[derive(Debug, Clone, Copy)]
struct SteeringKernel {
    unit_direction: Vector3,
    step: Vector3,
}

impl SteeringKernel {
    #[inline]
    fn phase(&self, index: [u32; 3]) -> f64 {
        let raw = self.step[0] * f64::from(index[0])
            + self.step[1] * f64::from(index[1])
            + self.step[2] * f64::from(index[2]);
        wrap_phase(raw)
    }
}

impl PhaseController {
    pub fn new(geometry: &ArrayGeometry, limits: PhaseLimits) -> Self {
        let spacing_m = geometry.plate_spacing_m();
        Self {
            dimensions: geometry.dimensions(),
            spacing_m,
            wave_number: TAU / (spacing_m * WAVE_NUMBER_DIVISOR),
            limits,
        }
    }

    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    pub fn limits(&self) -> PhaseLimits {
        self.limits
    }

    /// Steering wave number in rad/m.
    pub fn wave_number(&self) -> f64 {
        self.wave_number
    }

    pub fn cell_count(&self) -> u64 {
        self.dimensions.iter().map(|&n| u64::from(n)).product()
    }

    /// Phase of a single cell, computed on demand. `direction` need not be normalised.
    pub fn phase_at(&self, direction: &Vector3, index: [u32; 3]) -> Result<f64, PhaseError> {
        if index
            .iter()
            .zip(self.dimensions.iter())
            .any(|(&i, &n)| i >= n)
        {
            return Err(PhaseError::IndexOutOfBounds {
                index,
                dimensions: self.dimensions,
            });
        }
        Ok(self.kernel(direction)?.phase(index))
    }

    /// Materialise the full field. Refuses grids above the dense ceiling before allocating.
    pub fn phase_pattern(&self, direction: &Vector3) -> Result<PhaseField, PhaseError> {
        let kernel = self.kernel(direction)?;
        let cells = self.cell_count();
        if cells > self.limits.dense_cells {
            return Err(PhaseError::ResourceLimitExceeded {
                cells,
                ceiling: self.limits.dense_cells,
            });
        }

        let [nx, ny, nz] = self.dimensions;
        let mut values = Vec::with_capacity(cells as usize);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    values.push(kernel.phase([i, j, k]));
                }
            }
        }
        Ok(PhaseField::new(self.dimensions, values))
    }

    /// Stream every cell once and aggregate coherence and steering statistics in O(1) memory.
    pub fn summarize(&self, direction: &Vector3) -> Result<PhaseSummary, PhaseError> {
        let kernel = self.kernel(direction)?;
        let cells = self.cell_count();
        if cells > self.limits.stream_cells {
            return Err(PhaseError::ResourceLimitExceeded {
                cells,
                ceiling: self.limits.stream_cells,
            });
        }
        if cells > self.limits.dense_cells {
            debug!(cells, "streaming phase summary above dense ceiling");
        }

        let [nx, ny, nz] = self.dimensions;
        let mut stats = RunningStats::default();
        let mut phasor = [0.0_f64; 2];
        let mut axis_steps = [RunningStats::default(); 3];

        for i in 0..nx {
            for j in 0..ny {
                let mut previous: Option<f64> = None;
                for k in 0..nz {
                    let theta = kernel.phase([i, j, k]);
                    stats.update(theta);
                    phasor[0] += theta.cos();
                    phasor[1] += theta.sin();

                    if i > 0 {
                        axis_steps[0].update(wrap_step(theta - kernel.phase([i - 1, j, k])));
                    }
                    if j > 0 {
                        axis_steps[1].update(wrap_step(theta - kernel.phase([i, j - 1, k])));
                    }
                    if let Some(prev) = previous {
                        axis_steps[2].update(wrap_step(theta - prev));
                    }
                    previous = Some(theta);
                }
            }
        }

        let phase_step = [
            axis_steps[0].mean(),
            axis_steps[1].mean(),
            axis_steps[2].mean(),
        ];
        let alignment = vector::normalize(&phase_step)
            .map(|recovered| vector::dot(&recovered, &kernel.unit_direction));
        let n = stats.count() as f64;

        Ok(PhaseSummary {
            cells: stats.count(),
            mean: stats.mean(),
            std_dev: stats.population_std_dev(),
            min: stats.min(),
            max: stats.max(),
            order_parameter: (phasor[0] * phasor[0] + phasor[1] * phasor[1]).sqrt() / n,
            phase_step,
            alignment,
        })
    }

    fn kernel(&self, direction: &Vector3) -> Result<SteeringKernel, PhaseError> {
        let unit_direction = vector::normalize(direction).ok_or(PhaseError::InvalidDirection)?;
        Ok(SteeringKernel {
            unit_direction,
            step: vector::scale(&unit_direction, self.wave_number * self.spacing_m),
        })
    }
}

/// Reduce an angle into `[0, 2π)`.
#[inline]
pub fn wrap_phase(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Reduce a phase difference into `(-π, π]`.
#[inline]
fn wrap_step(delta: f64) -> f64 {
    let shifted = wrap_phase(delta + PI) - PI;
    if shifted <= -PI { shifted + TAU } else { shifted }
}

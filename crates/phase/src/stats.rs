use serde::Serialize;

use modulator_core::vector::Vector3;

/// Welford accumulator for streaming mean/variance with extrema.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl RunningStats {
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the samples seen so far; zero when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divides by `n`).
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min.unwrap_or_default()
    }

    pub fn max(&self) -> f64 {
        self.max.unwrap_or_default()
    }
}

/// Aggregate statistics of a phase field, computed without materialising it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub cells: u64,
    pub mean: f64,
    /// Population standard deviation; reported as the phase coherence statistic.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Kuramoto order parameter `|⟨e^{iθ}⟩|` in `[0, 1]`.
    pub order_parameter: f64,
    /// Mean wrapped phase advance per cell index along x, y, z.
    pub phase_step: Vector3,
    /// Cosine between the recovered phase gradient and the requested direction.
    /// `None` when the grid offers no neighbouring cells to measure a gradient.
    pub alignment: Option<f64>,
}

/// Dense per-cell phase values in `[0, 2π)`, stored in `(i, j, k)` row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseField {
    dimensions: [u32; 3],
    values: Vec<f64>,
}

impl PhaseField {
    pub(crate) fn new(dimensions: [u32; 3], values: Vec<f64>) -> Self {
        debug_assert_eq!(
            values.len() as u64,
            dimensions.iter().map(|&n| u64::from(n)).product::<u64>()
        );
        Self { dimensions, values }
    }

    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Phase at `(i, j, k)`, or `None` outside the grid.
    pub fn get(&self, i: u32, j: u32, k: u32) -> Option<f64> {
        let [nx, ny, nz] = self.dimensions;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        let idx = (i as usize * ny as usize + j as usize) * nz as usize + k as usize;
        self.values.get(idx).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate `((i, j, k), phase)` pairs in storage order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = ([u32; 3], f64)> + '_ {
        let [_, ny, nz] = self.dimensions;
        let plane = ny as usize * nz as usize;
        self.values.iter().enumerate().map(move |(idx, &phase)| {
            let i = idx / plane;
            let j = (idx % plane) / nz as usize;
            let k = idx % nz as usize;
            ([i as u32, j as u32, k as u32], phase)
        })
    }
}

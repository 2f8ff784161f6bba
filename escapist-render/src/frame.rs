use escapist_core::{Complex, Viewport};

/// A sampled point that escaped, with its 0-based escape index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Complex,
    pub iterations: u32,
}

/// The output of one simulation run.
///
/// A row-major grid (one row per imaginary step, one column per real step)
/// of optional samples. `None` marks a point that never escaped, which the
/// renderer leaves as background. The grid is only ever consumed together
/// with the viewport, resolution and accuracy it was produced from, so all
/// of them are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    viewport: Viewport,
    resolution: u32,
    accuracy: u32,
    rows: Vec<Vec<Option<Sample>>>,
}

impl Frame {
    pub(crate) fn new(
        viewport: Viewport,
        resolution: u32,
        accuracy: u32,
        rows: Vec<Vec<Option<Sample>>>,
    ) -> Self {
        Self {
            viewport,
            resolution,
            accuracy,
            rows,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    pub fn rows(&self) -> &[Vec<Option<Sample>>] {
        &self.rows
    }

    /// Every escaped sample, in sampling order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.rows.iter().flatten().flatten()
    }

    /// Number of grid cells, escaped or not.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Number of cells that never escaped.
    pub fn interior_count(&self) -> usize {
        self.rows.iter().flatten().filter(|s| s.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_frame() -> Frame {
        let vp = Viewport::new(Complex::ZERO, 1.0, 1.0).unwrap();
        let s = |re: f64, iterations: u32| {
            Some(Sample {
                point: Complex::new(re, 0.0),
                iterations,
            })
        };
        Frame::new(vp, 2, 10, vec![vec![s(0.0, 3), None], vec![None, s(0.5, 9)]])
    }

    #[test]
    fn counts() {
        let f = tiny_frame();
        assert_eq!(f.cell_count(), 4);
        assert_eq!(f.interior_count(), 2);
        assert_eq!(f.samples().count(), 2);
    }

    #[test]
    fn samples_follow_row_major_order() {
        let f = tiny_frame();
        let iterations: Vec<u32> = f.samples().map(|s| s.iterations).collect();
        assert_eq!(iterations, vec![3, 9]);
    }
}

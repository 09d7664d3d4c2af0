use super::{GridDims, GridError};

/// Rule used to fill the cell-state array once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPattern {
    /// Every cell active.
    All,
    /// No cell active; the frame shows only the clear color.
    None,
    /// Cells whose linear index is a multiple of `k` are active.
    EveryNth(u32),
    /// Caller-provided row-major states (`0` = inactive, nonzero = active).
    Explicit(Vec<u32>),
}

/// Per-cell active flags, row-major, one `u32` per cell.
///
/// Invariant: `len() == dims.cell_count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStates {
    dims: GridDims,
    cells: Vec<u32>,
}

impl CellStates {
    pub fn from_pattern(dims: GridDims, pattern: &CellPattern) -> Result<Self, GridError> {
        let n = dims.cell_count();
        let cells = match pattern {
            CellPattern::All => vec![1; n as usize],
            CellPattern::None => vec![0; n as usize],
            CellPattern::EveryNth(0) => return Err(GridError::ZeroStride),
            CellPattern::EveryNth(k) => (0..n).map(|i| u32::from(i % k == 0)).collect(),
            CellPattern::Explicit(cells) => return Self::from_vec(dims, cells.clone()),
        };
        Ok(Self { dims, cells })
    }

    pub fn from_vec(dims: GridDims, cells: Vec<u32>) -> Result<Self, GridError> {
        let expected = dims.cell_count() as usize;
        if cells.len() != expected {
            return Err(GridError::StateLengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the state of the cell at `instance` as the shader sees it (`0.0` or `1.0`).
    pub fn scale(&self, instance: u32) -> f32 {
        match self.cells.get(instance as usize) {
            Some(&s) if s != 0 => 1.0,
            _ => 0.0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(n: u32) -> GridDims {
        GridDims::square(n).unwrap()
    }

    #[test]
    fn every_third_marks_multiples_of_three() {
        let s = CellStates::from_pattern(dims(32), &CellPattern::EveryNth(3)).unwrap();
        assert_eq!(s.len(), 1024);
        assert_eq!(&s.as_slice()[..7], &[1, 0, 0, 1, 0, 0, 1]);
        // ceil(1024 / 3)
        assert_eq!(s.active_count(), 342);
    }

    #[test]
    fn all_and_none() {
        let all = CellStates::from_pattern(dims(4), &CellPattern::All).unwrap();
        assert_eq!(all.active_count(), 16);
        let none = CellStates::from_pattern(dims(4), &CellPattern::None).unwrap();
        assert_eq!(none.active_count(), 0);
        assert_eq!(none.len(), 16);
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert_eq!(
            CellStates::from_pattern(dims(4), &CellPattern::EveryNth(0)),
            Err(GridError::ZeroStride)
        );
    }

    #[test]
    fn explicit_length_must_match() {
        let err = CellStates::from_pattern(dims(4), &CellPattern::Explicit(vec![1; 15]));
        assert_eq!(
            err,
            Err(GridError::StateLengthMismatch { expected: 16, actual: 15 })
        );
        assert!(CellStates::from_vec(dims(2), vec![0, 7, 0, 1]).is_ok());
    }

    #[test]
    fn nonzero_states_scale_to_one() {
        let s = CellStates::from_vec(dims(2), vec![0, 7, 0, 1]).unwrap();
        assert_eq!(s.scale(0), 0.0);
        assert_eq!(s.scale(1), 1.0);
        assert_eq!(s.scale(3), 1.0);
        assert_eq!(s.active_count(), 2);
    }
}

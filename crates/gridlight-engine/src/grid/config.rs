use crate::paint::Color;

use super::{CellPattern, CellStates, GridDims, GridError};

/// Everything needed to draw one grid frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub dims: GridDims,
    pub pattern: CellPattern,
    /// Background color the frame is cleared to before drawing cells.
    pub clear: Color,
}

impl GridConfig {
    pub fn new(dims: GridDims, pattern: CellPattern) -> Self {
        Self {
            dims,
            pattern,
            clear: Color::BACKGROUND,
        }
    }

    /// 4x4 grid with every cell drawn.
    pub fn small() -> Self {
        Self::new(GridDims::SMALL, CellPattern::All)
    }

    /// 32x32 grid with every third cell (by linear index) drawn.
    pub fn tutorial() -> Self {
        Self::new(GridDims::TUTORIAL, CellPattern::EveryNth(3))
    }

    pub fn with_clear(mut self, clear: Color) -> Self {
        self.clear = clear;
        self
    }

    /// Builds the cell-state array, validating it against `dims`.
    pub fn states(&self) -> Result<CellStates, GridError> {
        CellStates::from_pattern(self.dims, &self.pattern)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::tutorial()
    }
}

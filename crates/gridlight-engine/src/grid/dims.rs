use super::GridError;

/// Width/height of the cell grid, in cells.
///
/// Invariant: both components are positive and `width * height` fits in `u32`.
/// The only way to obtain a `GridDims` is through the validating constructors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridDims {
    width: u32,
    height: u32,
}

impl GridDims {
    /// 4x4.
    pub const SMALL: Self = Self { width: 4, height: 4 };
    /// 32x32.
    pub const TUTORIAL: Self = Self { width: 32, height: 32 };

    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSize { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Square `n x n` grid.
    pub fn square(n: u32) -> Result<Self, GridError> {
        Self::new(n, n)
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Number of cells; also the instance count of the grid draw call.
    #[inline]
    pub fn cell_count(self) -> u32 {
        self.width * self.height
    }

    /// Value written to the grid uniform (`vec2f` at group 0, binding 0).
    #[inline]
    pub fn as_uniform(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

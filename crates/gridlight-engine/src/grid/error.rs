use std::fmt;

/// Grid configuration error.
///
/// Raised while building a [`GridConfig`](super::GridConfig) or its cell-state
/// array, before any GPU object is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    ZeroSize { width: u32, height: u32 },
    /// The cell-state array does not hold exactly `width * height` entries.
    StateLengthMismatch { expected: usize, actual: usize },
    /// `width * height` does not fit the `u32` instance index range.
    TooLarge { width: u32, height: u32 },
    /// Cell states were built for a different grid than the one being drawn.
    DimsMismatch { expected: (u32, u32), actual: (u32, u32) },
    /// The cell-state buffer is larger than the device allows.
    ExceedsDeviceLimits { required: u64, limit: u64 },
    /// `CellPattern::EveryNth(0)`.
    ZeroStride,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroSize { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            GridError::StateLengthMismatch { expected, actual } => write!(
                f,
                "cell-state array has {actual} entries, grid needs {expected}"
            ),
            GridError::TooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds the u32 instance range")
            }
            GridError::DimsMismatch { expected, actual } => write!(
                f,
                "cell states are for a {}x{} grid, renderer expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            GridError::ExceedsDeviceLimits { required, limit } => write!(
                f,
                "cell-state buffer needs {required} bytes, device allows {limit}"
            ),
            GridError::ZeroStride => write!(f, "cell pattern stride must be at least 1"),
        }
    }
}

impl std::error::Error for GridError {}

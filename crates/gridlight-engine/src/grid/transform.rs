//! Host-side mirror of the grid shader arithmetic.
//!
//! These functions evaluate exactly what `vertexMain` and `fragmentMain` compute
//! per invocation, so placement and coloring can be checked without a GPU.

use super::GridDims;

/// Row-major unravel of a linear instance index: x varies fastest.
///
/// Instance `0` is cell `(0, 0)`, instance `1` is `(1, 0)`, instance `width`
/// is `(0, 1)`.
#[inline]
pub fn unravel(instance: u32, dims: GridDims) -> (u32, u32) {
    (instance % dims.width(), instance / dims.width())
}

/// Inverse of [`unravel`].
#[inline]
pub fn ravel(cell: (u32, u32), dims: GridDims) -> u32 {
    cell.1 * dims.width() + cell.0
}

/// NDC offset of a cell's lower-left slot relative to `(-1, -1)`.
#[inline]
pub fn cell_offset(cell: (u32, u32), dims: GridDims) -> [f32; 2] {
    let [gw, gh] = dims.as_uniform();
    [cell.0 as f32 / gw * 2.0, cell.1 as f32 / gh * 2.0]
}

/// Final clip-space position of one square vertex.
///
/// `state` scales the square: `0.0` collapses all six vertices onto one point,
/// `1.0` keeps the square at full size inside its `2 / N` slot.
pub fn transform_vertex(pos: [f32; 2], cell: (u32, u32), state: f32, dims: GridDims) -> [f32; 2] {
    let [gw, gh] = dims.as_uniform();
    let [ox, oy] = cell_offset(cell, dims);
    [
        (pos[0] * state + 1.0) / gw - 1.0 + ox,
        (pos[1] * state + 1.0) / gh - 1.0 + oy,
    ]
}

/// Fragment color of a cell: red grows with x, green with y, blue is `1 - red`.
pub fn cell_color(cell: (u32, u32), dims: GridDims) -> [f32; 4] {
    let [gw, gh] = dims.as_uniform();
    let c = [cell.0 as f32 / gw, cell.1 as f32 / gh];
    [c[0], c[1], 1.0 - c[0], 1.0]
}

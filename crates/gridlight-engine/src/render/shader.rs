//! Embedded WGSL source for the grid pipeline.

/// Grid shader: `vertexMain` places and scales each cell square, `fragmentMain`
/// colors it from its cell coordinate.
///
/// Bindings (group 0):
/// - `0`: `grid: vec2f` uniform (width, height in cells), vertex + fragment
/// - `1`: `cellState: array<u32>` read-only storage, vertex
pub const GRID_SHADER: &str = include_str!("shaders/grid.wgsl");

pub const VERTEX_ENTRY: &str = "vertexMain";
pub const FRAGMENT_ENTRY: &str = "fragmentMain";

pub const GRID_UNIFORM_BINDING: u32 = 0;
pub const CELL_STATE_BINDING: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(GRID_SHADER).expect("grid shader parses")
    }

    #[test]
    fn shader_validates() {
        let module = parse();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .expect("grid shader validates");
    }

    #[test]
    fn entry_points_are_exposed() {
        let module = parse();
        let vs = module.entry_points.iter().find(|e| e.name == VERTEX_ENTRY);
        let fs = module.entry_points.iter().find(|e| e.name == FRAGMENT_ENTRY);
        assert_eq!(vs.map(|e| e.stage), Some(naga::ShaderStage::Vertex));
        assert_eq!(fs.map(|e| e.stage), Some(naga::ShaderStage::Fragment));
    }

    #[test]
    fn bindings_match_host_layout() {
        let module = parse();
        let mut slots: Vec<(u32, u32, naga::AddressSpace)> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                var.binding
                    .as_ref()
                    .map(|b| (b.group, b.binding, var.space))
            })
            .collect();
        slots.sort_by_key(|&(g, b, _)| (g, b));

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], (0, GRID_UNIFORM_BINDING, naga::AddressSpace::Uniform));
        assert_eq!(
            slots[1],
            (
                0,
                CELL_STATE_BINDING,
                naga::AddressSpace::Storage {
                    access: naga::StorageAccess::LOAD
                }
            )
        );
    }
}

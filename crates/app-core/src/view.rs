//! Presentation-side helpers: GPU-ready instance records plus the small
//! animation targets adapters chase each frame. Nothing here mutates engine
//! state; renderers call these against a [`crate::engine::Snapshot`].

use std::f32::consts::FRAC_PI_4;

use crate::constants::{MAX_TOTAL_CELLS, MIN_TOTAL_CELLS, ZOOM_AT_MAX_TOTAL, ZOOM_AT_MIN_TOTAL};
use crate::grid::GridSpec;
use crate::palette::Color;
use crate::pattern::VisibilityMask;

/// Per-cell instance record, laid out for direct GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
}

/// Linear interpolation toward a target.
#[inline]
pub fn lerp(from: f32, to: f32, alpha: f32) -> f32 {
    from + (to - from) * alpha
}

/// Group rotation targets `(y, z)` after a given interaction count: a
/// quarter-turn-per-interaction spin and an alternating z tilt.
pub fn rotation_targets(iteration: u64) -> (f32, f32) {
    let y = iteration as f32 * FRAC_PI_4;
    let z = (iteration % 2) as f32 * FRAC_PI_4;
    (y, z)
}

/// Breathing scale target for the whole lattice.
pub fn pulse_scale(elapsed_secs: f32) -> f32 {
    1.0 + (elapsed_secs * 5.0).sin() / 20.0
}

/// Per-cell lerp rate; later cells settle slightly slower than earlier ones.
pub fn cell_lerp_rate(index: usize, total: usize) -> f32 {
    0.2 - index as f32 / total as f32 / 8.0
}

/// Uniform scale for a display with the given aspect ratio: shrink in
/// portrait, never grow in landscape.
pub fn size_by_aspect(size: f32, aspect: f32) -> f32 {
    if aspect > 1.0 {
        size
    } else {
        size * aspect
    }
}

/// Orthographic camera zoom for a lattice of `total` cells, remapped
/// linearly from the smallest possible grid to the largest.
pub fn camera_zoom(total: usize) -> f32 {
    let span = (MAX_TOTAL_CELLS - MIN_TOTAL_CELLS) as f32;
    let t = (total as f32 - MIN_TOTAL_CELLS as f32) / span;
    ZOOM_AT_MIN_TOTAL + t * (ZOOM_AT_MAX_TOTAL - ZOOM_AT_MIN_TOTAL)
}

/// Build instance records for one layer.
///
/// `cube_scale` is the layer's cube size (the nested layer renders at
/// [`crate::constants::SECONDARY_LAYER_SCALE`]). Hidden cells carry scale 0
/// so renderers can lerp them shut instead of skipping them; `colors` must
/// hold one entry per cell.
pub fn cell_instances(
    grid: &GridSpec,
    mask: &VisibilityMask,
    colors: &[Color],
    cube_scale: f32,
) -> Vec<CellInstance> {
    debug_assert_eq!(colors.len(), grid.total());
    grid.cells()
        .map(|cell| CellInstance {
            position: grid.position(cell.index).to_array(),
            scale: mask.scale_target(cell.index) * cube_scale,
            color: colors[cell.index].rgba_f32(1.0),
        })
        .collect()
}

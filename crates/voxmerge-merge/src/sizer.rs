use glam::{DVec3, IVec3};
use voxmerge_core::constants::{MERGE_PADDING, STORAGE_CHUNK};
use voxmerge_core::math::round_up_ivec;
use voxmerge_core::types::ContentBounds;

use crate::operation::MergeRule;

/// What the sizer needs to know about one source volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceGeometry {
    /// Rounded world position of cell (0,0,0), in the reconciled frame.
    pub rounded_min: IVec3,
    /// Sub-cell offset removed by rounding.
    pub offset: DVec3,
    /// Allocated cell-space size.
    pub size: IVec3,
    /// Cell-space box of non-empty cells, None if the volume is empty.
    pub content: Option<ContentBounds>,
}

impl SourceGeometry {
    /// Content box in the reconciled world frame.
    pub fn world_content(&self) -> Option<ContentBounds> {
        self.content.map(|c| c.translated(self.rounded_min))
    }
}

/// Destination volume layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    pub size: IVec3,
    /// Rounded world position of destination cell (0,0,0).
    pub world_min: IVec3,
    /// Sub-cell offset added back when placing the result.
    pub placement_offset: DVec3,
}

/// Compute the destination size and placement for a merge.
pub fn size_target(
    rule: MergeRule,
    primary: &SourceGeometry,
    secondary: &SourceGeometry,
) -> TargetSize {
    match rule {
        MergeRule::UnionVolume => size_union(primary, secondary),
        MergeRule::UnionMaterial | MergeRule::SubtractVolume => fit_primary(primary),
    }
}

/// Destination covering exactly the primary's allocation.
fn fit_primary(primary: &SourceGeometry) -> TargetSize {
    TargetSize {
        size: primary.size,
        world_min: primary.rounded_min,
        placement_offset: primary.offset,
    }
}

fn size_union(primary: &SourceGeometry, secondary: &SourceGeometry) -> TargetSize {
    let span = match (primary.world_content(), secondary.world_content()) {
        (Some(p), Some(s)) => p.union(&s),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => return fit_primary(primary),
    };

    let padding = IVec3::splat(MERGE_PADDING);
    let raw = span.extent() + padding * 2;
    let size = round_up_ivec(raw, STORAGE_CHUNK);

    TargetSize {
        size,
        world_min: span.min - padding,
        placement_offset: union_offset(primary, secondary),
    }
}

/// Per axis, the offset of the source with the smaller minimum corner.
/// Empty sources do not take part; ties go to the primary.
fn union_offset(primary: &SourceGeometry, secondary: &SourceGeometry) -> DVec3 {
    match (primary.content.is_some(), secondary.content.is_some()) {
        (true, false) => return primary.offset,
        (false, true) => return secondary.offset,
        _ => {}
    }

    let pick = |p_min: i32, s_min: i32, p_off: f64, s_off: f64| {
        if s_min < p_min {
            s_off
        } else {
            p_off
        }
    };

    let (p, s) = (primary, secondary);
    DVec3::new(
        pick(p.rounded_min.x, s.rounded_min.x, p.offset.x, s.offset.x),
        pick(p.rounded_min.y, s.rounded_min.y, p.offset.y, s.offset.y),
        pick(p.rounded_min.z, s.rounded_min.z, p.offset.z, s.offset.z),
    )
}

//! Cell-wise compositing of two source volumes into a destination.
//!
//! Every pass walks only the content box of its source. Cells outside a
//! content box are vacuum and are never visited. The base pass always
//! completes before the overlay pass starts, which fixes which volume's
//! material wins on overlap.

use glam::IVec3;
use voxmerge_core::types::ContentBounds;
use voxmerge_volume::VoxelVolume;

use crate::operation::MergeRule;
use crate::progress::{MergeStage, ProgressReporter};

/// A read-only source volume placed in the reconciled world frame.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub volume: &'a VoxelVolume,
    /// Cached `volume.content_bounds()`.
    pub content: Option<ContentBounds>,
    /// Rounded world position of the volume's cell (0,0,0).
    pub world_min: IVec3,
}

impl<'a> Layer<'a> {
    pub fn new(volume: &'a VoxelVolume, world_min: IVec3) -> Self {
        Self {
            volume,
            content: volume.content_bounds(),
            world_min,
        }
    }

    /// The layer's allocated box in destination cell space.
    fn dest_box(&self, dest_world_min: IVec3) -> ContentBounds {
        let lo = self.world_min - dest_world_min;
        ContentBounds::new(lo, lo + self.volume.size() - IVec3::ONE)
    }
}

/// Destination cell for a source cell:
/// `(min_source - dest_world_min) + (coords - content_min)`, where
/// `min_source` is the world position of the source's content corner.
pub fn destination_cell(
    coords: IVec3,
    content: &ContentBounds,
    source_world_min: IVec3,
    dest_world_min: IVec3,
) -> IVec3 {
    let min_source = source_world_min + content.min;
    (min_source - dest_world_min) + (coords - content.min)
}

/// Populate `dest` from `primary` and `secondary` with the given rule.
pub fn composite<P: ProgressReporter + ?Sized>(
    rule: MergeRule,
    dest: &mut VoxelVolume,
    dest_world_min: IVec3,
    primary: &Layer<'_>,
    secondary: &Layer<'_>,
    progress: &P,
) {
    match rule {
        MergeRule::UnionVolume => {
            union_volume_into(dest, dest_world_min, primary, secondary, progress)
        }
        MergeRule::SubtractVolume => {
            subtract_volume_from(dest, dest_world_min, primary, secondary, progress)
        }
        MergeRule::UnionMaterial => {
            merge_material_from(dest, dest_world_min, primary, secondary, progress)
        }
    }
}

/// Secondary copied as the base; primary laid over it.
///
/// On overlap the fill becomes the larger of the two while the material is
/// always the primary's, even where the secondary was denser.
pub fn union_volume_into<P: ProgressReporter + ?Sized>(
    dest: &mut VoxelVolume,
    dest_world_min: IVec3,
    primary: &Layer<'_>,
    secondary: &Layer<'_>,
    progress: &P,
) {
    copy_layer(dest, dest_world_min, secondary, progress);

    let mut written = 0u64;
    for_each_cell(primary, dest_world_min, MergeStage::Overlay, progress, |src, d| {
        let cell = primary.volume.cell(src);
        if !cell.is_filled() || !dest.contains(d) {
            return;
        }
        let existing = dest.cell(d);
        if cell.fill > existing.fill {
            dest.set_fill(d, cell.fill);
        }
        dest.set_material(d, cell.material, cell.is_indestructible());
        written += 1;
    });
    log::debug!("union overlay wrote {written} cells");
}

/// Primary copied as the base; secondary fill erodes it inside the primary's box.
/// Materials are never changed.
pub fn subtract_volume_from<P: ProgressReporter + ?Sized>(
    dest: &mut VoxelVolume,
    dest_world_min: IVec3,
    primary: &Layer<'_>,
    secondary: &Layer<'_>,
    progress: &P,
) {
    copy_layer(dest, dest_world_min, primary, progress);

    let primary_box = primary.dest_box(dest_world_min);
    let mut eroded = 0u64;
    for_each_cell(secondary, dest_world_min, MergeStage::Overlay, progress, |src, d| {
        if !primary_box.contains(d) {
            return;
        }
        let cell = secondary.volume.cell(src);
        if !cell.is_filled() {
            return;
        }
        let existing = dest.cell(d);
        dest.set_fill(d, existing.fill.saturating_sub(cell.fill));
        eroded += 1;
    });
    log::debug!("subtract overlay eroded {eroded} cells");
}

/// Primary copied as the base; secondary's material painted on inside the
/// primary's box. Fill amounts are never changed.
pub fn merge_material_from<P: ProgressReporter + ?Sized>(
    dest: &mut VoxelVolume,
    dest_world_min: IVec3,
    primary: &Layer<'_>,
    secondary: &Layer<'_>,
    progress: &P,
) {
    copy_layer(dest, dest_world_min, primary, progress);

    let primary_box = primary.dest_box(dest_world_min);
    let mut painted = 0u64;
    for_each_cell(secondary, dest_world_min, MergeStage::Overlay, progress, |src, d| {
        if !primary_box.contains(d) {
            return;
        }
        let cell = secondary.volume.cell(src);
        if !cell.is_filled() {
            return;
        }
        dest.set_material(d, cell.material, cell.is_indestructible());
        painted += 1;
    });
    log::debug!("material overlay painted {painted} cells");
}

/// Copy every cell of a layer's content box verbatim. Cells landing outside
/// the destination are skipped.
fn copy_layer<P: ProgressReporter + ?Sized>(
    dest: &mut VoxelVolume,
    dest_world_min: IVec3,
    layer: &Layer<'_>,
    progress: &P,
) {
    for_each_cell(layer, dest_world_min, MergeStage::BaseLayer, progress, |src, d| {
        dest.set_cell(d, layer.volume.cell(src));
    });
}

/// Visit each cell of the layer's content box with its destination coordinate,
/// reporting progress once per completed z slice.
fn for_each_cell<P, F>(
    layer: &Layer<'_>,
    dest_world_min: IVec3,
    stage: MergeStage,
    progress: &P,
    mut visit: F,
) where
    P: ProgressReporter + ?Sized,
    F: FnMut(IVec3, IVec3),
{
    let Some(content) = layer.content else {
        progress.report(stage, 1, 1);
        return;
    };

    let slices = content.extent().z as u32;
    for z in content.min.z..=content.max.z {
        for y in content.min.y..=content.max.y {
            for x in content.min.x..=content.max.x {
                let src = IVec3::new(x, y, z);
                let d = destination_cell(src, &content, layer.world_min, dest_world_min);
                visit(src, d);
            }
        }
        progress.report(stage, (z - content.min.z + 1) as u32, slices);
    }
}

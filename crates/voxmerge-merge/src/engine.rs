use std::path::{Path, PathBuf};

use voxmerge_core::math::is_placeable;
use voxmerge_core::types::MaterialId;
use voxmerge_persist::same_file;
use voxmerge_volume::{VoxelStorage, VoxelVolume};

use crate::alignment::{reconcile, Alignment};
use crate::compositor::{self, Layer};
use crate::error::MergeError;
use crate::operation::{MergeOperation, Source};
use crate::packager::{self, MergeResult};
use crate::progress::{MergeStage, ProgressReporter};
use crate::sizer::{size_target, SourceGeometry, TargetSize};

/// Caller-supplied world state a merge needs.
#[derive(Debug, Clone)]
pub struct WorldContext {
    /// Directory receiving the merged volume file.
    pub work_dir: PathBuf,
    /// Name of the new entity; also the file stem of the saved volume.
    pub entity_name: String,
    /// Material of the destination's untouched cells.
    pub default_material: MaterialId,
}

impl WorldContext {
    pub fn new(work_dir: impl Into<PathBuf>, entity_name: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            entity_name: entity_name.into(),
            default_material: MaterialId(0),
        }
    }
}

/// Stateless merge pipeline: align, size, composite, package.
pub struct MergeEngine<S, P> {
    storage: S,
    progress: P,
}

impl<S: VoxelStorage, P: ProgressReporter> MergeEngine<S, P> {
    pub fn new(storage: S, progress: P) -> Self {
        Self { storage, progress }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load both sources through the storage, then [`Self::merge`] them.
    pub fn merge_files(
        &self,
        ctx: &WorldContext,
        path_a: &Path,
        path_b: &Path,
        op: MergeOperation,
    ) -> Result<MergeResult, MergeError> {
        if same_file(path_a, path_b) {
            return Err(MergeError::SameSource(path_a.to_path_buf()));
        }

        let a = self.storage.load(path_a)?;
        self.progress.report(MergeStage::Load, 1, 2);
        let b = self.storage.load(path_b)?;
        self.progress.report(MergeStage::Load, 2, 2);

        self.merge(ctx, &a, &b, op)
    }

    /// Merge two loaded volumes and persist the result.
    pub fn merge(
        &self,
        ctx: &WorldContext,
        a: &VoxelVolume,
        b: &VoxelVolume,
        op: MergeOperation,
    ) -> Result<MergeResult, MergeError> {
        let (volume, target) = self.compose(ctx, a, b, op)?;
        let result = packager::package(&self.storage, volume, &target, ctx)?;
        self.progress.report(MergeStage::Save, 1, 1);
        Ok(result)
    }

    /// Build the destination volume without persisting it.
    pub fn compose(
        &self,
        ctx: &WorldContext,
        a: &VoxelVolume,
        b: &VoxelVolume,
        op: MergeOperation,
    ) -> Result<(VoxelVolume, TargetSize), MergeError> {
        log::info!("merging volumes with {op}");

        for origin in [a.world_origin(), b.world_origin()] {
            if !is_placeable(origin) {
                return Err(MergeError::OriginOutOfRange(origin));
            }
        }

        let alignment = reconcile(a.world_origin(), b.world_origin());
        log::debug!(
            "alignment: A at {} (+{}), B at {} (+{})",
            alignment.rounded_min_a,
            alignment.offset_a,
            alignment.rounded_min_b,
            alignment.offset_b
        );
        self.progress.report(MergeStage::Align, 1, 1);

        let pick = move |source: Source| match source {
            Source::A => a,
            Source::B => b,
        };
        let primary = Layer::new(pick(op.primary()), alignment.rounded_min(op.primary()));
        let secondary = Layer::new(pick(op.secondary()), alignment.rounded_min(op.secondary()));

        let target = size_target(
            op.rule(),
            &geometry(&primary, &alignment, op.primary()),
            &geometry(&secondary, &alignment, op.secondary()),
        );
        log::debug!(
            "destination {} at {} (+{})",
            target.size,
            target.world_min,
            target.placement_offset
        );
        self.progress.report(MergeStage::Size, 1, 1);

        let mut dest = self
            .storage
            .create_empty(target.size, ctx.default_material)?;
        compositor::composite(
            op.rule(),
            &mut dest,
            target.world_min,
            &primary,
            &secondary,
            &self.progress,
        );

        Ok((dest, target))
    }
}

fn geometry(layer: &Layer<'_>, alignment: &Alignment, source: Source) -> SourceGeometry {
    SourceGeometry {
        rounded_min: layer.world_min,
        offset: alignment.offset(source),
        size: layer.volume.size(),
        content: layer.content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoProgress, RecordingProgress};
    use glam::{DVec3, IVec3};
    use voxmerge_core::types::Cell;
    use voxmerge_volume::{FileStorage, VolumeError};

    const ROCK: MaterialId = MaterialId(1);
    const IRON: MaterialId = MaterialId(2);

    fn solid(origin: DVec3, size: i32, material: MaterialId) -> VoxelVolume {
        let mut v = VoxelVolume::new(IVec3::splat(size), MaterialId(0))
            .unwrap()
            .with_world_origin(origin);
        v.fill_box(IVec3::ZERO, IVec3::splat(size - 1), Cell::new(material, 255));
        v
    }

    fn engine() -> MergeEngine<FileStorage, NoProgress> {
        MergeEngine::new(FileStorage, NoProgress)
    }

    #[test]
    fn test_union_rock_into_iron_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "merged");
        let a = solid(DVec3::ZERO, 64, ROCK);
        let b = solid(DVec3::new(32.0, 0.0, 0.0), 64, IRON);

        let result = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionVolumeAToB)
            .unwrap();
        let out = &result.volume;

        assert_eq!(out.size(), IVec3::splat(128));
        assert_eq!(result.placement.position, DVec3::splat(-3.0));

        for x in [0, 31, 32, 47, 63] {
            for (y, z) in [(0, 0), (63, 63), (17, 40)] {
                let cell = out.cell_at_world(IVec3::new(x, y, z));
                assert_eq!(cell.material, ROCK, "x={x} y={y} z={z}");
                assert_eq!(cell.fill, 255);
            }
        }
        for x in [64, 80, 95] {
            let cell = out.cell_at_world(IVec3::new(x, 10, 10));
            assert_eq!(cell, Cell::new(IRON, 255), "x={x}");
        }
        assert!(!out.cell_at_world(IVec3::new(96, 10, 10)).is_filled());
        assert!(!out.cell_at_world(IVec3::new(-1, 10, 10)).is_filled());
        assert_eq!(out.filled_cell_count(), 96 * 64 * 64);

        let reloaded = FileStorage.load(&result.source_file).unwrap();
        assert_eq!(reloaded.material_histogram(), out.material_histogram());
    }

    #[test]
    fn test_union_mirrored_operation_swaps_winner() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "merged");
        let a = solid(DVec3::ZERO, 64, ROCK);
        let b = solid(DVec3::new(32.0, 0.0, 0.0), 64, IRON);

        let (out, target) = engine()
            .compose(&ctx, &a, &b, MergeOperation::UnionVolumeBToA)
            .unwrap();
        let overlap = IVec3::new(40, 5, 5) - target.world_min;
        assert_eq!(out.cell(overlap).material, IRON);
    }

    #[test]
    fn test_fractional_origins_keep_sub_cell_offset() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "merged");
        let a = solid(DVec3::new(100.3, 0.0, -7.2), 16, ROCK);
        let b = solid(DVec3::new(110.3, 0.0, -7.2), 16, IRON);

        let result = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionVolumeAToB)
            .unwrap();
        // Span x 100..=125, padded by 3
        let expected = DVec3::new(97.0 + 0.3, -3.0, -7.0 - 3.0 - 0.2);
        assert!((result.placement.position - expected).abs().max_element() < 1e-9);
        assert_eq!(result.size(), IVec3::splat(64));
    }

    #[test]
    fn test_subtract_erodes_primary_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "holed");
        let a = solid(DVec3::new(0.5, 0.0, 0.0), 32, ROCK);
        let b = solid(DVec3::new(16.5, 0.0, 0.0), 32, IRON);

        let result = engine()
            .merge(&ctx, &a, &b, MergeOperation::SubtractVolumeAMinusB)
            .unwrap();
        let out = &result.volume;

        assert_eq!(out.size(), a.size());
        assert_eq!(result.placement.position, a.world_origin());
        assert_eq!(out.cell(IVec3::new(15, 0, 0)), Cell::new(ROCK, 255));
        assert_eq!(out.cell(IVec3::new(16, 0, 0)).fill, 0);
        assert_eq!(out.cell(IVec3::new(16, 0, 0)).material, ROCK);
        assert_eq!(out.filled_cell_count(), 16 * 32 * 32);
    }

    #[test]
    fn test_material_overlay_paints_primary() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "painted");
        let a = solid(DVec3::new(8.0, 0.0, 0.0), 16, IRON);
        let b = solid(DVec3::ZERO, 32, ROCK);

        // A's material painted onto B
        let result = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionMaterialAToB)
            .unwrap();
        let out = &result.volume;

        assert_eq!(out.size(), b.size());
        assert_eq!(out.filled_cell_count(), b.filled_cell_count());
        assert_eq!(out.cell(IVec3::new(8, 0, 0)).material, IRON);
        assert_eq!(out.cell(IVec3::new(23, 15, 15)).material, IRON);
        assert_eq!(out.cell(IVec3::new(24, 0, 0)).material, ROCK);
        assert_eq!(out.cell(IVec3::new(7, 0, 0)).material, ROCK);
    }

    #[test]
    fn test_two_empty_volumes_merge_to_empty_primary_sized() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "nothing");
        let a = VoxelVolume::new(IVec3::new(64, 32, 32), MaterialId(0)).unwrap();
        let b = VoxelVolume::new(IVec3::splat(64), MaterialId(0))
            .unwrap()
            .with_world_origin(DVec3::splat(500.0));

        let result = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionVolumeAToB)
            .unwrap();
        assert_eq!(result.size(), IVec3::new(64, 32, 32));
        assert!(result.volume.content_bounds().is_none());
    }

    #[test]
    fn test_far_origin_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "far");
        let a = solid(DVec3::new(3.0e9, 0.0, 0.0), 8, ROCK);
        let b = solid(DVec3::new(3.0e9 + 4.0, 0.0, 0.0), 8, IRON);

        let err = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionVolumeAToB)
            .unwrap_err();
        assert!(matches!(err, MergeError::OriginOutOfRange(o) if o.x == 3.0e9));
        assert!(!dir.path().join("far.vxv").exists());

        let near = solid(DVec3::ZERO, 8, ROCK);
        let err = engine()
            .compose(&ctx, &near, &b, MergeOperation::SubtractVolumeAMinusB)
            .unwrap_err();
        assert!(matches!(err, MergeError::OriginOutOfRange(_)));
    }

    #[test]
    fn test_union_too_large_to_allocate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "wide");
        let a = solid(DVec3::ZERO, 8, ROCK);
        let b = solid(DVec3::splat(5000.0), 8, IRON);

        let err = engine()
            .merge(&ctx, &a, &b, MergeOperation::UnionVolumeAToB)
            .unwrap_err();
        assert!(matches!(
            err,
            MergeError::Volume(VolumeError::InvalidDimensions(_))
        ));
        assert!(!dir.path().join("wide.vxv").exists());
    }

    #[test]
    fn test_merge_files_loads_sources_and_reports_stages() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.vxv");
        let path_b = dir.path().join("b.vxv");
        FileStorage
            .save(&solid(DVec3::ZERO, 32, ROCK), &path_a)
            .unwrap();
        FileStorage
            .save(&solid(DVec3::new(0.0, 40.0, 0.0), 32, IRON), &path_b)
            .unwrap();

        let progress = RecordingProgress::default();
        let engine = MergeEngine::new(FileStorage, &progress);
        let ctx = WorldContext::new(dir.path().join("out"), "joined");
        let result = engine
            .merge_files(&ctx, &path_a, &path_b, MergeOperation::UnionVolumeBToA)
            .unwrap();

        assert_eq!(result.volume.filled_cell_count(), 2 * 32 * 32 * 32);
        assert!(path_a.exists() && path_b.exists(), "originals are kept");

        let stages: Vec<MergeStage> = progress.events().iter().map(|e| e.0).collect();
        assert_eq!(stages.first(), Some(&MergeStage::Load));
        assert_eq!(stages.last(), Some(&MergeStage::Save));
        assert!(stages.contains(&MergeStage::Overlay));
    }

    #[test]
    fn test_merge_files_rejects_same_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.vxv");
        FileStorage
            .save(&solid(DVec3::ZERO, 8, ROCK), &path)
            .unwrap();
        let ctx = WorldContext::new(dir.path(), "self");
        let err = engine()
            .merge_files(&ctx, &path, &path, MergeOperation::UnionVolumeAToB)
            .unwrap_err();
        assert!(matches!(err, MergeError::SameSource(_)));
    }

    #[test]
    fn test_merge_files_missing_source_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorldContext::new(dir.path(), "x");
        let err = engine()
            .merge_files(
                &ctx,
                &dir.path().join("a.vxv"),
                &dir.path().join("b.vxv"),
                MergeOperation::UnionVolumeAToB,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            MergeError::Volume(VolumeError::Read { .. })
        ));
        assert!(!dir.path().join("x.vxv").exists());
    }
}

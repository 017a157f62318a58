use std::fmt::Write as _;
use std::path::Path;

use glam::{DVec3, IVec3};
use voxmerge_core::types::{Cell, ContentBounds, MaterialId};
use voxmerge_core::MaterialTable;
use voxmerge_merge::{MergeEngine, ProgressReporter, WorldContext};
use voxmerge_persist::same_file;
use voxmerge_volume::{FileStorage, VoxelStorage, VoxelVolume};

use crate::args::{GenerateArgs, Shape};
use crate::error::JobError;
use crate::job::MergeJob;
use crate::report::MergeReport;

/// Run a merge job end to end: load both sources, merge, save the result
/// into the job's output directory and optionally delete the originals.
pub fn run_merge<P: ProgressReporter>(
    job: &MergeJob,
    materials: &MaterialTable,
    progress: P,
) -> Result<MergeReport, JobError> {
    let engine = MergeEngine::new(FileStorage, progress);
    let ctx = WorldContext::new(job.output_dir.clone(), job.name.clone());

    let result = engine.merge_files(&ctx, &job.volume_a, &job.volume_b, job.operation)?;

    // Originals only go once the merged file is safely on disk.
    if job.remove_originals {
        for original in [&job.volume_a, &job.volume_b] {
            if same_file(original, &result.source_file) {
                log::warn!(
                    "not removing {}: it is the merged output",
                    original.display()
                );
                continue;
            }
            std::fs::remove_file(original).map_err(|source| JobError::RemoveOriginal {
                path: original.clone(),
                source,
            })?;
            log::info!("removed original {}", original.display());
        }
    }

    Ok(MergeReport::from_result(
        &result,
        job.operation,
        materials,
        job.remove_originals,
    ))
}

/// Write a synthetic asteroid volume and return it.
pub fn run_generate(args: &GenerateArgs, materials: &MaterialTable) -> Result<VoxelVolume, JobError> {
    let material = materials.resolve(&args.material)?;
    let indestructible = materials
        .get(material)
        .is_some_and(|def| def.indestructible);
    let cell = Cell::new(material, args.fill).with_indestructible(indestructible);

    let storage = FileStorage;
    let mut volume = storage
        .create_empty(args.size, MaterialId(0))?
        .with_world_origin(args.origin);

    match args.shape {
        Shape::Box => volume.fill_box(IVec3::ZERO, args.size - IVec3::ONE, cell),
        Shape::Sphere => {
            let center = (args.size - IVec3::ONE).as_dvec3() * 0.5;
            let radius = args.size.min_element() as f64 * 0.5;
            for coord in ContentBounds::new(IVec3::ZERO, args.size - IVec3::ONE).iter() {
                if coord.as_dvec3().distance(center) <= radius {
                    volume.set_cell(coord, cell);
                }
            }
        }
    }

    storage.save(&volume, &args.out)?;
    log::info!(
        "generated {} with {} filled cells",
        args.out.display(),
        volume.filled_cell_count()
    );
    Ok(volume)
}

/// Describe a volume file: size, placement, content bounds and materials.
pub fn run_inspect(path: &Path, materials: &MaterialTable) -> Result<String, JobError> {
    let volume = FileStorage.load(path)?;
    let size = volume.size();
    let origin: DVec3 = volume.world_origin();

    let mut out = String::new();
    let _ = writeln!(out, "{}", path.display());
    let _ = writeln!(out, "  size:    {}x{}x{}", size.x, size.y, size.z);
    let _ = writeln!(
        out,
        "  origin:  ({:.3}, {:.3}, {:.3})",
        origin.x, origin.y, origin.z
    );
    match volume.content_bounds() {
        Some(bounds) => {
            let _ = writeln!(out, "  content: {} .. {}", bounds.min, bounds.max);
        }
        None => {
            let _ = writeln!(out, "  content: empty");
        }
    }
    let _ = writeln!(out, "  filled:  {} cells", volume.filled_cell_count());
    for (id, cells) in volume.material_histogram() {
        let _ = writeln!(out, "    {:<12} {}", materials.name_of(id), cells);
    }
    Ok(out)
}

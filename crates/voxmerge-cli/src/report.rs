use std::path::{Path, PathBuf};

use voxmerge_core::MaterialTable;
use voxmerge_merge::{MergeOperation, MergeResult};

use crate::error::JobError;

/// Filled cell count of one material.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialCount {
    pub material: String,
    pub cells: u64,
}

/// Machine-readable description of a finished merge, for the world model
/// (or a person) to adopt the new entity.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MergeReport {
    pub name: String,
    pub operation: String,
    pub source_file: PathBuf,
    pub position: [f64; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
    pub size: [i32; 3],
    pub filled_cells: u64,
    pub materials: Vec<MaterialCount>,
    pub removed_originals: bool,
}

impl MergeReport {
    pub fn from_result(
        result: &MergeResult,
        operation: MergeOperation,
        materials: &MaterialTable,
        removed_originals: bool,
    ) -> Self {
        let histogram = result.volume.material_histogram();
        Self {
            name: result.name.clone(),
            operation: operation.to_string(),
            source_file: result.source_file.clone(),
            position: result.placement.position.to_array(),
            forward: result.placement.forward.to_array(),
            up: result.placement.up.to_array(),
            size: result.size().to_array(),
            filled_cells: histogram.values().sum(),
            materials: histogram
                .into_iter()
                .map(|(id, cells)| MaterialCount {
                    material: materials.name_of(id),
                    cells,
                })
                .collect(),
            removed_originals,
        }
    }
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &MergeReport) -> Result<(), JobError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    };
    write().map_err(|source| JobError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Human-readable summary: header lines plus a markdown material table.
pub fn format_summary(report: &MergeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Merged '{}' ({})\n",
        report.name, report.operation
    ));
    out.push_str(&format!("  file:     {}\n", report.source_file.display()));
    out.push_str(&format!(
        "  size:     {}x{}x{}\n",
        report.size[0], report.size[1], report.size[2]
    ));
    out.push_str(&format!(
        "  position: ({:.3}, {:.3}, {:.3})\n",
        report.position[0], report.position[1], report.position[2]
    ));
    out.push_str(&format!("  filled:   {} cells\n", report.filled_cells));
    if report.removed_originals {
        out.push_str("  originals removed\n");
    }

    out.push_str("\n| Material | Cells |\n");
    out.push_str("|----------|-------|\n");
    for m in &report.materials {
        out.push_str(&format!("| {} | {} |\n", m.material, m.cells));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MergeReport {
        MergeReport {
            name: "roid".into(),
            operation: "union_volume_a_to_b".into(),
            source_file: PathBuf::from("/tmp/roid.vxv"),
            position: [-3.0, 0.5, 2.0],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            size: [128, 64, 64],
            filled_cells: 30,
            materials: vec![
                MaterialCount {
                    material: "Rock".into(),
                    cells: 20,
                },
                MaterialCount {
                    material: "Iron".into(),
                    cells: 10,
                },
            ],
            removed_originals: false,
        }
    }

    #[test]
    fn test_summary_lists_materials() {
        let text = format_summary(&sample());
        assert!(text.contains("Merged 'roid' (union_volume_a_to_b)"));
        assert!(text.contains("128x64x64"));
        assert!(text.contains("| Rock | 20 |"));
        assert!(text.contains("| Iron | 10 |"));
        assert!(!text.contains("originals removed"));
    }

    #[test]
    fn test_save_report_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("merge.json");
        save_report(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: MergeReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }
}

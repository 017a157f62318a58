use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two input volumes of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    A,
    B,
}

impl Source {
    pub fn other(self) -> Source {
        match self {
            Source::A => Source::B,
            Source::B => Source::A,
        }
    }
}

/// Compositing rule applied by the cell compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeRule {
    /// Both shapes combined; the primary's material wins on overlap.
    UnionVolume,
    /// Secondary's material painted onto the primary's shape.
    UnionMaterial,
    /// Primary's shape eroded by the secondary's fill.
    SubtractVolume,
}

/// Merge requested by the caller.
///
/// `AToB` variants move A's contribution onto B; `AMinusB` removes B from A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOperation {
    UnionVolumeAToB,
    UnionVolumeBToA,
    UnionMaterialAToB,
    UnionMaterialBToA,
    SubtractVolumeAMinusB,
    SubtractVolumeBMinusA,
}

impl MergeOperation {
    pub const ALL: [MergeOperation; 6] = [
        MergeOperation::UnionVolumeAToB,
        MergeOperation::UnionVolumeBToA,
        MergeOperation::UnionMaterialAToB,
        MergeOperation::UnionMaterialBToA,
        MergeOperation::SubtractVolumeAMinusB,
        MergeOperation::SubtractVolumeBMinusA,
    ];

    pub fn rule(self) -> MergeRule {
        match self {
            MergeOperation::UnionVolumeAToB | MergeOperation::UnionVolumeBToA => {
                MergeRule::UnionVolume
            }
            MergeOperation::UnionMaterialAToB | MergeOperation::UnionMaterialBToA => {
                MergeRule::UnionMaterial
            }
            MergeOperation::SubtractVolumeAMinusB | MergeOperation::SubtractVolumeBMinusA => {
                MergeRule::SubtractVolume
            }
        }
    }

    /// The volume whose shape or material takes precedence.
    ///
    /// Union volume: the volume moved onto the other is drawn last and wins.
    /// Union material and subtract: the volume being painted or eroded.
    pub fn primary(self) -> Source {
        match self {
            MergeOperation::UnionVolumeAToB => Source::A,
            MergeOperation::UnionVolumeBToA => Source::B,
            MergeOperation::UnionMaterialAToB => Source::B,
            MergeOperation::UnionMaterialBToA => Source::A,
            MergeOperation::SubtractVolumeAMinusB => Source::A,
            MergeOperation::SubtractVolumeBMinusA => Source::B,
        }
    }

    pub fn secondary(self) -> Source {
        self.primary().other()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MergeOperation::UnionVolumeAToB => "union_volume_a_to_b",
            MergeOperation::UnionVolumeBToA => "union_volume_b_to_a",
            MergeOperation::UnionMaterialAToB => "union_material_a_to_b",
            MergeOperation::UnionMaterialBToA => "union_material_b_to_a",
            MergeOperation::SubtractVolumeAMinusB => "subtract_volume_a_minus_b",
            MergeOperation::SubtractVolumeBMinusA => "subtract_volume_b_minus_a",
        }
    }
}

impl fmt::Display for MergeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MergeOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown merge operation '{s}'"))
    }
}

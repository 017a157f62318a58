use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::MaterialId;

/// Built-in asteroid material table.
pub const DEFAULT_MATERIALS_RON: &str = include_str!("../data/materials.ron");

/// A single voxel material definition loaded from RON data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Stable material ID stored in every cell.
    pub id: u8,
    /// Name as shown in the game's material list.
    pub name: String,
    /// Whether cells painted with this material are indestructible by default.
    #[serde(default)]
    pub indestructible: bool,
}

/// Collection of material definitions indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    pub materials: Vec<MaterialDef>,
}

impl MaterialTable {
    /// Parse a materials RON list, rejecting duplicate IDs.
    pub fn from_ron(ron_str: &str) -> Result<Self, CoreError> {
        let options = ron::Options::default();
        let materials: Vec<MaterialDef> = options
            .from_str(ron_str)
            .map_err(|e| CoreError::MaterialParse(e.to_string()))?;

        let mut seen = [false; 256];
        for m in &materials {
            if seen[m.id as usize] {
                return Err(CoreError::DuplicateMaterial(m.id));
            }
            seen[m.id as usize] = true;
        }

        Ok(Self { materials })
    }

    /// The built-in table.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_ron(DEFAULT_MATERIALS_RON)
    }

    /// Look up a material by ID. Returns None if not found.
    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id.0)
    }

    /// Case-insensitive lookup by name.
    pub fn by_name(&self, name: &str) -> Option<&MaterialDef> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a name or a numeric id string to a material ID.
    pub fn resolve(&self, name_or_id: &str) -> Result<MaterialId, CoreError> {
        if let Some(def) = self.by_name(name_or_id) {
            return Ok(MaterialId(def.id));
        }
        name_or_id
            .parse::<u8>()
            .map(MaterialId)
            .map_err(|_| CoreError::UnknownMaterial(name_or_id.to_string()))
    }

    /// Display name for an ID, falling back to "#<id>" for unknown materials.
    pub fn name_of(&self, id: MaterialId) -> String {
        match self.get(id) {
            Some(def) => def.name.clone(),
            None => format!("#{}", id.0),
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

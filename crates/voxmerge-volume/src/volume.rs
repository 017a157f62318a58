use std::collections::BTreeMap;

use glam::{DVec3, IVec3};
use voxmerge_core::math::{in_extent, is_allocatable, linear_index, round_to_cell};
use voxmerge_core::types::{Cell, ContentBounds, MaterialId};

use crate::error::VolumeError;

/// Dense voxel volume: a `size` grid of cells positioned in world space.
///
/// Cells are stored x fastest. Reads outside the grid return vacuum and
/// writes outside the grid are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelVolume {
    size: IVec3,
    world_origin: DVec3,
    cells: Vec<Cell>,
}

impl VoxelVolume {
    /// Allocate an empty volume whose cells all carry `default_material`.
    pub fn new(size: IVec3, default_material: MaterialId) -> Result<Self, VolumeError> {
        if !is_allocatable(size) {
            return Err(VolumeError::InvalidDimensions(size));
        }
        let count = size.x as usize * size.y as usize * size.z as usize;
        Ok(Self {
            size,
            world_origin: DVec3::ZERO,
            cells: vec![Cell::new(default_material, 0); count],
        })
    }

    pub fn size(&self) -> IVec3 {
        self.size
    }

    /// World-space position of cell (0,0,0).
    pub fn world_origin(&self) -> DVec3 {
        self.world_origin
    }

    pub fn set_world_origin(&mut self, origin: DVec3) {
        self.world_origin = origin;
    }

    /// Builder-style [`Self::set_world_origin`].
    pub fn with_world_origin(mut self, origin: DVec3) -> Self {
        self.world_origin = origin;
        self
    }

    pub fn contains(&self, coord: IVec3) -> bool {
        in_extent(coord, self.size)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, coord: IVec3) -> Cell {
        if !self.contains(coord) {
            return Cell::EMPTY;
        }
        self.cells[linear_index(coord, self.size)]
    }

    /// Read the cell covering an integer world position, using the
    /// volume's origin rounded to the cell lattice.
    pub fn cell_at_world(&self, world: IVec3) -> Cell {
        self.cell(world - round_to_cell(self.world_origin))
    }

    /// Overwrite a whole cell. Returns false if `coord` is outside the grid.
    pub fn set_cell(&mut self, coord: IVec3, cell: Cell) -> bool {
        match self.cell_mut(coord) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Change only the fill amount of a cell.
    pub fn set_fill(&mut self, coord: IVec3, fill: u8) -> bool {
        match self.cell_mut(coord) {
            Some(slot) => {
                slot.fill = fill;
                true
            }
            None => false,
        }
    }

    /// Change only the material (and indestructible flag) of a cell.
    pub fn set_material(&mut self, coord: IVec3, material: MaterialId, indestructible: bool) -> bool {
        match self.cell_mut(coord) {
            Some(slot) => {
                *slot = Cell {
                    material,
                    ..*slot
                }
                .with_indestructible(indestructible);
                true
            }
            None => false,
        }
    }

    fn cell_mut(&mut self, coord: IVec3) -> Option<&mut Cell> {
        if !self.contains(coord) {
            return None;
        }
        let idx = linear_index(coord, self.size);
        self.cells.get_mut(idx)
    }

    /// Inclusive box of all cells with fill > 0, or None for an empty volume.
    pub fn content_bounds(&self) -> Option<ContentBounds> {
        let mut bounds: Option<ContentBounds> = None;
        let mut idx = 0;
        for z in 0..self.size.z {
            for y in 0..self.size.y {
                for x in 0..self.size.x {
                    if self.cells[idx].is_filled() {
                        let coord = IVec3::new(x, y, z);
                        match bounds.as_mut() {
                            Some(b) => b.include(coord),
                            None => bounds = Some(ContentBounds::point(coord)),
                        }
                    }
                    idx += 1;
                }
            }
        }
        bounds
    }

    /// Clear the fill of every cell. Materials are left as they were.
    pub fn remove_all_content(&mut self) {
        for cell in &mut self.cells {
            cell.fill = 0;
        }
    }

    /// Write `cell` into every grid position of the inclusive box, clipped to the grid.
    pub fn fill_box(&mut self, min: IVec3, max: IVec3, cell: Cell) {
        let lo = min.max(IVec3::ZERO);
        let hi = max.min(self.size - IVec3::ONE);
        if lo.cmpgt(hi).any() {
            return;
        }
        for coord in ContentBounds::new(lo, hi).iter() {
            let idx = linear_index(coord, self.size);
            self.cells[idx] = cell;
        }
    }

    pub fn filled_cell_count(&self) -> u64 {
        self.cells.iter().filter(|c| c.is_filled()).count() as u64
    }

    /// Count of filled cells per material.
    pub fn material_histogram(&self) -> BTreeMap<MaterialId, u64> {
        let mut histogram = BTreeMap::new();
        for cell in self.cells.iter().filter(|c| c.is_filled()) {
            *histogram.entry(cell.material).or_insert(0) += 1;
        }
        histogram
    }
}

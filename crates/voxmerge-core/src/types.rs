use glam::{DVec3, IVec3, Vec3};

use crate::constants::{FILL_EMPTY, FLAG_INDESTRUCTIBLE};

/// Newtype for material identifiers. Meaningless when the cell's fill is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct MaterialId(pub u8);

/// One voxel cell: material, fill amount (0 = vacuum, 1..=255 = density)
/// and per-cell flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cell {
    pub material: MaterialId,
    pub fill: u8,
    pub flags: u8,
}

impl Cell {
    /// Vacuum with the default material.
    pub const EMPTY: Cell = Cell {
        material: MaterialId(0),
        fill: FILL_EMPTY,
        flags: 0,
    };

    pub fn new(material: MaterialId, fill: u8) -> Self {
        Self {
            material,
            fill,
            flags: 0,
        }
    }

    /// Whether the cell holds any content.
    pub fn is_filled(self) -> bool {
        self.fill > FILL_EMPTY
    }

    pub fn is_indestructible(self) -> bool {
        self.flags & FLAG_INDESTRUCTIBLE != 0
    }

    /// Set or clear the indestructible flag, leaving other flags untouched.
    pub fn with_indestructible(mut self, indestructible: bool) -> Self {
        if indestructible {
            self.flags |= FLAG_INDESTRUCTIBLE;
        } else {
            self.flags &= !FLAG_INDESTRUCTIBLE;
        }
        self
    }
}

/// Inclusive cell-space box of the non-empty cells of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub min: IVec3,
    pub max: IVec3,
}

impl ContentBounds {
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a single cell.
    pub fn point(coord: IVec3) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Number of cells along each axis.
    pub fn extent(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    pub fn cell_count(&self) -> u64 {
        let e = self.extent();
        e.x as u64 * e.y as u64 * e.z as u64
    }

    pub fn contains(&self, coord: IVec3) -> bool {
        coord.cmpge(self.min).all() && coord.cmple(self.max).all()
    }

    /// Grow the bounds to include `coord`.
    pub fn include(&mut self, coord: IVec3) {
        self.min = self.min.min(coord);
        self.max = self.max.max(coord);
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &ContentBounds) -> ContentBounds {
        ContentBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: IVec3) -> ContentBounds {
        ContentBounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Iterate every coordinate in the box, x fastest.
    pub fn iter(&self) -> impl Iterator<Item = IVec3> {
        let (min, max) = (self.min, self.max);
        (min.z..=max.z).flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}

/// World-space placement of a volume entity handed back to the world model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: DVec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Placement {
    /// Default asteroid orientation: forward along -Z, up along +Y.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_is_not_filled() {
        assert!(!Cell::EMPTY.is_filled());
        assert!(Cell::new(MaterialId(3), 1).is_filled());
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn test_indestructible_flag_toggles() {
        let cell = Cell::new(MaterialId(1), 255).with_indestructible(true);
        assert!(cell.is_indestructible());
        assert_eq!(cell.flags, FLAG_INDESTRUCTIBLE);
        assert!(!cell.with_indestructible(false).is_indestructible());
    }

    #[test]
    fn test_bounds_extent_and_count() {
        let b = ContentBounds::new(IVec3::new(2, 3, 4), IVec3::new(5, 3, 9));
        assert_eq!(b.extent(), IVec3::new(4, 1, 6));
        assert_eq!(b.cell_count(), 24);
        assert_eq!(b.iter().count(), 24);
    }

    #[test]
    fn test_bounds_include_and_union() {
        let mut b = ContentBounds::point(IVec3::new(1, 1, 1));
        b.include(IVec3::new(-2, 4, 0));
        assert_eq!(b.min, IVec3::new(-2, 1, 0));
        assert_eq!(b.max, IVec3::new(1, 4, 1));

        let other = ContentBounds::new(IVec3::new(0, 0, 0), IVec3::new(3, 3, 3));
        let u = b.union(&other);
        assert_eq!(u.min, IVec3::new(-2, 0, 0));
        assert_eq!(u.max, IVec3::new(3, 4, 3));
        assert!(u.contains(IVec3::new(3, 4, 3)));
        assert!(!u.contains(IVec3::new(4, 0, 0)));
    }

    #[test]
    fn test_bounds_iter_order_x_fastest() {
        let b = ContentBounds::new(IVec3::ZERO, IVec3::new(1, 1, 0));
        let coords: Vec<_> = b.iter().collect();
        assert_eq!(
            coords,
            vec![
                IVec3::new(0, 0, 0),
                IVec3::new(1, 0, 0),
                IVec3::new(0, 1, 0),
                IVec3::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn test_placement_default_orientation() {
        let p = Placement::at(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.forward, Vec3::NEG_Z);
        assert_eq!(p.up, Vec3::Y);
    }
}

use glam::{DVec3, IVec3};
use voxmerge_core::math::round_to_cell;

use crate::operation::Source;

/// Shared integer frame for two volumes, anchored at A's rounded corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub rounded_min_a: IVec3,
    pub offset_a: DVec3,
    pub rounded_min_b: IVec3,
    pub offset_b: DVec3,
}

impl Alignment {
    pub fn rounded_min(&self, source: Source) -> IVec3 {
        match source {
            Source::A => self.rounded_min_a,
            Source::B => self.rounded_min_b,
        }
    }

    pub fn offset(&self, source: Source) -> DVec3 {
        match source {
            Source::A => self.offset_a,
            Source::B => self.offset_b,
        }
    }
}

/// Snap two world-space minimum corners onto a common cell lattice.
///
/// B is rounded after removing A's sub-cell offset so that both rounded
/// corners are whole cells apart in A's frame.
pub fn reconcile(min_a: DVec3, min_b: DVec3) -> Alignment {
    let rounded_min_a = round_to_cell(min_a);
    let offset_a = min_a - rounded_min_a.as_dvec3();
    let rounded_min_b = round_to_cell(min_b - offset_a);
    let offset_b = min_b - rounded_min_b.as_dvec3();

    Alignment {
        rounded_min_a,
        offset_a,
        rounded_min_b,
        offset_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_origins_zero_offsets() {
        let a = reconcile(DVec3::new(10.0, -4.0, 3.0), DVec3::new(10.0, -4.0, 3.0));
        assert_eq!(a.offset_a, DVec3::ZERO);
        assert_eq!(a.offset_b, DVec3::ZERO);
        assert_eq!(a.rounded_min_a, IVec3::new(10, -4, 3));
        assert_eq!(a.rounded_min_b, IVec3::new(10, -4, 3));
    }

    #[test]
    fn test_b_rounded_relative_to_a_offset() {
        // A sits 0.4 past the lattice; B at 5.8 is 5.4 cells from A,
        // which lands on cell 5 of A's frame, not on 6.
        let a = reconcile(DVec3::new(0.4, 0.0, 0.0), DVec3::new(5.8, 0.0, 0.0));
        assert_eq!(a.rounded_min_a.x, 0);
        assert!((a.offset_a.x - 0.4).abs() < 1e-12);
        assert_eq!(a.rounded_min_b.x, 5);
        assert!((a.offset_b.x - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_negative_coordinates() {
        let a = reconcile(DVec3::new(-0.6, -10.5, 0.0), DVec3::new(-3.2, 0.0, 0.0));
        assert_eq!(a.rounded_min_a, IVec3::new(-1, -11, 0));
        assert!((a.offset_a.x - 0.4).abs() < 1e-12);
        assert!((a.offset_a.y - 0.5).abs() < 1e-12);
        // -3.2 - 0.4 = -3.6
        assert_eq!(a.rounded_min_b.x, -4);
    }

    #[test]
    fn test_source_accessors() {
        let a = reconcile(DVec3::ZERO, DVec3::new(7.0, 8.0, 9.0));
        assert_eq!(a.rounded_min(Source::A), IVec3::ZERO);
        assert_eq!(a.rounded_min(Source::B), IVec3::new(7, 8, 9));
        assert_eq!(a.offset(Source::B), DVec3::ZERO);
    }

    proptest! {
        #[test]
        fn prop_reconcile_same_origin_is_idempotent(
            x in -1.0e5f64..1.0e5,
            y in -1.0e5f64..1.0e5,
            z in -1.0e5f64..1.0e5,
        ) {
            let min = DVec3::new(x, y, z);
            let a = reconcile(min, min);
            prop_assert_eq!(a.offset_a, a.offset_b);
            prop_assert_eq!(a.rounded_min_a, a.rounded_min_b);
        }

        #[test]
        fn prop_offsets_are_sub_cell(
            ax in -1.0e4f64..1.0e4,
            bx in -1.0e4f64..1.0e4,
        ) {
            let a = reconcile(DVec3::new(ax, 0.0, 0.0), DVec3::new(bx, 0.0, 0.0));
            prop_assert!(a.offset_a.x.abs() <= 0.5 + 1e-9);
            prop_assert!(a.offset_b.x.abs() <= 1.0 + 1e-9);
        }
    }
}

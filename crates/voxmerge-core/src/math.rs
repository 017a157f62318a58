use crate::constants::{CHUNK_SIZE, MAX_VOLUME_CELLS, MAX_VOLUME_EXTENT, MAX_WORLD_COORD};
use crate::error::CoreError;
use glam::{DVec3, IVec3};

/// Round a world-space position to the nearest cell corner, halves away from zero.
pub fn round_to_cell(v: DVec3) -> IVec3 {
    v.round().as_ivec3()
}

/// Round a positive value up to the next multiple of `multiple`.
pub fn round_up_to_multiple(value: i32, multiple: i32) -> i32 {
    debug_assert!(multiple > 0);
    if value <= 0 {
        return multiple;
    }
    (value + multiple - 1) / multiple * multiple
}

/// Per-axis [`round_up_to_multiple`].
pub fn round_up_ivec(v: IVec3, multiple: i32) -> IVec3 {
    IVec3::new(
        round_up_to_multiple(v.x, multiple),
        round_up_to_multiple(v.y, multiple),
        round_up_to_multiple(v.z, multiple),
    )
}

/// Whether `coord` lies inside `[0, size-1]` on every axis.
pub fn in_extent(coord: IVec3, size: IVec3) -> bool {
    coord.cmpge(IVec3::ZERO).all() && coord.cmplt(size).all()
}

/// Whether a volume of `size` may be allocated: every axis in
/// `1..=MAX_VOLUME_EXTENT` and at most `MAX_VOLUME_CELLS` cells in total.
pub fn is_allocatable(size: IVec3) -> bool {
    if size.cmplt(IVec3::ONE).any() || size.cmpgt(IVec3::splat(MAX_VOLUME_EXTENT)).any() {
        return false;
    }
    let cells = size.x as u64 * size.y as u64 * size.z as u64;
    cells <= MAX_VOLUME_CELLS
}

/// Whether a world-space origin is finite and close enough to zero for
/// integer cell arithmetic.
pub fn is_placeable(origin: DVec3) -> bool {
    origin.is_finite() && origin.abs().max_element() <= MAX_WORLD_COORD
}

/// Linear storage index of `coord` in an x-fastest dense grid of `size`.
/// Caller guarantees `in_extent(coord, size)`.
pub fn linear_index(coord: IVec3, size: IVec3) -> usize {
    coord.x as usize + coord.y as usize * size.x as usize
        + coord.z as usize * size.x as usize * size.y as usize
}

/// Number of persisted chunks along each axis needed to cover `size`.
pub fn chunk_grid(size: IVec3) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        (size.x + cs - 1) / cs,
        (size.y + cs - 1) / cs,
        (size.z + cs - 1) / cs,
    )
}

/// Convert a cell coordinate to its containing chunk coordinate.
pub fn cell_to_chunk(cell: IVec3) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(cell.x.div_euclid(cs), cell.y.div_euclid(cs), cell.z.div_euclid(cs))
}

/// Convert a cell coordinate to its local position within its chunk (0..CHUNK_SIZE).
pub fn cell_to_local(cell: IVec3) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        cell.x.rem_euclid(cs),
        cell.y.rem_euclid(cs),
        cell.z.rem_euclid(cs),
    )
}

/// Index of a chunk-local coordinate within a chunk's cell array.
pub fn local_index(local: IVec3) -> usize {
    let cs = CHUNK_SIZE as usize;
    local.x as usize + local.y as usize * cs + local.z as usize * cs * cs
}

/// Parse "x,y,z" into an integer vector.
pub fn parse_ivec3(text: &str) -> Result<IVec3, CoreError> {
    let parts = split_components(text)?;
    let mut out = [0i32; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| CoreError::InvalidVector(text.to_string()))?;
    }
    Ok(IVec3::from_array(out))
}

/// Parse "x,y,z" into a world-space vector.
pub fn parse_dvec3(text: &str) -> Result<DVec3, CoreError> {
    let parts = split_components(text)?;
    let mut out = [0f64; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| CoreError::InvalidVector(text.to_string()))?;
    }
    Ok(DVec3::from_array(out))
}

fn split_components(text: &str) -> Result<Vec<&str>, CoreError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CoreError::InvalidVector(text.to_string()));
    }
    Ok(parts)
}

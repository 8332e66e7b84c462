//! Neighbor offset tables and bounds-checked neighbor enumeration

/// Edge-sharing neighbors in visit order: up, down, left, right
pub const ORTHOGONAL_OFFSETS: [[isize; 2]; 4] = [[-1, 0], [1, 0], [0, -1], [0, 1]];

/// All eight surrounding neighbors, row by row from the upper left
pub const SURROUNDING_OFFSETS: [[isize; 2]; 8] = [
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// Apply an offset to a position, returning `None` when it leaves a `rows` x `cols` grid
pub const fn offset_position(
    row: usize,
    col: usize,
    offset: [isize; 2],
    dimensions: (usize, usize),
) -> Option<(usize, usize)> {
    let Some(r) = row.checked_add_signed(offset[0]) else {
        return None;
    };
    let Some(c) = col.checked_add_signed(offset[1]) else {
        return None;
    };

    if r < dimensions.0 && c < dimensions.1 {
        Some((r, c))
    } else {
        None
    }
}

/// In-bounds neighbors of a position for the given offset table, in table order
pub fn neighbors(
    row: usize,
    col: usize,
    offsets: &[[isize; 2]],
    dimensions: (usize, usize),
) -> impl Iterator<Item = (usize, usize)> + '_ {
    offsets
        .iter()
        .filter_map(move |&offset| offset_position(row, col, offset, dimensions))
}

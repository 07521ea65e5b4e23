/// Single coordinate axis used for board rows, columns and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Grid index of a board position.
pub const fn ix(coords: Coord2) -> [usize; 2] {
    [coords.0 as usize, coords.1 as usize]
}

/// Row and column offsets of the surrounding cells, in reading order.
const AROUND: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cells touching `center` on a board of `size`, row-major. Positions past an edge are skipped.
pub fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> + Clone {
    let (row, col) = center;
    let (rows, cols) = size;
    AROUND.into_iter().filter_map(move |(d_row, d_col)| {
        let next_row = row.checked_add_signed(d_row).filter(|&r| r < rows)?;
        let next_col = col.checked_add_signed(d_col).filter(|&c| c < cols)?;
        Some((next_row, next_col))
    })
}

//! Text rendering of occupancy grids for quick inspection in a terminal.

use city_sim::OccupancyGrid;

/// One character per cell, one line per row (row `y = 0` first), lines
/// joined with `\n` and no trailing newline.
///
/// `0` renders as `.`, `1..=3` as the digit, anything larger as `*`.
pub fn grid_to_ascii(grid: &OccupancyGrid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|&count| cell_char(count)));
    }
    out
}

fn cell_char(count: u32) -> char {
    match count {
        0        => '.',
        1..=3    => char::from_digit(count, 10).unwrap_or('*'),
        _        => '*',
    }
}

//! Grid coordinates and bounds.
//!
//! The city is a `width × height` lattice of cells.  Coordinates are
//! unsigned; movement arithmetic happens in `i64` and is clamped back into
//! range through [`GridBounds::clamp`].

/// A cell on the city grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `|a.x - b.x| + |a.y - b.y|`.
    #[inline]
    pub fn manhattan(self, other: GridPoint) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Signed offset `(other.x - self.x, other.y - self.y)`.
    #[inline]
    pub fn delta_to(self, other: GridPoint) -> (i64, i64) {
        (
            other.x as i64 - self.x as i64,
            other.y as i64 - self.y as i64,
        )
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of the grid.  Both sides are at least 1 once constructed by
/// the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub width:  u32,
    pub height: u32,
}

impl GridBounds {
    /// Returns `None` if either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[inline]
    pub fn contains(self, p: GridPoint) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Clamp a signed coordinate pair into `[0, width-1] × [0, height-1]`,
    /// each axis independently.
    #[inline]
    pub fn clamp(self, x: i64, y: i64) -> GridPoint {
        GridPoint {
            x: x.clamp(0, self.width as i64 - 1) as u32,
            y: y.clamp(0, self.height as i64 - 1) as u32,
        }
    }

    /// Number of cells.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

//! Categories of places on the city grid.

use std::str::FromStr;

use crate::CoreError;

/// What a place is used for.  Random population samples uniformly from
/// [`PlaceKind::ALL`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaceKind {
    Home,
    Work,
    Shop,
    Park,
    Station,
}

impl PlaceKind {
    /// Every kind, in sampling order.
    pub const ALL: [PlaceKind; 5] = [
        PlaceKind::Home,
        PlaceKind::Work,
        PlaceKind::Shop,
        PlaceKind::Park,
        PlaceKind::Station,
    ];

    /// Lowercase label, used for CSV column values and parsing.
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceKind::Home    => "home",
            PlaceKind::Work    => "work",
            PlaceKind::Shop    => "shop",
            PlaceKind::Park    => "park",
            PlaceKind::Station => "station",
        }
    }
}

impl std::fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlaceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::Parse(format!("unknown place kind {s:?}")))
    }
}

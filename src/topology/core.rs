//! Slot topology - the addressable slot space derived from the interior
//! spot count.
//!
//! The floor plan is a near-square grid: `columns = ceil(sqrt(N))` and
//! `rows = ceil(N / columns)`. Interior slots are numbered `0..N` in
//! row-major order. The border runs around the grid with one slot per
//! column on the top and bottom sides and one slot per row on the left
//! and right sides. Growth is append-only: adding spots never renumbers
//! an existing interior slot, it can only extend the valid ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One edge of the floor plan border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(format!("unknown border side `{other}`")),
        }
    }
}

/// Address of one border cell: side plus zero-based index along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderRef {
    pub side: Side,
    pub index: usize,
}

impl BorderRef {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Wire encoding is `"{side}-{index}"`, e.g. `"top-0"`.
impl fmt::Display for BorderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.index)
    }
}

impl FromStr for BorderRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (side, index) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("border position `{s}` is not `side-index`"))?;
        let side = side.parse::<Side>()?;
        let index = index
            .parse::<usize>()
            .map_err(|_| format!("border index in `{s}` is not an integer"))?;
        Ok(Self { side, index })
    }
}

/// An addressable position in the layout, interior cell or border cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Interior(usize),
    Border(BorderRef),
}

impl Slot {
    pub fn border(side: Side, index: usize) -> Self {
        Slot::Border(BorderRef::new(side, index))
    }

    pub fn is_interior(&self) -> bool {
        matches!(self, Slot::Interior(_))
    }

    pub fn is_border(&self) -> bool {
        matches!(self, Slot::Border(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Interior(position) => write!(f, "grid spot {position}"),
            Slot::Border(border) => write!(f, "border spot {border}"),
        }
    }
}

/// The valid slot space for a given interior spot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    spots: usize,
}

impl Topology {
    pub fn new(spots: usize) -> Self {
        Self { spots }
    }

    /// Number of interior spots.
    pub fn spots(&self) -> usize {
        self.spots
    }

    pub fn columns(&self) -> usize {
        (self.spots as f64).sqrt().ceil() as usize
    }

    pub fn rows(&self) -> usize {
        let columns = self.columns();
        if columns == 0 {
            0
        } else {
            self.spots.div_ceil(columns)
        }
    }

    /// Number of border cells along one side.
    pub fn side_len(&self, side: Side) -> usize {
        match side {
            Side::Top | Side::Bottom => self.columns(),
            Side::Left | Side::Right => self.rows(),
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        match slot {
            Slot::Interior(position) => position < self.spots,
            Slot::Border(border) => border.index < self.side_len(border.side),
        }
    }

    pub fn interior_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.spots).map(Slot::Interior)
    }

    /// Border cells in side order: top, bottom, left, right.
    pub fn border_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        Side::ALL
            .into_iter()
            .flat_map(|side| (0..self.side_len(side)).map(move |index| Slot::border(side, index)))
    }

    /// Append `extra` interior spots. Existing interior positions keep
    /// their indices; border side lengths are re-derived and may change.
    pub fn grow(&self, extra: usize) -> Topology {
        Topology::new(self.spots + extra)
    }
}

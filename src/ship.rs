//! Cells, ships and the fleet template.

use alloc::vec::Vec;
use core::fmt;

use crate::config::BOARD_SIZE;

/// A `(row, column)` position. Values outside the board are representable so
/// that callers can hand over raw input and let the engine reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    #[cfg_attr(feature = "std", serde(deserialize_with = "coord::deserialize"))]
    pub row: i32,
    #[cfg_attr(feature = "std", serde(deserialize_with = "coord::deserialize"))]
    pub column: i32,
}

impl Cell {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Board position as `(row, col)` indices, or `None` when off the board.
    pub fn index(&self) -> Option<(usize, usize)> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&self.row) && (0..size).contains(&self.column) {
            Some((self.row as usize, self.column as usize))
        } else {
            None
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.index().is_some()
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, column): (usize, usize)) -> Self {
        Cell::new(row as i32, column as i32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A ship as the list of cells it covers. Only the length is checked against
/// the template; the cells need not form a straight line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct Ship {
    cells: Vec<Cell>,
}

impl Ship {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Lay out a straight ship of `length` cells starting at `origin`.
    pub fn straight(origin: Cell, orientation: Orientation, length: usize) -> Self {
        let cells = (0..length as i32)
            .map(|i| match orientation {
                Orientation::Horizontal => Cell::new(origin.row, origin.column + i),
                Orientation::Vertical => Cell::new(origin.row + i, origin.column),
            })
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl From<Vec<Cell>> for Ship {
    fn from(cells: Vec<Cell>) -> Self {
        Ship::new(cells)
    }
}

/// Orientation of a straight ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Template entry: ship class name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipDef {
    name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Coordinates arrive either as JSON numbers or as numeric strings.
#[cfg(feature = "std")]
mod coord {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Raw::deserialize(deserializer)? {
            Raw::Int(v) => v,
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| de::Error::custom(format!("coordinate {:?} is not an integer", s)))?,
        };
        // out-of-range values still reach the engine and fail its bounds check
        Ok(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }
}

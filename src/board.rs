//! Per-side board state: a validated fleet and a guess log.

use alloc::vec::Vec;
use log::trace;
use rand::Rng;

use crate::common::MatchError;
use crate::config::{fleet_lengths, Grid, BOARD_SIZE, FLEET, FLEET_SIZE};
use crate::ship::{Cell, Orientation, Ship};

/// A ship together with its occupancy mask.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PlacedShip {
    ship: Ship,
    mask: Grid,
}

/// One side's ships and the occupancy board derived from them. Immutable once
/// built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<PlacedShip>,
    occupancy: Grid,
}

impl Fleet {
    /// Validate `ships` against the template and the board. Nothing is kept
    /// if any check fails.
    pub fn build(ships: Vec<Ship>) -> Result<Self, MatchError> {
        if ships.len() < FLEET_SIZE {
            return Err(MatchError::InvalidFleetShape);
        }
        let mut lengths: Vec<usize> = ships.iter().map(Ship::len).collect();
        lengths.sort_unstable();
        if lengths[..] != fleet_lengths()[..] {
            return Err(MatchError::InvalidFleetShape);
        }
        if ships.iter().flat_map(|s| s.cells()).any(|c| !c.in_bounds()) {
            return Err(MatchError::OutOfBounds);
        }

        let mut occupancy = Grid::new();
        let mut placed = Vec::with_capacity(ships.len());
        for ship in ships {
            let mut mask = Grid::new();
            for cell in ship.cells() {
                let (r, c) = cell.index().ok_or(MatchError::OutOfBounds)?;
                // a repeated cell inside one ship is caught here too
                if occupancy.get(r, c)? {
                    return Err(MatchError::PlacementConflict);
                }
                occupancy.set(r, c)?;
                mask.set(r, c)?;
            }
            placed.push(PlacedShip { ship, mask });
        }
        trace!("fleet accepted:\n{:?}", occupancy);
        Ok(Fleet {
            ships: placed,
            occupancy,
        })
    }

    /// Number of ships in the fleet.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.iter().map(|p| &p.ship)
    }

    pub fn ship(&self, index: usize) -> Option<&Ship> {
        self.ships.get(index).map(|p| &p.ship)
    }

    /// Cells covered by any ship.
    pub fn occupancy(&self) -> Grid {
        self.occupancy
    }

    /// Index of the ship covering (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships
            .iter()
            .position(|p| p.mask.get(row, col).unwrap_or(false))
    }

    /// `true` once every cell of ship `index` is set in `hits`.
    pub fn is_sunk_by(&self, index: usize, hits: &Grid) -> bool {
        self.ships
            .get(index)
            .map_or(false, |p| hits.contains_all(&p.mask))
    }
}

/// The cells one side has fired at and whether each was a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuessLog {
    hits: Grid,
    misses: Grid,
}

impl GuessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome recorded for `cell`, or `None` if it was never attacked.
    pub fn get(&self, cell: Cell) -> Option<bool> {
        let (r, c) = cell.index()?;
        if self.hits.get(r, c).unwrap_or(false) {
            Some(true)
        } else if self.misses.get(r, c).unwrap_or(false) {
            Some(false)
        } else {
            None
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Record a guess at (row, col).
    pub fn record(&mut self, row: usize, col: usize, hit: bool) -> Result<(), MatchError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(MatchError::DuplicateTarget);
        }
        if hit {
            self.hits.set(row, col)?;
        } else {
            self.misses.set(row, col)?;
        }
        Ok(())
    }

    pub fn hits(&self) -> Grid {
        self.hits
    }

    /// Every attacked cell.
    pub fn guessed(&self) -> Grid {
        self.hits | self.misses
    }

    pub fn len(&self) -> usize {
        self.guessed().count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.guessed().is_empty()
    }

    /// Guesses in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        let size = BOARD_SIZE as usize;
        let guessed = self.guessed();
        (0..size * size)
            .map(move |i| (i / size, i % size))
            .filter(move |&(r, c)| guessed.get(r, c).unwrap_or(false))
            .map(move |(r, c)| (Cell::from((r, c)), self.hits.get(r, c).unwrap_or(false)))
    }
}

/// Place every template ship on a straight line at random, without overlap.
/// Returns `None` if some ship found no free spot after a bounded number of
/// tries.
pub fn random_fleet<R: Rng>(rng: &mut R) -> Option<Vec<Ship>> {
    let size = BOARD_SIZE as usize;
    let mut taken = Grid::new();
    let mut ships = Vec::with_capacity(FLEET_SIZE);
    for def in FLEET.iter() {
        let mut attempts = 0;
        let ship = loop {
            attempts += 1;
            if attempts > 100 {
                return None;
            }
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (size - 1, size - def.length()),
                Orientation::Vertical => (size - def.length(), size - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let ship = Ship::straight(Cell::from((r, c)), orient, def.length());
            let free = ship
                .cells()
                .iter()
                .filter_map(Cell::index)
                .all(|(r, c)| !taken.get(r, c).unwrap_or(true));
            if free {
                break ship;
            }
        };
        for (r, c) in ship.cells().iter().filter_map(Cell::index) {
            taken.set(r, c).ok()?;
        }
        ships.push(ship);
    }
    Some(ships)
}

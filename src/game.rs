use alloc::vec::Vec;
use log::debug;

use crate::{
    board::{Fleet, GuessLog},
    common::{MatchError, Phase, Side},
    config::GridRows,
    domain::{AttackOutcome, Guess, PlayerView},
    ship::{Cell, Ship},
};

/// Everything the match tracks for one side.
#[derive(Clone, Debug, Default)]
struct SideState {
    fleet: Option<Fleet>,
    guesses: GuessLog,
    /// Indices into the opponent's fleet, in the order they were sunk.
    sunk: Vec<usize>,
}

/// Authoritative state of one game: both fleets, both guess logs and the
/// phase. Every operation either commits fully or leaves the match untouched.
#[derive(Clone, Debug, Default)]
pub struct Match {
    sides: [SideState; 2],
    phase: Phase,
}

impl Match {
    /// Create a match waiting for both fleets.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether `side` has already placed its fleet.
    pub fn has_fleet(&self, side: Side) -> bool {
        self.side(side).fleet.is_some()
    }

    /// The winner once the match is over.
    pub fn winner(&self) -> Option<Side> {
        if self.phase != Phase::GameOver {
            return None;
        }
        [Side::Player1, Side::Player2]
            .into_iter()
            .find(|&side| self.all_sunk_by(side))
    }

    fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    fn all_sunk_by(&self, side: Side) -> bool {
        match &self.side(side.opponent()).fleet {
            Some(fleet) => self.side(side).sunk.len() == fleet.len(),
            None => false,
        }
    }

    /// Record `side`'s fleet. Once both fleets are in, Player1 moves first.
    pub fn place_fleet(&mut self, side: Side, ships: Vec<Ship>) -> Result<(), MatchError> {
        if self.phase != Phase::Prestart || self.has_fleet(side) {
            return Err(MatchError::OutOfPhase);
        }
        let fleet = Fleet::build(ships)?;
        self.side_mut(side).fleet = Some(fleet);
        debug!("{:?} placed its fleet", side);

        if self.has_fleet(Side::Player1) && self.has_fleet(Side::Player2) {
            self.phase = Phase::Player1Turn;
            debug!("both fleets placed, phase -> {:?}", self.phase);
        }
        Ok(())
    }

    /// Fire at `target` on the opponent's board.
    ///
    /// The range check runs before the phase check, so an off-board target is
    /// `OutOfBounds` in every phase. An accepted attack always passes the turn.
    pub fn attack(&mut self, side: Side, target: Cell) -> Result<AttackOutcome, MatchError> {
        let (row, col) = target.index().ok_or(MatchError::OutOfBounds)?;
        if self.phase != side.turn() {
            return Err(MatchError::OutOfPhase);
        }
        if self.side(side).guesses.contains(target) {
            return Err(MatchError::DuplicateTarget);
        }

        // the turn phase implies both fleets are present
        let opponent = side.opponent();
        let hit_index = self
            .side(opponent)
            .fleet
            .as_ref()
            .and_then(|fleet| fleet.ship_at(row, col));

        self.side_mut(side).guesses.record(row, col, hit_index.is_some())?;
        self.phase = opponent.turn();

        let index = match hit_index {
            Some(index) => index,
            None => return Ok(AttackOutcome::miss()),
        };

        let hits = self.side(side).guesses.hits();
        let (sunk, fleet_len, ship) = match &self.side(opponent).fleet {
            Some(fleet) => (
                fleet.is_sunk_by(index, &hits),
                fleet.len(),
                fleet.ship(index).cloned(),
            ),
            None => (false, 0, None),
        };
        if !sunk {
            return Ok(AttackOutcome::hit(None));
        }

        let attacker = self.side_mut(side);
        attacker.sunk.push(index);
        let sunk_count = attacker.sunk.len();
        debug!("{:?} sank ship {} at {}", side, index, target);
        if sunk_count == fleet_len {
            self.phase = Phase::GameOver;
            debug!("{:?} sank the whole fleet, phase -> {:?}", side, self.phase);
        }
        Ok(AttackOutcome::hit(ship))
    }

    /// Projection of the match as seen by `side`. Never mutates.
    pub fn view(&self, side: Side) -> PlayerView {
        let own = self.side(side);
        let other = self.side(side.opponent());

        let ships: Vec<Ship> = own
            .fleet
            .as_ref()
            .map(|f| f.ships().cloned().collect())
            .unwrap_or_default();
        let board: Option<GridRows> = own.fleet.as_ref().map(|f| f.occupancy().to_rows());

        PlayerView {
            side,
            phase: self.phase,
            ships,
            board,
            guesses: to_guesses(&own.guesses),
            incoming: to_guesses(&other.guesses),
            ships_lost: sunk_ships(&other.sunk, own.fleet.as_ref()),
            ships_sunk: sunk_ships(&own.sunk, other.fleet.as_ref()),
        }
    }

    /// The guess log of `side`.
    pub fn guesses(&self, side: Side) -> &GuessLog {
        &self.side(side).guesses
    }
}

fn to_guesses(log: &GuessLog) -> Vec<Guess> {
    log.iter().map(|(cell, hit)| Guess { cell, hit }).collect()
}

fn sunk_ships(indices: &[usize], fleet: Option<&Fleet>) -> Vec<Ship> {
    match fleet {
        Some(fleet) => indices
            .iter()
            .filter_map(|&i| fleet.ship(i).cloned())
            .collect(),
        None => Vec::new(),
    }
}

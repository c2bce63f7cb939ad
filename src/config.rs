use alloc::vec::Vec;

use crate::bitboard::BitBoard;
use crate::ship::ShipDef;

pub const BOARD_SIZE: u8 = 10;
pub const FLEET_SIZE: usize = 5;
pub const FLEET: [ShipDef; FLEET_SIZE] = [
    ShipDef::new("carrier", 5),
    ShipDef::new("battleship", 4),
    ShipDef::new("cruiser", 3),
    ShipDef::new("submarine", 3),
    ShipDef::new("destroyer", 2),
];

/// Total number of cells covered by a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "SALVO_LOG";

/// One side's 10×10 board of cells.
pub type Grid = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Dense row-major rendering of a [`Grid`].
pub type GridRows = [[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Ship lengths of the template in ascending order.
pub fn fleet_lengths() -> [usize; FLEET_SIZE] {
    let mut lens = [0usize; FLEET_SIZE];
    for (len, def) in lens.iter_mut().zip(FLEET.iter()) {
        *len = def.length();
    }
    lens.sort_unstable();
    lens
}

/// The named ships a client must supply, largest first.
pub fn fleet_template() -> Vec<ShipDef> {
    FLEET.to_vec()
}

/// A board with no ship on it.
pub fn empty_board() -> GridRows {
    Grid::new().to_rows()
}

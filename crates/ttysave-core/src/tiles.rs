//! Tile-plane pack/unpack transform (spec §4.5).
//!
//! The map is stored on disk as five parallel byte planes indexed by tile
//! position rather than as an array of tile structs: `L1` (owner, for
//! classes that have one), `L2` (building type), `L4` (class in the high
//! nibble, height in the low nibble), `L5` (type, for classes that have
//! one). `L3` (2 bytes/tile) and the separate desert plane are both opaque;
//! this model has no desert or L3 field to round-trip, so both are always
//! zero on save and discarded on load.

use crate::error::Error;
use crate::layout::NUMBER_OF_TILES;
use crate::model::{Tile, TILE_CLASS_BUILDING, TILE_CLASS_NORMAL, TILE_CLASS_ROAD, TILE_CLASS_WATER};

/// Owner byte a water tile carries in `L1` regardless of its actual owner.
const WATER_OWNER_SENTINEL: u8 = 0x11;

#[derive(Debug)]
pub struct TilePlanes {
    pub l1: Vec<u8>,
    pub l2: Vec<u8>,
    pub l4: Vec<u8>,
    pub l5: Vec<u8>,
}

pub fn build_planes(tiles: &[Tile]) -> Result<TilePlanes, Error> {
    let mut l1 = vec![0u8; NUMBER_OF_TILES];
    let mut l2 = vec![0u8; NUMBER_OF_TILES];
    let mut l4 = vec![0u8; NUMBER_OF_TILES];
    let mut l5 = vec![0u8; NUMBER_OF_TILES];

    for (i, t) in tiles.iter().enumerate() {
        l4[i] = (t.class << 4) | (t.height & 0x0f);
        match t.class {
            TILE_CLASS_NORMAL | TILE_CLASS_ROAD => {
                l1[i] = t.owner;
                l5[i] = t.tile_type & 0x0f;
            }
            TILE_CLASS_BUILDING => {
                l2[i] = t.tile_type;
            }
            TILE_CLASS_WATER => {
                l1[i] = WATER_OWNER_SENTINEL;
                l5[i] = t.tile_type;
            }
            other => return Err(Error::UnsupportedTileClass(other)),
        }
    }

    Ok(TilePlanes { l1, l2, l4, l5 })
}

pub fn unpack_tiles(l1: &[u8], l2: &[u8], l4: &[u8], l5: &[u8]) -> Result<Vec<Tile>, Error> {
    let mut out = Vec::with_capacity(NUMBER_OF_TILES);
    for i in 0..NUMBER_OF_TILES {
        let class = l4[i] >> 4;
        let height = l4[i] & 0x0f;
        let (owner, tile_type) = match class {
            TILE_CLASS_NORMAL | TILE_CLASS_ROAD => (l1[i], l5[i] & 0x0f),
            TILE_CLASS_BUILDING => (0, l2[i]),
            TILE_CLASS_WATER => (l1[i], l5[i]),
            other => return Err(Error::UnsupportedTileClass(other)),
        };
        out.push(Tile { class, height, owner, tile_type });
    }
    Ok(out)
}

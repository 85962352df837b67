//! Fixed on-disk layout constants (spec §6).
//!
//! Named after the same sub-constants `original_source/ttd/common.go` uses,
//! so [`UNCOMPRESSED_PAYLOAD_LEN`] can be checked against the field walk in
//! `save.rs`/`load.rs` term by term instead of trusting one magic number.

pub const MAX_TITLE_LENGTH: usize = 47;
pub const NUMBER_OF_TILES: usize = 0x10000;
pub const FILE_CHECKSUM_ADD: u32 = 201_100;

pub const FIRST_CUSTOM_TEXT_ID: u16 = 0x7c00;
pub const CUSTOM_STRING_SLOTS: usize = 0x1f4;
pub const CUSTOM_STRING_SLOT_LEN: usize = 0x20;
pub const MAX_NAME_LEN: usize = CUSTOM_STRING_SLOT_LEN;

pub const MAX_TEXT_EFFECTS: usize = 0x1e;
pub const MAX_TOWNS: usize = 0x46;
pub const MAX_SCHEDULES: usize = 0x1388;
pub const MAX_ANIMATIONS: usize = 0x100;
pub const MAX_DEPOTS: usize = 0xff;
pub const MAX_COMPANIES: usize = 8;

pub const TOWN_PLACEHOLDER: usize = 0x5e - 6;

pub const TEXT_EFFECT_RECORD_LEN: usize = 20;
pub const TOWN_SLOT_LEN: usize = 0x5e;
pub const DEPOT_RECORD_LEN: usize = 6;
pub const COMPANY_SLOT_LEN: usize = 0x3b2;
pub const COMPANY_SLOT_OPAQUE_LEN: usize = COMPANY_SLOT_LEN - 16;

pub const VEHICLE_BOUNDING_BLOCK_LEN: usize = 0x1000 * 2;
pub const DESERT_PLANE_LEN: usize = 0x4000;

// The opaque placeholder spans between the record groups spec.md §6 names
// P1..P6, sized from the original's byte-offset arithmetic, not guessed.
pub const PLACEHOLDER_1: usize = 49 * 6 + 0xc * 8;
pub const PLACEHOLDER_2: usize = 0x8e * 0xfa + 0x36 * 0x5a;
pub const PLACEHOLDER_3: usize = 0x80 * 0x352;
pub const PLACEHOLDER_4: usize = 0xe * 0x28 + 0x1c * 0x100;
pub const PLACEHOLDER_5: usize = 6 * 2 * 0xc + 2 * 0x100 + 0x90;
pub const PLACEHOLDER_6: usize = 0x20 + 3 * 0xc;

pub const UNCOMPRESSED_PAYLOAD_LEN: usize = 4
    + TEXT_EFFECT_RECORD_LEN * MAX_TEXT_EFFECTS
    + 8
    + TOWN_SLOT_LEN * MAX_TOWNS
    + 2 * MAX_SCHEDULES
    + 2 * MAX_ANIMATIONS
    + 4
    + DEPOT_RECORD_LEN * MAX_DEPOTS
    + 14
    + PLACEHOLDER_1
    + NUMBER_OF_TILES // L1
    + NUMBER_OF_TILES // L2
    + 2 * NUMBER_OF_TILES // L3, 2 bytes per tile
    + DESERT_PLANE_LEN
    + PLACEHOLDER_2
    + COMPANY_SLOT_LEN * MAX_COMPANIES
    + PLACEHOLDER_3
    + CUSTOM_STRING_SLOT_LEN * CUSTOM_STRING_SLOTS
    + VEHICLE_BOUNDING_BLOCK_LEN
    + PLACEHOLDER_4
    + 2
    + 32
    + 20
    + PLACEHOLDER_5
    + 8
    + 8
    + 6
    + 17 * 2
    + 5
    + PLACEHOLDER_6
    + NUMBER_OF_TILES // L4
    + NUMBER_OF_TILES; // L5

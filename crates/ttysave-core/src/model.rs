//! The savegame aggregate and its invariants (spec §3).

use crate::error::Error;
use crate::layout::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEffect {
    pub id: u16,
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
    pub expiration: u16,
    pub data: u32,
    pub unused: u32,
}

pub const EMPTY_TEXT_EFFECT_ID: u16 = 0xFFFF;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Town {
    pub x: u8,
    pub y: u8,
    pub population: u16,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Depot {
    pub xy: u16,
    pub town: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Company {
    pub name: String,
    pub name_parts: u32,
    pub face: u32,
    pub manager_name: String,
    pub manager_name_parts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub class: u8,
    pub height: u8,
    pub owner: u8,
    pub tile_type: u8,
}

pub const TILE_CLASS_NORMAL: u8 = 0;
pub const TILE_CLASS_ROAD: u8 = 2;
pub const TILE_CLASS_BUILDING: u8 = 3;
pub const TILE_CLASS_WATER: u8 = 6;

impl Tile {
    pub fn is_supported_class(class: u8) -> bool {
        matches!(
            class,
            TILE_CLASS_NORMAL | TILE_CLASS_ROAD | TILE_CLASS_BUILDING | TILE_CLASS_WATER
        )
    }
}

/// A fully-decoded savegame, or the in-memory state `Savegame::save` serializes.
///
/// Field names follow `original_source/ttd/types.go` translated to
/// snake_case, with a handful of names corrected (`small_airports`, not the
/// original's misspelling; `terrain_type`; `train_reversing_end_of_line_only`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Savegame {
    pub title: String,
    pub days: u16,
    pub fractional_days: u16,
    pub text_effects: Vec<TextEffect>,
    pub seed: u64,
    pub towns: Vec<Town>,
    pub schedules: Vec<u16>,
    pub animations: Vec<u16>,
    pub depots: Vec<Depot>,
    pub next_processed_town: u32,
    pub animation_ticker: u16,
    pub landscape_code: u16,
    pub age_ticker: u16,
    pub another_animation_ticker: u16,
    pub next_processed_xy: u16,
    pub companies: Vec<Company>,
    pub next_vehicle_array: u16,
    pub ai_company_ticks: u16,
    pub main_view_x: u16,
    pub main_view_y: u16,
    pub zoom: u16,
    pub maximum_loan: u32,
    pub maximum_loan_internal: u32,
    pub recession_counter: u16,
    pub days_until_disaster: u16,
    pub player1_company: u8,
    pub player2_company: u8,
    pub next_station_tick: u8,
    pub currency: u8,
    pub measurement_system: u8,
    pub next_company_tick: u8,
    pub year: u8,
    pub month: u8,
    pub inflation: u8,
    pub cargo_inflation: u8,
    pub interest_rate: u8,
    pub small_airports: bool,
    pub large_airports: bool,
    pub heliports: bool,
    pub drive_on_the_right: bool,
    pub drive_on_the_right_fixed: bool,
    pub town_name_style: u8,
    pub maximum_competitors: u16,
    pub competitor_start_time: u16,
    pub number_of_towns: u16,
    pub number_of_industries: u16,
    pub max_initial_loan: u16,
    pub initial_interest_rate: u16,
    pub vehicle_running_costs: u16,
    pub ai_construction_speed: u16,
    pub ai_intelligence: u16,
    pub breakdowns: u16,
    pub subsidy_multiplier: u16,
    pub costs_of_construction: u16,
    pub terrain_type: u16,
    pub quantity_of_lakes: u16,
    pub fluctuating_economy: bool,
    pub train_reversing_end_of_line_only: bool,
    pub disasters: bool,
    pub difficulty: u8,
    pub landscape_type: u8,
    pub tree_ticker: u8,
    pub custom_vehicle_names: bool,
    pub custom_vehicle_names_can_be_changed: bool,
    pub snow_line: u8,
    pub tiles: Vec<Tile>,
    /// Populated on `load` with the value computed from the file; ignored as
    /// an input to `save`, which always recomputes it from scratch.
    pub checksum: u32,
}

impl Savegame {
    /// Checks every invariant spec.md §3 names. `save` calls this before
    /// writing a single byte.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.len() > MAX_TITLE_LENGTH {
            return Err(Error::InvariantViolation(format!(
                "title is {} bytes, max {MAX_TITLE_LENGTH}",
                self.title.len()
            )));
        }
        if self.text_effects.len() > MAX_TEXT_EFFECTS {
            return Err(Error::InvariantViolation(format!(
                "{} text effects, max {MAX_TEXT_EFFECTS}",
                self.text_effects.len()
            )));
        }
        if self.towns.len() > MAX_TOWNS {
            return Err(Error::InvariantViolation(format!(
                "{} towns, max {MAX_TOWNS}",
                self.towns.len()
            )));
        }
        if self.depots.len() > MAX_DEPOTS {
            return Err(Error::InvariantViolation(format!(
                "{} depots, max {MAX_DEPOTS}",
                self.depots.len()
            )));
        }
        if self.companies.len() > MAX_COMPANIES {
            return Err(Error::InvariantViolation(format!(
                "{} companies, max {MAX_COMPANIES}",
                self.companies.len()
            )));
        }
        if self.max_initial_loan == 0 {
            return Err(Error::InvariantViolation("max_initial_loan must be nonzero".into()));
        }
        if self.tiles.len() != NUMBER_OF_TILES {
            return Err(Error::InvariantViolation(format!(
                "{} tiles, need exactly {NUMBER_OF_TILES}",
                self.tiles.len()
            )));
        }
        for town in &self.towns {
            if town.name.len() > MAX_NAME_LEN {
                return Err(Error::CustomStringOverflow(town.name.clone()));
            }
        }
        for company in &self.companies {
            if company.name.len() > MAX_NAME_LEN {
                return Err(Error::CustomStringOverflow(company.name.clone()));
            }
            if company.manager_name.len() > MAX_NAME_LEN {
                return Err(Error::CustomStringOverflow(company.manager_name.clone()));
            }
        }
        for tile in &self.tiles {
            if !Tile::is_supported_class(tile.class) {
                return Err(Error::UnsupportedTileClass(tile.class));
            }
        }
        Ok(())
    }
}

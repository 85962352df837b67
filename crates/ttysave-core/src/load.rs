//! Structural Load codec (spec §4.4), mirroring `save.rs`'s field walk.
//!
//! The custom-string pool is joined back to towns and companies by the
//! index each of them recorded during the structural pass, not by the
//! pool's own slot position; the reference implementation this format was
//! distilled from joins by slot position, which only happens to work when
//! every town is stored contiguously from index 0. Joining by the
//! recorded index is what makes `load(save(s)) == s` hold in general.

use crate::checksum::BodyChecksum;
use crate::error::Error;
use crate::io::{ChecksumReader, Reader};
use crate::layout::*;
use crate::model::{Company, Depot, EMPTY_TEXT_EFFECT_ID, Savegame, TextEffect, Town};
use crate::payload::{bit, PayloadReader};
use crate::rle;
use crate::tiles;

impl Savegame {
    /// Reads title / title-checksum / RLE payload / trailing body checksum,
    /// then walks the decompressed payload field by field. A title-checksum
    /// mismatch is fatal; a body-checksum mismatch is returned alongside the
    /// fully-parsed `Savegame` rather than in place of one.
    pub fn load<R: Reader>(src: &mut R) -> Result<(Savegame, Option<Error>), Error> {
        let mut checksum = BodyChecksum::new();
        let title_bytes;
        let payload_bytes;
        {
            let mut r = ChecksumReader::new(&mut *src, &mut checksum);

            let mut title_buf = [0u8; MAX_TITLE_LENGTH];
            r.read(&mut title_buf)?;
            title_bytes = title_buf;

            let mut tc_buf = [0u8; 2];
            r.read(&mut tc_buf)?;
            let on_disk_title_checksum = u16::from_le_bytes(tc_buf);
            let computed_title_checksum = crate::checksum::title_checksum(&title_bytes);
            if on_disk_title_checksum != computed_title_checksum {
                return Err(Error::TitleChecksumMismatch {
                    on_disk: on_disk_title_checksum,
                    computed: computed_title_checksum,
                });
            }

            payload_bytes = rle::decode_from(&mut r, UNCOMPRESSED_PAYLOAD_LEN)?;
        }

        let calculated_checksum = checksum.finish(FILE_CHECKSUM_ADD);

        let mut trailing = [0u8; 4];
        src.read(&mut trailing)?;
        let on_disk_checksum = u32::from_le_bytes(trailing);

        let diagnostic = if on_disk_checksum != calculated_checksum {
            Some(Error::BodyChecksumMismatch { on_disk: on_disk_checksum, computed: calculated_checksum })
        } else {
            None
        };

        let mut sg = Savegame {
            title: trim_nul(&title_bytes),
            checksum: calculated_checksum,
            ..Savegame::default()
        };

        let mut p = PayloadReader::new(&payload_bytes);

        sg.days = p.w()?;
        sg.fractional_days = p.w()?;

        for _ in 0..MAX_TEXT_EFFECTS {
            let id = p.w()?;
            let left = p.w()?;
            let right = p.w()?;
            let top = p.w()?;
            let bottom = p.w()?;
            let expiration = p.w()?;
            let data = p.l()?;
            let unused = p.l()?;
            if id != EMPTY_TEXT_EFFECT_ID {
                sg.text_effects.push(TextEffect { id, left, right, top, bottom, expiration, data, unused });
            }
        }

        sg.seed = p.ll()?;

        let mut town_name_refs: Vec<(usize, u16)> = Vec::new();
        for _ in 0..MAX_TOWNS {
            let x = p.b()?;
            let y = p.b()?;
            let population = p.w()?;
            let name_index = p.w()?;
            p.skip(TOWN_PLACEHOLDER)?;
            if x != 0 || y != 0 {
                sg.towns.push(Town { x, y, population, name: String::new() });
                town_name_refs.push((sg.towns.len() - 1, name_index));
            }
        }

        for _ in 0..MAX_SCHEDULES {
            let v = p.w()?;
            if v != 0 {
                sg.schedules.push(v);
            }
        }
        for _ in 0..MAX_ANIMATIONS {
            let v = p.w()?;
            if v != 0 {
                sg.animations.push(v);
            }
        }
        let _schedule_count = p.l()?; // open question: write-only, not trusted here

        for _ in 0..MAX_DEPOTS {
            let xy = p.w()?;
            let town = p.l()?;
            if xy != 0 {
                sg.depots.push(Depot { xy, town });
            }
        }

        sg.next_processed_town = p.l()?;
        sg.animation_ticker = p.w()?;
        sg.landscape_code = p.w()?;
        sg.age_ticker = p.w()?;
        sg.another_animation_ticker = p.w()?;
        sg.next_processed_xy = p.w()?;

        p.skip(PLACEHOLDER_1)?;
        let l1 = p.bytes(NUMBER_OF_TILES)?.to_vec();
        let l2 = p.bytes(NUMBER_OF_TILES)?.to_vec();
        p.skip(2 * NUMBER_OF_TILES)?; // L3, not modeled
        p.skip(DESERT_PLANE_LEN)?; // desert plane, not modeled
        p.skip(PLACEHOLDER_2)?;

        let mut company_name_refs: Vec<(usize, u16)> = Vec::new();
        let mut company_manager_refs: Vec<(usize, u16)> = Vec::new();
        for _ in 0..MAX_COMPANIES {
            let name_index = p.w()?;
            let name_parts = p.l()?;
            let face = p.l()?;
            let manager_index = p.w()?;
            let manager_name_parts = p.l()?;
            p.skip(COMPANY_SLOT_OPAQUE_LEN)?;
            if name_index != 0 {
                sg.companies.push(Company {
                    name: String::new(),
                    name_parts,
                    face,
                    manager_name: String::new(),
                    manager_name_parts,
                });
                let idx = sg.companies.len() - 1;
                company_name_refs.push((idx, name_index));
                if manager_index != 0 {
                    company_manager_refs.push((idx, manager_index));
                }
            }
        }

        p.skip(PLACEHOLDER_3)?;
        for i in 0..CUSTOM_STRING_SLOTS {
            let raw = p.bytes(CUSTOM_STRING_SLOT_LEN)?;
            let idx = FIRST_CUSTOM_TEXT_ID + i as u16;
            if let Some(&(ti, _)) = town_name_refs.iter().find(|&&(_, ni)| ni == idx) {
                sg.towns[ti].name = trim_nul(raw);
            }
            if let Some(&(ci, _)) = company_name_refs.iter().find(|&&(_, ni)| ni == idx) {
                sg.companies[ci].name = trim_nul(raw);
            }
            if let Some(&(ci, _)) = company_manager_refs.iter().find(|&&(_, ni)| ni == idx) {
                sg.companies[ci].manager_name = trim_nul(raw);
            }
        }

        p.skip(VEHICLE_BOUNDING_BLOCK_LEN)?;
        p.skip(PLACEHOLDER_4)?;

        sg.next_vehicle_array = p.w()?;
        p.skip(32)?; // subsidy state

        sg.ai_company_ticks = p.w()?;
        sg.main_view_x = p.w()?;
        sg.main_view_y = p.w()?;
        sg.zoom = p.w()?;
        sg.maximum_loan = p.l()?;
        sg.maximum_loan_internal = p.l()?;
        sg.recession_counter = p.w()?;
        sg.days_until_disaster = p.w()?;

        p.skip(PLACEHOLDER_5)?;

        sg.player1_company = p.b()?;
        sg.player2_company = p.b()?;
        sg.next_station_tick = p.b()?;
        sg.currency = p.b()?;
        sg.measurement_system = p.b()?;
        sg.next_company_tick = p.b()?;
        sg.year = p.b()?;
        sg.month = p.b()?;
        p.skip(8)?;
        sg.inflation = p.b()?;
        sg.cargo_inflation = p.b()?;
        sg.interest_rate = p.b()?;

        let flags_a = p.b()?;
        sg.small_airports = bit(flags_a, 0);
        sg.large_airports = bit(flags_a, 1);
        sg.heliports = bit(flags_a, 2);

        let flags_b = p.b()?;
        sg.drive_on_the_right = bit(flags_b, 0);
        sg.drive_on_the_right_fixed = bit(flags_b, 1);

        sg.town_name_style = p.b()?;
        sg.maximum_competitors = p.w()?;
        sg.competitor_start_time = p.w()?;
        sg.number_of_towns = p.w()?;
        sg.number_of_industries = p.w()?;
        sg.max_initial_loan = p.w()?;
        sg.initial_interest_rate = p.w()?;
        sg.vehicle_running_costs = p.w()?;
        sg.ai_construction_speed = p.w()?;
        sg.ai_intelligence = p.w()?;
        sg.breakdowns = p.w()?;
        sg.subsidy_multiplier = p.w()?;
        sg.costs_of_construction = p.w()?;
        sg.terrain_type = p.w()?;
        sg.quantity_of_lakes = p.w()?;
        sg.fluctuating_economy = p.bool_w()?;
        sg.train_reversing_end_of_line_only = p.bool_w()?;
        sg.disasters = p.bool_w()?;
        sg.difficulty = p.b()?;
        sg.landscape_type = p.b()?;
        sg.tree_ticker = p.b()?;

        let flags_c = p.b()?;
        sg.custom_vehicle_names = bit(flags_c, 0);
        sg.custom_vehicle_names_can_be_changed = bit(flags_c, 1);

        sg.snow_line = p.b()?;
        p.skip(PLACEHOLDER_6)?;

        let l4 = p.bytes(NUMBER_OF_TILES)?.to_vec();
        let l5 = p.bytes(NUMBER_OF_TILES)?.to_vec();

        p.finish(UNCOMPRESSED_PAYLOAD_LEN)?;

        sg.tiles = tiles::unpack_tiles(&l1, &l2, &l4, &l5)?;

        Ok((sg, diagnostic))
    }
}

fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

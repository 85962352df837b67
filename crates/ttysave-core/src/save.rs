//! Structural Save codec (spec §4.4): the fixed field walk, serialized.

use crate::checksum::BodyChecksum;
use crate::error::Error;
use crate::io::{ChecksumWriter, Writer};
use crate::layout::*;
use crate::model::{EMPTY_TEXT_EFFECT_ID, Savegame};
use crate::payload::PayloadWriter;
use crate::rle;
use crate::tiles::{self, TilePlanes};

impl Savegame {
    /// Validates, builds the uncompressed payload, then writes
    /// title / title-checksum / RLE payload / trailing body checksum in
    /// that order. The trailing checksum word is the only part of the
    /// stream not fed into the body-checksum accumulator.
    pub fn save<W: Writer>(&self, dst: &mut W) -> Result<(), Error> {
        self.validate()?;

        let planes = tiles::build_planes(&self.tiles)?;
        let payload = self.build_payload(&planes)?;

        let mut checksum = BodyChecksum::new();
        {
            let mut w = ChecksumWriter::new(&mut *dst, &mut checksum);
            let title = pad_title(&self.title);
            w.write(&title)?;
            w.write(&title_checksum_bytes(&title))?;
            rle::encode_to(&mut w, &payload)?;
        }

        let final_checksum = checksum.finish(FILE_CHECKSUM_ADD);
        dst.write(&final_checksum.to_le_bytes())?;
        Ok(())
    }

    fn build_payload(&self, planes: &TilePlanes) -> Result<Vec<u8>, Error> {
        let mut p = PayloadWriter::with_capacity(UNCOMPRESSED_PAYLOAD_LEN);

        p.w(self.days);
        p.w(self.fractional_days);

        for i in 0..MAX_TEXT_EFFECTS {
            match self.text_effects.get(i) {
                Some(e) => {
                    p.w(e.id);
                    p.w(e.left);
                    p.w(e.right);
                    p.w(e.top);
                    p.w(e.bottom);
                    p.w(e.expiration);
                    p.l(e.data);
                    p.l(e.unused);
                }
                None => {
                    p.w(EMPTY_TEXT_EFFECT_ID);
                    p.w(0);
                    p.w(0);
                    p.w(0);
                    p.w(0);
                    p.w(0);
                    p.l(0);
                    p.l(0);
                }
            }
        }

        p.ll(self.seed);

        let mut custom_strings: Vec<String> = Vec::new();
        for i in 0..MAX_TOWNS {
            let town = self.towns.get(i);
            let name_index = FIRST_CUSTOM_TEXT_ID + custom_strings.len() as u16;
            p.b(town.map_or(0, |t| t.x));
            p.b(town.map_or(0, |t| t.y));
            p.w(town.map_or(0, |t| t.population));
            p.w(name_index);
            p.zeros(TOWN_PLACEHOLDER);
            custom_strings.push(town.map_or_else(String::new, |t| t.name.clone()));
        }

        for i in 0..MAX_SCHEDULES {
            p.w(*self.schedules.get(i).unwrap_or(&0));
        }
        for i in 0..MAX_ANIMATIONS {
            p.w(*self.animations.get(i).unwrap_or(&0));
        }
        // Open question (spec.md §9): write-only, never trusted on load.
        p.l(self.schedules.len() as u32);

        for i in 0..MAX_DEPOTS {
            let depot = self.depots.get(i);
            p.w(depot.map_or(0, |d| d.xy));
            p.l(depot.map_or(0, |d| d.town));
        }

        p.l(self.next_processed_town);
        p.w(self.animation_ticker);
        p.w(self.landscape_code);
        p.w(self.age_ticker);
        p.w(self.another_animation_ticker);
        p.w(self.next_processed_xy);

        p.zeros(PLACEHOLDER_1);
        p.bytes(&planes.l1);
        p.bytes(&planes.l2);
        p.zeros(2 * NUMBER_OF_TILES); // L3, not modeled
        p.zeros(DESERT_PLANE_LEN); // desert plane, not modeled
        p.zeros(PLACEHOLDER_2);

        for i in 0..MAX_COMPANIES {
            if let Some(c) = self.companies.get(i) {
                let name_index = FIRST_CUSTOM_TEXT_ID + custom_strings.len() as u16;
                custom_strings.push(c.name.clone());
                p.w(name_index);
                p.l(c.name_parts);
                p.l(c.face);
                let manager_index = FIRST_CUSTOM_TEXT_ID + custom_strings.len() as u16;
                custom_strings.push(c.manager_name.clone());
                p.w(manager_index);
                p.l(c.manager_name_parts);
            } else {
                p.w(0);
                p.l(0);
                p.l(0);
                p.w(0);
                p.l(0);
            }
            p.zeros(COMPANY_SLOT_OPAQUE_LEN);
        }

        p.zeros(PLACEHOLDER_3);

        if custom_strings.len() > CUSTOM_STRING_SLOTS {
            return Err(Error::InvariantViolation(format!(
                "{} custom strings, pool holds {CUSTOM_STRING_SLOTS}",
                custom_strings.len()
            )));
        }
        for s in &custom_strings {
            if s.len() > MAX_NAME_LEN {
                return Err(Error::CustomStringOverflow(s.clone()));
            }
            p.bytes(s.as_bytes());
            p.zeros(CUSTOM_STRING_SLOT_LEN - s.len());
        }
        p.zeros(CUSTOM_STRING_SLOT_LEN * (CUSTOM_STRING_SLOTS - custom_strings.len()));

        p.fill(0xFF, VEHICLE_BOUNDING_BLOCK_LEN);
        p.zeros(PLACEHOLDER_4);

        p.w(self.next_vehicle_array);
        for _ in 0..8 {
            p.bytes(&[0xFF, 0, 0, 0]);
        }

        p.w(self.ai_company_ticks);
        p.w(self.main_view_x);
        p.w(self.main_view_y);
        p.w(self.zoom);
        p.l(self.maximum_loan);
        p.l(self.maximum_loan_internal);
        p.w(self.recession_counter);
        p.w(self.days_until_disaster);

        p.zeros(PLACEHOLDER_5);

        p.b(self.player1_company);
        p.b(self.player2_company);
        p.b(self.next_station_tick);
        p.b(self.currency);
        p.b(self.measurement_system);
        p.b(self.next_company_tick);
        p.b(self.year);
        p.b(self.month);
        p.zeros(8);
        p.b(self.inflation);
        p.b(self.cargo_inflation);
        p.b(self.interest_rate);
        p.bools(&[self.small_airports, self.large_airports, self.heliports]);
        p.bools(&[self.drive_on_the_right, self.drive_on_the_right_fixed]);
        p.b(self.town_name_style);
        p.w(self.maximum_competitors);
        p.w(self.competitor_start_time);
        p.w(self.number_of_towns);
        p.w(self.number_of_industries);
        p.w(self.max_initial_loan);
        p.w(self.initial_interest_rate);
        p.w(self.vehicle_running_costs);
        p.w(self.ai_construction_speed);
        p.w(self.ai_intelligence);
        p.w(self.breakdowns);
        p.w(self.subsidy_multiplier);
        p.w(self.costs_of_construction);
        p.w(self.terrain_type);
        p.w(self.quantity_of_lakes);
        p.bool_w(self.fluctuating_economy);
        p.bool_w(self.train_reversing_end_of_line_only);
        p.bool_w(self.disasters);
        p.b(self.difficulty);
        p.b(self.landscape_type);
        p.b(self.tree_ticker);
        p.bools(&[self.custom_vehicle_names, self.custom_vehicle_names_can_be_changed]);
        p.b(self.snow_line);

        p.zeros(PLACEHOLDER_6);
        p.bytes(&planes.l4);
        p.bytes(&planes.l5);

        debug_assert_eq!(p.len(), UNCOMPRESSED_PAYLOAD_LEN);
        Ok(p.into_bytes())
    }
}

fn pad_title(title: &str) -> Vec<u8> {
    let mut buf = title.as_bytes().to_vec();
    buf.resize(MAX_TITLE_LENGTH, 0);
    buf
}

fn title_checksum_bytes(title: &[u8]) -> [u8; 2] {
    crate::checksum::title_checksum(title).to_le_bytes()
}

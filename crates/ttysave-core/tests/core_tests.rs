use std::io::Seek;

use ttysave_core::layout::NUMBER_OF_TILES;
use ttysave_core::model::{Company, Depot, TextEffect, Town};
use ttysave_core::{Error, Savegame, Tile};

fn flat_tiles(tile: Tile) -> Vec<Tile> {
    vec![tile; NUMBER_OF_TILES]
}

fn minimal_valid_savegame() -> Savegame {
    Savegame {
        title: "test".into(),
        max_initial_loan: 1,
        tiles: flat_tiles(Tile { class: 0, height: 1, owner: 0x10, tile_type: 0x03 }),
        ..Savegame::default()
    }
}

fn fixture_savegame() -> Savegame {
    Savegame {
        title: "test".into(),
        days: 42,
        fractional_days: 3,
        text_effects: vec![
            TextEffect { id: 1, left: 10, right: 20, top: 30, bottom: 40, expiration: 5, data: 100, unused: 0 },
            TextEffect { id: 2, left: 11, right: 21, top: 31, bottom: 41, expiration: 6, data: 101, unused: 0 },
        ],
        seed: 0x1122_3344_5566_7788,
        towns: vec![
            Town { x: 5, y: 6, population: 100, name: "Town1".into() },
            Town { x: 7, y: 8, population: 200, name: "Town2".into() },
        ],
        schedules: vec![60, 61],
        animations: vec![62, 63, 64],
        depots: vec![Depot { xy: 1234, town: 0 }, Depot { xy: 5678, town: 1 }],
        next_processed_town: 14,
        animation_ticker: 15,
        landscape_code: 16,
        age_ticker: 17,
        another_animation_ticker: 18,
        next_processed_xy: 19,
        companies: vec![Company {
            name: "Company".into(),
            name_parts: 20,
            face: 21,
            manager_name: "Manager".into(),
            manager_name_parts: 22,
        }],
        next_vehicle_array: 23,
        ai_company_ticks: 24,
        main_view_x: 25,
        main_view_y: 26,
        zoom: 27,
        maximum_loan: 28,
        maximum_loan_internal: 29,
        recession_counter: 30,
        days_until_disaster: 31,
        player1_company: 32,
        player2_company: 33,
        next_station_tick: 34,
        currency: 35,
        measurement_system: 36,
        next_company_tick: 37,
        year: 38,
        month: 39,
        inflation: 40,
        cargo_inflation: 41,
        interest_rate: 42,
        small_airports: true,
        large_airports: false,
        heliports: true,
        drive_on_the_right: true,
        drive_on_the_right_fixed: false,
        town_name_style: 43,
        maximum_competitors: 44,
        competitor_start_time: 45,
        number_of_towns: 46,
        number_of_industries: 47,
        max_initial_loan: 48,
        initial_interest_rate: 49,
        vehicle_running_costs: 50,
        ai_construction_speed: 51,
        ai_intelligence: 52,
        breakdowns: 53,
        subsidy_multiplier: 14,
        costs_of_construction: 15,
        terrain_type: 16,
        quantity_of_lakes: 17,
        fluctuating_economy: true,
        train_reversing_end_of_line_only: false,
        disasters: true,
        difficulty: 18,
        landscape_type: 19,
        tree_ticker: 20,
        custom_vehicle_names: true,
        custom_vehicle_names_can_be_changed: false,
        snow_line: 21,
        tiles: flat_tiles(Tile { class: 0, height: 1, owner: 2, tile_type: 3 }),
        ..Savegame::default()
    }
}

#[test]
fn save_then_load_round_trips_the_fixture() {
    let original = fixture_savegame();
    let mut buf = Vec::new();
    original.save(&mut buf).unwrap();

    let mut cursor = &buf[..];
    let (loaded, diagnostic) = Savegame::load(&mut cursor).unwrap();

    assert!(diagnostic.is_none());
    assert_eq!(loaded.title, original.title);
    assert_eq!(loaded.days, original.days);
    assert_eq!(loaded.fractional_days, original.fractional_days);
    assert_eq!(loaded.text_effects, original.text_effects);
    assert_eq!(loaded.seed, original.seed);
    assert_eq!(loaded.towns, original.towns);
    assert_eq!(loaded.schedules, original.schedules);
    assert_eq!(loaded.animations, original.animations);
    assert_eq!(loaded.depots, original.depots);
    assert_eq!(loaded.companies, original.companies);
    assert_eq!(loaded.tiles, original.tiles);
    assert_eq!(loaded.max_initial_loan, original.max_initial_loan);
}

#[test]
fn save_then_load_round_trips_through_a_real_file() {
    let original = minimal_valid_savegame();
    let mut file = tempfile::tempfile().unwrap();
    original.save(&mut file).unwrap();
    file.seek(std::io::SeekFrom::Start(0)).unwrap();

    let (loaded, diagnostic) = Savegame::load(&mut file).unwrap();
    assert!(diagnostic.is_none());
    assert_eq!(loaded.title, original.title);
    assert_eq!(loaded.tiles, original.tiles);
}

#[test]
fn empty_savegame_round_trips() {
    let original = minimal_valid_savegame();
    let mut buf = Vec::new();
    original.save(&mut buf).unwrap();
    let mut cursor = &buf[..];
    let (loaded, diagnostic) = Savegame::load(&mut cursor).unwrap();
    assert!(diagnostic.is_none());
    assert_eq!(loaded, original);
}

#[test]
fn decodes_the_sample_run_length_payload() {
    // FD 2A 01 03 04 -> 2A 2A 2A 2A 03 04
    let encoded = [0xFDu8, 0x2A, 0x01, 0x03, 0x04];
    let mut src = &encoded[..];
    let decoded = ttysave_core::rle::decode_from(&mut src, 6).unwrap();
    assert_eq!(decoded, vec![0x2A, 0x2A, 0x2A, 0x2A, 0x03, 0x04]);
}

#[test]
fn seventy_one_towns_fails_validation() {
    let mut sg = minimal_valid_savegame();
    sg.towns = (0..71).map(|i| Town { x: 1, y: (i % 255) as u8 + 1, population: 0, name: String::new() }).collect();
    let err = sg.save(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
}

#[test]
fn seventy_towns_is_the_boundary_and_succeeds() {
    let mut sg = minimal_valid_savegame();
    sg.towns = (0..70).map(|i| Town { x: 1, y: (i % 255) as u8 + 1, population: 0, name: String::new() }).collect();
    assert!(sg.save(&mut Vec::new()).is_ok());
}

#[test]
fn max_initial_loan_zero_fails_validation() {
    let mut sg = minimal_valid_savegame();
    sg.max_initial_loan = 0;
    let err = sg.save(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
}

#[test]
fn wrong_tile_count_fails_validation() {
    let mut sg = minimal_valid_savegame();
    sg.tiles.pop();
    let err = sg.save(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
}

#[test]
fn unsupported_tile_class_fails_validation() {
    let mut sg = minimal_valid_savegame();
    sg.tiles[0].class = 1;
    let err = sg.save(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedTileClass(1)));
}

#[test]
fn exactly_32_byte_name_round_trips() {
    let mut sg = minimal_valid_savegame();
    let name = "x".repeat(32);
    sg.towns.push(Town { x: 1, y: 1, population: 1, name: name.clone() });
    let mut buf = Vec::new();
    sg.save(&mut buf).unwrap();
    let mut cursor = &buf[..];
    let (loaded, _) = Savegame::load(&mut cursor).unwrap();
    assert_eq!(loaded.towns[0].name, name);
}

#[test]
fn thirty_three_byte_name_overflows() {
    let mut sg = minimal_valid_savegame();
    sg.towns.push(Town { x: 1, y: 1, population: 1, name: "x".repeat(33) });
    let err = sg.save(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::CustomStringOverflow(_)));
}

#[test]
fn title_checksum_mismatch_is_fatal() {
    let sg = minimal_valid_savegame();
    let mut buf = Vec::new();
    sg.save(&mut buf).unwrap();
    buf[1] ^= 0xFF; // corrupt a title byte without touching its stored checksum
    let mut cursor = &buf[..];
    let err = Savegame::load(&mut cursor).unwrap_err();
    assert!(matches!(err, Error::TitleChecksumMismatch { .. }));
}

#[test]
fn body_checksum_mismatch_is_a_diagnostic_not_a_fatal_error() {
    let sg = minimal_valid_savegame();
    let mut buf = Vec::new();
    sg.save(&mut buf).unwrap();
    let last = buf.len() - 1;
    buf[last] ^= 0xFF; // corrupt the trailing checksum word only
    let mut cursor = &buf[..];
    let (loaded, diagnostic) = Savegame::load(&mut cursor).unwrap();
    assert_eq!(loaded.title, sg.title);
    assert!(matches!(diagnostic, Some(Error::BodyChecksumMismatch { .. })));
}

#[test]
fn town_names_join_correctly_when_towns_are_sparse() {
    // A single populated town, held in a pool slot far from index 0. A
    // join keyed by pool-slot position instead of the town's own index
    // would misattribute this name to the wrong town (or none at all).
    let mut sg = minimal_valid_savegame();
    sg.towns = vec![Town { x: 9, y: 9, population: 42, name: "Only".into() }];

    let mut buf = Vec::new();
    sg.save(&mut buf).unwrap();
    let mut cursor = &buf[..];
    let (loaded, _) = Savegame::load(&mut cursor).unwrap();
    assert_eq!(loaded.towns.len(), 1);
    assert_eq!(loaded.towns[0].name, "Only");
}

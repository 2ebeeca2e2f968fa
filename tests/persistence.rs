/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fs, path::PathBuf};

use qorki::{Game, Player, Session, SAVE_SIZE};

/// A file path under the system's temp directory that is unique to this test.
fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("qorki-{}-{name}.dat", std::process::id()))
}

fn mid_chain_game() -> Game {
    let mut game = Game::from_placement("8/8/4b3/8/2b5/1r6/8/5r2 r").unwrap();
    game.select("b3".parse().unwrap()).unwrap();
    game.move_to("d5".parse().unwrap()).unwrap();
    assert!(game.is_capture_chain());
    game
}

#[test]
fn test_round_trip_keeps_everything() {
    let game = mid_chain_game();
    let bytes = game.to_bytes();
    assert_eq!(bytes.len(), SAVE_SIZE);

    let loaded = Game::from_bytes(&bytes).unwrap();
    assert_eq!(loaded, game);
    assert!(loaded.is_capture_chain());
    assert_eq!(loaded.score(Player::Red), 1);
    assert_eq!(loaded.destinations(), game.destinations());
}

#[test]
fn test_scores_are_little_endian() {
    let bytes = mid_chain_game().to_bytes();
    assert_eq!(bytes[65..69], [1, 0, 0, 0]);
    assert_eq!(bytes[69..73], [0, 0, 0, 0]);
}

#[test]
fn test_rejects_wrong_size() {
    let bytes = Game::default().to_bytes();
    assert!(Game::from_bytes(&bytes[..SAVE_SIZE - 1]).is_err());
    assert!(Game::from_bytes(&[]).is_err());

    let mut longer = bytes.to_vec();
    longer.push(0);
    assert!(Game::from_bytes(&longer).is_err());
}

#[test]
fn test_rejects_corrupt_bytes() {
    let mut bytes = Game::default().to_bytes();
    bytes[10] = 5;
    assert!(Game::from_bytes(&bytes).is_err());

    let mut bytes = Game::default().to_bytes();
    bytes[64] = 2;
    assert!(Game::from_bytes(&bytes).is_err());

    let mut bytes = mid_chain_game().to_bytes();
    bytes[76] = 64;
    assert!(Game::from_bytes(&bytes).is_err());
}

#[test]
fn test_rejects_selection_of_empty_cell() {
    // Selected a1, which is empty, with h8 as its only destination
    let mut bytes = Game::default().to_bytes();
    bytes[73] = 1;
    bytes[74] = 0;
    bytes[75] = 1;
    bytes[76] = 63;
    assert!(Game::from_bytes(&bytes).is_err());
}

#[test]
fn test_rejects_destinations_the_piece_cannot_reach() {
    let mut bytes = mid_chain_game().to_bytes();
    assert_eq!(bytes[75], 1);

    // d5 can only continue to f7
    bytes[76] = "h8".parse::<qorki::Square>().unwrap().inner();
    assert!(Game::from_bytes(&bytes).is_err());

    // Dropping the continuation entirely is no better
    let mut bytes = mid_chain_game().to_bytes();
    bytes[75] = 0;
    bytes[76] = 0xFF;
    assert!(Game::from_bytes(&bytes).is_err());
}

#[test]
fn test_rejects_selection_of_opponent_piece() {
    let mut game = Game::default();
    game.select("b3".parse().unwrap()).unwrap();
    let mut bytes = game.to_bytes();
    bytes[64] = 1;
    assert!(Game::from_bytes(&bytes).is_err());
}

#[test]
fn test_saturated_score_keeps_playing() {
    let mut bytes = mid_chain_game().to_bytes();
    bytes[65..69].copy_from_slice(&u32::MAX.to_le_bytes());

    let mut game = Game::from_bytes(&bytes).unwrap();
    assert_eq!(game.score(Player::Red), u32::MAX);

    game.move_to("f7".parse().unwrap()).unwrap();
    assert_eq!(game.score(Player::Red), u32::MAX);
}

#[test]
fn test_save_and_load_file() {
    let path = temp_file("round-trip");
    let game = mid_chain_game();

    game.save(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap().len(), SAVE_SIZE);
    assert_eq!(Game::load(&path).unwrap(), game);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_missing_file() {
    let path = temp_file("does-not-exist");
    let err = Game::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read saved game"));
}

#[test]
fn test_failed_load_leaves_session_untouched() {
    let path = temp_file("truncated");
    fs::write(&path, [0u8; 10]).unwrap();

    let mut session = Session::new(&path);
    let mut out = Vec::new();
    session
        .run("select b3\nmove c4\nload\n".as_bytes(), &mut out)
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Could not load"));
    assert_eq!(session.game().side_to_move(), Player::Blue);
    assert!(session.game().board().has("c4".parse().unwrap()));

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_session_save_then_load() {
    let path = temp_file("session");
    let mut session = Session::new(&path);
    let mut out = Vec::new();

    session
        .run("select b3\nmove c4\nsave\nrestart\nload\n".as_bytes(), &mut out)
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Saved game to"));
    assert!(out.contains("Loaded game from"));
    assert_eq!(session.game().side_to_move(), Player::Blue);
    assert!(session.game().board().has("c4".parse().unwrap()));

    fs::remove_file(&path).unwrap();
}

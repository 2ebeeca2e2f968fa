/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use qorki::{perft, perft_generic, splitperft, Game, PLACEMENT_STARTPOS};

fn test_perft_placement_nodes(depth: usize, placement: &str, expected: u64) {
    let game = Game::from_placement(placement).unwrap();
    let res = perft_generic::<false>(&game, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {placement}");
}

#[cfg(test)]
mod startpos_perft {
    use super::*;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_placement_nodes(1, PLACEMENT_STARTPOS, 7);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_placement_nodes(2, PLACEMENT_STARTPOS, 49);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_placement_nodes(3, PLACEMENT_STARTPOS, 379);
    }

    #[test]
    fn test_startpos_perft_4() {
        test_perft_placement_nodes(4, PLACEMENT_STARTPOS, 2872);
    }

    #[test]
    fn test_startpos_perft_5() {
        test_perft_placement_nodes(5, PLACEMENT_STARTPOS, 23582);
    }

    #[test]
    fn test_startpos_perft_6() {
        test_perft_placement_nodes(6, PLACEMENT_STARTPOS, 189143);
    }

    #[test]
    fn test_blue_to_move_is_symmetric() {
        let placement = "b1b1b1b1/1b1b1b1b/b1b1b1b1/8/8/1r1r1r1r/r1r1r1r1/1r1r1r1r b";
        for (depth, expected) in [7, 49, 379, 2872].into_iter().enumerate() {
            test_perft_placement_nodes(depth + 1, placement, expected);
        }
    }
}

#[cfg(test)]
mod king_perft {
    use super::*;

    #[test]
    fn test_lone_king_perft() {
        let placement = "8/8/8/8/3b4/8/8/R7 r";
        for (depth, expected) in [3, 4, 24, 46, 379].into_iter().enumerate() {
            test_perft_placement_nodes(depth + 1, placement, expected);
        }
    }

    #[test]
    fn test_king_chain_perft() {
        let placement = "8/2b1b3/8/2b1b3/8/2b5/1R6/8 r";
        for (depth, expected) in [4, 32, 122, 896, 4777].into_iter().enumerate() {
            test_perft_placement_nodes(depth + 1, placement, expected);
        }
    }

    #[test]
    fn test_blue_king_perft() {
        let placement = "8/8/3B4/8/1r1r4/8/3r4/8 b";
        for (depth, expected) in [10, 58, 424, 1975, 13836].into_iter().enumerate() {
            test_perft_placement_nodes(depth + 1, placement, expected);
        }
    }
}

#[cfg(test)]
mod promotion_perft {
    use super::*;

    #[test]
    fn test_race_to_promotion_perft() {
        let placement = "1b1b1b1b/8/8/8/8/8/8/r1r1r1r1 r";
        for (depth, expected) in [7, 49, 301, 1849, 11223].into_iter().enumerate() {
            test_perft_placement_nodes(depth + 1, placement, expected);
        }
    }
}

#[test]
fn test_bulk_counting_agrees() {
    let game = Game::default();
    assert_eq!(perft(&game, 4), perft_generic::<false>(&game, 4));
    assert_eq!(game.perft(4), 2872);
}

#[test]
fn test_splitperft_from_startpos() {
    let game = Game::default();
    let split = splitperft(&game, 2);

    assert_eq!(split.len(), 7);
    assert!(split.iter().all(|&(_, nodes)| nodes == 7));
}

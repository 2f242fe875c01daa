//! Exhaustive game-tree search.
//!
//! Values are always from the point of view of the player who has just moved
//! (negamax convention): `negamax(position, player)` asks how good `position`
//! is for `player`, with `player.other()` to move next.
//!
//! Every non-terminal node halves its value on the way up. A win found in
//! fewer plies therefore scores higher than a slower one, and a loss that
//! comes later scores higher than a quick one. With `WON = 1 << 20` and at
//! most 9 plies the halving is exact and never reaches zero, so the sign
//! (win, draw, loss) of a value is unchanged.

use log::{debug, trace};
use rand::Rng;

use crate::bitboard::{first_unset, Move, Player, Position, CELLS};

pub type Eval = i32;

pub const WON: Eval = 1 << 20;
pub const DRAW: Eval = 0;
pub const LOST: Eval = -WON;

/// Reference search without pruning.
pub fn negamax(position: Position, player: Player) -> Eval {
    if position.is_won(player) {
        return WON;
    }
    if position.is_full() {
        return DRAW;
    }
    let opponent = player.other();

    let mut eval = WON;
    let mut open = position.occupied();
    let mut m = first_unset(open);
    while m < CELLS && eval != LOST {
        eval = eval.min(-negamax(position.play(opponent, m), opponent));
        open |= 1 << m;
        m = first_unset(open);
    }
    eval / 2
}

/// Negamax with alpha-beta cutoffs, using the widest bound.
pub fn alphabeta(position: Position, player: Player) -> Eval {
    alphabeta_bounded(position, player, LOST)
}

/// Same value as [`negamax`] whenever that value is above `alpha`. Otherwise
/// the result is some bound `r` with `negamax <= r <= alpha`.
pub fn alphabeta_bounded(position: Position, player: Player, alpha: Eval) -> Eval {
    if position.is_won(player) {
        return WON;
    }
    if position.is_full() {
        return DRAW;
    }
    let opponent = player.other();

    // `beta` is kept before halving, so it is compared against `2 * alpha`.
    let mut beta = WON;
    for m in position.open_cells() {
        beta = beta.min(-alphabeta_bounded(position.play(opponent, m), opponent, -beta));
        if beta <= 2 * alpha {
            break;
        }
    }
    beta / 2
}

/// Best move for `player` on `position` with its value.
///
/// With `randomize`, moves of equal value are chosen uniformly using a fresh
/// thread-local generator; without it the lowest such cell wins. `None` if no
/// cell is open.
pub fn best_move(position: Position, player: Player, randomize: bool) -> Option<(Move, Eval)> {
    if randomize {
        best_move_with(position, player, Some(&mut rand::thread_rng()))
    } else {
        best_move_with::<rand::rngs::ThreadRng>(position, player, None)
    }
}

/// Like [`best_move`], breaking ties with `rng` if one is given.
pub fn best_move_with<R: Rng + ?Sized>(
    position: Position,
    player: Player,
    mut rng: Option<&mut R>,
) -> Option<(Move, Eval)> {
    let mut best: Option<(Move, Eval)> = None;
    let mut ties: u32 = 0;

    for m in position.open_cells() {
        let eval = alphabeta(position.play(player, m), player);
        trace!("move {} scores {}", m, eval);

        match best {
            Some((_, best_eval)) if eval < best_eval => {}
            Some((_, best_eval)) if eval == best_eval => {
                ties += 1;
                // reservoir sampling: the k-th tie replaces with probability 1/k
                if let Some(rng) = rng.as_deref_mut() {
                    if rng.gen_range(0..ties) == 0 {
                        best = Some((m, eval));
                    }
                }
            }
            _ => {
                best = Some((m, eval));
                ties = 1;
            }
        }
    }

    if let Some((m, eval)) = best {
        debug!("best move for {} is {} ({} tied), eval {}", player, m, ties, eval);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_position;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn reachable_positions() -> Vec<Position> {
        fn walk(position: Position, player: Player, seen: &mut HashSet<Position>) {
            if !seen.insert(position) || position.is_finished() {
                return;
            }
            for m in position.open_cells() {
                walk(position.play(player, m), player.other(), seen);
            }
        }

        let mut seen = HashSet::new();
        walk(Position::EMPTY, Player::One, &mut seen);
        seen.into_iter().collect()
    }

    #[test]
    fn test_reachable_positions_are_legal() {
        let positions = reachable_positions();
        assert_eq!(positions.len(), 5478);
        assert!(positions.iter().all(|position| position.is_legal()));
    }

    #[test]
    fn test_negamax_and_alphabeta_agree() {
        for position in reachable_positions() {
            for player in [Player::One, Player::Two] {
                assert_eq!(
                    negamax(position, player),
                    alphabeta(position, player),
                    "{:?} for {}",
                    position,
                    player
                );
            }
        }
    }

    #[test]
    fn test_first_corner_is_a_draw() {
        let position = Position::EMPTY.play(Player::One, 0);
        assert_eq!(negamax(position, Player::One), DRAW);
        assert_eq!(alphabeta(position, Player::One), DRAW);
    }

    #[test]
    fn test_two_in_a_row_wins() {
        let position = Position::EMPTY.play(Player::One, 0).play(Player::One, 1);
        assert!(alphabeta(position, Player::One) > DRAW);
        assert!(alphabeta(position, Player::Two) < -DRAW);
        assert!(negamax(position, Player::One) > DRAW);
        assert!(negamax(position, Player::Two) < DRAW);
    }

    #[test]
    fn test_terminal_values() {
        let won = parse_position("xxxoo....").unwrap();
        assert_eq!(negamax(won, Player::One), WON);
        assert_eq!(alphabeta(won, Player::One), WON);

        let drawn = parse_position("xoxxoooxx").unwrap();
        assert_eq!(negamax(drawn, Player::One), DRAW);
        assert_eq!(alphabeta(drawn, Player::Two), DRAW);
    }

    #[test]
    fn test_scores_keep_outcome_class() {
        // every win is positive and every loss negative, however deep
        for position in reachable_positions() {
            let eval = negamax(position, Player::One);
            assert!(eval == DRAW || eval.abs() >= WON >> CELLS);
        }
    }

    #[test]
    fn test_bounded_search_fails_low() {
        // value of a lost position never exceeds the bound it was cut at
        let position = Position::EMPTY.play(Player::One, 0).play(Player::One, 1);
        let exact = negamax(position, Player::Two);
        let bound = alphabeta_bounded(position, Player::Two, DRAW);
        assert!(exact <= bound && bound <= DRAW);
    }

    #[test]
    fn test_best_move_deterministic_on_empty_board() {
        for _ in 0..3 {
            assert_eq!(best_move(Position::EMPTY, Player::One, false), Some((0, DRAW)));
        }
        assert_eq!(best_move(Position::EMPTY, Player::One, true).map(|(_, eval)| eval), Some(DRAW));
    }

    #[test]
    fn test_best_move_two_in_a_row() {
        let position = Position::EMPTY.play(Player::One, 0).play(Player::One, 1);
        assert!(best_move(position, Player::One, true).unwrap().1 > DRAW);
        assert!(best_move(position, Player::Two, true).unwrap().1 < -DRAW);
    }

    #[test]
    fn test_best_move_prefers_fastest_win() {
        // c1 wins at once; every other move is a draw at best
        let position = parse_position("xx.oo....").unwrap();
        assert_eq!(best_move(position, Player::One, false), Some((2, WON)));
        for _ in 0..20 {
            assert_eq!(best_move(position, Player::One, true), Some((2, WON)));
        }
    }

    #[test]
    fn test_best_move_blocks() {
        // o must block x on c1
        let position = parse_position("xx..o....").unwrap();
        assert_eq!(best_move(position, Player::Two, false).map(|(m, _)| m), Some(2));
    }

    #[test]
    fn test_best_move_prefers_slow_loss() {
        // o is lost, but blocking a3 postpones the loss by two plies
        let position = parse_position(".....o.xx").unwrap();
        assert_eq!(best_move(position, Player::Two, false), Some((6, LOST / 8)));
        assert_eq!(best_move(position, Player::Two, true), Some((6, LOST / 8)));
    }

    #[test]
    fn test_best_move_on_full_board() {
        let position = parse_position("xoxxoooxx").unwrap();
        assert_eq!(best_move(position, Player::One, true), None);
        assert_eq!(best_move(position, Player::Two, false), None);
    }

    #[test]
    fn test_random_ties_are_uniform() {
        // b1, c1, b3 and c3 all hold the draw for o
        let position = parse_position("....oxx..").unwrap();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [0u32; CELLS];
        for _ in 0..4000 {
            let (m, eval) = best_move_with(position, Player::Two, Some(&mut rng)).unwrap();
            assert_eq!(eval, DRAW);
            counts[m] += 1;
        }
        for m in [1, 2, 7, 8] {
            assert!((800..1200).contains(&counts[m]), "{:?}", counts);
        }
        assert_eq!(counts.iter().sum::<u32>(), 4000);
    }

    #[test]
    fn test_deterministic_ties_take_lowest_cell() {
        let position = parse_position("....oxx..").unwrap();
        assert_eq!(best_move(position, Player::Two, false), Some((1, DRAW)));
    }
}

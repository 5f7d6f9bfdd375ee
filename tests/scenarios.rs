//! End-to-end scenarios against the public library API.
//!
//! Plays through the documented game situations using only exported
//! functions: board setup, attacks, turn handling, the fuzzy evaluator,
//! pathfinding, and the search entry point.

use graviton::board::{initialize_board, AttackOutcome, BoardState, Coord, InvalidMove, Outcome, Side};
use graviton::eval::{calculate_strategic_value, defuzzify, evaluate_attack, recommend_ship_count};
use graviton::movegen::random_move;
use graviton::path::{find_path, heuristic};
use graviton::search::{get_best_move, Difficulty, ALL_DIFFICULTIES};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn duel() -> BoardState {
    let mut board = BoardState::uniform(2);
    board.place(Coord::new(0, 0), Some(Side::A), 10);
    board.place(Coord::new(3, 3), Some(Side::B), 10);
    board
}

#[test]
fn easy_opening_targets_a_neutral_planet() {
    let board = duel();
    let best = get_best_move(&board, Side::A, Difficulty::Easy).expect("A has moves");
    assert_eq!(best.source, Coord::new(0, 0));
    let target = board.planet_at(best.target).unwrap();
    assert!(target.is_neutral());
    assert!(best.ships >= 1);

    // No empty neutral neighbor of (0,0) is ever skipped.
    for c in [Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)] {
        let agg = evaluate_attack(&board, Coord::new(0, 0), c, Side::A).unwrap();
        assert!(recommend_ship_count(&board, Coord::new(0, 0), c, Side::A, agg) > 0);
    }
}

#[test]
fn capturing_an_empty_neutral() {
    let mut board = BoardState::uniform(2);
    board.place(Coord::new(0, 0), Some(Side::A), 3);
    let res = board.apply_attack(Coord::new(0, 0), Coord::new(1, 0), 1).unwrap();
    assert_eq!(res.outcome, AttackOutcome::Captured { garrison: 1 });
    let target = board.planet_at(Coord::new(1, 0)).unwrap();
    assert_eq!((target.owner(), target.ships()), (Some(Side::A), 1));
    assert_eq!(board.planet_at(Coord::new(0, 0)).unwrap().ships(), 2);
}

#[test]
fn turn_limit_fires_on_the_thirtieth_turn() {
    let mut board = BoardState::uniform(1);
    for c in [(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)] {
        board.place(Coord::new(c.0, c.1), Some(Side::A), 1);
    }
    for c in [(3, 3), (2, 3), (1, 3)] {
        board.place(Coord::new(c.0, c.1), Some(Side::B), 1);
    }
    board.turn = 29;
    board.check_game_over();
    assert!(!board.is_game_over());
    assert_eq!(board.outcome(), None);

    board.end_turn();
    assert_eq!(board.turn, 30);
    assert_eq!(board.outcome(), Some(Outcome::Winner(Side::A)));
}

#[test]
fn rejected_attacks_leave_the_board_alone() {
    let mut board = duel();
    let snapshot = board.clone();
    let cases = [
        (Coord::new(0, 0), Coord::new(1, 1), 10, InvalidMove::InsufficientShips { requested: 10, available: 10 }),
        (Coord::new(3, 3), Coord::new(2, 2), 1, InvalidMove::NotOwner { coord: Coord::new(3, 3), side: Side::A }),
        (Coord::new(0, 0), Coord::new(1, 1), 0, InvalidMove::NoShips),
        (Coord::new(0, 0), Coord::new(4, 0), 1, InvalidMove::OutOfBounds(Coord::new(4, 0))),
    ];
    for (source, target, count, err) in cases {
        assert_eq!(board.apply_attack(source, target, count), Err(err));
        assert_eq!(board, snapshot);
    }
}

#[test]
fn defuzzify_with_no_activation_is_neutral() {
    assert_eq!(defuzzify(0.0, 0.0, 0.0), 0.5);
}

#[test]
fn border_size_one_value_floors_at_one() {
    let board = BoardState::uniform(1);
    for c in Coord::all().filter(|c| c.is_border()) {
        assert_eq!(calculate_strategic_value(board.planet_at(c).unwrap()), 1.0);
    }
}

#[test]
fn astar_costs_are_never_below_straight_line_manhattan() {
    for a in Coord::all() {
        for b in Coord::all() {
            let path = find_path(a, b);
            assert!(!path.is_empty());
            if a.x == b.x || a.y == b.y {
                assert_eq!(heuristic(a, b), path.cost);
            }
        }
    }
}

#[test]
fn search_is_deterministic_across_calls() {
    for seed in [1, 2, 3] {
        let board = initialize_board(Some(seed));
        for d in ALL_DIFFICULTIES {
            assert_eq!(
                get_best_move(&board, Side::A, d),
                get_best_move(&board, Side::A, d)
            );
        }
    }
}

#[test]
fn random_games_respect_capacity_and_terminate() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for seed in 0..10 {
        let mut board = initialize_board(Some(seed));
        while !board.is_game_over() {
            let side = board.current_side;
            if let Some(m) = random_move(&board, side, &mut rng) {
                board.apply_attack(m.source, m.target, m.ships).unwrap();
            }
            board.end_turn();
            for p in board.planets() {
                assert!(p.ships() <= p.max_ships(), "{:?}", p);
            }
        }
        assert!(board.turn <= 30);
    }
}

#[test]
fn searched_game_plays_to_completion() {
    let mut board = initialize_board(Some(8));
    while !board.is_game_over() {
        let side = board.current_side;
        if let Some(m) = get_best_move(&board, side, Difficulty::Easy) {
            board.apply_attack(m.source, m.target, m.ships).unwrap();
        }
        board.end_turn();
    }
    assert!(board.outcome().is_some());
}

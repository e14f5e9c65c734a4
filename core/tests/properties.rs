use tilelink_core::*;

const SEEDS: &[&str] = &[
    "SEED_2025-08-11",
    "SEED_2025-08-12",
    "SEED_2025-08-13",
    "SEED_2025-12-31",
    "PRACTICE_00c0ffee",
    "",
    "ünïcödé",
];

fn all_puzzles() -> impl Iterator<Item = GeneratedPuzzle> {
    SEEDS.iter().flat_map(|seed| {
        [Tier::Easy, Tier::Medium, Tier::Hard]
            .into_iter()
            .map(move |tier| PuzzleRequest::new(*seed, tier).generate(&EngineConfig::default()))
    })
}

#[test]
fn generation_is_deterministic() {
    for seed in SEEDS {
        for day in 0..7 {
            let a = generate_puzzle(seed, day);
            let b = generate_puzzle(seed, day);

            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a.board).unwrap(),
                serde_json::to_string(&b.board).unwrap()
            );
        }
    }
}

#[test]
fn solution_is_connected() {
    for puzzle in all_puzzles() {
        let solution = &puzzle.solution;

        assert!(
            check_connection(solution, solution.start(), solution.goal()).connected,
            "seed {:?}",
            puzzle.seed
        );
        assert!(connects_all_gems(solution), "seed {:?}", puzzle.seed);
    }
}

#[test]
fn boards_have_one_start_and_one_goal() {
    for puzzle in all_puzzles() {
        let board = &puzzle.board;
        let with_id = |id| {
            board
                .iter_positions()
                .filter(|&pos| board[pos].id == id)
                .collect::<Vec<_>>()
        };

        assert_eq!(with_id(TileId::Start), [board.start()]);
        assert_eq!(with_id(TileId::Goal), [board.goal()]);
        assert_eq!(board.validate(), Ok(()));
        assert!(board.start() != board.goal());
    }
}

#[test]
fn connection_steps_are_open_on_both_sides() {
    for puzzle in all_puzzles() {
        let board = &puzzle.solution;
        let connection = check_connection(board, board.start(), board.goal());

        for pair in connection.path.windows(2) {
            let dir = Direction::between(pair[0], pair[1]).expect("path cells are adjacent");
            assert!(board[pair[0]].is_open(dir));
            assert!(board[pair[1]].is_open(dir.opposite()));
        }
    }
}

#[test]
fn scrambled_board_is_a_permutation() {
    for puzzle in all_puzzles() {
        for pos in puzzle.board.iter_positions() {
            if !puzzle.solution.is_movable(pos) {
                assert_eq!(puzzle.board[pos].edges, puzzle.solution[pos].edges);
                assert_eq!(puzzle.board[pos].kind, puzzle.solution[pos].kind);
            }
        }
        assert_eq!(puzzle.board.total_gems(), puzzle.solution.total_gems());
        assert_eq!(puzzle.profile.total_gems, puzzle.board.total_gems());
    }
}

#[test]
fn fewer_moves_never_score_fewer_stars() {
    for puzzle in all_puzzles() {
        let profile = puzzle.profile;
        for gems in 0..=profile.total_gems {
            let mut last = u8::MAX;
            for moves in 0..30 {
                let stars = rate(true, moves, &profile, gems).stars;
                assert!(stars <= last);
                assert!(stars >= 1);
                last = stars;
            }
        }
    }
}

#[test]
fn swap_then_undo_restores_everything() {
    let config = EngineConfig::default();
    for puzzle in all_puzzles() {
        let mut engine = PlayEngine::new(puzzle, &config);
        let before = engine.clone();
        let movable = engine.board().movable_positions();

        for pair in movable.windows(2) {
            if engine.swap(pair[0], pair[1]) == Ok(SwapOutcome::Moved) {
                engine.undo().unwrap();
                assert_eq!(engine.board(), before.board());
                assert_eq!(engine.move_count(), before.move_count());
                assert_eq!(engine.gems_collected(), before.gems_collected());
                assert_eq!(engine.state(), before.state());
            }
            if engine.is_completed() {
                break;
            }
        }
    }
}

#[test]
fn playing_back_the_solution_completes_the_puzzle() {
    let config = EngineConfig::default();
    for puzzle in all_puzzles() {
        let solution = puzzle.solution.clone();
        let mut engine = PlayEngine::new(puzzle, &config);

        // selection sort towards the solution, one swap per misplaced tile
        let movable = engine.board().movable_positions();
        for (i, &target) in movable.iter().enumerate() {
            if engine.is_completed() {
                break;
            }
            if engine.board()[target].edges == solution[target].edges
                && engine.board()[target].has_gem() == solution[target].has_gem()
            {
                continue;
            }
            let source = movable[i + 1..].iter().copied().find(|&pos| {
                engine.board()[pos].edges == solution[target].edges
                    && engine.board()[pos].has_gem() == solution[target].has_gem()
            });
            if let Some(source) = source {
                engine.swap(target, source).unwrap();
            }
        }

        assert!(engine.is_completed(), "seed {:?}", engine.seed());
        assert!(engine.rating().stars >= 1);
    }
}

#[test]
fn broken_goal_snapshot_is_regenerated() {
    let config = EngineConfig::default();
    let request = PuzzleRequest::daily("2025-08-11", 1, 1);
    let mut saved = PlayEngine::start(&request, &config).to_saved_game();
    let goal = saved.board.goal();
    saved.board[goal].edges = Edges::empty();

    let (engine, outcome) = PlayEngine::resume(Some(&saved.to_json()), &request, &config);

    assert_eq!(outcome, ResumeOutcome::Regenerated);
    assert!(outcome.should_clear_saved());
    assert!(engine.board().endpoints_connectable());
    assert_eq!(engine.board(), &request.generate(&config).board);
}

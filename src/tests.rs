#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::board::Board;
    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::grid::Grid;
    use crate::heuristic;
    use crate::location::Location;
    use crate::logic;
    use crate::logic::Completion;
    use crate::propagate;
    use crate::reach;
    use crate::solver::{SearchStrategy, SolverConfig, SolverFailure};

    fn dims(x: usize, y: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(x).unwrap(), NonZero::new(y).unwrap())
    }

    #[test]
    fn remove_termini() {
        let board = BoardBuilder::with_dims(dims(5, 5))
            .add_termini('A', (Location(0, 0), Location(1, 4)))
            .pop_termini()
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), ".....
.....
.....
.....
.....
");
    }

    #[test]
    fn solve_most_basic() {
        // flow free classic pack level 1
        let board = BoardBuilder::with_dims(dims(5, 5))
            .add_termini('A', (Location(0, 0), Location(1, 4)))
            .add_termini('B', (Location(2, 0), Location(1, 3)))
            .add_termini('C', (Location(2, 1), Location(2, 4)))
            .add_termini('D', (Location(4, 0), Location(3, 3)))
            .add_termini('E', (Location(4, 1), Location(3, 4)))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "A.B.D
..C.E
.....
.B.D.
.ACE.
");

        let solved = board.solve().unwrap();
        assert_eq!(format!("{}", solved), "AbBdD
abCdE
abcde
aBcDe
aACEe
")
    }

    #[test]
    fn classic_level_needs_search_steps() {
        let board: Board = "A.B.D
..C.E
.....
.B.D.
.ACE.
".parse().unwrap();

        let (outcome, report) = board.solve_with(SolverConfig::default());
        let solved = outcome.unwrap();

        assert!(solved.is_solved());
        // propagation alone leaves the top-left region open on this level
        assert!(report.steps > 0);
        assert_eq!(format!("{}", solved), "AbBdD
abCdE
abcde
aBcDe
aACEe
");
    }

    #[test]
    fn parse_round_trip() {
        let text = "A.B.D
..C.E
.....
.B.D.
.ACE.
";
        let board: Board = text.parse().unwrap();
        assert_eq!(format!("{}", board), text);
    }

    #[test]
    fn underscores_parse_as_open_cells() {
        let board: Board = "A_A".parse().unwrap();
        assert_eq!(format!("{}", board), "A.A\n");
    }

    #[test]
    fn forced_corridor_solves_without_search() {
        let board: Board = "A.A".parse().unwrap();

        let (outcome, report) = board.solve_with(SolverConfig::default());
        assert_eq!(format!("{}", outcome.unwrap()), "AaA\n");
        assert_eq!(report.steps, 0);
    }

    #[test]
    fn presolved_board_reports_zero_steps() {
        let board: Board = "AA".parse().unwrap();
        assert!(board.is_solved());

        let (outcome, report) = board.solve_with(SolverConfig::default());
        assert_eq!(format!("{}", outcome.unwrap()), "AA\n");
        assert_eq!(report.steps, 0);
    }

    #[test]
    fn unsolvable_cross_fails_both_strategies() {
        // any path for one color walls off the other
        for strategy in [SearchStrategy::Propagating, SearchStrategy::Naive { seed: 0 }] {
            let board: Board = "AB
BA
".parse().unwrap();

            let (outcome, report) = board.solve_with(SolverConfig { strategy });
            assert!(matches!(outcome, Err(SolverFailure::Unsatisfiable)));
            // refuted at the root: every cell is a terminus touching only foreign colors
            assert_eq!(report.steps, 0);
        }
    }

    #[test]
    fn naive_finds_the_unique_solution() {
        let solution = "AaA
BbB
";

        for strategy in [SearchStrategy::Propagating, SearchStrategy::Naive { seed: 42 }] {
            let board: Board = "A.A
B.B
".parse().unwrap();

            let (outcome, _) = board.solve_with(SolverConfig { strategy });
            assert_eq!(format!("{}", outcome.unwrap()), solution);
        }
    }

    #[test]
    fn naive_runs_are_reproducible() {
        let steps_of = |seed| {
            let board: Board = "A.A
B.B
".parse().unwrap();
            let (outcome, report) = board.solve_with(SolverConfig {
                strategy: SearchStrategy::Naive { seed },
            });
            assert!(outcome.is_ok());
            report.steps
        };

        assert_eq!(steps_of(7), steps_of(7));
    }

    #[test]
    fn reject_out_of_bounds_termini() {
        let mut builder = BoardBuilder::with_dims(dims(5, 5));
        builder
            .add_termini('A', (Location(5, 0), Location(0, 1)))
            .add_termini('B', (Location(0, 0), Location(1, 0)));

        // the builder goes invalid on the first failure and ignores everything after
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        assert_eq!(
            builder.build().unwrap_err(),
            &vec![BuilderInvalidReason::FeatureOutOfBounds],
        );
    }

    #[test]
    fn reject_terminus_overlap() {
        let mut builder = BoardBuilder::with_dims(dims(5, 5));
        builder
            .add_termini('A', (Location(0, 0), Location(1, 0)))
            .add_termini('B', (Location(1, 0), Location(2, 0)));

        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::TerminusOverlap]);
    }

    #[test]
    fn reject_display_collisions() {
        let mut reused = BoardBuilder::with_dims(dims(5, 5));
        reused
            .add_termini('A', (Location(0, 0), Location(1, 0)))
            .add_termini('a', (Location(2, 0), Location(3, 0)));
        assert_eq!(reused.build().unwrap_err(), &vec![BuilderInvalidReason::DisplayCollision]);

        let mut marker = BoardBuilder::with_dims(dims(5, 5));
        marker.add_termini('.', (Location(0, 0), Location(1, 0)));
        assert_eq!(marker.build().unwrap_err(), &vec![BuilderInvalidReason::DisplayCollision]);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = "A.
A".parse::<Board>().unwrap_err();
        assert_eq!(err, vec![BuilderInvalidReason::NonRectangular]);

        let err = "".parse::<Board>().unwrap_err();
        assert_eq!(err, vec![BuilderInvalidReason::NonRectangular]);
    }

    #[test]
    fn parse_rejects_odd_terminus_counts() {
        let err = "AA
A.
".parse::<Board>().unwrap_err();
        assert_eq!(err, vec![BuilderInvalidReason::TerminusCount]);

        let err = "AB
BA
AB
".parse::<Board>().unwrap_err();
        assert_eq!(err, vec![BuilderInvalidReason::TerminusCount]);
    }

    #[test]
    fn completion_is_three_way() {
        let open: Board = "A.A".parse().unwrap();
        assert_eq!(logic::completion(&open.state, &open.start), Completion::Incomplete);

        let mut state = open.start.clone();
        state.set(Location(1, 0), 1);
        assert_eq!(logic::completion(&state, &open.start), Completion::Solved);

        // fully assigned, but no terminus touches its own color
        let cross: Board = "AB
BA
".parse().unwrap();
        assert_eq!(logic::completion(&cross.state, &cross.start), Completion::DeadEnd);
    }

    #[test]
    fn consistency_rejects_path_zigzag() {
        let board: Board = "A..
...
..A
".parse().unwrap();

        let mut state = board.start.clone();
        for location in [Location(1, 1), Location(1, 0), Location(0, 1), Location(2, 1)] {
            state.set(location, 1);
        }

        // (1, 1) is a path cell touching its own color three times
        assert!(!logic::is_consistent(&state, &board.start, &board.sources, false));
    }

    #[test]
    fn consistency_rejects_crowded_terminus() {
        let board: Board = "A..
...
..A
".parse().unwrap();

        let mut state = board.start.clone();
        state.set(Location(1, 0), 1);
        state.set(Location(0, 1), 1);

        // the terminus at (0, 0) touches its own color twice
        assert!(!logic::is_consistent(&state, &board.start, &board.sources, false));

        let mut fine = board.start.clone();
        fine.set(Location(1, 0), 1);
        assert!(logic::is_consistent(&fine, &board.start, &board.sources, true));
    }

    #[test]
    fn consistency_rejects_boxed_in_cells() {
        // an open cell whose neighbors are pairwise distinct colors
        let start = Grid::empty(dims(2, 2));
        let mut distinct = start.clone();
        distinct.set(Location(0, 0), 1);
        distinct.set(Location(1, 1), 2);
        assert!(!logic::is_consistent(&distinct, &start, &[], false));

        let mut same = start.clone();
        same.set(Location(0, 0), 1);
        same.set(Location(1, 1), 1);
        assert!(logic::is_consistent(&same, &start, &[], false));

        // an open cell with one color on more than two sides
        let ring_start = Grid::empty(dims(3, 3));
        let mut ring = ring_start.clone();
        for location in [Location(1, 0), Location(0, 1), Location(2, 1), Location(1, 2)] {
            ring.set(location, 1);
        }
        assert!(!logic::is_consistent(&ring, &ring_start, &[], false));

        ring.set(Location(1, 2), 0);
        assert!(logic::is_consistent(&ring, &ring_start, &[], false));
    }

    #[test]
    fn oracle_sees_walled_off_color() {
        let board: Board = "A.A
B.B
".parse().unwrap();

        let mut state = board.start.clone();
        assert!(reach::can_connect(&state, &board.sources[0]));

        // a foreign color in the corridor leaves no way across
        state.set(Location(1, 0), 2);
        assert!(!reach::can_connect(&state, &board.sources[0]));
        assert!(!logic::is_consistent(&state, &board.start, &board.sources, true));
    }

    #[test]
    fn completed_colors_stay_completed() {
        let board: Board = "A.A
B.B
".parse().unwrap();

        let mut state = board.start.clone();
        assert!(!reach::is_connected(&state, &board.sources[0]));
        assert_eq!(reach::completed_colors(&state, &board.sources), vec![]);

        state.set(Location(1, 0), 1);
        assert!(reach::is_connected(&state, &board.sources[0]));
        assert_eq!(reach::completed_colors(&state, &board.sources), vec![1]);

        // filling elsewhere never un-completes a color
        state.set(Location(1, 1), 2);
        assert_eq!(reach::completed_colors(&state, &board.sources), vec![1, 2]);
    }

    #[test]
    fn forced_closure_is_idempotent() {
        let board: Board = "A..A".parse().unwrap();

        let mut state = board.start.clone();
        propagate::forced_closure(&mut state, &board.sources);
        let once = state.snapshot();

        propagate::forced_closure(&mut state, &board.sources);
        assert_eq!(state.snapshot(), once);
        assert_eq!(logic::completion(&state, &board.start), Completion::Solved);
    }

    #[test]
    fn most_constrained_cell_wins() {
        let board: Board = "A.A
B.B
".parse().unwrap();

        // tie on candidate count, so the earlier cell in row-major order is chosen,
        // with its doubly-supported color ahead of the palette filler
        let candidate = heuristic::select_most_constrained(&board.start, &[1, 2], &[]).unwrap();
        assert_eq!(candidate.location, Location(1, 0));
        assert_eq!(candidate.colors, vec![1, 2]);
    }

    #[test]
    fn finished_colors_leave_candidate_lists() {
        let board: Board = "A.A
B.B
".parse().unwrap();

        let mut state = board.start.clone();
        state.set(Location(1, 0), 1);

        let done = reach::completed_colors(&state, &board.sources);
        assert_eq!(done, vec![1]);

        let candidate = heuristic::select_most_constrained(&state, &[1, 2], &done).unwrap();
        assert_eq!(candidate.location, Location(1, 1));
        assert_eq!(candidate.colors, vec![2]);
    }

    #[test]
    fn random_selection_is_seed_deterministic() {
        let board: Board = "A.A
B.B
".parse().unwrap();

        let pick = || {
            let mut rng = SmallRng::seed_from_u64(5);
            heuristic::select_random(&board.start, &[1, 2], &mut rng)
        };

        let first = pick().unwrap();
        assert_eq!(first, pick().unwrap());
        assert!(!first.colors.is_empty());
    }
}

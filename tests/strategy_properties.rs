use bounded_life::game_of_life::{CellOverride, StepEngine, StepStrategy};
use bounded_life::patterns::{decode, detect_format, encode, rle};
use bounded_life::{Grid, Offset, Pattern, PatternFormat, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(rng: &mut StdRng, width: usize, height: usize, density: f64) -> Grid {
    let mut grid = Grid::new(width, height).unwrap();
    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(density) {
                grid.set(row, col, true).unwrap();
            }
        }
    }
    grid
}

fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(width, height).unwrap();
    for &(row, col) in live {
        grid.set(row, col, true).unwrap();
    }
    grid
}

/// Board sizes that straddle the 64-bit word boundary
const SIZES: [(usize, usize); 6] = [(1, 1), (3, 7), (17, 5), (63, 4), (64, 3), (130, 9)];

#[test]
fn all_strategies_agree_on_random_boards() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for &(width, height) in &SIZES {
        let engines: Vec<StepEngine> = StepStrategy::ALL
            .iter()
            .map(|&strategy| StepEngine::new(width, height, strategy).unwrap())
            .collect();

        for _ in 0..5 {
            let density = rng.gen_range(0.1..0.6);
            let grid = random_grid(&mut rng, width, height, density);

            let expected = engines[0].advance_generations(&grid, 4).unwrap();
            for engine in &engines[1..] {
                assert_eq!(
                    engine.advance_generations(&grid, 4).unwrap(),
                    expected,
                    "{} disagrees with scalar on a {}x{} board",
                    engine.strategy(),
                    width,
                    height
                );
            }
        }
    }
}

#[test]
fn all_strategies_agree_with_an_override() {
    let mut rng = StdRng::seed_from_u64(42);
    let grid = random_grid(&mut rng, 70, 12, 0.35);

    for value in [true, false] {
        let cell_override = Some(CellOverride::new(6, 65, value));
        let expected = StepEngine::new(70, 12, StepStrategy::Scalar)
            .unwrap()
            .advance_with(&grid, cell_override)
            .unwrap();
        assert_eq!(expected.get(6, 65).unwrap(), value);

        for strategy in StepStrategy::ALL {
            let engine = StepEngine::new(70, 12, strategy).unwrap();
            assert_eq!(engine.advance_with(&grid, cell_override).unwrap(), expected);
        }
    }
}

#[test]
fn stepping_leaves_the_input_untouched() {
    let mut rng = StdRng::seed_from_u64(7);
    let grid = random_grid(&mut rng, 40, 40, 0.4);
    let snapshot = grid.clone();

    for strategy in StepStrategy::ALL {
        let engine = StepEngine::new(40, 40, strategy).unwrap();
        let _ = engine.advance(&grid).unwrap();
        assert_eq!(grid, snapshot);
    }
}

#[test]
fn changes_propagate_one_cell_per_generation() {
    let (width, height) = (30, 20);
    let mut rng = StdRng::seed_from_u64(99);
    let grid = random_grid(&mut rng, width, height, 0.3);

    // Corners and edges plus a few random cells
    let mut flips = vec![
        (0, 0),
        (0, width - 1),
        (height - 1, 0),
        (height - 1, width - 1),
        (0, 13),
        (9, 0),
    ];
    flips.extend((0..6).map(|_| (rng.gen_range(0..height), rng.gen_range(0..width))));

    for strategy in StepStrategy::ALL {
        let engine = StepEngine::new(width, height, strategy).unwrap();
        let before = engine.advance(&grid).unwrap();

        for &(row, col) in &flips {
            let mut flipped = grid.clone();
            flipped.toggle(row, col).unwrap();
            let after = engine.advance(&flipped).unwrap();

            for r in 0..height {
                for c in 0..width {
                    let near = r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1;
                    if !near {
                        assert_eq!(
                            before.get(r, c).unwrap(),
                            after.get(r, c).unwrap(),
                            "{}: flipping ({}, {}) changed ({}, {})",
                            strategy,
                            row,
                            col,
                            r,
                            c
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn corners_have_three_neighbors() {
    let topology = Topology::build(9, 6).unwrap();
    let last = topology.cell_count() - 1;
    assert_eq!(topology.neighbors(0).len(), 3);
    assert_eq!(topology.neighbors(8).len(), 3);
    assert_eq!(topology.neighbors(last).len(), 3);
    assert_eq!(topology.neighbors(10).len(), 8);

    // A block in the corner is stable without wraparound
    let block = grid_with(9, 6, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    for strategy in StepStrategy::ALL {
        let engine = StepEngine::new(9, 6, strategy).unwrap();
        assert_eq!(engine.advance(&block).unwrap(), block);
    }
}

#[test]
fn blinker_has_period_two() {
    let blinker = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    let vertical = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);

    for strategy in StepStrategy::ALL {
        let engine = StepEngine::new(5, 5, strategy).unwrap();
        assert_eq!(engine.advance(&blinker).unwrap(), vertical);
        assert_eq!(engine.advance_generations(&blinker, 2).unwrap(), blinker);
    }
}

#[test]
fn empty_board_saves_the_empty_rle_literal() {
    let grid = Grid::new(4, 4).unwrap();
    assert_eq!(encode(PatternFormat::Rle, &grid), rle::EMPTY_PATTERN);
    assert!(decode(PatternFormat::Rle, rle::EMPTY_PATTERN, Offset::default())
        .unwrap()
        .is_empty());
}

#[test]
fn rle_runs_decode_to_coordinates() {
    let pattern = decode(PatternFormat::Rle, "2o$2b2o!", Offset::default()).unwrap();
    assert_eq!(pattern.cells(), &[(0, 0), (0, 1), (1, 2), (1, 3)]);
}

#[test]
fn life106_round_trips_live_cells() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(&mut rng, 12, 9, 0.3);

    let text = encode(PatternFormat::Life106, &grid);
    assert_eq!(detect_format(&text, None).unwrap(), PatternFormat::Life106);

    let pattern = decode(PatternFormat::Life106, &text, Offset::default()).unwrap();
    assert_eq!(pattern, Pattern::from_grid(&grid));
}

#[test]
fn rle_round_trips_up_to_bounding_box() {
    let mut rng = StdRng::seed_from_u64(11);
    let grid = random_grid(&mut rng, 20, 14, 0.25);
    let original = Pattern::from_grid(&grid);
    let bbox = original.bounding_box().unwrap();

    let text = encode(PatternFormat::Rle, &grid);
    let decoded = decode(
        PatternFormat::Rle,
        &text,
        Offset::new(bbox.min_row, bbox.min_col),
    )
    .unwrap();

    let mut expected = original.cells().to_vec();
    let mut actual = decoded.cells().to_vec();
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}

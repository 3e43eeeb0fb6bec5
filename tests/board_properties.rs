//! Property tests for the board algorithms.

use proptest::prelude::*;
use terrablocks::{rotate_shape, Board, Piece, PieceKind, Position, TerrainType};

fn terrain_strategy() -> impl Strategy<Value = TerrainType> {
    prop_oneof![
        4 => Just(TerrainType::Empty),
        1 => Just(TerrainType::Forest),
        1 => Just(TerrainType::Mountain),
        1 => Just(TerrainType::Water),
        1 => Just(TerrainType::Path),
    ]
}

fn board_strategy() -> impl Strategy<Value = Board> {
    (1u32..=10, 1u32..=12).prop_flat_map(|(width, height)| {
        prop::collection::vec(terrain_strategy(), (width * height) as usize).prop_map(
            move |cells| {
                let mut board = Board::new(width, height);
                for (i, terrain) in cells.into_iter().enumerate() {
                    let x = (i as u32 % width) as i32;
                    let y = (i as u32 / width) as i32;
                    board.set_cell(x, y, terrain);
                }
                board
            },
        )
    })
}

fn shape_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(0u8..=3, cols), rows)
    })
}

/// Sizes of the Empty components, by flood fill over cardinal neighbors.
fn empty_component_sizes(board: &Board) -> Vec<(Position, usize)> {
    let mut seen = std::collections::HashSet::new();
    let mut components = Vec::new();
    for (start, terrain) in board.iter_cells() {
        if terrain != TerrainType::Empty || !seen.insert(start) {
            continue;
        }
        let mut stack = vec![start];
        let mut size = 0;
        while let Some(pos) = stack.pop() {
            size += 1;
            for next in pos.cardinal_adjacent_positions() {
                if board.get(next) == Some(TerrainType::Empty) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        components.push((start, size));
    }
    components
}

proptest! {
    #[test]
    fn bounds_match_dimensions(board in board_strategy(), x in -3i32..15, y in -3i32..15) {
        let inside = x >= 0 && y >= 0 && x < board.width as i32 && y < board.height as i32;
        prop_assert_eq!(board.is_position_valid(x, y), inside);
        prop_assert_eq!(board.get_cell(x, y).is_some(), inside);
    }

    #[test]
    fn valid_move_iff_all_cells_free(
        board in board_strategy(),
        kind in prop::sample::select(PieceKind::ALL.to_vec()),
        x in -2i32..10,
        y in -2i32..12,
    ) {
        let piece = Piece::new(kind, TerrainType::Forest);
        let origin = Position::new(x, y);
        let expected = piece
            .cells_at(origin)
            .all(|(pos, _)| board.get(pos) == Some(TerrainType::Empty));
        prop_assert_eq!(board.is_valid_move(&piece, origin), expected);
    }

    #[test]
    fn rotation_is_a_four_cycle(shape in shape_strategy()) {
        let once = rotate_shape(&shape);
        prop_assert_eq!(once.len(), shape[0].len());
        let four = rotate_shape(&rotate_shape(&rotate_shape(&once)));
        prop_assert_eq!(four, shape);
    }

    #[test]
    fn completed_lines_are_exactly_full_rows(board in board_strategy()) {
        let expected: Vec<usize> = (0..board.height as usize)
            .filter(|&y| {
                board
                    .row(y)
                    .is_some_and(|row| row.iter().all(|cell| *cell != TerrainType::Empty))
            })
            .collect();
        prop_assert_eq!(board.check_completed_lines(), expected);
    }

    #[test]
    fn conversion_touches_only_given_rows(board in board_strategy(), pick in any::<prop::sample::Index>()) {
        let row = pick.index(board.height as usize);
        let mut converted = board.clone();
        converted.convert_completed_lines_to_path(&[row]);

        for (pos, terrain) in converted.iter_cells() {
            if pos.y as usize == row {
                prop_assert_eq!(terrain, TerrainType::Path);
            } else {
                prop_assert_eq!(Some(terrain), board.get(pos));
            }
        }
    }

    #[test]
    fn hazards_replace_only_small_components(board in board_strategy()) {
        let components = empty_component_sizes(&board);
        let mut after = board.clone();
        let changed = after.identify_hazards();

        let small: usize = components.iter().filter(|(_, n)| *n <= 3).map(|(_, n)| n).sum();
        prop_assert_eq!(changed, small);

        for (start, size) in components {
            let expected = if size <= 3 { TerrainType::Hazard } else { TerrainType::Empty };
            prop_assert_eq!(after.get(start), Some(expected));
        }
        for (pos, terrain) in board.iter_cells() {
            if terrain != TerrainType::Empty {
                prop_assert_eq!(after.get(pos), Some(terrain));
            }
        }

        let settled = after.clone();
        prop_assert_eq!(after.identify_hazards(), 0);
        prop_assert_eq!(after, settled);
    }
}

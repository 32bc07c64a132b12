// Drives a board the way the UI does: pointer events, keys and timer ticks.

use std::collections::BTreeSet;
use std::time::Duration;

use stamp_life::patterns::project;
use stamp_life::{Board, BoardConfig, Cell, Command, GridSize, PatternLibrary, Viewport};
use tokio::runtime::Handle;

fn live(board: &Board) -> BTreeSet<(usize, usize)> {
    board.grid().live_cells().iter().map(|c| (c.col, c.row)).collect()
}

#[tokio::test]
async fn pointer_session_on_small_grid() {
    let config = BoardConfig {
        grid_size: GridSize::S50,
        ..Default::default()
    };
    let mut board = Board::new(config, Handle::current());
    let viewport: Viewport = board.viewport((0.0, 0.0));
    assert_eq!(viewport.cell_px, 12.0);

    // Pointer at pixel (125, 61) is cell (10, 5)
    let anchor = viewport.cell_at((125.0, 61.0));
    assert_eq!(anchor, Cell::new(10, 5));

    board.hover(anchor);
    board.click(anchor);
    assert_eq!(live(&board), BTreeSet::from([(10, 5)]));

    // Blinker built from three single-cell clicks
    board.click(Cell::new(9, 5));
    board.click(Cell::new(11, 5));
    board.step();
    assert_eq!(live(&board), BTreeSet::from([(10, 4), (10, 5), (10, 6)]));

    board.leave();
    assert!(board.highlighted().is_empty());
}

#[tokio::test]
async fn reflected_brush_preview_matches_stamp() {
    let mut board = Board::new(BoardConfig::default(), Handle::current());
    board.dispatch(Command::NextPattern).unwrap();
    board.dispatch(Command::Reflect).unwrap();

    let anchor = Cell::new(40, 40);
    board.hover(anchor);
    let preview: BTreeSet<_> = board.highlighted().iter().map(|c| (c.col, c.row)).collect();

    board.click(anchor);
    assert_eq!(live(&board), preview);
    // Reflected glider: (dx, dy) -> (2 - dx, dy)
    assert_eq!(
        preview,
        BTreeSet::from([(40, 40), (40, 39), (40, 38), (39, 38), (38, 39)])
    );
}

#[test]
fn added_pattern_stamps_half_turned() {
    // Offsets are placed at anchor - offset, so a raw add_pattern brush lands
    // rotated by 180 degrees relative to how its offsets read.
    let mut lib = PatternLibrary::builtin();
    let offsets = [(0, 0), (0, 1), (1, 1), (3, 0)];
    lib.add_pattern(&offsets).unwrap();

    let stamped: Vec<Cell> = project(Cell::new(20, 20), lib.current_offsets(), 50).collect();
    let left = stamped.iter().map(|c| c.col).min().unwrap();
    let top = stamped.iter().map(|c| c.row).min().unwrap();
    let normalized: BTreeSet<_> = stamped.iter().map(|c| (c.col - left, c.row - top)).collect();

    let mut half_turn = lib.current().clone();
    half_turn.rotate();
    half_turn.rotate();
    let expected: BTreeSet<_> = half_turn.offsets().iter().copied().collect();
    assert_eq!(normalized, expected);
}

#[tokio::test(start_paused = true)]
async fn speed_change_while_running() {
    let mut board = Board::new(BoardConfig::default(), Handle::current());
    board.set_speed(10.0);
    for c in [(4, 5), (5, 5), (6, 5)] {
        board.click(c.into());
    }

    board.start();
    tokio::time::sleep(Duration::from_millis(150)).await;
    board.set_speed(20.0);

    // The tick delivered at the old rate survives the retarget
    assert!(board.pump());
    tokio::time::sleep(Duration::from_millis(55)).await;
    assert!(board.pump());
    // 250 ms is only a tick at the new rate
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(board.pump());
    assert_eq!(board.generation(), 3);
    assert_eq!(live(&board), BTreeSet::from([(5, 4), (5, 5), (5, 6)]));

    board.dispatch(Command::Reset).unwrap();
    assert!(!board.is_running());
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!board.pump());
}

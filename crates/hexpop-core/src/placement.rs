//! Placement resolution: turning a contact point into a board cell.
//!
//! Raw nearest-cell rounding of the contact point frequently lands outside
//! the playable region, because the contact point comes from circle overlap
//! rather than cell-center proximity. The resolver first clamps the position
//! into the playfield rectangle, rounds to the nearest cell, and then walks
//! the address sideways a bounded number of steps until it lands in the
//! region. Exhausting the bound means the region or pixel bounds are
//! malformed and is surfaced as a fatal error, never swallowed.

use crate::board::Board;
use crate::game::EngineError;
use crate::hex::HexCoord;
use crate::layout::Point;

/// How many lateral shifts the resolver may try before giving up.
///
/// A policy bound, not a mathematical one: two shifts are enough for every
/// region shape produced from rectangular extents, and anything needing more
/// indicates a malformed board.
pub const MAX_SHIFT_ATTEMPTS: u32 = 2;

/// Resolve the resting cell for a bubble that touched the grid at `contact`.
///
/// Fails with [`EngineError::UnresolvableAddress`] if no valid cell is found
/// within the shift bound; the board is never mutated here.
pub fn resolve(board: &Board, contact: Point) -> Result<HexCoord, EngineError> {
    let radius = board.cell_radius();
    let clamped = Point::new(
        contact.x.clamp(radius, board.width() - radius),
        contact.y.clamp(radius, board.height() - radius),
    );

    let mut candidate = board.address_nearest_pixel(clamped);
    if board.contains(candidate) {
        return Ok(candidate);
    }

    // Shift toward the board center so recovery never walks off the far edge
    let shift = if clamped.x > board.width() / 2.0 { -1 } else { 1 };
    for _ in 0..MAX_SHIFT_ATTEMPTS {
        candidate = candidate.shifted_column(shift);
        if board.contains(candidate) {
            return Ok(candidate);
        }
    }

    Err(EngineError::UnresolvableAddress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;
    use crate::layout::HexOrientation;

    fn board_with_voids(voids: Vec<HexCoord>) -> Board {
        let mut config = BoardConfig::empty(
            400.0,
            400.0,
            Point::new(20.0, 20.0),
            HexOrientation::Pointy,
        );
        config.voids = voids;
        Board::new(&config).unwrap()
    }

    #[test]
    fn test_in_region_contact_needs_no_shift() {
        let board = board_with_voids(vec![]);
        let center = board.layout().hex_to_pixel(HexCoord::new(3, 2));
        assert_eq!(resolve(&board, center).unwrap(), HexCoord::new(3, 2));
    }

    #[test]
    fn test_overshot_contact_is_clamped_first() {
        let board = board_with_voids(vec![]);
        // Past the left edge in the same tick as the collision
        let resolved = resolve(&board, Point::new(-30.0, 80.0)).unwrap();
        assert!(board.contains(resolved));
    }

    #[test]
    fn test_void_recovers_on_first_shift() {
        let board = board_with_voids(vec![HexCoord::new(2, 2)]);
        let contact = board_with_voids(vec![])
            .layout()
            .hex_to_pixel(HexCoord::new(2, 2));
        // Left half of the board, so the shift direction is +1
        assert_eq!(resolve(&board, contact).unwrap(), HexCoord::new(3, 2));
    }

    #[test]
    fn test_void_recovers_on_second_shift() {
        let board = board_with_voids(vec![HexCoord::new(2, 2), HexCoord::new(3, 2)]);
        let contact = board_with_voids(vec![])
            .layout()
            .hex_to_pixel(HexCoord::new(2, 2));
        assert_eq!(resolve(&board, contact).unwrap(), HexCoord::new(4, 2));
    }

    #[test]
    fn test_third_shift_is_unresolvable() {
        let board = board_with_voids(vec![
            HexCoord::new(2, 2),
            HexCoord::new(3, 2),
            HexCoord::new(4, 2),
        ]);
        let contact = board_with_voids(vec![])
            .layout()
            .hex_to_pixel(HexCoord::new(2, 2));
        assert!(matches!(
            resolve(&board, contact),
            Err(EngineError::UnresolvableAddress)
        ));
    }

    #[test]
    fn test_right_half_shifts_left() {
        let board = board_with_voids(vec![HexCoord::new(8, 2)]);
        let contact = board_with_voids(vec![])
            .layout()
            .hex_to_pixel(HexCoord::new(8, 2));
        assert_eq!(resolve(&board, contact).unwrap(), HexCoord::new(7, 2));
    }
}

//! Connected-component matching over the hex adjacency graph.
//!
//! Given a newly placed bubble, finds every same-colored bubble reachable
//! through same-colored neighbors. The adjacency graph is undirected and
//! cyclic, so traversal keeps an explicit visited set; a work list bounds the
//! stack regardless of board size.

use crate::board::Board;
use crate::hex::HexCoord;
use std::collections::{HashSet, VecDeque};

/// Smallest connected group that gets cleared
pub const MIN_MATCH_SIZE: usize = 3;

/// The connected set of bubbles matching the color at `start`.
///
/// Includes `start` itself. Returns an empty set if the start cell is empty,
/// so evaluating a stale address is harmless.
pub fn find_color_group(board: &Board, start: HexCoord) -> HashSet<HexCoord> {
    let Some(color) = board.occupant_at(start) else {
        return HashSet::new();
    };

    let mut group = HashSet::new();
    let mut frontier = VecDeque::new();
    group.insert(start);
    frontier.push_back(start);

    while let Some(address) = frontier.pop_front() {
        for neighbor in address.neighbors() {
            if board.occupant_at(neighbor) == Some(color) && group.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    group
}

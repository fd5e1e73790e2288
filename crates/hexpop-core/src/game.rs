//! The simulation control surface.
//!
//! [`Simulation`] is what the external game loop talks to: it owns the board
//! and the single in-flight bubble, accepts shoot commands, advances the
//! world one tick at a time, and reports what happened through
//! [`TickEvent`]s. Everything is synchronous and single-threaded; a tick runs
//! to completion before the next command is accepted.

use crate::board::{Board, BoardConfig, BoardSnapshot, BubbleColor};
use crate::bubble::{MovingBubble, Wall};
use crate::hex::HexCoord;
use crate::layout::Point;
use crate::matching::{find_color_group, MIN_MATCH_SIZE};
use crate::placement;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far above the bottom edge the launcher sits, in bubble radii
const LAUNCH_CLEARANCE: f64 = 1.0;

/// Errors surfaced by the engine.
///
/// Everything here is fatal for the current tick: the board is never left
/// partially mutated. A missed shot is a normal outcome reported through
/// [`TickEvent::Missed`], not an error.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum EngineError {
    /// Malformed board setup, rejected at construction
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Placement targeted an address outside the playable region
    #[error("address {0:?} is outside the playable region")]
    InvalidAddress(HexCoord),

    /// Placement targeted a cell that already holds a bubble
    #[error("cell {0:?} is already occupied")]
    CellOccupied(HexCoord),

    /// Placement recovery exhausted its shift bound
    #[error("placement recovery could not find a valid cell")]
    UnresolvableAddress,
}

/// What happened during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// The in-flight bubble reflected off a wall
    Bounced {
        /// Which wall
        edge: Wall,
    },

    /// The shot came to rest in a cell
    Placed {
        address: HexCoord,
        color: BubbleColor,
    },

    /// A connected group of three or more was removed
    Cleared {
        /// The removed addresses, in ascending order
        addresses: Vec<HexCoord>,
        color: BubbleColor,
    },

    /// The shot fell out of the bottom without touching the grid
    Missed,
}

/// The tick-driven bubble shooter simulation.
///
/// Owns the board exclusively; the caller drives it with
/// [`Simulation::shoot`] and [`Simulation::tick`] and reads results back
/// through [`Simulation::board_snapshot`] and [`Simulation::last_event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    board: Board,
    active: Option<MovingBubble>,
    next_color: BubbleColor,
    launch_position: Point,
    last_event: Option<TickEvent>,
}

impl Simulation {
    /// Create a simulation from a board configuration.
    ///
    /// The first shot color is drawn from the colors present on the board.
    pub fn new(config: &BoardConfig) -> Result<Self, EngineError> {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    /// Create a simulation with a provided RNG, for deterministic setups
    pub fn new_with_rng<R: Rng>(config: &BoardConfig, rng: &mut R) -> Result<Self, EngineError> {
        let board = Board::new(config)?;
        let radius = board.cell_radius();
        let launch_position = Point::new(
            board.width() / 2.0,
            board.height() - radius * LAUNCH_CLEARANCE,
        );
        let next_color = Self::draw_color(&board, rng);
        Ok(Self {
            board,
            active: None,
            next_color,
            launch_position,
            last_event: None,
        })
    }

    fn draw_color<R: Rng>(board: &Board, rng: &mut R) -> BubbleColor {
        let present = board.present_colors();
        present.choose(rng).copied().unwrap_or(BubbleColor::Red)
    }

    /// The board, read-only
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The bubble currently in flight, if any
    pub fn active_bubble(&self) -> Option<&MovingBubble> {
        self.active.as_ref()
    }

    /// The color the next shot will use
    pub fn next_color(&self) -> BubbleColor {
        self.next_color
    }

    /// Override the queued color. Lets the controller drive a preview UI or
    /// pin colors in tests.
    pub fn set_next_color(&mut self, color: BubbleColor) {
        self.next_color = color;
    }

    /// Where shots are launched from
    pub fn launch_position(&self) -> Point {
        self.launch_position
    }

    /// The final event of the most recent tick, or `None` if the last tick
    /// was quiet
    pub fn last_event(&self) -> Option<&TickEvent> {
        self.last_event.as_ref()
    }

    /// Read-only snapshot of the board occupancy
    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Launch the queued bubble.
    ///
    /// Silently ignored while a shot is already in flight; one bubble at a
    /// time is the backpressure policy, not an error. The next color is
    /// redrawn from the colors still present on the board.
    pub fn shoot(&mut self, angle_degrees: f64, speed: f64) {
        self.shoot_with_rng(angle_degrees, speed, &mut rand::thread_rng());
    }

    /// [`Simulation::shoot`] with a provided RNG for the color redraw
    pub fn shoot_with_rng<R: Rng>(&mut self, angle_degrees: f64, speed: f64, rng: &mut R) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(MovingBubble::launch(
            self.launch_position,
            angle_degrees,
            speed,
            self.board.cell_radius(),
            self.next_color,
        ));
        self.next_color = Self::draw_color(&self.board, rng);
    }

    /// Advance the simulation by an elapsed time.
    ///
    /// Moves the in-flight bubble, handles wall bounces, and on grid contact
    /// resolves placement and evaluates matches. Returns every event the tick
    /// produced, in order. Fatal errors abort the tick with the board
    /// unchanged and the bubble still in flight.
    pub fn tick(&mut self, elapsed_seconds: f64) -> Result<Vec<TickEvent>, EngineError> {
        let mut events = Vec::new();

        let Some(mut bubble) = self.active.take() else {
            self.last_event = None;
            return Ok(events);
        };

        bubble.advance(elapsed_seconds);
        for wall in bubble.bounce_walls(self.board.width()) {
            events.push(TickEvent::Bounced { edge: wall });
        }

        if bubble.is_below(self.board.height()) {
            bubble.discard();
            events.push(TickEvent::Missed);
        } else if self.touches_grid(&bubble) {
            match self.commit(&mut bubble, &mut events) {
                Ok(()) => {}
                Err(err) => {
                    // Nothing was mutated; keep the bubble so state stays
                    // consistent for inspection
                    self.active = Some(bubble);
                    self.last_event = None;
                    return Err(err);
                }
            }
        } else {
            self.active = Some(bubble);
        }

        self.last_event = events.last().cloned();
        Ok(events)
    }

    /// First occupied cell the bubble overlaps, scanning in ascending address
    /// order so the outcome is reproducible for identical inputs.
    fn touches_grid(&self, bubble: &MovingBubble) -> bool {
        let cell_radius = self.board.cell_radius();
        let reach = bubble.radius() + cell_radius;
        for (address, _) in self.board.occupied() {
            let center = self.board.layout().hex_to_pixel(address);
            // Cheap axis-aligned rejection before the exact circle test
            if (center.x - bubble.position().x).abs() > reach
                || (center.y - bubble.position().y).abs() > reach
            {
                continue;
            }
            if bubble.overlaps_circle(center, cell_radius) {
                return true;
            }
        }
        false
    }

    /// Resolve the resting cell, place the bubble, and clear any match.
    ///
    /// Resolution happens before any mutation, so an unresolvable address
    /// leaves the board untouched. Clearing is atomic: the whole group goes
    /// in one pass with no re-evaluation mid-removal.
    fn commit(
        &mut self,
        bubble: &mut MovingBubble,
        events: &mut Vec<TickEvent>,
    ) -> Result<(), EngineError> {
        let address = placement::resolve(&self.board, bubble.position())?;
        let color = bubble.color();
        self.board.place(address, color)?;
        bubble.commit_at(self.board.layout().hex_to_pixel(address));
        events.push(TickEvent::Placed { address, color });

        let group = find_color_group(&self.board, address);
        if group.len() >= MIN_MATCH_SIZE {
            let mut addresses: Vec<HexCoord> = group.into_iter().collect();
            addresses.sort();
            for member in &addresses {
                self.board.remove(*member);
            }
            events.push(TickEvent::Cleared { addresses, color });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HexOrientation;
    use rand::rngs::mock::StepRng;

    fn sim_with(bubbles: Vec<(HexCoord, BubbleColor)>) -> Simulation {
        let mut config = BoardConfig::empty(
            400.0,
            400.0,
            Point::new(20.0, 20.0),
            HexOrientation::Pointy,
        );
        config.bubbles = bubbles;
        Simulation::new_with_rng(&config, &mut StepRng::new(0, 1)).unwrap()
    }

    #[test]
    fn test_launch_position_is_bottom_center() {
        let sim = sim_with(vec![]);
        assert_eq!(sim.launch_position(), Point::new(200.0, 380.0));
    }

    #[test]
    fn test_next_color_drawn_from_present_colors() {
        let sim = sim_with(vec![
            (HexCoord::new(1, 0), BubbleColor::Green),
            (HexCoord::new(2, 0), BubbleColor::Green),
        ]);
        assert_eq!(sim.next_color(), BubbleColor::Green);
    }

    #[test]
    fn test_shoot_spawns_one_bubble() {
        let mut sim = sim_with(vec![]);
        sim.set_next_color(BubbleColor::Blue);
        sim.shoot_with_rng(90.0, 600.0, &mut StepRng::new(0, 1));

        let bubble = sim.active_bubble().expect("bubble should be airborne");
        assert_eq!(bubble.color(), BubbleColor::Blue);
        assert_eq!(bubble.position(), Point::new(200.0, 380.0));
    }

    #[test]
    fn test_shoot_while_airborne_is_a_no_op() {
        let mut sim = sim_with(vec![]);
        sim.set_next_color(BubbleColor::Blue);
        sim.shoot_with_rng(90.0, 600.0, &mut StepRng::new(0, 1));
        let first = sim.active_bubble().cloned().unwrap();

        sim.shoot_with_rng(45.0, 900.0, &mut StepRng::new(0, 1));
        assert_eq!(sim.active_bubble().cloned().unwrap(), first);
    }

    #[test]
    fn test_tick_without_bubble_is_quiet() {
        let mut sim = sim_with(vec![(HexCoord::new(1, 0), BubbleColor::Red)]);
        let events = sim.tick(1.0 / 60.0).unwrap();
        assert!(events.is_empty());
        assert_eq!(sim.last_event(), None);
        assert_eq!(sim.board().bubble_count(), 1);
    }

    #[test]
    fn test_unresolvable_placement_leaves_board_untouched() {
        // Wall off the landing row so the resolver runs out of shifts
        let mut config = BoardConfig::empty(
            400.0,
            400.0,
            Point::new(20.0, 20.0),
            HexOrientation::Pointy,
        );
        config.bubbles = vec![(HexCoord::new(4, 1), BubbleColor::Red)];
        config.voids = vec![
            HexCoord::new(3, 2),
            HexCoord::new(4, 2),
            HexCoord::new(5, 2),
            HexCoord::new(6, 2),
        ];
        let mut sim = Simulation::new_with_rng(&config, &mut StepRng::new(0, 1)).unwrap();
        let snapshot = sim.board_snapshot();

        // Park a bubble right under the occupied cell, inside the voided row
        sim.set_next_color(BubbleColor::Blue);
        sim.shoot_with_rng(90.0, 600.0, &mut StepRng::new(0, 1));
        let mut result = Ok(Vec::new());
        for _ in 0..120 {
            result = sim.tick(1.0 / 60.0);
            if result.is_err() {
                break;
            }
        }

        assert!(matches!(result, Err(EngineError::UnresolvableAddress)));
        assert_eq!(sim.board_snapshot(), snapshot);
        assert!(sim.active_bubble().is_some());
    }
}

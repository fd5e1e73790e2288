//! The single in-flight projectile.
//!
//! A [`MovingBubble`] integrates its pixel position each tick, reflects off
//! the top and side walls, and reports when it has fallen out of the bottom.
//! Committing it into a board cell is the placement resolver's job; once
//! committed or discarded it never advances again.

use crate::board::BubbleColor;
use crate::layout::Point;
use serde::{Deserialize, Serialize};

/// Which wall a bubble bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Left,
    Right,
}

/// Lifecycle of a shot. `Committed` and `Discarded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FlightState {
    /// Still traveling
    #[default]
    Airborne,
    /// Resting in a board cell
    Committed,
    /// Fell out of the bottom without touching the grid
    Discarded,
}

/// The in-flight projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBubble {
    position: Point,
    velocity: Point,
    radius: f64,
    color: BubbleColor,
    state: FlightState,
}

impl MovingBubble {
    /// Create a bubble with an explicit velocity vector
    pub fn new(position: Point, velocity: Point, radius: f64, color: BubbleColor) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            state: FlightState::Airborne,
        }
    }

    /// Launch a bubble at an angle.
    ///
    /// Angles are in degrees with 0 pointing right and 90 pointing straight
    /// up; the y axis of pixel space points down, so the vertical velocity
    /// component is negated.
    pub fn launch(position: Point, angle_degrees: f64, speed: f64, radius: f64, color: BubbleColor) -> Self {
        let angle = angle_degrees.to_radians();
        let velocity = Point::new(speed * angle.cos(), -speed * angle.sin());
        Self::new(position, velocity, radius, color)
    }

    /// Current pixel position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current velocity in pixels per second
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Bubble radius in pixels
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Bubble color
    pub fn color(&self) -> BubbleColor {
        self.color
    }

    /// Current flight state
    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Integrate position over an elapsed time. Does nothing once the bubble
    /// has reached a terminal state.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        if self.state != FlightState::Airborne {
            return;
        }
        self.position.x += self.velocity.x * elapsed_seconds;
        self.position.y += self.velocity.y * elapsed_seconds;
    }

    /// Reflect off the top and side walls of a playfield rectangle.
    ///
    /// Crossing an edge inverts the velocity component orthogonal to it and
    /// mirrors the overshoot back inside, so a single tick cannot leave the
    /// bubble stuck beyond a wall. Returns the walls hit this tick, top
    /// first.
    pub fn bounce_walls(&mut self, field_width: f64) -> Vec<Wall> {
        let mut walls = Vec::new();
        if self.state != FlightState::Airborne {
            return walls;
        }

        if self.position.y - self.radius < 0.0 {
            self.position.y = 2.0 * self.radius - self.position.y;
            self.velocity.y = -self.velocity.y;
            walls.push(Wall::Top);
        }

        if self.position.x - self.radius < 0.0 {
            self.position.x = 2.0 * self.radius - self.position.x;
            self.velocity.x = -self.velocity.x;
            walls.push(Wall::Left);
        } else if self.position.x + self.radius > field_width {
            self.position.x = 2.0 * (field_width - self.radius) - self.position.x;
            self.velocity.x = -self.velocity.x;
            walls.push(Wall::Right);
        }

        walls
    }

    /// Whether the bubble has fallen entirely below the playfield
    pub fn is_below(&self, field_height: f64) -> bool {
        self.position.y - self.radius > field_height
    }

    /// Exact circle-circle overlap test against a resting bubble
    pub fn overlaps_circle(&self, center: Point, other_radius: f64) -> bool {
        self.position.distance_to(&center) <= self.radius + other_radius
    }

    /// Snap to a cell center and stop. Terminal.
    pub fn commit_at(&mut self, center: Point) {
        self.position = center;
        self.velocity = Point::new(0.0, 0.0);
        self.state = FlightState::Committed;
    }

    /// Mark the shot as a miss. Terminal.
    pub fn discard(&mut self) {
        self.velocity = Point::new(0.0, 0.0);
        self.state = FlightState::Discarded;
    }
}

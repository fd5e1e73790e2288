//! Pixel-space interpretation of hex coordinates.
//!
//! A [`HexLayout`] pairs an orientation matrix with a cell size and a pixel
//! origin, and performs the cube↔pixel conversions. The orientation is chosen
//! once at board construction and never changes.

use crate::hex::{FractionalHex, HexCoord};
use serde::{Deserialize, Serialize};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point in pixel space. The y axis points down, matching screen
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Orientation matrix for a hex layout: forward coefficients f0..f3 map cube
/// coordinates to pixels, backward coefficients b0..b3 invert the mapping,
/// and the start angle positions the first polygon corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub f0: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
    pub start_angle: f64,
}

/// Pointy-top orientation (hexes have a vertex at the top)
pub const POINTY: Orientation = Orientation {
    f0: SQRT_3,
    f1: SQRT_3 / 2.0,
    f2: 0.0,
    f3: 3.0 / 2.0,
    b0: SQRT_3 / 3.0,
    b1: -1.0 / 3.0,
    b2: 0.0,
    b3: 2.0 / 3.0,
    start_angle: 0.5,
};

/// Flat-top orientation (hexes have an edge at the top)
pub const FLAT: Orientation = Orientation {
    f0: 3.0 / 2.0,
    f1: 0.0,
    f2: SQRT_3 / 2.0,
    f3: SQRT_3,
    b0: 2.0 / 3.0,
    b1: 0.0,
    b2: -1.0 / 3.0,
    b3: SQRT_3 / 3.0,
    start_angle: 0.0,
};

/// Which way the hexes point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexOrientation {
    /// Vertex at the top
    #[default]
    Pointy,
    /// Edge at the top
    Flat,
}

impl HexOrientation {
    /// The orientation matrix for this variant
    pub const fn matrix(&self) -> &'static Orientation {
        match self {
            HexOrientation::Pointy => &POINTY,
            HexOrientation::Flat => &FLAT,
        }
    }
}

/// The pixel-space interpretation applied to hex coordinates: orientation,
/// cell size (x/y extents), and the pixel position of axial (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    /// Pointy-top or flat-top
    pub orientation: HexOrientation,
    /// Cell extents in pixels
    pub size: Point,
    /// Pixel position of the center of cell (0, 0)
    pub origin: Point,
}

impl HexLayout {
    /// Create a new layout
    pub const fn new(orientation: HexOrientation, size: Point, origin: Point) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    /// Pixel position of a cell's center
    pub fn hex_to_pixel(&self, coord: HexCoord) -> Point {
        let m = self.orientation.matrix();
        let q = coord.q as f64;
        let r = coord.r as f64;
        Point {
            x: (m.f0 * q + m.f1 * r) * self.size.x + self.origin.x,
            y: (m.f2 * q + m.f3 * r) * self.size.y + self.origin.y,
        }
    }

    /// Fractional cube coordinate of a pixel position, before rounding
    pub fn pixel_to_fractional(&self, point: Point) -> FractionalHex {
        let m = self.orientation.matrix();
        let px = (point.x - self.origin.x) / self.size.x;
        let py = (point.y - self.origin.y) / self.size.y;
        FractionalHex::new(m.b0 * px + m.b1 * py, m.b2 * px + m.b3 * py)
    }

    /// The cell whose center is nearest to a pixel position
    pub fn pixel_to_hex(&self, point: Point) -> HexCoord {
        self.pixel_to_fractional(point).round()
    }

    /// The six polygon corners of a cell, in pixel coordinates.
    ///
    /// Intended for external renderers drawing cell outlines; the engine
    /// itself only uses cell centers.
    pub fn polygon_corners(&self, coord: HexCoord) -> [Point; 6] {
        let center = self.hex_to_pixel(coord);
        let mut corners = [Point::default(); 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            let offset = self.corner_offset(i);
            *corner = Point::new(center.x + offset.x, center.y + offset.y);
        }
        corners
    }

    fn corner_offset(&self, corner: usize) -> Point {
        let m = self.orientation.matrix();
        let angle = 2.0 * std::f64::consts::PI * (m.start_angle - corner as f64) / 6.0;
        Point::new(self.size.x * angle.cos(), self.size.y * angle.sin())
    }
}

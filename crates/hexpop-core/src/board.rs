//! Board representation: the playable hex region and its occupants.
//!
//! This module contains:
//! - Bubble colors
//! - Board configuration and validation
//! - The board grid with occupancy queries and mutation
//! - A serializable read-only snapshot for external renderers
//!
//! The board is the single source of truth for placed bubbles. It is mutated
//! only by placement (committing a shot) and matching (clearing a group);
//! cells are never deleted, a removed bubble simply leaves its cell empty.

use crate::game::EngineError;
use crate::hex::HexCoord;
use crate::layout::{HexLayout, HexOrientation, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BubbleColor {
    /// All colors
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Red,
        BubbleColor::Orange,
        BubbleColor::Yellow,
        BubbleColor::Green,
        BubbleColor::Blue,
        BubbleColor::Purple,
    ];

    /// CSS-style color name, for renderers
    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleColor::Red => "red",
            BubbleColor::Orange => "orange",
            BubbleColor::Yellow => "yellow",
            BubbleColor::Green => "green",
            BubbleColor::Blue => "blue",
            BubbleColor::Purple => "purple",
        }
    }
}

/// Configuration for building a board.
///
/// An explicit immutable value handed to the engine at construction; the
/// engine holds no ambient configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Playfield width in pixels
    pub width: f64,
    /// Playfield height in pixels
    pub height: f64,
    /// Cell extents in pixels
    pub cell_size: Point,
    /// Pointy-top or flat-top hexes
    pub orientation: HexOrientation,
    /// Initial occupancy, already parsed from whatever map format the caller
    /// uses
    pub bubbles: Vec<(HexCoord, BubbleColor)>,
    /// Addresses excluded from the playable region, for custom-shaped maps
    pub voids: Vec<HexCoord>,
}

impl BoardConfig {
    /// A config with the given extents and no bubbles or voids
    pub fn empty(width: f64, height: f64, cell_size: Point, orientation: HexOrientation) -> Self {
        Self {
            width,
            height,
            cell_size,
            orientation,
            bubbles: Vec::new(),
            voids: Vec::new(),
        }
    }
}

/// Read-only view of the board for external consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Playfield width in pixels
    pub width: f64,
    /// Playfield height in pixels
    pub height: f64,
    /// Occupied cells in ascending address order
    pub bubbles: Vec<(HexCoord, BubbleColor)>,
}

impl BoardSnapshot {
    /// Serialize to JSON for a renderer or UI layer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The board grid.
///
/// Owns the mapping of address to occupant, restricted to the finite playable
/// region. Invariant: the mapping contains exactly the region's addresses,
/// so every occupied address is a member of the region by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    layout: HexLayout,
    cells: HashMap<HexCoord, Option<BubbleColor>>,
    width: f64,
    height: f64,
}

impl Board {
    /// Build a board from a validated configuration.
    ///
    /// The playable region is every address whose cell center fits inside the
    /// playfield rectangle with a one-cell margin, minus the configured voids.
    /// Malformed input fails with [`EngineError::InvalidConfiguration`].
    pub fn new(config: &BoardConfig) -> Result<Self, EngineError> {
        if config.width <= 0.0 || config.height <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "playfield extents must be positive, got {}x{}",
                config.width, config.height
            )));
        }
        if config.cell_size.x <= 0.0 || config.cell_size.y <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "cell size must be positive, got {}x{}",
                config.cell_size.x, config.cell_size.y
            )));
        }

        let layout = HexLayout::new(
            config.orientation,
            config.cell_size,
            Point::new(config.cell_size.x, config.cell_size.y),
        );

        let mut cells = HashMap::new();
        let span = ((config.width / config.cell_size.x).ceil()
            + (config.height / config.cell_size.y).ceil()) as i32
            + 2;
        for q in -span..=span {
            for r in -span..=span {
                let coord = HexCoord::new(q, r);
                let center = layout.hex_to_pixel(coord);
                if center.x >= config.cell_size.x
                    && center.x <= config.width - config.cell_size.x
                    && center.y >= config.cell_size.y
                    && center.y <= config.height - config.cell_size.y
                {
                    cells.insert(coord, None);
                }
            }
        }

        if cells.is_empty() {
            return Err(EngineError::InvalidConfiguration(format!(
                "no cell fits a {}x{} playfield with cell size {}x{}",
                config.width, config.height, config.cell_size.x, config.cell_size.y
            )));
        }

        for void in &config.voids {
            if cells.remove(void).is_none() {
                return Err(EngineError::InvalidConfiguration(format!(
                    "void {:?} is outside the playable region",
                    void
                )));
            }
        }

        let mut board = Self {
            layout,
            cells,
            width: config.width,
            height: config.height,
        };

        for &(address, color) in &config.bubbles {
            if !board.contains(address) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "initial bubble at {:?} is outside the playable region",
                    address
                )));
            }
            if board.occupant_at(address).is_some() {
                return Err(EngineError::InvalidConfiguration(format!(
                    "duplicate initial bubble at {:?}",
                    address
                )));
            }
            board.cells.insert(address, Some(color));
        }

        Ok(board)
    }

    /// The layout used for all pixel conversions on this board
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Playfield width in pixels
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Playfield height in pixels
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Radius of a resting bubble, derived from the cell size
    pub fn cell_radius(&self) -> f64 {
        self.layout.size.x
    }

    /// Whether an address is within the playable region
    pub fn contains(&self, address: HexCoord) -> bool {
        self.cells.contains_key(&address)
    }

    /// The occupant of a cell, if any
    pub fn occupant_at(&self, address: HexCoord) -> Option<BubbleColor> {
        self.cells.get(&address).copied().flatten()
    }

    /// Place a bubble in a cell.
    ///
    /// Failing here means the placement resolver produced a bad address,
    /// which is an internal invariant violation rather than a recoverable
    /// user error.
    pub fn place(&mut self, address: HexCoord, color: BubbleColor) -> Result<(), EngineError> {
        let cell = self
            .cells
            .get_mut(&address)
            .ok_or(EngineError::InvalidAddress(address))?;
        if cell.is_some() {
            return Err(EngineError::CellOccupied(address));
        }
        *cell = Some(color);
        Ok(())
    }

    /// Clear a cell. Idempotent: clearing an already-empty cell or an address
    /// outside the region changes nothing. Returns whether a bubble was
    /// actually removed.
    pub fn remove(&mut self, address: HexCoord) -> bool {
        match self.cells.get_mut(&address) {
            Some(cell) => cell.take().is_some(),
            None => false,
        }
    }

    /// The cell whose center is nearest to a pixel position.
    ///
    /// The result is not guaranteed to be inside the playable region; callers
    /// validate with [`Board::contains`].
    pub fn address_nearest_pixel(&self, point: Point) -> HexCoord {
        self.layout.pixel_to_hex(point)
    }

    /// All occupied cells, in ascending address order.
    ///
    /// The ordering keeps collision scans and snapshots reproducible for
    /// identical inputs.
    pub fn occupied(&self) -> Vec<(HexCoord, BubbleColor)> {
        let mut occupied: Vec<(HexCoord, BubbleColor)> = self
            .cells
            .iter()
            .filter_map(|(addr, occupant)| occupant.map(|color| (*addr, color)))
            .collect();
        occupied.sort();
        occupied
    }

    /// Number of bubbles on the board
    pub fn bubble_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_some()).count()
    }

    /// The distinct colors currently present, in [`BubbleColor::ALL`] order
    pub fn present_colors(&self) -> Vec<BubbleColor> {
        BubbleColor::ALL
            .into_iter()
            .filter(|color| self.cells.values().any(|c| *c == Some(*color)))
            .collect()
    }

    /// Read-only snapshot of the current occupancy
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            bubbles: self.occupied(),
        }
    }
}

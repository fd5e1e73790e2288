//! Hexpop - a hex-grid bubble shooter engine
//!
//! This crate provides the core simulation for Hexpop, including:
//! - Hex coordinate system and pixel-space layout for the bubble grid
//! - Board representation with the playable region and occupancy
//! - The in-flight bubble with wall bounces and grid collision
//! - Placement snapping and connected-component match clearing
//!
//! # Architecture
//!
//! The engine is platform-agnostic and owns no presentation concerns:
//! rendering, audio, input, and the frame loop live outside and drive the
//! engine through [`Simulation`]. Per tick, the in-flight bubble advances,
//! bounces off walls or contacts the grid, a contact is resolved into a cell
//! placement, and same-color groups of three or more are cleared. The board
//! is then the source of truth for the next shot and for the renderer.
//!
//! # Modules
//!
//! - [`hex`]: Axial/cube coordinates and the cube-rounding tie-break
//! - [`layout`]: Orientation matrices and pixel conversions
//! - [`board`]: The playable region and its occupants
//! - [`bubble`]: The in-flight projectile
//! - [`placement`]: Contact-point to cell resolution
//! - [`matching`]: Same-color flood fill
//! - [`game`]: The tick/shoot control surface and event stream

pub mod board;
pub mod bubble;
pub mod game;
pub mod hex;
pub mod layout;
pub mod matching;
pub mod placement;

// Re-export commonly used types
pub use board::{Board, BoardConfig, BoardSnapshot, BubbleColor};
pub use bubble::{FlightState, MovingBubble, Wall};
pub use game::{EngineError, Simulation, TickEvent};
pub use hex::{FractionalHex, HexCoord, HexDirection};
pub use layout::{HexLayout, HexOrientation, Orientation, Point};
pub use matching::MIN_MATCH_SIZE;
pub use placement::MAX_SHIFT_ATTEMPTS;

//! Read-only view of the world for renderers.

use serde::Serialize;

use super::mutation::Species;
use super::params::Color;

/// What a renderer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    /// Species of the agent.
    pub species: Species,
    /// Position in world coordinates.
    pub pos: [f32; 2],
    /// Fill color.
    pub color: Color,
    /// Constant visual radius.
    pub radius: f32,
}

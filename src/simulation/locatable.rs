//! Trait for entities that have an identity and a position.
//!
//! This trait provides the common interface perception queries work against,
//! so a predator can look at prey and prey can look at predators through the
//! same code.

use ndarray::Array1;

/// Trait for entities with a stable identity and a position in 2D space.
pub trait Locatable {
    /// Returns the unique identifier of the entity.
    ///
    /// Identifiers are unique across species within one ecosystem, which is
    /// what lets perception queries skip the observer itself.
    fn id(&self) -> usize;

    /// Returns a reference to the entity's position.
    ///
    /// # Returns
    ///
    /// A reference to the 2D position vector.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    ///
    /// # Returns
    ///
    /// A mutable reference to the 2D position vector.
    fn pos_mut(&mut self) -> &mut Array1<f32>;
}

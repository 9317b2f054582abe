//! Metamaterial enhancement and Casimir plate-array geometry.
//!
//! Both types validate their invariants at construction and are immutable
//! afterwards, so downstream engines never re-check them.

mod geometry;
mod material;

pub use geometry::{ArrayGeometry, ArrayGeometrySpec, PlateArea};
pub use material::{EnhancementFactor, MaterialEnhancement};

use thiserror::Error;

/// Errors raised while constructing material or geometry descriptions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrayError {
    #[error("{factor} enhancement factor must be positive and finite (got {value})")]
    InvalidEnhancement {
        factor: EnhancementFactor,
        value: f64,
    },
    #[error("invalid array geometry: {0}")]
    InvalidGeometry(String),
}

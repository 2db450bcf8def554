//! # cb-slot — weighted reel generation for CoinBomb Slots
//!
//! Core game logic for the browser slot machine: a symbol vocabulary with
//! configurable weights, and a generator that draws reel strips from the
//! weighted distribution, with optional rigging and a bomb multiplier.
//!
//! ## Architecture
//!
//! ```text
//! symbol-weights.json ──> WeightTable (builtin defaults + overrides)
//!                              │
//!                              v
//!                        ReelGenerator ──> Vec<String> (one reel strip)
//! ```
//!
//! Everything here is request-local: tables are rebuilt from their source on
//! every call and generators own their RNG, so concurrent use needs no
//! coordination.

pub mod generator;
pub mod symbols;
pub mod weights;

pub use generator::*;
pub use symbols::*;
pub use weights::*;

//! # cb-server — HTTP surface for CoinBomb Slots
//!
//! Serves the static game client and a small JSON API over it:
//! reel generation (weighted, riggable, bomb-multiplier aware) and the ad
//! video listing. Request handling is stateless; game configuration under
//! the content root is re-read on every request so it can be edited live.

pub mod config;
pub mod logging;
pub mod media;
pub mod server;

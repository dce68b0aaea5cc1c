//! Top-down bullet-hell simulation: entities, collision, input mapping and the
//! fixed-tick update loop.  Rendering and terminal handling live in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod hud;
pub mod input;

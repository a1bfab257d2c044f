//! Menu actions

pub mod admin;
pub mod player;
pub mod tournament;

pub use admin::*;
pub use player::*;
pub use tournament::*;

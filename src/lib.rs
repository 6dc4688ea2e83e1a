//! IPL player analytics terminal: roster browsing, a heuristic per-player
//! match forecast engine, and prediction leaderboards.

pub mod export;
pub mod insights;
pub mod prediction;
pub mod rankings;
pub mod roster;
pub mod state;

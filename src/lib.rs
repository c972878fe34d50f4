pub mod config;
pub mod context;
pub mod engine;
pub mod explain;
pub mod identity;
pub mod lineup_impact;
pub mod player_impact;

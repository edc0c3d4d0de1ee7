pub mod backends;
pub mod daemon;
pub mod export;
pub mod log;
pub mod query;
pub mod setup;
pub mod status;

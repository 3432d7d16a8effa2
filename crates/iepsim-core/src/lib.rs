pub mod config;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod repair;
pub mod storage;

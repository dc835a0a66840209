pub mod daily_log;
pub mod error;
pub mod food_db;
pub mod models;
pub mod profile;
pub mod report;
pub mod service;
pub mod store;
pub mod tdee;

pub use error::{Result, TrackerError};
pub use service::{Recorded, Tracker};
pub use store::DataPaths;

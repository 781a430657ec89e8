pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod input;
pub mod models;
pub mod stats;
pub mod store;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::{GoalStore, HttpGoalStore};

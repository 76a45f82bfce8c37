pub mod app;
pub mod day;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod progress;
pub mod state;
pub mod stats;
pub mod storage;
pub mod validator;
pub mod views;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};

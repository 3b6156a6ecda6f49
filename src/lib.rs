// Library surface for the binary, headless tests and reuse.
// Terminal drawing and the event loop stay in main.rs.
pub mod account;
pub mod achievements;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod clock;
pub mod config;
pub mod export;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod runtime;
pub mod session;
pub mod store;
pub mod streak;
pub mod timer;

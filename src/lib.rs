pub mod adb;
pub mod args;
pub mod cli;
pub mod config;
pub mod devices;
pub mod gui;
pub mod logging;
pub mod manager;
pub mod screenshot;

pub use adb::AdbBackend;
pub use manager::AppManager;

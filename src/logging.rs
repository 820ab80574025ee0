// Logging goes to a file under the user data dir because the TUI owns the
// terminal. The conditional macros compile to nothing in release builds.

use chrono::Local;
use env_logger::Target;
use std::fs::{self, File};
use std::path::PathBuf;

pub fn log_file_path() -> Option<PathBuf> {
    let mut path = dirs::data_dir()?;
    path.push("guess-the-word");
    fs::create_dir_all(&path).ok()?;
    path.push(format!("debug-{}.log", Local::now().format("%Y%m%d")));
    Some(path)
}

/// Initialize logging. Silently does nothing if no usable data dir exists;
/// losing debug logs is not worth refusing to start the game.
pub fn init_logging() {
    let Some(path) = log_file_path() else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .init();
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

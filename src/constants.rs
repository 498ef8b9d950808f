// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.

/// Directory name under the platform config and data directories.
///
/// Used in: `infrastructure/config.rs`
pub const APP_DIR_NAME: &str = "notesview";

/// File name of the TOML configuration inside the config directory.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the local SQLite backend inside the data directory.
///
/// Used in: `infrastructure/config.rs`
pub const LOCAL_DATABASE_FILE_NAME: &str = "notes.sqlite3";

/// Directory holding image objects for the directory storage backend.
///
/// Used in: `infrastructure/config.rs`
pub const LOCAL_STORAGE_DIR_NAME: &str = "images";

/// Default timeout for a single GraphQL or object-storage HTTP request.
///
/// Remote calls are never retried; this only bounds how long one attempt
/// may hang.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Width of the description column in the terminal table.
///
/// Used in: `ports/table.rs`
pub const DESCRIPTION_COLUMN_WIDTH: usize = 48;

/// Delay in milliseconds after spawning the browser before the temp
/// directory may be dropped.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

mod accessor_config;
mod backup_config;
mod cleanup_config;
mod config;
mod error;
mod gate_config;
mod log_level;
mod logging_config;
mod quarantine_config;
mod store_config;

#[cfg(test)]
mod tests;

pub use accessor_config::AccessorConfig;
pub use backup_config::BackupConfig;
pub use cleanup_config::CleanupConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use gate_config::{GateConfig, MAX_ACQUIRE_TIMEOUT_MS};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use quarantine_config::QuarantineConfig;
pub use store_config::StoreConfig;

const CONFIG_DIR_ENV: &str = "PV_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".pv";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_STORE_ROOT: &str = "dynamic";
const DEFAULT_USERS_DIRECTORY: &str = "users";
const DEFAULT_RECORD_FILENAME: &str = "userdata.json";
const DEFAULT_BACKUP_DIRECTORY: &str = "backup";
const DEFAULT_QUARANTINE_DIRECTORY: &str = "quarantine";

const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 0;
const DEFAULT_LENIENT_LOOKUP: bool = false;
const DEFAULT_BACKUP_ENABLED: bool = true;
const DEFAULT_KEEP_CORRUPTED_COPY: bool = true;
const DEFAULT_ARCHIVE_REMAINING: bool = false;
const DEFAULT_CLEANUP_MIN_ENTRIES: usize = 2;
const DEFAULT_PLACEHOLDER_MARKER: &str = "VoidUser";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";

use crate::{
    AccessorConfig, BackupConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, CleanupConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY, GateConfig, LoggingConfig, QuarantineConfig,
    StoreConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub gate: GateConfig,
    pub accessor: AccessorConfig,
    pub backup: BackupConfig,
    pub quarantine: QuarantineConfig,
    pub cleanup: CleanupConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for PV_CONFIG_DIR env var, else use ./.pv/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PV_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PV_CONFIG_DIR env var > ./.pv/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.store.validate()?;
        self.gate.validate()?;
        self.cleanup.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Absolute store root: `store.root` as-is when absolute, else under the config dir.
    pub fn store_root(&self) -> ConfigErrorResult<PathBuf> {
        let root = Path::new(&self.store.root);
        if root.is_absolute() {
            return Ok(root.to_path_buf());
        }
        Ok(Self::config_dir()?.join(root))
    }

    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        Ok(self.logging.file_path(&Self::config_dir()?))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  store: root={}, users={}, record={}",
            self.store.root, self.store.users_dir, self.store.record_filename
        );

        match self.gate.acquire_timeout() {
            Some(timeout) => info!("  gate: timeout={}ms", timeout.as_millis()),
            None => info!("  gate: timeout=none"),
        }

        info!(
            "  accessor: lookup={}",
            if self.accessor.lenient_lookup {
                "lenient"
            } else {
                "exact"
            }
        );

        info!(
            "  backup: {} (dir: {})",
            if self.backup.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.store.backup_dir
        );

        info!(
            "  quarantine: keep_copy={}, archive={} (dir: {})",
            self.quarantine.keep_corrupted_copy,
            self.quarantine.archive_remaining,
            self.store.quarantine_dir
        );

        info!(
            "  cleanup: min_entries={}, marker={}",
            self.cleanup.min_entries, self.cleanup.placeholder_marker
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Store
        Self::apply_env_string("PV_STORE_ROOT", &mut self.store.root);
        Self::apply_env_string("PV_STORE_USERS_DIR", &mut self.store.users_dir);
        Self::apply_env_string("PV_STORE_RECORD_FILENAME", &mut self.store.record_filename);
        Self::apply_env_string("PV_STORE_BACKUP_DIR", &mut self.store.backup_dir);
        Self::apply_env_string("PV_STORE_QUARANTINE_DIR", &mut self.store.quarantine_dir);

        // Gate
        Self::apply_env_parse(
            "PV_GATE_ACQUIRE_TIMEOUT_MS",
            &mut self.gate.acquire_timeout_ms,
        );

        // Accessor
        Self::apply_env_bool(
            "PV_ACCESSOR_LENIENT_LOOKUP",
            &mut self.accessor.lenient_lookup,
        );

        // Backup
        Self::apply_env_bool("PV_BACKUP_ENABLED", &mut self.backup.enabled);

        // Quarantine
        Self::apply_env_bool(
            "PV_QUARANTINE_KEEP_CORRUPTED_COPY",
            &mut self.quarantine.keep_corrupted_copy,
        );
        Self::apply_env_bool(
            "PV_QUARANTINE_ARCHIVE_REMAINING",
            &mut self.quarantine.archive_remaining,
        );

        // Cleanup
        Self::apply_env_parse("PV_CLEANUP_MIN_ENTRIES", &mut self.cleanup.min_entries);
        Self::apply_env_string(
            "PV_CLEANUP_PLACEHOLDER_MARKER",
            &mut self.cleanup.placeholder_marker,
        );

        // Logging
        Self::apply_env_parse("PV_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PV_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PV_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("PV_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

use crate::{Cli, CliResult, Commands, ConsoleNotifier, logger};

use pv_config::Config;
use pv_core::{FieldLookup, UserId};
use pv_store::{ProfileStore, StoreOptions, StorePaths};

use std::sync::Arc;

use log::debug;
use serde_json::{Value, json};

/// Loads config, opens the store, runs the command and renders its JSON.
pub fn run(cli: Cli) -> CliResult<String> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let store = open_store(&config, &cli)?;
    let result = execute(&store, cli.command);
    store.shutdown();

    let value = result?;
    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}

/// Store described by `config`, with `--root` and `--lenient` applied on top.
pub fn open_store(config: &Config, cli: &Cli) -> CliResult<ProfileStore> {
    let paths = match &cli.root {
        Some(root) => StorePaths::with_root(config, root.clone()),
        None => StorePaths::from_config(config)?,
    };

    let mut options = StoreOptions::from_config(config);
    if cli.lenient {
        options.lookup = FieldLookup::Lenient;
    }

    debug!("Opening store at {}", paths.root().display());

    Ok(ProfileStore::builder(paths)
        .options(options)
        .notifier(Arc::new(ConsoleNotifier))
        .build())
}

/// Runs one command against an open store.
pub fn execute(store: &ProfileStore, command: Commands) -> CliResult<Value> {
    let value = match command {
        Commands::List => {
            let users = store.list_users()?;
            json!({ "users": users })
        }

        Commands::Create { name, password } => {
            let id = store.create_user(&name, &password)?;
            json!({ "user_id": id, "name": name })
        }

        Commands::Get { user, field } => {
            let id = UserId::new(user)?;
            let value = store.get_field(&id, &field)?;
            json!({ "user_id": id, "field": field, "value": value })
        }

        Commands::Set { user, field, value } => {
            let id = UserId::new(user)?;
            store.set_field(&id, &field, &value)?;
            json!({ "user_id": id, "field": field, "value": value })
        }

        Commands::Show { user } => {
            let id = UserId::new(user)?;
            let record = store.load(&id)?;
            json!({ "user_id": id, "record": record })
        }

        Commands::Migrate { user: Some(user) } => {
            let id = UserId::new(user)?;
            serde_json::to_value(store.migrate_user(&id)?)?
        }

        Commands::Migrate { user: None } => {
            let summary = store.migrate_all()?;
            json!({ "users": summary })
        }

        Commands::Cleanup => {
            let removed: Vec<String> = store
                .cleanup_on_startup()?
                .iter()
                .map(|dir| dir.display().to_string())
                .collect();
            json!({ "removed": removed })
        }

        Commands::LogoutAll => {
            let changed = store.logout_all()?;
            json!({ "logged_out": changed })
        }

        Commands::Catalog => json!({ "fields": store.catalog().entries() }),
    };

    Ok(value)
}

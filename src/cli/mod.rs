mod commands;
mod group;
mod user;

pub use commands::{GroupCommands, StoreArgs, UserCommands};
pub use group::{run_group_add, run_group_del, run_group_list, run_group_show};
pub use user::{run_user_add, run_user_del, run_user_list, run_user_show};

use serde::Serialize;

use crate::config::IdmConfig;
use crate::idm::SqliteIdm;

/// Resolves the effective config: file first, then command-line overrides.
pub fn load_config(args: &StoreArgs) -> anyhow::Result<IdmConfig> {
    let mut config = match &args.config {
        Some(path) => IdmConfig::load(path)?,
        None => IdmConfig::default(),
    };
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    Ok(config)
}

/// Opens the identity store, bootstrapping it when it does not exist yet.
pub fn open_idm(args: &StoreArgs) -> anyhow::Result<SqliteIdm> {
    let config = load_config(args)?;
    SqliteIdm::open(&config).map_err(Into::into)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_id(arg: &str) -> anyhow::Result<i64> {
    arg.parse()
        .map_err(|_| anyhow::anyhow!("'{arg}' is not a numeric id"))
}

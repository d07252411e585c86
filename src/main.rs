use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sqlidm::cli::{
    GroupCommands, StoreArgs, UserCommands, load_config, run_group_add, run_group_del,
    run_group_list, run_group_show, run_user_add, run_user_del, run_user_list, run_user_show,
};
use sqlidm::idm::{IdentityMgr, SqliteIdm};

#[derive(Parser)]
#[command(name = "sqlidm")]
#[command(about = "Manage the users and groups of a SQLite identity store", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the identity store and its administrator identities
    Init {
        /// Name of the administrator group (gid 0)
        #[arg(long)]
        admin_group: Option<String>,

        /// Name of the administrator user (uid 0)
        #[arg(long)]
        admin_user: Option<String>,
    },

    /// Manage groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

fn run_init(
    store: &StoreArgs,
    admin_group: Option<String>,
    admin_user: Option<String>,
) -> anyhow::Result<()> {
    let mut config = load_config(store)?;
    if let Some(name) = admin_group {
        config.admin_group = name;
    }
    if let Some(name) = admin_user {
        config.admin_user = name;
    }

    let idm = SqliteIdm::open(&config)?;
    info!("Identity store ready at {}", config.db_path.display());

    println!(
        "Administrator: user \"{}\" (uid {}), group \"{}\" (gid {})",
        idm.admin_user().name(),
        idm.admin_user().uid(),
        idm.admin_group().name(),
        idm.admin_group().gid()
    );

    idm.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sqlidm=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = &cli.store;

    match cli.command {
        Commands::Init {
            admin_group,
            admin_user,
        } => run_init(store, admin_group, admin_user)?,
        Commands::Group { command } => match command {
            GroupCommands::Add { name } => run_group_add(store, &name)?,
            GroupCommands::Del { name } => run_group_del(store, &name)?,
            GroupCommands::Show { group, id, json } => run_group_show(store, &group, id, json)?,
            GroupCommands::List { json } => run_group_list(store, json)?,
        },
        Commands::User { command } => match command {
            UserCommands::Add { name, group } => run_user_add(store, &name, &group)?,
            UserCommands::Del { name } => run_user_del(store, &name)?,
            UserCommands::Show { user, id, json } => run_user_show(store, &user, id, json)?,
            UserCommands::List { json } => run_user_list(store, json)?,
        },
    }

    Ok(())
}

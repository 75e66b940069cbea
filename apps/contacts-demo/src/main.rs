use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use contacts::config::ContactsConfig;
use contacts::domain::presenter::PresenterConfig;
use contacts::infra::{InMemoryCallHistoryRepository, InMemoryContactsRepository};
use contacts::model::ContactsData;
use contacts::ContactsPresenter;
use runtime::{AppConfig, CliArgs};

mod console_view;

use console_view::ConsoleView;

const MODULE_NAME: &str = "contacts";

/// Contacts demo - drives the contacts presenter against in-memory storage
#[derive(Parser)]
#[command(name = "contacts-demo")]
#[command(about = "Contacts demo - drives the contacts presenter against in-memory storage")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short session: open the list, optionally add a contact, call the first one
    Run {
        /// Contact to add, as "FIRST [LAST...] PHONE"
        #[arg(long)]
        add: Option<String>,
    },
    /// Check configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.app.home_dir));
    tracing::info!(app = %config.app.name, "Contacts demo starting");

    match cli.command.unwrap_or(Commands::Run { add: None }) {
        Commands::Run { add } => run_session(&config, add.as_deref()),
        Commands::Check => check_config(&config),
    }
}

fn run_session(config: &AppConfig, add: Option<&str>) -> Result<()> {
    let module_cfg: ContactsConfig = config.module_config(MODULE_NAME)?;
    let new_contact = add.map(parse_contact_arg).transpose()?;

    let seed = if module_cfg.seed_contacts.is_empty() {
        default_seed()
    } else {
        module_cfg.seed_contacts.clone()
    };
    let contacts_repo =
        InMemoryContactsRepository::with_seed(seed).context("Invalid seed contacts")?;
    let history_repo = InMemoryCallHistoryRepository::new();

    let presenter = ContactsPresenter::new(Arc::new(contacts_repo), Arc::new(history_repo))
        .with_config(PresenterConfig::from(&module_cfg));
    let view = Arc::new(ConsoleView::new(io::stdout()));
    presenter.attach_view(&view);

    presenter.view_opened();

    if let Some(data) = new_contact {
        presenter.new_contact_added(data);
        if !presenter.config().refresh_after_mutation {
            presenter.view_opened();
        }
    }

    match view.displayed().first() {
        Some(contact) => {
            println!("Calling {contact}");
            presenter.contact_pressed(contact);
        }
        None => println!("Nobody to call"),
    }

    presenter.history_opened();

    // Screen goes away; the presenter must not keep it alive.
    presenter.detach_view();
    tracing::info!("Session finished");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: ContactsConfig = config.module_config(MODULE_NAME)?;
    InMemoryContactsRepository::with_seed(module_cfg.seed_contacts.clone())
        .context("Invalid seed contacts")?;

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

/// "Ada Lovelace +441234" → first "Ada", last "Lovelace", phone "+441234".
/// Everything between the first and the last token is the last name.
fn parse_contact_arg(raw: &str) -> Result<ContactsData> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    match parts.as_slice() {
        [] | [_] => bail!("--add expects \"FIRST [LAST...] PHONE\", got '{}'", raw),
        [first, middle @ .., phone] => Ok(ContactsData::new(*first, middle.join(" "), *phone)),
    }
}

fn default_seed() -> Vec<ContactsData> {
    vec![
        ContactsData::new("Grace", "Hopper", "+1 555 0100"),
        ContactsData::new("Alan", "Turing", "+44 20 7946 0000"),
    ]
}

mod board;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod forms;
mod output;
mod session;
mod state;
mod store;
#[cfg(test)]
mod testutil;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, IssueCommands, OutputFormat, ProjectCommands};
use client::ApiClient;
use config::Config;
use session::SessionStore;
use state::AppState;
use store::EntityStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Silent unless RUST_LOG asks for events; diagnostics go to stderr so
    // they never mix with table/JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show the error chain if the verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set global output mode
    output::set_json_output(cli.output_format() == OutputFormat::Json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "taskboard", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let api = ApiClient::new(config.api_url()?);
            let mut session_store = SessionStore::load()?;
            let mut app_state = AppState::load();
            let mut store = EntityStore::new();
            store.restore_selection(app_state.selected_project);

            match command {
                Commands::Signup(args) => {
                    commands::auth::signup(&api, &mut session_store, args).await?;
                }
                Commands::Login(args) => {
                    commands::auth::login(&api, &mut session_store, args).await?;
                }
                Commands::Logout => {
                    commands::auth::logout(&mut session_store)?;
                }
                Commands::Whoami => {
                    commands::auth::whoami(&session_store)?;
                }
                Commands::Projects => {
                    commands::projects::list(&api, &session_store, &mut store).await?;
                }
                Commands::Project { action } => match action {
                    ProjectCommands::List => {
                        commands::projects::list(&api, &session_store, &mut store).await?;
                    }
                    ProjectCommands::Create(args) => {
                        commands::projects::create(&api, &session_store, &mut store, args).await?;
                    }
                    ProjectCommands::Show { id } => {
                        commands::projects::show(&api, &session_store, &mut store, id).await?;
                    }
                    ProjectCommands::Select { id } => {
                        commands::projects::select(
                            &api,
                            &session_store,
                            &mut store,
                            &mut app_state,
                            id,
                        )
                        .await?;
                    }
                    ProjectCommands::Delete { id, yes } => {
                        commands::projects::delete(
                            &api,
                            &session_store,
                            &mut store,
                            &mut app_state,
                            id,
                            yes,
                        )
                        .await?;
                    }
                },
                Commands::Issues(args) => {
                    commands::issues::list(&api, &session_store, &mut store, args).await?;
                }
                Commands::Issue { action } => match action {
                    IssueCommands::List(args) => {
                        commands::issues::list(&api, &session_store, &mut store, args).await?;
                    }
                    IssueCommands::Show { id, project } => {
                        commands::issues::show(&api, &session_store, &mut store, id, project)
                            .await?;
                    }
                    IssueCommands::Create(args) => {
                        commands::issues::create(&api, &session_store, &mut store, args).await?;
                    }
                    IssueCommands::Update(args) => {
                        commands::issues::update(&api, &session_store, &mut store, args).await?;
                    }
                    IssueCommands::Move(args) => {
                        commands::issues::move_issue(&api, &session_store, &mut store, args)
                            .await?;
                    }
                    IssueCommands::Delete { id, yes, project } => {
                        commands::issues::delete(
                            &api,
                            &session_store,
                            &mut store,
                            id,
                            yes,
                            project,
                        )
                        .await?;
                    }
                },
                Commands::Board(args) => {
                    commands::board::show(&api, &session_store, &mut store, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}

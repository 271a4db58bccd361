//! CLI entry point - the composition root.
//!
//! `serve` boots the HTTP adapter; every other command runs against a
//! [`CliContext`](dialer_cli::CliContext) built by `bootstrap`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use dialer_cli::{
    Cli, CliError, Commands, GatewayCommand, UserCommand, VoipAppCommand, bootstrap, handlers,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before parsing so it can feed DIALER_* options
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.server_config();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // `serve` composes its own context inside the HTTP adapter
    let context = || bootstrap(&config);

    match command {
        Commands::Serve => handlers::serve::execute(config.clone()).await?,
        Commands::User { command } => match command {
            UserCommand::Add {
                username,
                password,
                superuser,
            } => {
                handlers::user::add(&context().await?, &username, &password, superuser).await?;
            }
            UserCommand::Limits(args) => {
                handlers::user::limits(&context().await?, &args).await?;
            }
        },
        Commands::Gateway { command } => match command {
            GatewayCommand::Add(args) => {
                handlers::gateway::add(&context().await?, args).await?;
            }
            GatewayCommand::List => handlers::gateway::list(&context().await?).await?,
        },
        Commands::VoipApp { command } => match command {
            VoipAppCommand::Add {
                name,
                app_type,
                data,
                description,
            } => {
                let ctx = context().await?;
                handlers::voip_app::add(&ctx, name, app_type.into(), data, description).await?;
            }
            VoipAppCommand::List => handlers::voip_app::list(&context().await?).await?,
        },
        Commands::Dial(args) => {
            handlers::dial::execute(&context().await?, args).await?;
        }
    }

    Ok(())
}

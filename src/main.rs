use clap::Parser;
use daily_sales::args::{Args, Command};
use daily_sales::{commands, Config, ErrorType, IntoResult, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().sales_home().path();

    // Every command except init needs an initialized data directory.
    let _: () = match args.command() {
        Command::Init(bind_args) => commands::init(home, bind_args.bind()).await?.print(),

        Command::Serve(bind_args) => commands::serve(load(home).await?, bind_args.bind())
            .await?
            .print(),

        Command::Next => commands::next(load(home).await?).await?.print(),

        Command::Items => commands::items(load(home).await?).await?.print(),

        Command::List => commands::list(load(home).await?).await?.print(),

        Command::Show(tno_args) => commands::show(load(home).await?, tno_args.clone())
            .await?
            .print(),

        Command::Insert(insert_args) => commands::insert(load(home).await?, insert_args.clone())
            .await?
            .print(),

        Command::Delete(tno_args) => commands::delete(load(home).await?, tno_args.clone())
            .await?
            .print(),
    };
    Ok(())
}

async fn load(home: &std::path::Path) -> Result<Config> {
    Config::load(home).await.pub_result(ErrorType::Config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

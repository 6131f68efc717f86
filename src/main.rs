use std::io;
use std::process::ExitCode;

use clap::Parser;
use cvphoto::bootstrap::{
    build_photo_service, default_data_dir, init_tracing_subscriber, load_config, resolve_config,
};
use cvphoto::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => resolve_config(None, &default_data_dir()?)?,
    };
    init_tracing_subscriber(&config.log_dir)?;

    let service = build_photo_service(&config)?;
    let status = cli::run(cli.command, &service, &mut io::stdout()).await?;
    service.close_connection();

    Ok(ExitCode::from(status))
}

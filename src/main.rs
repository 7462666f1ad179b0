mod cli;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wordsim::{server::AppState, Catalog, Session, Settings};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wordsim=info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        let mut session = Session::open(Catalog::new(settings.datasets.clone()), &settings.default_dataset)?
            .with_limits(settings.top_k, settings.max_suggestions);
        cli::run_repl(&mut session);
    } else if args[1] == "serve" {
        let state = web::Data::new(AppState::load(&settings)?);
        info!(bind = %settings.bind, "starting server");
        HttpServer::new(move || App::new().app_data(state.clone()).configure(wordsim::server::config))
            .bind(&settings.bind)?
            .run()
            .await?;
    } else if args[1] == "compile" {
        cli::run_compile(&args)?;
    } else {
        cli::run_single_command(&args, &settings)?;
    }

    Ok(())
}

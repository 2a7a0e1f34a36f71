// src/bin/server.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sec_insights::storage::{layout::SECTION_TEXT_FILE, FilingStore};
use sec_insights::utils::{self, AppError};
use sec_insights::web::{self, AppState};
use sec_insights::FinancialData;

/// Serve extracted 10-K figures as pages and charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the filing tree produced by sec-fetch
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// File inside each year folder to read figures from
    #[arg(long, default_value = SECTION_TEXT_FILE)]
    figures_file: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    utils::logging::setup_logging("info,tower_http=debug");

    let args = Args::parse();
    tracing::info!("Starting server with args: {:?}", args);

    // All extraction happens here, once; handlers only read.
    let store = FilingStore::open(&args.data_dir);
    let data = FinancialData::load(&store, &args.figures_file)?;
    for (company, company_data) in data.iter() {
        tracing::info!("{}: years {:?}", company, company_data.years());
    }

    let state = Arc::new(AppState::new(data)?);
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("Listening on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

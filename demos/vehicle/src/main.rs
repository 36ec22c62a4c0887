//! Demo server for the vehicle example service.
//!
//! ```text
//! vehicle --settings quark.toml --bind 0.0.0.0:11019
//! curl localhost:11019/vehicle/3/WVW1
//! ```

mod routes;

use std::path::PathBuf;

use clap::Parser;
use quark::prelude::*;

#[derive(Parser)]
#[command(name = "vehicle")]
#[command(about = "Serve the quark vehicle example", long_about = None)]
struct Cli {
    /// TOML settings file; defaults apply when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Address to listen on; overrides `bind_address` from the settings.
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the route table and exit.
    #[arg(long)]
    dump_paths: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => quark::core::settings_loader::from_toml_file(path)?,
        None => Settings::default(),
    };
    if let Some(bind) = cli.bind {
        settings.bind_address = bind;
    }
    setup_logging(&settings);

    let addr = settings.bind_address.clone();
    let root = settings.root_service.clone();
    let app = QuarkApp::new(settings).service(&root, routes::procedures())?;

    for (service, path, procedure) in app.routes() {
        if cli.dump_paths {
            println!("{service:>8}  {path:<40} {procedure}");
        } else {
            tracing::info!(%service, %path, %procedure, "Route");
        }
    }
    if cli.dump_paths {
        return Ok(());
    }

    app.run(&addr).await?;
    Ok(())
}

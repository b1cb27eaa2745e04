//! Issue one request against a records database from the command line.
//!
//! ```text
//! acme-medical --db records.sqlite --user admin --password admin GET physician
//! acme-medical --db records.sqlite --user admin --password admin \
//!     POST medicine --body '{"drugName":"Advil","manufacturerName":"Pfizer","dosageInformation":"200mg"}'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use acme_medical_core::{logging, Config, Database, MedicalService, Method, Request, Response};

#[derive(Parser)]
#[command(name = "acme-medical")]
#[command(about = "Send a request to the ACME medical records backend")]
struct Cli {
    /// SQLite database file (overrides the configured path)
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Username to authenticate as
    #[arg(short, long)]
    user: Option<String>,

    /// Password for --user
    #[arg(short, long, requires = "user")]
    password: Option<String>,

    /// GET, POST, PUT or DELETE
    method: String,

    /// Resource path, e.g. `physician/1` or `prescription/1/2`
    path: String,

    /// JSON request body
    #[arg(short, long)]
    body: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(&config.log_filter);

    let method: Method = cli.method.parse().map_err(anyhow::Error::msg)?;

    let db = match cli.db.as_ref().or(config.database_path.as_ref()) {
        Some(path) => Database::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?,
        None => Database::open_in_memory()?,
    };
    MedicalService::new(&db, &config)
        .ensure_admin_account(&config.admin_username, &config.admin_password)?;

    let mut request = Request::new(method, cli.path);
    if let Some(user) = cli.user.as_deref() {
        request = request.with_credentials(user, cli.password.as_deref().unwrap_or_default());
    }
    if let Some(body) = cli.body.as_deref() {
        let value = serde_json::from_str(body).context("--body is not valid JSON")?;
        request = request.with_body(value);
    }

    let response = acme_medical_core::handle(&db, &config, request);
    print!("{}", render(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Status line, then the pretty-printed body if there is one.
fn render(response: &Response) -> Result<String> {
    let mut out = format!("{}\n", response.status);
    if let Some(body) = &response.body {
        out.push_str(&serde_json::to_string_pretty(body)?);
        out.push('\n');
    }
    Ok(out)
}

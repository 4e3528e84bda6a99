use anyhow::{bail, Context, Result};
use csv2pg::{CsvLoader, LoadOptions};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let mut args: Vec<String> = env::args().skip(1).collect();
    let append = if let Some(pos) = args.iter().position(|a| a == "--append") {
        args.remove(pos);
        true
    } else {
        false
    };
    if args.len() < 5 {
        bail!("usage: csv2pg [--append] <host> <port> <dbname> <user> <file>...");
    }
    let host = args.remove(0);
    let port: u16 = args.remove(0).parse().context("port must be a number")?;
    let dbname = args.remove(0);
    let user = args.remove(0);
    let password = env::var("PGPASSWORD").ok();

    // ─── 3) load each file in turn ───────────────────────────────────
    let loader = CsvLoader::new(host, port, dbname, user, password);
    let options = LoadOptions {
        create_table: !append,
        ..LoadOptions::default()
    };
    for file in &args {
        let summary = loader
            .load(file, options)
            .await
            .with_context(|| format!("loading {}", file))?;
        info!(file = %file, table = %summary.table, rows = summary.rows, "done");
    }
    Ok(())
}

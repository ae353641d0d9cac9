use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use crate::apcaccess::{run_status_tool, DEFAULT_APCACCESS_PATH};
use crate::load::calc_load_watts;
use crate::plugin::{write_config, write_value};
use crate::status::parse_status;

const CONFIG_MODE: &str = "config";

#[derive(Parser)]
#[command(name = "apcupsd_load", version)]
#[command(about = "Munin plugin reporting UPS load in watts via apcaccess")]
pub struct Cli {
    /// `config` prints the graph declaration; anything else fetches the value
    pub mode: Option<String>,
    #[arg(hide = true)]
    pub extra: Vec<String>,
    /// Path to the apcaccess status tool
    #[arg(long = "apcaccess", default_value = DEFAULT_APCACCESS_PATH)]
    pub apcaccess: PathBuf,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn is_config(&self) -> bool {
        self.mode.as_deref() == Some(CONFIG_MODE)
    }
}

/// `-v` forces debug; otherwise `RUST_LOG` applies, falling back to warnings only.
fn log_filter(verbose: bool, env_filter: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env_filter
        .filter(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

fn configure_logging(verbose: bool) {
    let filter = log_filter(verbose, std::env::var("RUST_LOG").ok());
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    builder.parse_filters(&filter);
    let _ = builder.try_init();
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    configure_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.is_config() {
        write_config(&mut out)?;
    } else {
        let watts = fetch_load_watts(&cli.apcaccess)?;
        write_value(&mut out, watts)?;
    }
    out.flush()?;
    Ok(())
}

/// Query apcaccess and convert its reading to watts.
pub fn fetch_load_watts(apcaccess: &Path) -> Result<f64> {
    let raw = run_status_tool(apcaccess)?;
    let status = parse_status(&raw)
        .with_context(|| format!("unexpected output from {}", apcaccess.display()))?;
    debug!("Parsed {} status fields", status.len());
    let watts = calc_load_watts(&status)
        .with_context(|| format!("cannot compute load from {}", apcaccess.display()))?;
    Ok(watts)
}

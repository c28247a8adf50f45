//! Headless dashboard driver
//!
//! Loads a record collection, then replays table/map input events from a
//! script or stdin and prints what each view would render.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use geodash_core::{DashboardConfig, RecordStore, ViewCoordinator, ViewSnapshot, ViewSubscriber};
use geodash_data::sources::{from_path, MockSource};
use geodash_data::RecordSource;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod render;
mod session;

use cli::{DataArg, Options};

/// Logs every derived-view change
struct ViewLogger;

impl ViewSubscriber for ViewLogger {
    fn on_view_change(&self, snapshot: &ViewSnapshot<'_>) {
        debug!(
            search = %snapshot.query.search_text,
            page = snapshot.page.page_index,
            rows = snapshot.rows.len(),
            markers = snapshot.markers.len(),
            selected = ?snapshot.query.selected_id,
            "View changed"
        );
    }
}

fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so stdout stays the rendered view
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = cli::parse_args(&args)?;
    if options.help {
        cli::print_help();
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&options, &mut out)?;

    info!("Session finished");
    Ok(())
}

fn load_store(data: &DataArg) -> Result<RecordStore> {
    let source: Box<dyn RecordSource> = match data {
        DataArg::Mock(count) => Box::new(MockSource::new(*count)),
        DataArg::File(path) => from_path(path)?,
    };
    let store = source
        .load()
        .with_context(|| format!("loading records from {}", source.source_name()))?;
    info!(source = source.source_name(), records = store.len(), "Dataset loaded");
    Ok(store)
}

/// Load config and data, then run the command session against `out`
fn run<W: Write>(options: &Options, out: &mut W) -> Result<()> {
    let config = match &options.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let store = load_store(&options.data)?;
    let mut view = ViewCoordinator::new(Arc::new(store), config)?;
    let logger: Arc<dyn ViewSubscriber> = Arc::new(ViewLogger);
    view.add_subscriber(logger.clone());

    match &options.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            session::run_session(&mut view, BufReader::new(file), out)
        }
        None => session::run_session(&mut view, io::stdin().lock(), out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("geodash")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_run_csv_with_script_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("sites.csv");
        let script = dir.path().join("session.txt");
        let config = dir.path().join("dashboard.json");

        fs::write(
            &csv,
            "id,name,latitude,longitude,status,last_updated\n\
             1,Harbour Survey,13.09,80.29,Active,3/14/2024\n\
             2,Depot Audit,13.11,80.31,Pending,3/15/2024\n\
             3,Ridge Station,13.20,80.40,Active,3/16/2024\n",
        )
        .unwrap();
        fs::write(&script, "search active\nmarker 3\npage 5\n").unwrap();
        fs::write(&config, r#"{"page_size_options": [2, 5], "default_page_size": 2}"#).unwrap();

        let options = parse(&[
            "--csv",
            csv.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--script",
            script.to_str().unwrap(),
        ]);
        let mut out = Vec::new();
        run(&options, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("3 rows, page 1 of 2, 2 per page"));
        assert!(output.contains("2 rows, page 1 of 1, 2 per page"));
        assert!(output.contains("camera: (13.20000, 80.40000) zoom 12"));
        assert!(output.contains("rejected: page 5 out of range (page count: 1)"));
    }

    #[test]
    fn test_run_reports_bad_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("bad.csv");
        fs::write(&csv, "id,name,latitude,longitude,status,last_updated\n1,A,1,2,Archived,\n").unwrap();

        let options = parse(&["--csv", csv.to_str().unwrap()]);
        let err = run(&options, &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown status 'Archived'"));
    }

    fn parse(list: &[&str]) -> Options {
        cli::parse_args(&args(list)).unwrap()
    }
}

//! Command-line options

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use geodash_data::sources::mock::DEFAULT_RECORD_COUNT;

/// Where the records come from
#[derive(Debug, Clone, PartialEq)]
pub enum DataArg {
    Mock(usize),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub data: DataArg,
    pub config: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data: DataArg::Mock(DEFAULT_RECORD_COUNT),
            config: None,
            script: None,
            help: false,
        }
    }
}

pub fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} needs a value", flag))
        };

        match flag {
            "--csv" | "--json" | "--data" => options.data = DataArg::File(PathBuf::from(value()?)),
            "--mock" => {
                let raw = value()?;
                let count = raw
                    .parse()
                    .with_context(|| format!("--mock expects a record count, got '{}'", raw))?;
                options.data = DataArg::Mock(count);
            }
            "--config" => options.config = Some(PathBuf::from(value()?)),
            "--script" => options.script = Some(PathBuf::from(value()?)),
            "-h" | "--help" => options.help = true,
            other => bail!("unknown argument '{}'", other),
        }
    }

    Ok(options)
}

pub fn print_help() {
    println!("geodash - browse geo-tagged records as a paged table plus map markers");
    println!();
    println!("USAGE:");
    println!("  geodash [--mock N | --csv PATH | --json PATH] [--config PATH] [--script PATH]");
    println!();
    println!("Commands are read from --script or stdin, one per line:");
    println!("  search <text>   filter by name or status (empty text shows everything)");
    println!("  page <n>        go to zero-based page n");
    println!("  next | prev     step one page");
    println!("  size <n>        rows per page (one of the configured sizes)");
    println!("  select <id>     activate a record as if its table row was clicked");
    println!("  marker <id>     activate a record as if its map marker was clicked");
    println!("  clear           clear the selection");
    println!("  show            print the current view");
    println!("  json            print the current view as JSON");
    println!("  quit            end the session");
}

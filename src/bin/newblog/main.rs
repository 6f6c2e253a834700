use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use spdlog::{debug, warn};

use newblog::logger::configure_logger;
use newblog::opener::{select_opener, Platform};
use newblog::prompt::Prompt;
use newblog::scaffold::{run, ScaffoldOptions};
use newblog::text_utils::parse_date;

use crate::config::open_config;

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Title of the post. Asked interactively when missing
    #[arg(short, long)]
    title: Option<String>,

    /// Comma separated tags. Asked interactively when missing
    #[arg(long)]
    tags: Option<String>,

    /// Post date as YYYY-MM-DD. Defaults to today
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Config path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not open the created file
    #[arg(long)]
    no_open: bool,

    /// Print the post instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = open_config(args.config).map_err(|e| anyhow!(e))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let platform = Platform::current();
    debug!("Running on {}", platform);

    let opener = if args.no_open || !config.opener.enabled {
        None
    } else {
        Some(select_opener(platform, config.opener.command.as_deref()))
    };

    let options = ScaffoldOptions {
        title: args.title,
        tags: args.tags,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        blog: &config.blog,
        dry_run: args.dry_run,
    };

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    run(&mut prompt, &options, opener.as_deref())?;

    Ok(())
}

//! main.rs
//! Entry point for fxplore

use fxplore::app::Session;
use fxplore::core::render_listing;
use fxplore::utils::cli::Args;
use fxplore::utils::logging::init_logging;

use anyhow::Context;
use clap::Parser;

use std::io;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let criteria = args.criteria().context("invalid filter argument")?;
    let options = args.render_options();
    let start = args.initial_dir().with_context(|| match &args.path {
        Some(path) => format!("path '{}' cannot be opened", path.display()),
        None => "current directory cannot be opened".to_string(),
    })?;
    tracing::debug!(path = %start.display(), "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        render_listing(&start, &criteria, &options, &mut out)?;
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut err = io::stderr();

    let mut session = Session::new(start)
        .with_criteria(criteria)
        .with_render_options(options)
        .with_clear_screen(!args.no_clear);
    session.run(&mut input, &mut out, &mut err)?;
    Ok(())
}

use anyhow::{Context, Result};
use arraylist::cli::Cli;
use arraylist::{demo, logging};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let config = cli.demo_config();
    let report = demo::run(&config).context("Demo run failed")?;

    println!("len: {}, cap: {}", report.len, report.capacity);
    for outcome in &report.searches {
        match outcome.index {
            Some(index) => println!("bsearch({}) = {}", outcome.needle, index),
            None => println!("bsearch({}) = not found", outcome.needle),
        }
    }

    Ok(())
}

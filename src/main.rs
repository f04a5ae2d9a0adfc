#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
mod briefing;

use crate::briefing::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = &CmdArgs::parse(std::env::args().collect())?;

    tracing_subscriber::fmt()
        .with_max_level(if args.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = AppConfig::from_file(&args.config.clone())?;
    let pipeline = Pipeline::new(&config);

    match pipeline.run(args.dry_run).await? {
        RunOutcome::Delivered { cases } => println!("Briefing delivered with {cases} cases"),
        RunOutcome::NoFreshContent => println!("No fresh content; nothing delivered"),
    }

    Ok(())
}

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use daily_field::prelude::*;
use daily_field_examples::init_tracing;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "merge-hexagrams")]
#[command(about = "Merge scraped names and descriptions into a hexagram catalog")]
struct Args {
    /// Existing catalog JSON; its hanzi, lines and keywords are kept.
    catalog: PathBuf,

    /// Scraped records JSON: `[{"number", "name", "description"}]`.
    scraped: PathBuf,

    /// Where to write the merged catalog; stdout when omitted.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = File::open(&args.catalog)
        .with_context(|| format!("opening {}", args.catalog.display()))?;
    let mut catalog = HexagramCatalog::from_reader(BufReader::new(file))?;
    if catalog.len() != 64 {
        warn!("Catalog holds {} hexagrams, expected 64.", catalog.len());
    }

    let file = File::open(&args.scraped)
        .with_context(|| format!("opening {}", args.scraped.display()))?;
    let scraped: Vec<ScrapedHexagram> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.scraped.display()))?;

    let updated = catalog.merge_scraped(&scraped);
    let json = catalog.to_json_pretty()?;
    match &args.out {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    eprintln!("Merged {updated} of {} hexagrams.", catalog.len());
    Ok(())
}

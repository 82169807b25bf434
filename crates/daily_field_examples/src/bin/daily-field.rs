use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use daily_field::prelude::*;
use daily_field_examples::{init_tracing, render_layout_to_png, RenderConfig};
use tracing::info;

const DEMO_WORK: &str = r#"{"data": [
    {"name": "Protocol Weather", "technology": "Essay series", "description": [{"text": "Notes on coordination."}]},
    {"name": "Soft Infrastructure", "technology": "Essay", "description": [{"text": "Maintenance as politics."}]},
    {"name": "The Quiet Index", "technology": "Publication", "description": [{"text": "Archives that forget."}]},
    {"name": "Signal / Residue", "technology": "Essay", "description": [{"text": "What remains of a message."}]},
    {"name": "Forecast Culture", "technology": "Essay series", "description": [{"text": "Living inside prediction."}]},
    {"name": "Commons Drift", "technology": "Essay", "description": [{"text": "Enclosure at small scale."}]},
    {"name": "Framing Devices", "technology": "Publication", "description": [{"text": "Interfaces as arguments."}]},
    {"name": "Constellations", "technology": "Essay", "description": [{"text": "Patterns across projects."}]},
    {"name": "Attention Economies", "technology": "Essay", "description": [{"text": "Cognition for sale."}]},
    {"name": "Noise Floor", "technology": "Essay", "description": [{"text": "Incoherence as method."}]},
    {"name": "Logistics of Care", "technology": "Essay series", "description": [{"text": "Systems that hold."}]},
    {"name": "Provenance", "technology": "Publication", "description": [{"text": "Where records come from."}]}
]}"#;

#[derive(Parser, Debug)]
#[command(name = "daily-field")]
#[command(about = "Compute one day's selections and render its label field to PNG")]
struct Args {
    /// Day as YYYY-MM-DD; today in UTC when omitted.
    #[arg(short, long)]
    date: Option<String>,

    /// Work snapshot JSON (`{"data": [...]}`); a built-in demo list is used otherwise.
    #[arg(long)]
    work: Option<PathBuf>,

    /// Reading snapshot JSON (`{"shelves": {...}}`).
    #[arg(long)]
    reading: Option<PathBuf>,

    /// Hexagram catalog JSON, used to print the day's hexagram.
    #[arg(long)]
    hexagrams: Option<PathBuf>,

    /// Layout configuration JSON; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of featured (priority) items.
    #[arg(long, default_value_t = 8)]
    featured: usize,

    /// Output PNG path.
    #[arg(short, long, default_value = "daily-field.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let key = match &args.date {
        Some(date) => SeedKey::parse(date)?,
        None => SeedKey::today(),
    };
    let daily = Daily::for_key(key);
    let number = daily.hexagram_number();
    let mode = daily.vocabulary_mode();
    println!("day        {}", daily.key());
    println!("hexagram   {number}");

    if let Some(path) = &args.hexagrams {
        let catalog = HexagramCatalog::from_json_str(&read(path)?)?;
        if let Some(hexagram) = catalog.get_or_first(number) {
            println!("           {} {}", hexagram.name, hexagram.hanzi);
            for line in hexagram.lines_top_down() {
                match line {
                    Line::Yang => println!("           ━━━━━━━"),
                    Line::Yin => println!("           ━━━ ━━━"),
                }
            }
            println!("           {}", hexagram.summary);
        }
    }

    let words = daily.daily_words(
        daily_field::daily::WORD_COUNT,
        daily_field::daily::HIGHLIGHT_COUNT,
    );
    let cloud = BandScatter::default().place(words.words.len(), &mut daily.stream("cloud"))?;
    println!("mode       {}", mode.name);
    for (i, (word, at)) in words.words.iter().zip(&cloud).enumerate() {
        let mark = if words.is_highlighted(i) { "*" } else { " " };
        println!("         {mark} {word:<16} ({:5.1}, {:5.1})", at.x, at.y);
    }

    let items = load_items(&args)?;
    let featured = daily.featured(&items, args.featured);
    println!("featured   {}", ids(&featured));
    println!("resonant   {}", ids(&daily.resonant(&items, 3)));
    if !featured.is_empty() {
        let slots = u32::try_from(featured.len())?;
        let suggested = daily.suggested_index(slots)?;
        println!("suggested  {}", featured[suggested as usize].title);
    }

    let config: LayoutConfig = match &args.config {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("parsing layout config {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    let zones = vec![
        ExclusionZone::top_left_corner(35.0, 14.0),
        ExclusionZone::circle([50.0, 50.0], 26.0),
    ];
    let engine = FieldLayoutEngine::try_new(config, zones.clone())?;
    let labels = daily.label_items(&items, args.featured);
    let result = engine.run(&labels, &mut daily.stream("layout"))?;

    for p in &result.placements {
        let origin = match p.origin {
            PlacementOrigin::Search { attempt } => format!("search #{attempt}"),
            PlacementOrigin::Fallback { row, column } => format!("grid r{row} c{column}"),
        };
        println!(
            "  {:<12} ({:5.1}, {:5.1}) {}{}",
            p.item_id,
            p.position.x,
            p.position.y,
            if p.priority { "priority " } else { "" },
            origin
        );
    }
    info!(
        "Placed {} labels, {} on the fallback grid.",
        result.len(),
        result.fallbacks
    );

    let rc = RenderConfig::new((800, 800));
    render_layout_to_png(&result, &zones, &rc, &args.out)?;
    Ok(())
}

fn load_items(args: &Args) -> anyhow::Result<Vec<CatalogItem>> {
    let mut items = match &args.work {
        Some(path) => WorkSnapshot::from_json_str(&read(path)?)?.items(),
        None => WorkSnapshot::from_json_str(DEMO_WORK)?.items(),
    };
    if let Some(path) = &args.reading {
        items.extend(ReadingSnapshot::from_json_str(&read(path)?)?.items());
    }
    Ok(items)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn ids(items: &[CatalogItem]) -> String {
    items
        .iter()
        .map(|i| i.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

use clap::Parser;
use daily_field::prelude::*;
use daily_field_examples::init_tracing;
use glam::Vec2;
use tracing::info;

const ART: [&str; 5] = [
    r"   /\,%,_   ",
    r"   \%%%/,,\ ",
    r" _.-'%%|//% ",
    r"/.\.'  \%%% ",
    r"\ /  _, %%% ",
];

#[derive(Parser, Debug)]
#[command(name = "bounce-ascii")]
#[command(about = "Bounce a block of ASCII art around a character grid")]
struct Args {
    /// Grid width in characters.
    #[arg(long, default_value_t = 60)]
    cols: usize,

    /// Grid height in characters.
    #[arg(long, default_value_t = 16)]
    rows: usize,

    /// Frames to simulate.
    #[arg(short, long, default_value_t = 240)]
    frames: usize,

    /// Print every n-th frame.
    #[arg(long, default_value_t = 60)]
    every: usize,

    /// Seed for the start position and velocity; today's key when omitted.
    #[arg(short, long)]
    seed: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| SeedKey::today().to_string());
    let size = Vec2::new(ART[0].chars().count() as f32, ART.len() as f32);
    let bounds = Vec2::new(args.cols as f32, args.rows as f32);
    let mut sim = BounceSimulation::seeded(bounds, size, &mut SeededStream::new(&seed))?;
    info!(
        "Starting at ({:.1}, {:.1}) with velocity ({:.2}, {:.2}).",
        sim.position.x, sim.position.y, sim.velocity.x, sim.velocity.y
    );

    let every = args.every.max(1);
    let mut frame = 0usize;
    let mut clock = FixedClock::new(1.0, args.frames);
    drive(&mut sim, &mut clock, |sim| {
        frame += 1;
        if frame % every == 0 {
            println!("frame {frame}");
            print!("{}", draw(sim, args.cols, args.rows));
        }
    });
    Ok(())
}

fn draw(sim: &BounceSimulation, cols: usize, rows: usize) -> String {
    let mut grid = vec![vec![' '; cols]; rows];
    let x0 = sim.position.x.round() as usize;
    let y0 = sim.position.y.round() as usize;
    for (dy, line) in ART.iter().enumerate() {
        for (dx, ch) in line.chars().enumerate() {
            if let Some(cell) = grid.get_mut(y0 + dy).and_then(|row| row.get_mut(x0 + dx)) {
                *cell = ch;
            }
        }
    }
    let border = format!("+{}+\n", "-".repeat(cols));
    let mut out = border.clone();
    for row in grid {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

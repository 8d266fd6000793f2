use clap::Parser;

use crate::{app::PlayApp, tui::Tui};

mod app;
mod keys;
mod tui;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the piece randomizer (random if omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Simulation ticks per second
    #[clap(long, default_value_t = 60)]
    tick_rate: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app = PlayApp::new(args.seed);
    Tui::with_tick_rate(f64::from(args.tick_rate.max(1))).run(&mut app)?;
    Ok(())
}

//! CLI probe for lane packing.
//!
//! # Responsibility
//! - Load items from a JSON file (or the bundled seed) and print their lanes.
//! - Keep output deterministic for quick local sanity checks.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use timeline_core::{assign_lanes_with, default_items, parse_items, LaneStrategy};

#[derive(Debug, Parser)]
#[command(name = "timeline", version, about = "Pack timeline items into lanes")]
struct Args {
    /// JSON array of `{id, name, start, end}` items; bundled seed when omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Packing variant: sorted, input-order or best-gap.
    #[arg(long, default_value_t = LaneStrategy::SortedFirstFit)]
    strategy: LaneStrategy,

    /// Print the lane partition as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let items = match &args.file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_items(&raw).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => default_items().context("bundled seed is invalid")?,
    };

    let partition = assign_lanes_with(&items, args.strategy)
        .with_context(|| format!("lane assignment failed (strategy={})", args.strategy))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&partition)?);
        return Ok(());
    }

    println!(
        "timeline_core version={} strategy={} items={} lanes={}",
        timeline_core::core_version(),
        args.strategy,
        partition.item_count(),
        partition.lane_count()
    );
    for (index, lane) in partition.lanes().iter().enumerate() {
        let row = lane
            .items()
            .iter()
            .map(|item| format!("{} [{}..{}]", item.name, item.start, item.end))
            .collect::<Vec<_>>()
            .join(", ");
        println!("lane {index}: {row}");
    }
    Ok(())
}

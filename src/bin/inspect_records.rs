//! Validates a record file and prints a summary of its contents.
//!
//! Usage:
//!   inspect-records data/selfplay.rec
//!   inspect-records data/selfplay.rec --show 3

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tensor_chess::engine::move_codec::{decode_index, MoveIndexScheme};
use tensor_chess::engine::tensor::{Layer, LayerScheme};
use tensor_chess::recordio::RecordReader;
use tensor_chess::utils::{get_squares_from_mask_iter, Square};

#[derive(Parser)]
#[command(name = "inspect-records", about = "Validate and summarize a self-play record file")]
struct Cli {
    path: PathBuf,
    /// Print this many records in full
    #[arg(long, default_value_t = 0)]
    show: usize,
}

#[derive(Default, Serialize)]
struct Summary {
    records: usize,
    results: BTreeMap<i8, usize>,
    underpromotions: usize,
    max_repetition_count: u32,
    max_half_move_count: u32,
    invalid_records: usize,
}

fn squares(mask: u64) -> String {
    get_squares_from_mask_iter(mask).map(|square: Square| square.to_string()).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    let file = File::open(&cli.path).with_context(|| format!("opening {}", cli.path.display()))?;
    let reader = RecordReader::new(BufReader::new(file)).context("reading the stream header")?;

    let mut summary = Summary::default();
    for (position, record) in reader.enumerate() {
        let record = record.with_context(|| format!("reading record {}", position))?;
        summary.records += 1;
        *summary.results.entry(record.game_result).or_insert(0) += 1;
        summary.max_repetition_count = summary.max_repetition_count.max(record.repetition_count);
        summary.max_half_move_count = summary.max_half_move_count.max(record.half_move_count);

        let index = match record.move_index(MoveIndexScheme::Wide73) {
            Ok(index) => index,
            Err(err) => {
                warn!(record = position, %err, "record names an unencodable move");
                summary.invalid_records += 1;
                continue;
            }
        };
        if record.encoded_move_to >= 64 {
            summary.underpromotions += 1;
        }
        let (from, to_code) = decode_index(index, MoveIndexScheme::Wide73)?;
        if from as u8 != record.move_from || to_code != record.encoded_move_to {
            warn!(record = position, index, "stored move fields disagree with the move index");
            summary.invalid_records += 1;
        }
        if record.layers[Layer::MyLegalFrom as usize] & (1u64 << record.move_from) == 0 {
            warn!(record = position, "move source is not among the legal move sources");
            summary.invalid_records += 1;
        }
        debug!(record = position, index, "record ok");

        if position < cli.show {
            let tensor = record.to_tensor(LayerScheme::Full);
            println!("record {}: move index {} result {}", position, index, record.game_result);
            for layer in Layer::iter() {
                println!("  {:?}: {}", layer, squares(record.layers[layer as usize]));
            }
            println!("  tensor channels: {}", tensor.num_channels());
        }
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if summary.invalid_records > 0 {
        bail!("{} invalid records in {}", summary.invalid_records, cli.path.display());
    }
    Ok(())
}

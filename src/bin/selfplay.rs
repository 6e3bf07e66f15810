//! Runs self-play games and appends their training records to a record file.
//!
//! Both sides play the uniform baseline policy, so games differ only through exploration noise.
//!
//! Usage:
//!   selfplay --output data/selfplay.rec --games 200
//!   selfplay --output data/selfplay.rec --config selfplay.json --threads 4

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tensor_chess::engine::policy::{Policy, UniformPolicy};
use tensor_chess::engine::selfplay::{run_games, CancelToken, LearnerColor, RecordFilter, SelfPlayConfig};
use tensor_chess::engine::move_codec::MoveIndexScheme;
use tensor_chess::engine::tensor::LayerScheme;
use tensor_chess::recordio::RecordWriter;

/// Parses a snake_case enum name the same way the JSON config does.
fn parse_snake_case<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|err| err.to_string())
}

#[derive(Parser)]
#[command(name = "selfplay", about = "Generate self-play training records")]
struct Cli {
    /// Record file to append to; created with a version header if missing
    #[arg(long)]
    output: PathBuf,
    /// JSON config; command line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    games: Option<usize>,
    #[arg(long)]
    max_plies: Option<usize>,
    /// Per-game wall-clock budget in seconds
    #[arg(long)]
    max_game_seconds: Option<f64>,
    #[arg(long)]
    repetition_limit: Option<u32>,
    /// full or compact
    #[arg(long, value_parser = parse_snake_case::<LayerScheme>)]
    layer_scheme: Option<LayerScheme>,
    /// wide73 or flat64
    #[arg(long, value_parser = parse_snake_case::<MoveIndexScheme>)]
    move_scheme: Option<MoveIndexScheme>,
    /// random, alternate, white or black
    #[arg(long, value_parser = parse_snake_case::<LearnerColor>)]
    learner_color: Option<LearnerColor>,
    /// Only record the learner's plies
    #[arg(long)]
    learner_only: bool,
    #[arg(long)]
    noise_alpha: Option<f64>,
    #[arg(long)]
    noise_epsilon: Option<f32>,
    /// Sample straight from the policy without exploration noise
    #[arg(long)]
    no_noise: bool,
    #[arg(long)]
    seed: Option<u64>,
    /// Start FEN; repeat for several. Replaces the configured list
    #[arg(long = "start-fen")]
    start_fens: Vec<String>,
    /// Also start games from random rook endgames with this many rooks per side; repeatable
    #[arg(long = "rook-endgame")]
    rook_endgames: Vec<u8>,
    /// Stop starting new plies after this many seconds
    #[arg(long)]
    run_seconds: Option<u64>,
    #[arg(long)]
    threads: Option<usize>,
}

impl Cli {
    fn build_config(&self) -> Result<SelfPlayConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
                SelfPlayConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))?
            },
            None => SelfPlayConfig::default().with_exploration_noise(0.3, 0.25),
        };

        if let Some(games) = self.games {
            config = config.with_num_games(games);
        }
        if let Some(max_plies) = self.max_plies {
            config = config.with_max_plies(max_plies);
        }
        if let Some(seconds) = self.max_game_seconds {
            config = config.with_max_game_duration(Duration::from_secs_f64(seconds));
        }
        if let Some(limit) = self.repetition_limit {
            config = config.with_repetition_limit(limit);
        }
        if let Some(scheme) = self.layer_scheme {
            config = config.with_layer_scheme(scheme);
        }
        if let Some(scheme) = self.move_scheme {
            config = config.with_move_index_scheme(scheme);
        }
        if let Some(color) = self.learner_color {
            config = config.with_learner_color(color);
        }
        if self.learner_only {
            config = config.with_record_filter(RecordFilter::LearnerOnly);
        }
        if self.noise_alpha.is_some() || self.noise_epsilon.is_some() {
            let noise = config.exploration_noise.unwrap_or_default();
            config = config.with_exploration_noise(
                self.noise_alpha.unwrap_or(noise.alpha),
                self.noise_epsilon.unwrap_or(noise.epsilon),
            );
        }
        if self.no_noise {
            config = config.without_exploration_noise();
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if !self.start_fens.is_empty() {
            config = config.with_start_fens(self.start_fens.iter().cloned());
        }
        if !self.rook_endgames.is_empty() {
            config = config.with_random_rook_endgames(self.rook_endgames.clone());
        }
        Ok(config)
    }
}

fn uniform_policy() -> Box<dyn Policy> {
    Box::new(UniformPolicy)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring the game thread pool")?;
    }
    if config.exploration_noise.is_none() {
        warn!("exploration noise is off; games between uniform policies will all be identical");
    }

    let writer = RecordWriter::open_file(&cli.output)
        .with_context(|| format!("opening record file {}", cli.output.display()))?;
    info!(output = %cli.output.display(), config = %serde_json::to_string(&config)?, "starting self-play");

    let cancel = CancelToken::new();
    if let Some(seconds) = cli.run_seconds {
        let cancel = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            cancel.cancel();
        });
    }

    let stats = run_games(&config, &uniform_policy, &uniform_policy, &writer, &cancel);
    writer.flush().context("flushing record file")?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    info!(avg_score = stats.average_learner_score(), "average learner score");
    Ok(())
}

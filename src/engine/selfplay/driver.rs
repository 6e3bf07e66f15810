//! Plays games between a learning policy and an opponent and collects training records.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::engine::policy::Policy;
use crate::engine::prediction::evaluate_position;
use crate::engine::selfplay::config::SelfPlayConfig;
use crate::engine::selfplay::record::{backfill_results, TrainingRecord};
use crate::engine::selfplay::repetition::RepetitionTable;
use crate::engine::selfplay::sampling::{add_exploration_noise, pick_move};
use crate::engine::selfplay::sink::RecordSink;
use crate::engine::selfplay::start::choose_start_position;
use crate::engine::selfplay::CancelToken;
use crate::error::GameError;
use crate::state::{Position, Termination};
use crate::utils::Color;

/// Builds a fresh policy handle for one game.
pub type PolicyFactory<'a> = dyn Fn() -> Box<dyn Policy> + Sync + 'a;

/// Why a game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GameEnd {
    /// Ended by the rules, including the repetition limit.
    Rules(Termination),
    /// Adjudicated drawn at the ply limit.
    PlyLimit,
    /// Adjudicated drawn when the wall-clock budget ran out.
    TimeLimit,
}

/// Everything known about one finished game.
#[derive(Clone, Debug)]
pub struct GameReport {
    pub game_index: usize,
    pub learner: Color,
    pub end: GameEnd,
    /// -1, 0 or 1 from white's point of view.
    pub white_result: i8,
    pub plies: usize,
    pub final_position: Position,
    pub records: Vec<TrainingRecord>,
    pub duration: Duration,
}

impl GameReport {
    pub fn learner_score(&self) -> i8 {
        self.white_result * self.learner.sign()
    }
}

/// Plays one game from a start position drawn by [`choose_start_position`].
///
/// Records are collected for the plies `config.record_filter` keeps and their results are
/// back-filled before returning. A cancelled game, a bad start FEN or a failing policy
/// aborts the game.
pub fn play_game<R: Rng + ?Sized>(
    config: &SelfPlayConfig,
    game_index: usize,
    learner: Color,
    learner_policy: &mut dyn Policy,
    opponent_policy: &mut dyn Policy,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<GameReport, GameError> {
    let started = Instant::now();
    let mut position = choose_start_position(config, rng)?;
    let mut repetitions = RepetitionTable::new();
    let mut records = Vec::new();
    let mut ply = 0;
    let mut repetition_limit_reached = false;

    let end = loop {
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled(ply));
        }
        if let Some(termination) = position.termination() {
            break GameEnd::Rules(termination);
        }
        if repetition_limit_reached {
            break GameEnd::Rules(Termination::ThreefoldRepetition);
        }
        if ply >= config.max_plies {
            break GameEnd::PlyLimit;
        }
        if config.max_game_duration.is_some_and(|budget| started.elapsed() >= budget) {
            break GameEnd::TimeLimit;
        }

        let repetition_count = repetitions.increment(position.transposition_key());
        let mover = position.side_to_move;
        let policy: &mut dyn Policy = match mover == learner {
            true => &mut *learner_policy,
            false => &mut *opponent_policy,
        };

        let mut view = evaluate_position(policy, &position, ply as u32, repetition_count, config.schemes)
            .map_err(|source| GameError::Policy { ply, source })?;
        if let Some(noise) = config.exploration_noise {
            add_exploration_noise(&mut view.candidates, noise, rng);
        }
        let canonical_move = pick_move(&view.candidates, rng)
            .ok_or_else(|| GameError::NoCandidateMoves { fen: position.to_fen() })?;

        if config.record_filter.keeps(mover == learner) {
            records.push(TrainingRecord::new(view.encoded, canonical_move, config.schemes.moves, mover)?);
        }

        let mv = view.perspective.real_move(canonical_move);
        debug!(game = game_index, ply, mv = %mv, repetition_count, value = view.value, "ply");
        position.apply_move(mv);
        ply += 1;
        repetition_limit_reached = repetition_count >= config.repetition_limit;
    };

    let white_result = match end {
        GameEnd::Rules(termination) => position.white_score(termination),
        GameEnd::PlyLimit | GameEnd::TimeLimit => 0,
    };
    backfill_results(&mut records, white_result);

    Ok(GameReport {
        game_index,
        learner,
        end,
        white_result,
        plies: ply,
        final_position: position,
        records,
        duration: started.elapsed(),
    })
}

/// Totals over a run, reduced from per-game reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SelfPlayStats {
    pub games_played: usize,
    pub games_aborted: usize,
    pub learner_wins: usize,
    pub draws: usize,
    pub learner_losses: usize,
    pub total_learner_score: i64,
    pub total_plies: usize,
    pub records_written: usize,
    pub write_failures: usize,
    pub endings: HashMap<String, usize>,
}

impl SelfPlayStats {
    fn from_report(report: &GameReport, records_written: usize, write_failed: bool) -> SelfPlayStats {
        let score = report.learner_score();
        SelfPlayStats {
            games_played: 1,
            learner_wins: (score > 0) as usize,
            draws: (score == 0) as usize,
            learner_losses: (score < 0) as usize,
            total_learner_score: score as i64,
            total_plies: report.plies,
            records_written,
            write_failures: write_failed as usize,
            endings: HashMap::from([(format!("{:?}", report.end), 1)]),
            ..SelfPlayStats::default()
        }
    }

    fn aborted() -> SelfPlayStats {
        SelfPlayStats { games_aborted: 1, ..SelfPlayStats::default() }
    }

    pub fn merge(mut self, other: SelfPlayStats) -> SelfPlayStats {
        self.games_played += other.games_played;
        self.games_aborted += other.games_aborted;
        self.learner_wins += other.learner_wins;
        self.draws += other.draws;
        self.learner_losses += other.learner_losses;
        self.total_learner_score += other.total_learner_score;
        self.total_plies += other.total_plies;
        self.records_written += other.records_written;
        self.write_failures += other.write_failures;
        for (end, count) in other.endings {
            *self.endings.entry(end).or_insert(0) += count;
        }
        self
    }

    /// Mean learner score over finished games, in [-1, 1].
    pub fn average_learner_score(&self) -> f64 {
        match self.games_played {
            0 => 0.0,
            games => self.total_learner_score as f64 / games as f64,
        }
    }
}

const fn score_char(score: i8) -> char {
    match score.signum() {
        1 => '+',
        0 => '.',
        _ => '-',
    }
}

/// Plays `config.num_games` games in parallel and hands each finished game's records to `sink`.
///
/// Every game gets its own policies from the factories and its own RNG seeded with
/// `config.seed + game_index`. Aborted games and failed writes are logged and counted;
/// they never stop the other games.
pub fn run_games<S: RecordSink + ?Sized>(
    config: &SelfPlayConfig,
    learner_factory: &PolicyFactory,
    opponent_factory: &PolicyFactory,
    sink: &S,
    cancel: &CancelToken,
) -> SelfPlayStats {
    let started = Instant::now();
    let stats = (0..config.num_games)
        .into_par_iter()
        .map(|game_index| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(game_index as u64));
            let learner = config.learner_color.assign(game_index, &mut rng);
            let mut learner_policy = learner_factory();
            let mut opponent_policy = opponent_factory();

            let report = match play_game(config, game_index, learner, &mut *learner_policy, &mut *opponent_policy, &mut rng, cancel) {
                Ok(report) => report,
                Err(GameError::Cancelled(ply)) => {
                    debug!(game = game_index, ply, "game cancelled");
                    return SelfPlayStats::aborted();
                },
                Err(err) => {
                    warn!(game = game_index, %err, "game aborted");
                    return SelfPlayStats::aborted();
                }
            };

            let (records_written, write_failed) = match sink.accept(&report.records) {
                Ok(written) => (written, false),
                Err(err) => {
                    warn!(game = game_index, %err, "failed to write game records");
                    (0, true)
                }
            };
            info!(
                game = game_index,
                learner = ?report.learner,
                end = ?report.end,
                score = %score_char(report.learner_score()),
                plies = report.plies,
                records = records_written,
                "game finished"
            );
            SelfPlayStats::from_report(&report, records_written, write_failed)
        })
        .reduce(SelfPlayStats::default, SelfPlayStats::merge);

    info!(
        games = stats.games_played,
        aborted = stats.games_aborted,
        records = stats.records_written,
        avg_score = stats.average_learner_score(),
        elapsed = ?started.elapsed(),
        "self-play run finished"
    );
    stats
}

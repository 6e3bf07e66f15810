use std::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::engine::move_codec::MoveIndexScheme;
use crate::engine::prediction::EncodingSchemes;
use crate::engine::tensor::LayerScheme;
use crate::state::INITIAL_FEN;
use crate::utils::Color;

/// Which color the learning policy plays in each game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerColor {
    #[default]
    Random,
    /// White in even-numbered games, black in odd ones.
    Alternate,
    White,
    Black,
}

impl LearnerColor {
    pub fn assign<R: Rng + ?Sized>(&self, game_index: usize, rng: &mut R) -> Color {
        match self {
            LearnerColor::Random => Color::from(rng.gen_bool(0.5)),
            LearnerColor::Alternate => Color::from(game_index % 2 == 1),
            LearnerColor::White => Color::White,
            LearnerColor::Black => Color::Black,
        }
    }
}

/// Which plies become training records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFilter {
    #[default]
    AllPlies,
    LearnerOnly,
}

impl RecordFilter {
    pub const fn keeps(&self, learner_to_move: bool) -> bool {
        match self {
            RecordFilter::AllPlies => true,
            RecordFilter::LearnerOnly => learner_to_move,
        }
    }
}

/// Dirichlet noise mixed into the legal-move probabilities before sampling:
/// `p' = (1 - epsilon) * p + epsilon * noise`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorationNoise {
    pub alpha: f64,
    pub epsilon: f32,
}

impl Default for ExplorationNoise {
    fn default() -> Self {
        ExplorationNoise { alpha: 0.3, epsilon: 0.25 }
    }
}

/// Settings for a self-play run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    /// Games are adjudicated drawn after this many plies.
    pub max_plies: usize,
    /// Wall-clock budget per game, adjudicated as a draw when exceeded.
    pub max_game_duration: Option<Duration>,
    /// Occurrences of one position that end the game as a draw.
    pub repetition_limit: u32,
    pub schemes: EncodingSchemes,
    pub learner_color: LearnerColor,
    pub record_filter: RecordFilter,
    pub exploration_noise: Option<ExplorationNoise>,
    /// Game `i` samples from an RNG seeded with `seed + i`.
    pub seed: u64,
    /// FENs a game may start from.
    pub start_fens: Vec<String>,
    /// Rooks per side for each random rook endgame a game may start from.
    /// Every entry here and in `start_fens` is an equally likely start.
    pub random_rook_endgames: Vec<u8>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 200,
            max_plies: 512,
            max_game_duration: None,
            repetition_limit: 3,
            schemes: EncodingSchemes::default(),
            learner_color: LearnerColor::Random,
            record_filter: RecordFilter::AllPlies,
            exploration_noise: None,
            seed: 0,
            start_fens: vec![INITIAL_FEN.to_string()],
            random_rook_endgames: Vec::new(),
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_num_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_max_game_duration(mut self, duration: Duration) -> Self {
        self.max_game_duration = Some(duration);
        self
    }

    pub fn with_repetition_limit(mut self, limit: u32) -> Self {
        self.repetition_limit = limit.max(1);
        self
    }

    pub fn with_layer_scheme(mut self, scheme: LayerScheme) -> Self {
        self.schemes.layers = scheme;
        self
    }

    pub fn with_move_index_scheme(mut self, scheme: MoveIndexScheme) -> Self {
        self.schemes.moves = scheme;
        self
    }

    pub fn with_learner_color(mut self, learner_color: LearnerColor) -> Self {
        self.learner_color = learner_color;
        self
    }

    pub fn with_record_filter(mut self, record_filter: RecordFilter) -> Self {
        self.record_filter = record_filter;
        self
    }

    pub fn with_exploration_noise(mut self, alpha: f64, epsilon: f32) -> Self {
        self.exploration_noise = Some(ExplorationNoise { alpha, epsilon });
        self
    }

    pub fn without_exploration_noise(mut self) -> Self {
        self.exploration_noise = None;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_fens<I, S>(mut self, fens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.start_fens = fens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_random_rook_endgames(mut self, rooks_per_side: Vec<u8>) -> Self {
        self.random_rook_endgames = rooks_per_side;
        self
    }
}

use std::io::Cursor;
use tensor_chess::engine::move_codec::{MoveIndexScheme, NUM_OUTPUT_POLICY_MOVES};
use tensor_chess::engine::policy::{Policy, UniformPolicy};
use tensor_chess::engine::prediction::{predict_fen, EncodingSchemes};
use tensor_chess::engine::selfplay::{run_games, CancelToken, LearnerColor, SelfPlayConfig};
use tensor_chess::recordio::{PositionRecord, RecordReader, RecordWriter, FORMAT_VERSION};
use tensor_chess::state::Position;

fn uniform() -> Box<dyn Policy> {
    Box::new(UniformPolicy)
}

fn small_config() -> SelfPlayConfig {
    SelfPlayConfig::default()
        .with_num_games(6)
        .with_max_plies(40)
        .with_learner_color(LearnerColor::Alternate)
        .with_exploration_noise(0.3, 0.25)
        .with_seed(11)
}

fn play_into_buffer(config: &SelfPlayConfig) -> (usize, Vec<u8>) {
    let writer = RecordWriter::create(Vec::new()).unwrap();
    let stats = run_games(config, &uniform, &uniform, &writer, &CancelToken::new());
    assert_eq!(stats.games_played, config.num_games);
    assert_eq!(stats.write_failures, 0);
    assert_eq!(writer.records_written(), stats.records_written as u64);
    (stats.records_written, writer.into_inner())
}

#[test]
fn test_selfplay_stream_reads_back() {
    let (written, bytes) = play_into_buffer(&small_config());
    assert_eq!(bytes[0], FORMAT_VERSION);

    let records: Vec<PositionRecord> = RecordReader::new(Cursor::new(bytes))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), written);
    assert!(!records.is_empty());

    for record in &records {
        assert!((-1..=1).contains(&record.game_result));
        let index = record.move_index(MoveIndexScheme::Wide73).unwrap();
        assert!(index < NUM_OUTPUT_POLICY_MOVES);
        assert_eq!(index / 73, record.move_from as usize);
        assert!(record.repetition_count >= 1);
    }
    // Each game starts from the initial position, encoded from white's side.
    let openings = records.iter().filter(|record| record.half_move_count == 0).count();
    assert_eq!(openings, 6);
}

#[test]
fn test_same_seed_same_stream() {
    let (_, first) = play_into_buffer(&small_config());
    let (_, second) = play_into_buffer(&small_config());
    let sorted = |bytes: Vec<u8>| {
        let mut records: Vec<Vec<u8>> = RecordReader::new(Cursor::new(bytes))
            .unwrap()
            .map(|record| record.unwrap().to_payload().unwrap())
            .collect();
        records.sort();
        records
    };
    assert_eq!(sorted(first), sorted(second));
}

#[test]
fn test_cancelled_run_writes_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let writer = RecordWriter::create(Vec::new()).unwrap();
    let stats = run_games(&small_config(), &uniform, &uniform, &writer, &cancel);
    assert_eq!(stats.games_played, 0);
    assert_eq!(stats.games_aborted, 6);
    assert_eq!(writer.into_inner(), vec![FORMAT_VERSION]);
}

#[test]
fn test_predict_fen_with_uniform_policy() {
    let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    let moves = predict_fen(&mut UniformPolicy, fen, 1, 5, EncodingSchemes::default()).unwrap();
    assert_eq!(moves.len(), 5);
    let position = Position::from_fen(fen).unwrap();
    for (uci, probability) in moves {
        assert!(position.find_legal_move(&uci).is_some(), "{} is not legal", uci);
        assert!((probability - 1.0 / NUM_OUTPUT_POLICY_MOVES as f32).abs() < 1e-9);
    }
    assert!(predict_fen(&mut UniformPolicy, "not a fen", 0, 5, EncodingSchemes::default()).is_err());
}

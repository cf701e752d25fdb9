// Integration tests for syncx
use std::fmt::Write as _;
use std::sync::Arc;

use syncx::input;
use syncx_core::{AlignConfig, AlignEvent, AlignmentEngine, CorpusStatistics, Frame, Unit,
    UnitSimilarity, PREDICATE_ROLE};
use syncx_lexicon::{Category, InMemoryLexicon, Relation, WordSimilarityEngine};

fn tag(text: &str) -> Unit {
    Unit::new(
        text,
        text.split_whitespace()
            .map(|w| (w.to_string(), "NN".to_string())),
    )
}

fn tagged(texts: &[&str]) -> Vec<Unit> {
    texts.iter().map(|t| tag(t)).collect()
}

// car/automobile -> motor vehicle -> vehicle -> entity
fn vehicle_lexicon() -> Arc<InMemoryLexicon> {
    let mut lex = InMemoryLexicon::new();
    lex.add_synset(1, Category::Noun, &["car", "automobile"]).unwrap();
    lex.add_synset(2, Category::Noun, &["motor vehicle"]).unwrap();
    lex.add_synset(3, Category::Noun, &["vehicle"]).unwrap();
    lex.add_synset(4, Category::Noun, &["entity"]).unwrap();
    lex.add_relation(1, Relation::Hypernym, 2).unwrap();
    lex.add_relation(2, Relation::Hypernym, 3).unwrap();
    lex.add_relation(3, Relation::Hypernym, 4).unwrap();
    Arc::new(lex)
}

fn format_stream(engine: &AlignmentEngine, primary: &[Unit], secondary: &[Unit]) -> String {
    let mut out = String::new();
    engine
        .run(primary, secondary, &mut |event| match event {
            AlignEvent::Match(m) => {
                writeln!(out, "match - {} - {} - {:.2}", m.secondary, m.primary, m.score).unwrap();
            }
            AlignEvent::Progress { stage, percent } => {
                writeln!(out, "{stage}progress - {percent}%").unwrap();
            }
        })
        .unwrap();
    out
}

#[test]
fn test_identical_sequences_produce_perfect_matches() {
    let config = AlignConfig {
        min_delta: 0.5,
        min_matching_words: 2,
        relative_search_window: 0.1,
        ..AlignConfig::default()
    };
    let engine = AlignmentEngine::new(Arc::new(InMemoryLexicon::new()), config).unwrap();
    let primary = tagged(&["the cat sat", "it was raining"]);
    let secondary = tagged(&["the cat sat", "it was raining"]);

    let stream = format_stream(&engine, &primary, &secondary);
    assert!(stream.contains("match - 0 - 0 - 1.00"), "stream:\n{stream}");
    assert!(stream.contains("match - 1 - 1 - 1.00"), "stream:\n{stream}");
    assert!(stream.contains("similarityprogress - 100%"));
}

#[test]
fn test_short_unit_without_anchor_yields_no_match() {
    let config = AlignConfig {
        min_delta: 0.5,
        min_matching_words: 2,
        relative_search_window: 0.1,
        ..AlignConfig::default()
    };
    let engine = AlignmentEngine::new(Arc::new(InMemoryLexicon::new()), config).unwrap();
    let primary = tagged(&["dog"]);
    let secondary = tagged(&["dog", "the cat sat"]);

    let stream = format_stream(&engine, &primary, &secondary);
    assert!(!stream.contains("match"), "stream:\n{stream}");
}

#[test]
fn test_role_strategy_scores_related_arguments_between_zero_and_one() {
    let config = AlignConfig {
        min_matching_words: 2,
        ..AlignConfig::default()
    };
    let scorer = UnitSimilarity::new(vehicle_lexicon(), &config);

    let buy_frame = |object: &str| {
        Frame::from_roles([
            (PREDICATE_ROLE.to_string(), vec!["buy".to_string()]),
            ("A1".to_string(), vec![object.to_string()]),
        ])
    };
    let a = tag("he buys a car").with_frames([("buy".to_string(), buy_frame("car"))]);
    let b = tag("he buys a vehicle").with_frames([("buy".to_string(), buy_frame("vehicle"))]);

    let units = [a.clone(), b.clone()];
    let corpus = CorpusStatistics::build(units.iter());
    let sim = scorer.similarity(&a, &b, &corpus);
    assert!(sim > 0.0 && sim < 1.0, "expected partial score, got {sim}");
}

#[test]
fn test_hierarchy_backed_alignment_beats_unrelated_candidates() {
    let config = AlignConfig {
        min_delta: 0.4,
        min_matching_words: 2,
        min_word_similarity: 0.1,
        ..AlignConfig::default()
    };
    let engine = AlignmentEngine::new(vehicle_lexicon(), config).unwrap();
    let primary = tagged(&["he bought a car"]);
    let secondary = tagged(&["completely unrelated words here", "he bought a vehicle"]);

    let matches = engine.align(&primary, &secondary).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].secondary, 1);
    assert!(matches[0].score > 0.4 && matches[0].score < 1.0);
}

#[test]
fn test_alignment_is_deterministic_across_runs() {
    let config = AlignConfig {
        min_delta: 0.3,
        min_matching_words: 2,
        min_word_similarity: 0.1,
        ..AlignConfig::default()
    };
    let primary = tagged(&[
        "he bought a car",
        "the vehicle stopped",
        "it was raining",
    ]);
    let secondary = tagged(&[
        "it was raining",
        "he bought a vehicle",
        "the car stopped",
    ]);

    let mut streams = Vec::new();
    for _ in 0..3 {
        let engine = AlignmentEngine::new(vehicle_lexicon(), config.clone()).unwrap();
        streams.push(format_stream(&engine, &primary, &secondary));
    }
    assert_eq!(streams[0], streams[1]);
    assert_eq!(streams[1], streams[2]);
}

#[test]
fn test_word_similarity_cache_transparency_end_to_end() {
    let engine = WordSimilarityEngine::new(vehicle_lexicon());
    let first = engine.similarity("car", "NN", "vehicle", "NN");
    let expansions = engine.graph().expansion_count();
    let second = engine.similarity("car", "NN", "vehicle", "NN");
    assert_eq!(first, second);
    assert_eq!(engine.graph().expansion_count(), expansions);
}

#[test]
fn test_noun_holonym_cycle_terminates_end_to_end() {
    // An artificial holonym loop: the traversal must fall back to
    // hypernym-only and still produce a score.
    let mut lex = InMemoryLexicon::new();
    lex.add_synset(1, Category::Noun, &["wheel"]).unwrap();
    lex.add_synset(2, Category::Noun, &["artifact"]).unwrap();
    lex.add_synset(3, Category::Noun, &["spoke"]).unwrap();
    lex.add_synset(4, Category::Noun, &["entity"]).unwrap();
    lex.add_relation(1, Relation::Hypernym, 2).unwrap();
    lex.add_relation(3, Relation::Hypernym, 2).unwrap();
    lex.add_relation(2, Relation::Hypernym, 4).unwrap();
    lex.add_relation(1, Relation::PartHolonym, 3).unwrap();
    lex.add_relation(3, Relation::PartHolonym, 1).unwrap();

    let engine = WordSimilarityEngine::new(Arc::new(lex));
    let sim = engine.similarity("wheel", "NN", "spoke", "NN");
    assert!((0.0..=1.0).contains(&sim));
    assert!(sim > 0.0, "wheel and spoke share the artifact ancestor");
}

#[test]
fn test_annotated_pipeline_end_to_end() {
    use std::io::Write;

    let json = r#"{
        "primary": [
            {"text": "He buys a car",
             "tokens": [["He", "PRP"], ["buys", "VBZ"], ["a", "DT"], ["car", "NN"]],
             "frames": {"buy": {"rel": ["buy"], "A1": ["car"]}}},
            {"text": "Yes", "tokens": [["Yes", "UH"]]}
        ],
        "secondary": [
            {"text": "He buys a car",
             "tokens": [["He", "PRP"], ["buys", "VBZ"], ["a", "DT"], ["car", "NN"]],
             "frames": {"buy": {"rel": ["buy"], "A1": ["car"]}}},
            {"text": "Yes", "tokens": [["Yes", "UH"]]}
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let (primary, secondary) = input::load_annotated(file.path()).unwrap();
    let config = AlignConfig {
        min_delta: 0.5,
        min_matching_words: 2,
        relative_search_window: 0.5,
        ..AlignConfig::default()
    };
    let engine = AlignmentEngine::new(vehicle_lexicon(), config).unwrap();
    let matches = engine.align(&primary, &secondary).unwrap();

    // The full frame match anchors the window; the short "Yes" then matches
    // exactly inside it.
    assert_eq!(matches.len(), 2);
    assert_eq!((matches[0].primary, matches[0].secondary), (0, 0));
    assert_eq!((matches[1].primary, matches[1].secondary), (1, 1));
    assert_eq!(matches[1].score, 1.0);
}

use discovery_ranking::models::AudioFeatures;
use discovery_ranking::services::discovery::score_candidates;
use discovery_ranking::services::exploration::{RoundKind, SelectionRng};
use discovery_ranking::services::recall::RecallError;
use discovery_ranking::{
    Catalog, Config, DiscoveryPipeline, EpsilonGreedyReranker, Item, PipelineError,
    RankingLayer, ReferenceStats,
};
use std::collections::HashSet;

const GENRES: [&str; 6] = ["pop", "rock", "jazz", "folk", "metal", "ambient"];

/// Deterministic synthetic catalog with spread-out features and popularity
fn catalog(size: usize) -> Catalog {
    let items = (0..size)
        .map(|i| {
            let x = i as f64;
            Item {
                id: format!("track-{:03}", i),
                name: format!("Track {}", i),
                artist: format!("Artist {}", i % 9),
                album: format!("Album {}", i % 13),
                genre: GENRES[(i * 7 + i / 5) % GENRES.len()].to_string(),
                popularity: ((i * 37) % 101) as f64,
                duration_ms: 150_000 + (i as u64 * 1_000),
                explicit: i % 4 == 0,
                features: AudioFeatures {
                    danceability: (x * 0.37).sin().abs(),
                    energy: (x * 0.11).cos().abs(),
                    key: (i % 12) as f64,
                    loudness: -5.0 - (x * 0.7).sin() * 10.0,
                    mode: (i % 2) as f64,
                    speechiness: ((i * 13) % 17) as f64 / 17.0,
                    acousticness: (x * 0.23).sin().powi(2),
                    instrumentalness: ((i * 5) % 11) as f64 / 11.0,
                    liveness: ((i * 3) % 7) as f64 / 7.0,
                    valence: (x * 0.05).cos().powi(2),
                    tempo: 80.0 + ((i * 29) % 90) as f64,
                    time_signature: 4.0,
                },
            }
        })
        .collect();
    Catalog::new(items)
}

fn seeds() -> Vec<String> {
    vec!["track-001".into(), "track-010".into(), "track-042".into()]
}

#[test]
fn test_unknown_seed_ids_fail() {
    let pipeline = DiscoveryPipeline::new(catalog(50));
    let err = pipeline.recall(&["nope", "also-nope"], 20).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Recall(RecallError::InvalidSeed(2))
    ));
}

#[test]
fn test_pipeline_standardizes_every_catalog_row() {
    let pipeline = DiscoveryPipeline::new(catalog(40));

    assert_eq!(pipeline.features().nrows(), pipeline.catalog().len());
    let seed = pipeline.catalog().get("track-010").unwrap();
    assert_eq!(seed.name, "Track 10");

    // standardized columns are centred
    for column in pipeline.features().view().columns() {
        assert!(column.mean().unwrap().abs() < 1e-9);
    }
}

#[test]
fn test_candidates_exclude_seeds() {
    let pipeline = DiscoveryPipeline::new(catalog(80));
    let seeds = seeds();
    let candidates = pipeline.recall(&seeds, 200).unwrap();

    assert_eq!(candidates.len(), 80 - seeds.len());
    assert!(candidates.iter().all(|c| !seeds.contains(&c.id)));
}

#[test]
fn test_rerank_is_deterministic() {
    let pipeline = DiscoveryPipeline::new(catalog(120));
    let candidates = pipeline.recall(&seeds(), 60).unwrap();
    let references = pipeline.references(true);
    let reranker = EpsilonGreedyReranker::new(0.4).unwrap();

    let first = reranker.rerank(&candidates, 15, 42, &references);
    let second = reranker.rerank(&candidates, 15, 42, &references);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_rerank_no_duplicates_and_length() {
    let pipeline = DiscoveryPipeline::new(catalog(100));
    let candidates = pipeline.recall(&seeds(), 25).unwrap();
    let references = pipeline.references(true);

    for epsilon in [0.0, 0.3, 0.7, 1.0] {
        let reranker = EpsilonGreedyReranker::new(epsilon).unwrap();
        for k in [1usize, 10, 25, 40] {
            for seed in [0u64, 7, 42] {
                let playlist = reranker.rerank(&candidates, k, seed, &references);
                assert_eq!(playlist.len(), k.min(candidates.len()));

                let ids: HashSet<&str> =
                    playlist.iter().map(|s| s.candidate.id.as_str()).collect();
                assert_eq!(ids.len(), playlist.len(), "duplicate id at epsilon {}", epsilon);
            }
        }
    }
}

#[test]
fn test_zero_epsilon_matches_baseline() {
    let pipeline = DiscoveryPipeline::new(catalog(90));
    let candidates = pipeline.recall(&seeds(), 40).unwrap();
    let baseline = RankingLayer::new().baseline_playlist(&candidates, 12);

    let reranked = EpsilonGreedyReranker::new(0.0).unwrap().rerank(
        &candidates,
        12,
        1234,
        &ReferenceStats::candidate_local(),
    );

    let baseline_ids: Vec<&str> = baseline.iter().map(|c| c.id.as_str()).collect();
    let reranked_ids: Vec<&str> = reranked.iter().map(|s| s.candidate.id.as_str()).collect();
    assert_eq!(baseline_ids, reranked_ids);
}

#[test]
fn test_full_exploration_draws_once_per_round() {
    let pipeline = DiscoveryPipeline::new(catalog(90));
    let candidates = pipeline.recall(&seeds(), 40).unwrap();
    let scored = score_candidates(&candidates, &pipeline.references(true), None);

    let mut rng = SelectionRng::seed_from_u64(42);
    let outcome = EpsilonGreedyReranker::new(1.0)
        .unwrap()
        .select(&scored, 10, &mut rng);

    assert!(outcome.rounds.iter().all(|r| *r == RoundKind::Explore));
    assert_eq!(rng.uniform_draws(), 10);
    assert_eq!(rng.aux_draws(), 10);
}

#[test]
fn test_reference_mode_changes_scores() {
    let pipeline = DiscoveryPipeline::new(catalog(90));
    let candidates = pipeline.recall(&seeds(), 20).unwrap();

    let local = score_candidates(&candidates, &pipeline.references(false), None);
    let global = score_candidates(&candidates, &pipeline.references(true), None);

    // candidate-local counts are never larger than catalog-wide counts
    for (l, g) in local.iter().zip(&global) {
        assert!(l.genre_rarity >= g.genre_rarity);
        assert_eq!(l.pop_balance_penalty, g.pop_balance_penalty);
    }
}

#[test]
fn test_audit_report() {
    let pipeline = DiscoveryPipeline::new(catalog(150));
    let config = Config {
        seed_ids: seeds(),
        top_n: 50,
        k: 10,
        epsilon: 0.3,
        ..Config::default()
    };

    let report = pipeline.audit(&config).unwrap();
    assert_eq!(report.candidate_count, 50);
    assert_eq!(report.baseline.len(), 10);
    assert_eq!(report.reranked.len(), 10);
    assert_eq!(report.sweep.len(), config.sweep_epsilons.len());

    for metrics in [report.baseline_metrics, report.reranked_metrics] {
        assert!((0.0..1.0).contains(&metrics.gini_popularity));
        assert!(metrics.entropy_genre >= 0.0);
        assert!((0.0..=1.0).contains(&metrics.long_tail_exposure));
    }

    // sweep point at epsilon 0 is the baseline list
    let zero = report.sweep.iter().find(|p| p.epsilon == 0.0).unwrap();
    assert_eq!(zero.metrics, report.baseline_metrics);

    let json = serde_json::to_value(&report).unwrap();
    let reranked = json["reranked"].as_array().unwrap();
    for key in [
        "id",
        "name",
        "artist",
        "genre",
        "popularity",
        "relevance_score",
        "genre_rarity",
        "long_tail_bonus",
        "pop_balance_penalty",
        "discovery_score",
    ] {
        assert!(reranked[0].get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn test_audit_rejects_invalid_config() {
    let pipeline = DiscoveryPipeline::new(catalog(30));
    let config = Config {
        seed_ids: seeds(),
        epsilon: 1.5,
        ..Config::default()
    };
    assert!(matches!(
        pipeline.audit(&config),
        Err(PipelineError::Config(_))
    ));
}

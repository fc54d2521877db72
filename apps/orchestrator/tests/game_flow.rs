// [apps/orchestrator/tests/game_flow.rs]
//! End-to-end exercise of the Store + Flag Factory + Submission Engine +
//! Scoring Engine against a real temporary on-disk database, covering the
//! literal scenarios spec.md §8 describes.

use adctf_domain_models::Team;
use adctf_infra_store::{Store, StoreClient, StoreError};
use adctf_orchestrator::config::ScoringConfig;
use adctf_orchestrator::services::{EventBus, FlagFactory, ScoringEngine, SubmissionEngine};

async fn test_store() -> (Store, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("game.db");
    let client = StoreClient::connect(db_path.to_str().unwrap(), None).await.unwrap();
    (Store::new(client), dir)
}

fn teams(n: i64) -> Vec<Team> {
    (1..=n)
        .map(|i| Team { id: i, name: format!("Team {i}"), host: "127.0.0.1".into(), port: 8000 + i as u16 })
        .collect()
}

/// spec.md §8 invariant 1: exactly 3 flags per team per round.
#[tokio::test]
async fn flag_factory_mints_three_per_team() {
    let (store, _dir) = test_store().await;
    let team_rows = teams(3);
    for team in &team_rows {
        store.add_team(team).await.unwrap();
    }
    let round_id = store.create_round(1).await.unwrap();

    let factory = FlagFactory::new(store.clone());
    factory.create_flags_for_round(round_id, 1, &team_rows).await.unwrap();

    for team in &team_rows {
        let flags = store.flags_for_team_round(team.id, round_id).await.unwrap();
        assert_eq!(flags.len(), 3);
    }
}

/// spec.md §8 scenario (c): submitting your own flag is rejected and no row
/// is written.
#[tokio::test]
async fn rejects_self_submission() {
    let (store, _dir) = test_store().await;
    let team_rows = teams(2);
    for team in &team_rows {
        store.add_team(team).await.unwrap();
    }
    let round_id = store.create_round(1).await.unwrap();

    let factory = FlagFactory::new(store.clone());
    factory.create_flags_for_round(round_id, 1, &team_rows).await.unwrap();
    let own_flag = store.flags_for_team_round(1, round_id).await.unwrap().remove(0);

    let engine = SubmissionEngine::new(store.clone(), EventBus::new());
    let outcome = engine.submit(1, &own_flag.value, round_id, 1).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Cannot submit your own flag");
    assert_eq!(store.submission_history(10).await.unwrap().len(), 0);
}

/// spec.md §8 scenario (d): submitting the same flag twice — first
/// succeeds, second is rejected as a replay.
#[tokio::test]
async fn replay_is_rejected_after_first_accept() {
    let (store, _dir) = test_store().await;
    let team_rows = teams(2);
    for team in &team_rows {
        store.add_team(team).await.unwrap();
    }
    let round_id = store.create_round(1).await.unwrap();

    let factory = FlagFactory::new(store.clone());
    factory.create_flags_for_round(round_id, 1, &team_rows).await.unwrap();
    let victim_flag = store.flags_for_team_round(2, round_id).await.unwrap().remove(0);

    let engine = SubmissionEngine::new(store.clone(), EventBus::new());

    let first = engine.submit(1, &victim_flag.value, round_id, 1).await.unwrap();
    assert!(first.success);
    assert_eq!(first.message, "Flag accepted");
    assert_eq!(first.target_team_id, Some(2));

    let second = engine.submit(1, &victim_flag.value, round_id, 1).await.unwrap();
    assert!(!second.success);
    assert_eq!(second.message, "This flag has already been submitted");
}

/// An unknown flag value is always rejected.
#[tokio::test]
async fn unknown_flag_is_invalid() {
    let (store, _dir) = test_store().await;
    let engine = SubmissionEngine::new(store.clone(), EventBus::new());
    let outcome = engine.submit(1, "FLAG{not_a_real_flag}", 1, 1).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Invalid flag");
}

/// Closing an already-closed round is a no-op (spec.md §8 idempotence).
#[tokio::test]
async fn closing_round_twice_is_a_noop() {
    let (store, _dir) = test_store().await;
    let round_id = store.create_round(1).await.unwrap();

    store.close_round(round_id).await.unwrap();
    let round = store.get_round_by_number(1).await.unwrap().unwrap();
    let first_end_time = round.end_time;

    store.close_round(round_id).await.unwrap();
    let round_again = store.get_round_by_number(1).await.unwrap().unwrap();
    assert_eq!(round_again.end_time, first_end_time);
}

/// spec.md §8 scenario (a): two teams, both up, no submissions — SLA splits
/// the full pool evenly and defense stays at the base score.
#[tokio::test]
async fn scenario_a_two_teams_up_no_submissions() -> Result<(), StoreError> {
    let (store, _dir) = test_store().await;
    let team_rows = teams(2);
    for team in &team_rows {
        store.add_team(team).await?;
    }
    let round_id = store.create_round(1).await?;

    for team in &team_rows {
        store.record_probe(team.id, round_id, true, 0.05, None).await?;
    }

    let scoring = ScoringEngine::new(
        store.clone(),
        ScoringConfig {
            sla_total_pool: 512.0,
            base_defense_score: 12.0,
            attack_score_per_flag: 1.0,
            defense_penalty_per_steal: 1.0,
        },
    );
    let scores = scoring.score_round(round_id, &team_rows).await?;

    for score in &scores {
        assert_eq!(score.sla, 256.00);
        assert_eq!(score.defense, 12.00);
        assert_eq!(score.attack, 0.00);
        assert_eq!(score.total, 268.00);
    }

    Ok(())
}

/// spec.md §8 scenario (b): team 1 steals team 2's flag once; everyone else
/// is up with no submissions against them.
#[tokio::test]
async fn scenario_b_scoring_matches_the_literal_fixture() -> Result<(), StoreError> {
    let (store, _dir) = test_store().await;
    let team_rows = teams(4);
    for team in &team_rows {
        store.add_team(team).await?;
    }
    let round_id = store.create_round(1).await?;

    for team in &team_rows {
        store.record_probe(team.id, round_id, true, 0.05, None).await?;
    }

    let factory = FlagFactory::new(store.clone());
    factory.create_flags_for_round(round_id, 1, &team_rows).await?;
    let victim_flag = store.flags_for_team_round(2, round_id).await?.remove(0);

    let engine = SubmissionEngine::new(store.clone(), EventBus::new());
    let outcome = engine.submit(1, &victim_flag.value, round_id, 1).await?;
    assert!(outcome.success);

    let scoring = ScoringEngine::new(
        store.clone(),
        ScoringConfig {
            sla_total_pool: 512.0,
            base_defense_score: 12.0,
            attack_score_per_flag: 1.0,
            defense_penalty_per_steal: 1.0,
        },
    );
    let scores = scoring.score_round(round_id, &team_rows).await?;

    let total_for = |team_id: i64| scores.iter().find(|s| s.team_id == team_id).unwrap().total;
    assert_eq!(total_for(1), 141.00);
    assert_eq!(total_for(2), 139.00);
    assert_eq!(total_for(3), 140.00);
    assert_eq!(total_for(4), 140.00);

    Ok(())
}

//! Settings and study log command tests.

mod common;

use matchcards_core::{EngineConfig, RefillStrategy};
use pretty_assertions::assert_eq;
use study_host::commands::{self, StartMode};
use study_host::db::SqliteRepository;
use study_host::state::AppState;

use common::{fixtures, play_to_end, TestContext};

#[tokio::test]
async fn test_get_settings_default() {
    let ctx = TestContext::new();
    let settings = commands::get_game_settings(&ctx.state).await.unwrap();
    assert_eq!(settings, EngineConfig::default());
}

#[tokio::test]
async fn test_save_settings_clamps_and_drops_seed() {
    let ctx = TestContext::new();
    let requested = EngineConfig {
        window_size: 0,
        refill_threshold: 9,
        seed: Some(42),
        ..EngineConfig::default()
    };
    let saved = commands::save_game_settings(requested, &ctx.state)
        .await
        .unwrap();
    assert_eq!(saved.window_size, 1);
    assert_eq!(saved.refill_threshold, 1);
    assert_eq!(saved.seed, None);

    let stored = commands::get_game_settings(&ctx.state).await.unwrap();
    assert_eq!(stored, saved);
}

#[tokio::test]
async fn test_saved_settings_shape_new_sessions() {
    let ctx = TestContext::with_dataset(&fixtures::vocab_csv(10)).await;
    let settings = EngineConfig {
        window_size: 3,
        refill_strategy: RefillStrategy::Page,
        ordered: true,
        ..EngineConfig::default()
    };
    commands::save_game_settings(settings, &ctx.state)
        .await
        .unwrap();

    let board = commands::start_session(fixtures::start(StartMode::Full), &ctx.state)
        .await
        .unwrap();
    assert_eq!(board.lanes[0].cards.len(), 3);
    assert_eq!(board.progress.backlog, 7);

    // Ordered mode deals the first rows first.
    let mut dealt: Vec<usize> = board.lanes[0].cards.iter().map(|c| c.pair.0).collect();
    dealt.sort_unstable();
    assert_eq!(dealt, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_settings_survive_reopen() {
    let ctx = TestContext::new();
    let settings = EngineConfig {
        window_size: 7,
        page_quota: Some(4),
        ..EngineConfig::default()
    };
    commands::save_game_settings(settings.clone(), &ctx.state)
        .await
        .unwrap();

    let reopened = AppState::new(SqliteRepository::open(&ctx.db_path).unwrap());
    let stored = commands::get_game_settings(&reopened).await.unwrap();
    assert_eq!(stored, settings);
}

#[tokio::test(start_paused = true)]
async fn test_study_logs_newest_first() {
    let ctx = TestContext::with_dataset(&fixtures::vocab_csv(6)).await;
    assert!(commands::get_last_study(&ctx.state).await.unwrap().is_none());

    for range in ["1-2", "3-6"] {
        commands::start_session(
            fixtures::start(StartMode::Range {
                range: range.to_string(),
            }),
            &ctx.state,
        )
        .await
        .unwrap();
        play_to_end(&ctx).await;
    }

    let logs = commands::list_study_logs(None, &ctx.state).await.unwrap();
    let ranges: Vec<&str> = logs.iter().map(|l| l.range.as_str()).collect();
    assert_eq!(ranges, vec!["3-6", "1-2"]);

    let limited = commands::list_study_logs(Some(1), &ctx.state).await.unwrap();
    assert_eq!(limited.len(), 1);

    let last = commands::get_last_study(&ctx.state).await.unwrap().unwrap();
    assert_eq!(last, logs[0]);
}

#[tokio::test]
async fn test_import_reports_columns() {
    let ctx = TestContext::new();
    ctx.import(&fixtures::vocab_csv(4)).await;

    let summary = commands::get_dataset(&ctx.state).await.unwrap().unwrap();
    assert_eq!(summary.rows, 4);
    let playable: Vec<bool> = summary.columns.iter().map(|c| c.playable).collect();
    assert_eq!(playable, vec![false, true, true]);
    assert_eq!(summary.columns[2].name, "French");
}

#[tokio::test]
async fn test_import_missing_file_fails() {
    let ctx = TestContext::new();
    let err = commands::import_dataset("/nonexistent/words.csv".to_string(), &ctx.state).await;
    assert!(err.is_err());
    assert!(commands::get_dataset(&ctx.state).await.unwrap().is_none());
}

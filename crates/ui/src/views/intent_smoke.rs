use std::sync::Arc;

use quiz_core::model::{Dataset, UserId, VocabRow};
use quiz_core::session::QuizPhase;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::QuizService;
use storage::InMemoryDatasetProvider;

use super::test_harness::setup_view_harness;
use crate::vm::QuizIntent;

fn user(name: &str) -> UserId {
    UserId::new(name).unwrap()
}

fn quiz_for_alex() -> QuizService {
    let row = VocabRow::new("ubiquitous", "無所不在")
        .unwrap()
        .with_phonetic("/juːˈbɪkwɪtəs/");
    let provider = InMemoryDatasetProvider::new()
        .with_dataset(user("Alex"), Dataset::new(vec![row]));
    QuizService::with_rng(Arc::new(provider), StdRng::seed_from_u64(3))
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_smoke_select_answer_complete_switch() {
    let mut harness = setup_view_harness(quiz_for_alex(), &["Alex", "Eveline"]);
    harness.rebuild();
    assert!(harness.render().contains("Who is practicing?"));

    harness.dispatch(QuizIntent::SelectUser(user("Alex")));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("ubiquitous"), "missing term in {html}");
    assert!(!html.contains("Loading words for"), "still loading in {html}");
    assert!(!html.contains("無所不在"), "answer leaked in {html}");

    harness.dispatch(QuizIntent::Input("無".to_string()));
    assert_eq!(harness.quiz.snapshot().input_text, "無");

    harness.dispatch(QuizIntent::Confirm);
    let html = harness.render();
    assert!(html.contains("無所不在"), "missing answer in {html}");
    assert_eq!(harness.quiz.snapshot().phase, QuizPhase::QuestionRevealed);

    harness.dispatch(QuizIntent::Confirm);
    let html = harness.render();
    assert!(html.contains("All questions completed!"), "missing notice in {html}");
    assert!(html.contains("Switch user"), "missing switch in {html}");

    harness.dispatch(QuizIntent::SwitchUser);
    let html = harness.render();
    assert!(html.contains("Who is practicing?"), "picker not shown in {html}");
    assert!(html.contains("Eveline"), "missing Eveline in {html}");

    // Reselecting starts a fresh pool over the cached words.
    harness.dispatch(QuizIntent::SelectUser(user("Alex")));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("ubiquitous"), "missing term in {html}");
    assert!(html.contains("1 / 1"), "missing progress in {html}");
    assert_eq!(harness.quiz.snapshot().input_text, "");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_selection_clears_loading_and_allows_another_user() {
    let mut harness = setup_view_harness(quiz_for_alex(), &["Alex", "Eveline"]);
    harness.rebuild();

    harness.dispatch(QuizIntent::SelectUser(user("Eveline")));
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Loading words for"), "still loading in {html}");
    assert!(html.contains("Could not load words for Eveline."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(harness.quiz.snapshot().loading_user.is_none());

    harness.dispatch(QuizIntent::SwitchUser);
    assert!(harness.render().contains("Who is practicing?"));

    harness.dispatch(QuizIntent::SelectUser(user("Alex")));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("ubiquitous"), "missing term in {html}");
    assert!(!html.contains("Could not load"), "stale error in {html}");
}

use std::sync::Arc;

use quiz_core::model::{Dataset, UserId, VocabRow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::QuizService;
use storage::InMemoryDatasetProvider;

use super::test_harness::setup_view_harness;

fn alex() -> UserId {
    UserId::new("Alex").unwrap()
}

fn quiz_with_one_word() -> QuizService {
    let row = VocabRow::new("ubiquitous", "無所不在")
        .unwrap()
        .with_phonetic("/juːˈbɪkwɪtəs/")
        .with_example("Smartphones are ubiquitous.");
    let provider = InMemoryDatasetProvider::new().with_dataset(alex(), Dataset::new(vec![row]));
    QuizService::with_rng(Arc::new(provider), StdRng::seed_from_u64(9))
}

#[tokio::test(flavor = "current_thread")]
async fn selection_screen_lists_configured_users() {
    let mut harness = setup_view_harness(quiz_with_one_word(), &["Alex", "Eveline"]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Who is practicing?"), "missing prompt in {html}");
    assert!(html.contains("Alex"), "missing Alex in {html}");
    assert!(html.contains("Eveline"), "missing Eveline in {html}");
    assert!(!html.contains("Switch user"), "unexpected switch in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_screen_hides_answer_until_confirmed() {
    let quiz = quiz_with_one_word();
    quiz.select_user(alex()).await.expect("select");

    let mut harness = setup_view_harness(quiz, &["Alex", "Eveline"]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Vocabulary · Alex"), "missing heading in {html}");
    assert!(html.contains("ubiquitous"), "missing term in {html}");
    assert!(html.contains("/juːˈbɪkwɪtəs/"), "missing phonetic in {html}");
    assert!(html.contains("Smartphones are ubiquitous."), "missing example in {html}");
    assert!(html.contains("1 / 1"), "missing progress in {html}");
    assert!(html.contains("Switch user"), "missing switch in {html}");
    assert!(!html.contains("無所不在"), "answer leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn revealed_question_shows_answer() {
    let quiz = quiz_with_one_word();
    quiz.select_user(alex()).await.expect("select");
    quiz.set_input_text("無");
    quiz.confirm().expect("reveal");

    let mut harness = setup_view_harness(quiz, &["Alex"]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("無所不在"), "missing answer in {html}");
    assert_eq!(harness.quiz.snapshot().input_text, "無");
}

#[tokio::test(flavor = "current_thread")]
async fn exhausted_session_shows_completion_notice() {
    let quiz = quiz_with_one_word();
    quiz.select_user(alex()).await.expect("select");
    quiz.confirm().expect("reveal");
    quiz.confirm().expect("advance");

    let mut harness = setup_view_harness(quiz, &["Alex"]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("All questions completed!"), "missing notice in {html}");
    assert!(!html.contains("Confirm"), "question still editable in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_selection_shows_retry() {
    let quiz = quiz_with_one_word();
    let err = quiz
        .select_user(UserId::new("Eveline").unwrap())
        .await
        .expect_err("unknown user");
    assert!(!err.is_superseded());

    let mut harness = setup_view_harness(quiz, &["Alex", "Eveline"]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Could not load words for Eveline."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(harness.quiz.snapshot().user.is_none());
}

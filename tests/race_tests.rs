mod common;

use common::{gated_controller, gated_text_controller};
use pollinai::{
    controller::text::TEXT_ERROR_MESSAGE, GenerationStatus, ImageOutcome, NotificationKind,
    RacePolicy, TextController, TextOutcome,
};
use pretty_assertions::assert_eq;

fn spawn_submit(
    controller: &pollinai::ImageController,
    prompt: &str,
) -> tokio::task::JoinHandle<pollinai::Result<ImageOutcome>> {
    controller.edit_form(|form| form.prompt = prompt.to_string());
    let controller = controller.clone();
    tokio::spawn(async move { controller.submit().await })
}

fn displayed_prompt_segment(controller: &pollinai::ImageController) -> Option<String> {
    controller.displayed_image().map(|image| {
        let path = image.url.split('?').next().unwrap_or_default().to_string();
        path.rsplit('/').next().unwrap_or_default().to_string()
    })
}

#[tokio::test]
async fn test_last_resolved_response_wins_by_default() {
    let (controller, generator, mut started, _notifier) =
        gated_controller(RacePolicy::LastResolvedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_submit(&controller, "first");
    assert_eq!(started.recv().await.as_deref(), Some("first"));
    let second = spawn_submit(&controller, "second");
    assert_eq!(started.recv().await.as_deref(), Some("second"));

    second_gate.succeed();
    assert!(matches!(
        second.await.unwrap().unwrap(),
        ImageOutcome::Generated(_)
    ));
    assert_eq!(displayed_prompt_segment(&controller).as_deref(), Some("second"));

    first_gate.succeed();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        ImageOutcome::Generated(_)
    ));

    // The earlier submission settled last, so it owns the result.
    assert_eq!(displayed_prompt_segment(&controller).as_deref(), Some("first"));
    assert_eq!(controller.status(), GenerationStatus::Success);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_late_failure_clears_earlier_success_when_last_resolved() {
    let (controller, generator, mut started, _notifier) =
        gated_controller(RacePolicy::LastResolvedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_submit(&controller, "first");
    started.recv().await;
    let second = spawn_submit(&controller, "second");
    started.recv().await;

    second_gate.succeed();
    second.await.unwrap().unwrap();
    first_gate.fail();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        ImageOutcome::Failed(_)
    ));

    assert_eq!(controller.status(), GenerationStatus::Error);
    assert!(controller.snapshot().result.is_none());
}

#[tokio::test]
async fn test_last_submitted_wins_discards_stale_response() {
    let (controller, generator, mut started, notifier) =
        gated_controller(RacePolicy::LastSubmittedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_submit(&controller, "first");
    started.recv().await;
    let second = spawn_submit(&controller, "second");
    started.recv().await;

    second_gate.succeed();
    second.await.unwrap().unwrap();
    first_gate.succeed();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        ImageOutcome::Superseded
    ));

    assert_eq!(displayed_prompt_segment(&controller).as_deref(), Some("second"));
    assert_eq!(controller.status(), GenerationStatus::Success);
    // Only the applied response reaches the presentation layer.
    assert_eq!(notifier.notifications().len(), 1);
}

#[tokio::test]
async fn test_stale_response_keeps_loading_until_newest_settles() {
    let (controller, generator, mut started, _notifier) =
        gated_controller(RacePolicy::LastSubmittedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_submit(&controller, "first");
    started.recv().await;
    let second = spawn_submit(&controller, "second");
    started.recv().await;

    first_gate.succeed();
    first.await.unwrap().unwrap();
    assert!(controller.is_loading());
    assert_eq!(controller.status(), GenerationStatus::Pending);

    second_gate.fail();
    second.await.unwrap().unwrap();
    assert!(!controller.is_loading());
    assert_eq!(controller.status(), GenerationStatus::Error);
}

fn spawn_text_submit(
    controller: &TextController,
    prompt: &str,
) -> tokio::task::JoinHandle<pollinai::Result<TextOutcome>> {
    controller.edit_form(|form| form.prompt = prompt.to_string());
    let controller = controller.clone();
    tokio::spawn(async move { controller.submit().await })
}

#[tokio::test]
async fn test_text_last_resolved_response_overwrites() {
    let (controller, generator, mut started, notifier) =
        gated_text_controller(RacePolicy::LastResolvedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_text_submit(&controller, "first");
    assert_eq!(started.recv().await.as_deref(), Some("first"));
    assert!(controller.is_loading());
    let second = spawn_text_submit(&controller, "second");
    assert_eq!(started.recv().await.as_deref(), Some("second"));

    second_gate.succeed();
    second.await.unwrap().unwrap();
    assert_eq!(
        controller.displayed_text().as_deref(),
        Some("answer to second")
    );

    first_gate.succeed();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        TextOutcome::Generated(ref text) if text == "answer to first"
    ));
    assert_eq!(
        controller.displayed_text().as_deref(),
        Some("answer to first")
    );
    assert!(!controller.is_loading());
    assert_eq!(notifier.notifications().len(), 2);
}

#[tokio::test]
async fn test_text_superseded_response_is_dropped_silently() {
    let (controller, generator, mut started, notifier) =
        gated_text_controller(RacePolicy::LastSubmittedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_text_submit(&controller, "first");
    started.recv().await;
    let second = spawn_text_submit(&controller, "second");
    started.recv().await;

    second_gate.succeed();
    second.await.unwrap().unwrap();
    first_gate.fail();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        TextOutcome::Superseded
    ));

    assert_eq!(
        controller.displayed_text().as_deref(),
        Some("answer to second")
    );
    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn test_text_loading_holds_until_newest_submission_settles() {
    let (controller, generator, mut started, _notifier) =
        gated_text_controller(RacePolicy::LastSubmittedWins);
    let first_gate = generator.gate("first");
    let second_gate = generator.gate("second");

    let first = spawn_text_submit(&controller, "first");
    started.recv().await;
    let second = spawn_text_submit(&controller, "second");
    started.recv().await;

    first_gate.succeed();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        TextOutcome::Superseded
    ));
    assert!(controller.is_loading());
    assert!(controller.displayed_text().is_none());

    second_gate.fail();
    second.await.unwrap().unwrap();
    assert!(!controller.is_loading());
    assert_eq!(
        controller.displayed_text().as_deref(),
        Some(TEXT_ERROR_MESSAGE)
    );
}

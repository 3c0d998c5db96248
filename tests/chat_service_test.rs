// ABOUTME: Integration tests for the chat service orchestration
// ABOUTME: Tests input validation, session history bookkeeping and the image generation path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{server_resources, squat_candidates, FakeLlm, FakeVideoSearch};
use fitbot::constants::fallback_messages;
use fitbot::errors::ErrorCode;
use fitbot::knowledge::TopicKey;
use fitbot::services::ChatInput;

fn text(message: &str, session: &str) -> ChatInput {
    ChatInput {
        message: message.to_owned(),
        session_id: Some(session.to_owned()),
        image: None,
    }
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_no_text_and_no_image_is_rejected_without_external_calls() {
    let llm = FakeLlm::replying("unused");
    let video = FakeVideoSearch::with_results(squat_candidates());
    let resources = server_resources(Arc::clone(&llm), Some(Arc::clone(&video)));

    for input in [
        ChatInput::default(),
        ChatInput {
            message: "   ".into(),
            session_id: Some("s".into()),
            image: Some(String::new()),
        },
    ] {
        let err = resources.chat.handle_message(input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.message, fallback_messages::NO_INPUT);
    }

    assert_eq!(llm.calls(), 0);
    assert_eq!(video.calls(), 0);
    assert!(resources.chat.history(Some("s")).await.unwrap().is_empty());
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_turns_are_recorded_in_order() {
    let resources = server_resources(FakeLlm::replying("unused"), None);
    let yoga = resources.knowledge.render_topic(TopicKey::Yoga).unwrap();

    let output = resources.chat.handle_message(text("yoga", "s1")).await.unwrap();

    assert_eq!(output.response, yoga);
    assert!(output.should_type);
    assert_eq!(
        resources.chat.history(Some("s1")).await.unwrap(),
        vec!["User: yoga".to_owned(), format!("Assistant: {yoga}")]
    );
}

#[tokio::test]
async fn test_clear_then_get_is_empty() {
    let resources = server_resources(FakeLlm::replying("ok"), None);
    resources.chat.handle_message(text("yoga", "s1")).await.unwrap();
    resources.chat.handle_message(text("cardio", "s2")).await.unwrap();

    resources.chat.clear_history(Some("s1")).await.unwrap();

    assert!(resources.chat.history(Some("s1")).await.unwrap().is_empty());
    assert_eq!(resources.chat.history(Some("s2")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_session_history_is_empty() {
    let resources = server_resources(FakeLlm::replying("ok"), None);
    assert!(resources
        .chat
        .history(Some("never-used"))
        .await
        .unwrap()
        .is_empty());
    resources.chat.clear_history(Some("never-used")).await.unwrap();
}

#[tokio::test]
async fn test_missing_session_uses_default() {
    let resources = server_resources(FakeLlm::replying("ok"), None);
    resources
        .chat
        .handle_message(ChatInput {
            message: "yoga".into(),
            session_id: None,
            image: None,
        })
        .await
        .unwrap();

    assert_eq!(resources.chat.history(Some("default")).await.unwrap().len(), 2);
    assert_eq!(resources.chat.history(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_previous_turns_feed_generation_context() {
    let llm = FakeLlm::replying("Try intervals.");
    let resources = server_resources(Arc::clone(&llm), None);

    resources.chat.handle_message(text("cardio", "s")).await.unwrap();
    resources
        .chat
        .handle_message(text("should i run before breakfast", "s"))
        .await
        .unwrap();

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("Previous conversation:\nUser: cardio\nAssistant: Cardio: "));
    assert!(prompt.ends_with("\nUser: should i run before breakfast"));
    assert_eq!(resources.chat.history(Some("s")).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_video_reply_disables_typing_animation() {
    let video = FakeVideoSearch::with_results(squat_candidates());
    let resources = server_resources(FakeLlm::replying("unused"), Some(video));

    let output = resources
        .chat
        .handle_message(text("how to squat technique", "s"))
        .await
        .unwrap();

    assert!(!output.should_type);
    assert!(output.response.contains("🎥 Watch this video: "));
}

// ============================================================================
// Image path
// ============================================================================

#[tokio::test]
async fn test_image_goes_straight_to_generation() {
    let llm = FakeLlm::replying("That is a kettlebell.");
    let video = FakeVideoSearch::with_results(squat_candidates());
    let resources = server_resources(Arc::clone(&llm), Some(Arc::clone(&video)));

    let output = resources
        .chat
        .handle_message(ChatInput {
            message: "how to squat with this".into(),
            session_id: Some("img".into()),
            image: Some("data:image/png;base64,aGVsbG8=".into()),
        })
        .await
        .unwrap();

    assert_eq!(output.response, "That is a kettlebell.");
    assert!(output.should_type);
    assert_eq!(llm.calls(), 1);
    assert_eq!(video.calls(), 0);

    let requests = llm.requests();
    let request = &requests[0];
    assert!(request
        .prompt
        .ends_with("\nUser: how to squat with this (image attached)"));
    assert_eq!(request.images.len(), 1);
    assert_eq!(request.images[0].mime_type, "image/png");
    assert_eq!(request.images[0].data, b"hello");

    assert_eq!(
        resources.chat.history(Some("img")).await.unwrap(),
        vec![
            "User: how to squat with this (image attached)".to_owned(),
            "Assistant: That is a kettlebell.".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_image_without_text_is_accepted() {
    let llm = FakeLlm::replying("Nice gym.");
    let resources = server_resources(Arc::clone(&llm), None);

    let output = resources
        .chat
        .handle_message(ChatInput {
            message: String::new(),
            session_id: Some("img".into()),
            image: Some("aGVsbG8=".into()),
        })
        .await
        .unwrap();

    assert_eq!(output.response, "Nice gym.");
    assert_eq!(llm.requests()[0].images[0].mime_type, "image/jpeg");
    assert_eq!(
        resources.chat.history(Some("img")).await.unwrap()[0],
        "User: (image attached)"
    );
}

#[tokio::test]
async fn test_undecodable_image_returns_sentinel() {
    let llm = FakeLlm::replying("unused");
    let resources = server_resources(Arc::clone(&llm), None);

    let output = resources
        .chat
        .handle_message(ChatInput {
            message: "what is this".into(),
            session_id: Some("img".into()),
            image: Some("data:image/jpeg;base64,@@not base64@@".into()),
        })
        .await
        .unwrap();

    assert_eq!(output.response, fallback_messages::IMAGE_UNPROCESSABLE);
    assert_eq!(llm.calls(), 0);
    assert_eq!(
        resources.chat.history(Some("img")).await.unwrap(),
        vec!["User: what is this (image attached)".to_owned()]
    );
}

#[tokio::test]
async fn test_failed_generation_records_only_the_user_turn() {
    let llm = FakeLlm::failing();
    let resources = server_resources(Arc::clone(&llm), None);

    let output = resources
        .chat
        .handle_message(text("what should i do on rest days", "s"))
        .await
        .unwrap();

    assert_eq!(output.response, fallback_messages::NOT_UNDERSTOOD);
    assert!(output.should_type);
    assert_eq!(
        resources.chat.history(Some("s")).await.unwrap(),
        vec!["User: what should i do on rest days".to_owned()]
    );

    // The failed reply is not fed back as prior conversation
    resources
        .chat
        .handle_message(text("and on training days", "s"))
        .await
        .unwrap();
    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("Previous conversation:\nUser: what should i do on rest days\nUser: and on training days"));
    assert!(!prompt.contains(fallback_messages::NOT_UNDERSTOOD));
}

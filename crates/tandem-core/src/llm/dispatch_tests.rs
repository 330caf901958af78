//! Unit tests for the fallback dispatcher

use crate::error::{TandemError, TandemResult};
use crate::llm::dispatch::{
    ChatCompletion, CompletionBackend, CompletionOptions, FallbackChatModel, DEFAULT_LOADING_TEXT,
};
use crate::llm::messages::{ChatMessage, ChatResponse};
use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::always;

mock! {
    pub Backend {}

    #[async_trait]
    impl CompletionBackend for Backend {
        fn fingerprint(&self) -> u64;
        async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse>;
    }
}

fn question() -> Vec<ChatMessage> {
    vec![ChatMessage::user("2+2?")]
}

#[tokio::test]
async fn test_primary_success_never_touches_backup() {
    let mut primary = MockBackend::new();
    primary
        .expect_chat()
        .with(always())
        .times(1)
        .returning(|_| Ok(ChatResponse::new("4")));

    let mut backup = MockBackend::new();
    backup.expect_chat().never();

    let model = FallbackChatModel::from_backends(primary, backup);
    let result = model
        .completion(&question(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(result, "4");
}

#[tokio::test]
async fn test_primary_failure_falls_back_to_backup() {
    let mut primary = MockBackend::new();
    primary
        .expect_chat()
        .times(1)
        .returning(|_| Err(TandemError::llm_with_provider("request timed out", "openai")));

    let mut backup = MockBackend::new();
    backup
        .expect_chat()
        .times(1)
        .returning(|_| Ok(ChatResponse::new("4")));

    let model = FallbackChatModel::from_backends(primary, backup);
    let result = model
        .completion(&question(), &CompletionOptions::default())
        .await
        .unwrap();

    // The backup's answer comes through and the primary's error is gone.
    assert_eq!(result, "4");
}

#[tokio::test]
async fn test_both_failures_propagate_backup_error() {
    let mut primary = MockBackend::new();
    primary
        .expect_chat()
        .times(1)
        .returning(|_| Err(TandemError::llm_with_provider("request timed out", "openai")));

    let mut backup = MockBackend::new();
    backup
        .expect_chat()
        .times(1)
        .returning(|_| Err(TandemError::llm_with_provider("connection refused", "anthropic")));

    let model = FallbackChatModel::from_backends(primary, backup);
    let err = model
        .completion(&question(), &CompletionOptions::default())
        .await
        .unwrap_err();

    // The caller sees the backup's error, not the swallowed primary one.
    let message = err.to_string();
    assert!(message.contains("connection refused"));
    assert!(!message.contains("timed out"));
}

#[tokio::test]
async fn test_exactly_one_attempt_per_backend() {
    let mut primary = MockBackend::new();
    primary
        .expect_chat()
        .times(1)
        .returning(|_| Err(TandemError::llm("boom")));

    let mut backup = MockBackend::new();
    backup
        .expect_chat()
        .times(1)
        .returning(|_| Err(TandemError::llm("also boom")));

    let model = FallbackChatModel::from_backends(primary, backup);
    // times(1) on both mocks is the assertion: no retry loop exists.
    let _ = model
        .completion(&question(), &CompletionOptions::default())
        .await;
}

#[tokio::test]
async fn test_empty_messages_rejected_before_any_call() {
    let mut primary = MockBackend::new();
    primary.expect_chat().never();
    let mut backup = MockBackend::new();
    backup.expect_chat().never();

    let model = FallbackChatModel::from_backends(primary, backup);
    let err = model
        .completion(&[], &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, TandemError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_custom_loading_text_is_accepted() {
    let mut primary = MockBackend::new();
    primary
        .expect_chat()
        .times(1)
        .returning(|_| Ok(ChatResponse::new("ok")));
    let mut backup = MockBackend::new();
    backup.expect_chat().never();

    let model = FallbackChatModel::from_backends(primary, backup);
    let options = CompletionOptions::new().with_loading_text("consulting the oracle");
    assert_eq!(options.loading_text(), "consulting the oracle");

    let result = model.completion(&question(), &options).await.unwrap();
    assert_eq!(result, "ok");
}

#[test]
fn test_default_loading_text() {
    assert_eq!(CompletionOptions::default().loading_text(), DEFAULT_LOADING_TEXT);
}

#[test]
fn test_fingerprint_combines_both_backends() {
    let mut primary = MockBackend::new();
    primary.expect_fingerprint().return_const(1u64);
    let mut backup = MockBackend::new();
    backup.expect_fingerprint().return_const(2u64);
    let forward = FallbackChatModel::from_backends(primary, backup);

    let mut primary = MockBackend::new();
    primary.expect_fingerprint().return_const(2u64);
    let mut backup = MockBackend::new();
    backup.expect_fingerprint().return_const(1u64);
    let reversed = FallbackChatModel::from_backends(primary, backup);

    // Swapping primary and backup is a different configuration.
    assert_ne!(forward.fingerprint(), reversed.fingerprint());
}

// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end session tests over the mock provider.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tutor::{TutorSession, resolve_model};
use tutor_core::{ComprehensionLevel, KeyValueStore, Message, QuestionType, Role};
use tutor_storage::{MemoryStore, Preferences, SqliteStore};
use tutor_test_utils::{MockProvider, MockReply};

fn memory_prefs() -> Preferences {
    Preferences::new(Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn streamed_turn_is_shown_and_persisted() {
    let provider = MockProvider::with_replies(vec![MockReply::Chunks(vec![
        "光合作用".into(),
        "是植物".into(),
        "製造養分的過程。".into(),
    ])]);
    let prefs = memory_prefs();
    let mut session = TutorSession::new(Arc::new(provider.clone()), prefs.clone(), "m".into());

    let mut shown = Vec::new();
    let reply = session
        .send_streaming("什麼是光合作用？", |c| shown.push(c.to_string()), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(shown, vec!["光合作用", "是植物", "製造養分的過程。"]);
    assert_eq!(reply, "光合作用是植物製造養分的過程。");
    assert_eq!(
        session.history(),
        &[Message::user("什麼是光合作用？"), Message::assistant(reply.clone())]
    );
    assert_eq!(prefs.load_chat_history(), session.history());

    let calls = provider.calls().await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].streamed);
    assert_eq!(calls[0].model, "m");
    assert_eq!(calls[0].plan.question_type, QuestionType::Explain);
    assert_eq!(calls[0].plan.level, ComprehensionLevel::Beginner);
}

#[tokio::test]
async fn later_turns_send_the_whole_history() {
    let provider = MockProvider::with_replies(vec![MockReply::text("一"), MockReply::text("二")]);
    let mut session = TutorSession::new(Arc::new(provider.clone()), memory_prefs(), "m".into());

    session.send("第一題").await.unwrap();
    session.send("第二題").await.unwrap();

    let calls = provider.calls().await;
    assert_eq!(calls[1].conversation.len(), 3);
    assert_eq!(calls[1].conversation[0], Message::user("第一題"));
    assert_eq!(calls[1].conversation[1], Message::assistant("一"));
    assert_eq!(calls[1].conversation[2], Message::user("第二題"));
    assert!(!calls[1].streamed);
    assert_eq!(session.history().len(), 4);
}

#[tokio::test]
async fn cancelled_turn_discards_the_reply() {
    let provider = MockProvider::with_replies(vec![MockReply::Hang]);
    let prefs = memory_prefs();
    prefs.save_chat_history(&[Message::user("舊問題"), Message::assistant("舊答案")]);
    let mut session = TutorSession::new(Arc::new(provider), prefs.clone(), "m".into());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = session
        .send_streaming("新問題", |_| {}, &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(session.history().len(), 2);
    assert_eq!(prefs.load_chat_history().len(), 2);
}

#[tokio::test]
async fn provider_error_surfaces_its_message() {
    let provider = MockProvider::with_replies(vec![MockReply::ProviderError {
        status: 401,
        message: "Invalid API Key".into(),
    }]);
    let mut session = TutorSession::new(Arc::new(provider), memory_prefs(), "m".into());

    let err = session
        .send_streaming("你好", |_| {}, &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid API Key");
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn unavailable_store_does_not_block_chatting() {
    let prefs = Preferences::new(Arc::new(MemoryStore::unavailable()));
    let mut session = TutorSession::new(Arc::new(MockProvider::new()), prefs, "m".into());

    let reply = session.send("你好").await.unwrap();
    assert_eq!(reply, "mock response");
    assert_eq!(session.history().len(), 2);
    assert!(session.preferences().load_chat_history().is_empty());
}

#[tokio::test]
async fn history_and_model_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tutor.db");
    let db = db.to_str().unwrap();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_path(db).unwrap());
        let mut session =
            TutorSession::new(Arc::new(MockProvider::new()), Preferences::new(store), "x".into());
        session.select_model("llama-3.1-8b-instant").unwrap();
        session.send("記得我").await.unwrap();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_path(db).unwrap());
    let prefs = Preferences::new(store);
    assert_eq!(resolve_model(None, &prefs, "configured"), "llama-3.1-8b-instant");

    let session = TutorSession::new(Arc::new(MockProvider::new()), prefs, "llama-3.1-8b-instant".into());
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[0].role, Role::User);
    assert_eq!(session.history()[0].content, "記得我");
}

#[tokio::test]
async fn clear_and_export_round_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = TutorSession::new(Arc::new(MockProvider::new()), memory_prefs(), "m".into());
    session.send("匯出測試").await.unwrap();

    let path = session.export(dir.path()).unwrap();
    let exported: Vec<Message> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported, session.history());

    session.clear();
    assert!(session.history().is_empty());
    assert!(session.preferences().load_chat_history().is_empty());
}

#[tokio::test]
async fn level_plan_reflects_the_history() {
    let prefs = memory_prefs();
    let mut history = Vec::new();
    for _ in 0..6 {
        history.push(Message::user("我懂了，那如果換成微分方程的特徵值呢？"));
        history.push(Message::assistant("好的"));
    }
    prefs.save_chat_history(&history);
    let session = TutorSession::new(Arc::new(MockProvider::new()), prefs, "m".into());

    let plan = session.current_plan();
    assert_eq!(plan.parameters.temperature, 0.6);
    assert_eq!(plan.parameters.max_tokens, 1536);
}

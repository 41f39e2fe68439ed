mod common;

use std::sync::Arc;

use common::{ClientLog, RecordingClient};
use mqchat::chat::{ChatSession, MessageRouter};
use mqchat::storage::ChatLogStore;

async fn store_in(tmpdir: &tempfile::TempDir) -> Arc<ChatLogStore> {
    Arc::new(
        ChatLogStore::new(tmpdir.path().to_str().unwrap())
            .await
            .expect("store new"),
    )
}

#[tokio::test]
async fn start_subscribes_the_broadcast_topic() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let client = RecordingClient::new();
    let log = client.log.clone();
    let mut session = ChatSession::new("cesar".to_string(), client, store.clone());

    session
        .start(Arc::new(MessageRouter::new(store)))
        .await
        .expect("start");

    assert_eq!(log.subscribes(), vec!["/chat/todos".to_string()]);
}

#[tokio::test]
async fn connect_failure_is_returned_not_aborted() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let mut session = ChatSession::new(
        "cesar".to_string(),
        RecordingClient::refusing_connections(),
        store.clone(),
    );

    let err = session
        .start(Arc::new(MessageRouter::new(store)))
        .await
        .expect_err("start should fail");
    assert!(format!("{:#}", err).contains("connect"));
}

#[tokio::test]
async fn pair_send_subscribes_both_directions_then_publishes() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let client = RecordingClient::new();
    let log = client.log.clone();
    let session = ChatSession::new("ana".to_string(), client, store);

    session.handle_line("send ana/luis hola").await.expect("send");

    assert_eq!(
        log.subscribes(),
        vec!["/chat/ana/luis".to_string(), "/chat/luis/ana".to_string()]
    );
    assert_eq!(
        log.publishes(),
        vec![("/chat/ana/luis".to_string(), "ana: hola".to_string())]
    );
}

#[tokio::test]
async fn resending_to_the_same_pair_is_harmless() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let client = RecordingClient::new();
    let log = client.log.clone();
    let session = ChatSession::new("ana".to_string(), client, store);

    session.handle_line("send ana/luis uno").await.expect("first");
    session.handle_line("send ana/luis dos").await.expect("second");

    // Two publishes; the repeated subscriptions raise no error.
    assert_eq!(log.publishes().len(), 2);
}

#[tokio::test]
async fn invalid_and_view_commands_never_error() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let client = RecordingClient::new();
    let log: Arc<ClientLog> = client.log.clone();
    let session = ChatSession::new("cesar".to_string(), client, store);

    session.handle_line("bogus").await.expect("invalid is ok");
    session
        .handle_line("chat todos")
        .await
        .expect("view of missing log is ok");
    session
        .handle_line("chat ana/luis")
        .await
        .expect("view of missing pair log is ok");

    assert!(log.publishes().is_empty());
}

#[tokio::test]
async fn end_to_end_broadcast_round_trip() {
    use mqchat::mqtt::MessageSink;

    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&tmpdir).await;
    let client = RecordingClient::new();
    let log = client.log.clone();
    let mut session = ChatSession::new("cesar".to_string(), client, store.clone());
    let router = Arc::new(MessageRouter::new(store.clone()));

    session.start(router.clone()).await.expect("start");
    session.handle_line("send todos hi").await.expect("send");

    // The broker echoes our own publish back to the subscription.
    let (topic, payload) = log.publishes()[0].clone();
    assert_eq!(topic, "/chat/todos");
    assert_eq!(payload, "cesar: hi");
    router.deliver(&topic, payload.as_bytes()).await;

    let lines = store.read_all("/chat/todos").await.expect("read_all");
    assert_eq!(lines, vec!["cesar: hi".to_string()]);
}

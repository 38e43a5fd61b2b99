//! Tests for the transport core and the convenience methods.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockall::Sequence;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use transmission_rpc_types::{Error, Priority, TorrentId, TorrentStatus};

use crate::config::ClientConfig;
use crate::request::{SessionSet, TorrentGet, TorrentSet};
use crate::testutil::{
    FakeDaemon, HASH, client_with, conflict, envelope, failure, ok, status, test_client,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, MockHttpTransport};

#[test_log::test(tokio::test)]
async fn first_call_bootstraps_session_id() {
    let mut mock = MockHttpTransport::new();
    let mut seq = Sequence::new();
    mock.expect_post()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|request| request.session_id.is_none())
        .returning(|_| Ok(conflict("ABC")));
    mock.expect_post()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|request| request.session_id.as_deref() == Some("ABC"))
        .returning(|request| Ok(ok(envelope(&request)["tag"].as_i64().unwrap(), json!({}))));

    let client = test_client(mock);
    client.torrent_start([1]).await.unwrap();

    assert_eq!(client.session_id().as_deref(), Some("ABC"));
}

#[tokio::test]
async fn retry_budget_is_initial_attempt_plus_retries() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let issued = Arc::new(AtomicUsize::new(0));

    let mut mock = MockHttpTransport::new();
    {
        let sent = sent.clone();
        mock.expect_post().times(4).returning(move |request| {
            sent.lock().push(request.session_id);
            let n = issued.fetch_add(1, Ordering::SeqCst);
            Ok(conflict(&format!("T{n}")))
        });
    }

    let client = client_with(ClientConfig::default().with_retries(3), mock);
    let err = client.session_stats().await.unwrap_err();

    assert_eq!(err, Error::SessionIdRetriesExhausted(4));
    assert!(err.is_request_failed());
    // Every retry carries the id handed out by the previous 409.
    assert_eq!(
        *sent.lock(),
        vec![
            None,
            Some("T0".to_owned()),
            Some("T1".to_owned()),
            Some("T2".to_owned())
        ]
    );
    assert_eq!(client.session_id().as_deref(), Some("T3"));
}

#[tokio::test]
async fn zero_retries_means_one_attempt() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().times(1).returning(|_| Ok(conflict("X")));

    let client = client_with(ClientConfig::default().with_retries(0), mock);
    assert_eq!(
        client.session_close().await.unwrap_err(),
        Error::SessionIdRetriesExhausted(1)
    );
}

#[tokio::test]
async fn change_set_projection_on_the_wire() {
    let daemon = Arc::new(FakeDaemon::new("S"));
    let client = test_client(daemon.clone());

    let request = TorrentSet::new([42])
        .with_download_limit(100)
        .with_download_limited(true);
    client.torrent_set(&request).await.unwrap();

    let accepted = daemon.accepted();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0]["method"], "torrent-set");
    assert_eq!(
        accepted[0]["arguments"],
        json!({ "ids": [42], "downloadLimit": 100, "downloadLimited": true })
    );
}

#[tokio::test]
async fn mixed_ids_are_sent_as_given() {
    let daemon = Arc::new(FakeDaemon::new("S").with_reply(|method, _| {
        assert_eq!(method, "torrent-get");
        json!({
            "torrents": [
                { "id": 1, "name": "one", "status": 4 },
                { "id": 2, "hashString": HASH, "status": 0 }
            ]
        })
    }));
    let client = test_client(daemon.clone());

    let torrents = client
        .torrent_get_fields(
            [
                TorrentId::from(1),
                TorrentId::parse(HASH).unwrap(),
                TorrentId::RecentlyActive,
            ],
            ["id", "name", "hashString", "status"],
        )
        .await
        .unwrap();

    assert_eq!(
        daemon.accepted()[0]["arguments"]["ids"],
        json!([1, HASH, "recently-active"])
    );
    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[0].status, Some(TorrentStatus::Downloading));
    assert_eq!(torrents[1].hash_string.as_deref(), Some(HASH));
}

#[tokio::test]
async fn rename_path_with_two_ids_never_reaches_the_network() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().never();

    let client = test_client(mock);
    let err = client
        .torrent_rename_path([1, 2], "x", "y")
        .await
        .unwrap_err();

    assert_eq!(err, Error::SingleTorrentRequired(2));
}

#[tokio::test]
async fn empty_change_sets_are_not_sent() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().never();

    let client = test_client(mock);
    client.session_set(&SessionSet::new()).await.unwrap();
    client.torrent_set(&TorrentSet::new([1])).await.unwrap();
}

#[tokio::test]
async fn envelopes_have_three_keys_and_increasing_tags() {
    let daemon = Arc::new(FakeDaemon::new("S"));
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );

    client.torrent_stop([1]).await.unwrap();
    client.session_stats().await.unwrap_err(); // `{}` is not a stats object
    client.queue_move_top([2]).await.unwrap();

    let accepted = daemon.accepted();
    assert_eq!(accepted.len(), 3);
    let keys: BTreeSet<_> = ["arguments", "method", "tag"].into_iter().collect();
    for body in &accepted {
        let object = body.as_object().unwrap();
        assert_eq!(object.keys().map(String::as_str).collect::<BTreeSet<_>>(), keys);
    }
    let tags: Vec<_> = accepted.iter().map(|b| b["tag"].as_i64().unwrap()).collect();
    assert_eq!(tags, [1, 2, 3]);
    assert_eq!(accepted[1]["arguments"], json!({}));
}

#[tokio::test]
async fn preseeded_session_id_is_sent_first() {
    let daemon = Arc::new(FakeDaemon::new("PRESET"));
    let client = client_with(
        ClientConfig::default().with_session_id("PRESET"),
        daemon.clone(),
    );

    client.torrent_verify([7]).await.unwrap();

    assert_eq!(daemon.requests().len(), 1);
    assert_eq!(daemon.conflicts(), 0);
}

#[tokio::test]
async fn stale_session_id_is_replaced() {
    let daemon = Arc::new(FakeDaemon::new("NEW"));
    let client = client_with(
        ClientConfig::default().with_session_id("OLD"),
        daemon.clone(),
    );

    client.torrent_reannounce([1]).await.unwrap();

    assert_eq!(client.session_id().as_deref(), Some("NEW"));
    let sent: Vec<_> = daemon
        .requests()
        .into_iter()
        .map(|r| r.session_id)
        .collect();
    assert_eq!(sent, [Some("OLD".to_owned()), Some("NEW".to_owned())]);
}

#[tokio::test]
async fn other_statuses_are_not_retried() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().times(1).returning(|_| Ok(status(500)));
    let client = test_client(mock);
    assert_eq!(client.port_test().await.unwrap_err(), Error::Status(500));

    let mut mock = MockHttpTransport::new();
    mock.expect_post().times(1).returning(|_| Ok(status(401)));
    let client = test_client(mock);
    let err = client.blocklist_update().await.unwrap_err();
    assert_eq!(err, Error::Unauthorized);
    assert!(err.is_request_failed());
}

#[tokio::test]
async fn network_errors_surface_immediately() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post()
        .times(1)
        .returning(|_| Err(Error::Network("connection refused".into())));

    let client = test_client(mock);
    let err = client.torrent_start(Vec::<TorrentId>::new()).await.unwrap_err();
    assert_eq!(err, Error::Network("connection refused".into()));
}

#[tokio::test]
async fn server_error_text_is_preserved() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().returning(|request| {
        Ok(failure(
            envelope(&request)["tag"].as_i64().unwrap(),
            "invalid or corrupt torrent file",
        ))
    });

    let client = client_with(ClientConfig::default().with_session_id("S"), mock);
    let err = client
        .torrent_add_metainfo(b"garbage".to_vec())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        Error::ServerError("invalid or corrupt torrent file".into())
    );
}

#[tokio::test]
async fn foreign_tag_is_rejected() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().returning(|_| Ok(ok(99, json!({}))));

    let client = client_with(ClientConfig::default().with_session_id("S"), mock);
    let err = client.torrent_stop([1]).await.unwrap_err();

    assert_eq!(
        err,
        Error::MismatchedIds {
            request: 1,
            response: 99
        }
    );
}

#[tokio::test]
async fn cancelled_before_sending() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().never();

    let client = client_with(ClientConfig::default().with_session_id("S"), mock);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .send_cancellable(&TorrentGet::new([1]), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err, Error::Cancelled);
    assert!(!err.is_request_failed());
}

#[tokio::test]
async fn cancelled_while_waiting_for_the_daemon() {
    let daemon = Arc::new(FakeDaemon::new("S").hanging());
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let err = client
        .send_cancellable(&TorrentGet::new([1]), &cancel)
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert_eq!(err, Error::Cancelled);
    assert_eq!(daemon.requests().len(), 1);
}

#[tokio::test]
async fn concurrent_calls_get_unique_tags() {
    let daemon = Arc::new(FakeDaemon::new("S").with_latency(Duration::from_millis(5)));
    let client = Arc::new(client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    ));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.torrent_start([i]).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let tags: BTreeSet<_> = daemon
        .accepted()
        .iter()
        .map(|b| b["tag"].as_i64().unwrap())
        .collect();
    assert_eq!(tags, (1..=16).collect());
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_first_calls_share_one_handshake() {
    let daemon = Arc::new(FakeDaemon::new("S").with_latency(Duration::from_millis(5)));
    let client = Arc::new(test_client(daemon.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.torrent_stop([i]).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(daemon.conflicts(), 1);
    assert_eq!(daemon.accepted().len(), 8);
}

/// Answers 200 after a delay without ever sending a session id, like a daemon behind a
/// proxy that strips the header.
#[derive(Default)]
struct Headerless {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl HttpTransport for Headerless {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ok(envelope(&request)["tag"].as_i64().unwrap(), json!({})))
    }
}

#[tokio::test]
async fn missing_session_header_does_not_serialize_callers() {
    let transport = Arc::new(Headerless::default());
    let client = Arc::new(test_client(transport.clone()));

    client.torrent_stop([0]).await.unwrap();
    assert_eq!(client.session_id(), None);

    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.torrent_stop([i]).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(transport.peak.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn malformed_hash_text_never_reaches_the_network() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().never();
    let client = test_client(mock);

    let result: Result<(), Error> = async {
        let id = TorrentId::parse("not-a-hash")?;
        client.torrent_stop([id]).await
    }
    .await;

    assert_eq!(result, Err(Error::InvalidId("not-a-hash".into())));
}

#[tokio::test]
async fn rename_path_rejects_recently_active() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post().never();

    let client = test_client(mock);
    let err = client
        .torrent_rename_path([TorrentId::RecentlyActive], "x", "y")
        .await
        .unwrap_err();

    assert_eq!(err, Error::InvalidId("recently-active".into()));
}

#[tokio::test]
async fn torrent_add_variants() {
    let daemon = Arc::new(FakeDaemon::new("S").with_reply(|_, arguments| {
        let name = arguments
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or("from-metainfo");
        json!({ "torrent-added": { "id": 5, "name": name, "hashString": HASH } })
    }));
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );

    let added = client
        .torrent_add_magnet(format!("magnet:?xt=urn:btih:{HASH}"))
        .await
        .unwrap();
    assert!(!added.is_duplicate());
    assert_eq!(added.torrent().id, 5);

    let added = client.torrent_add_metainfo(b"d4:infoe".to_vec()).await.unwrap();
    assert_eq!(added.torrent().name, "from-metainfo");

    let accepted = daemon.accepted();
    assert_eq!(accepted[1]["arguments"], json!({ "metainfo": "ZDQ6aW5mb2U=" }));
}

#[tokio::test]
async fn recently_active_keeps_removed_ids() {
    let daemon = Arc::new(FakeDaemon::new("S").with_reply(|_, _| {
        json!({ "torrents": [{ "id": 3 }], "removed": [1, 2] })
    }));
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );

    let response = client.torrent_recently_active().await.unwrap();
    assert_eq!(response.removed, [TorrentId::Id(1), TorrentId::Id(2)]);
    assert_eq!(response.torrents[0].id, Some(3));
    assert_eq!(
        daemon.accepted()[0]["arguments"]["ids"],
        json!(["recently-active"])
    );
}

#[tokio::test]
async fn session_and_system_methods_decode_their_payloads() {
    let daemon = Arc::new(FakeDaemon::new("S").with_reply(|method, arguments| match method {
        "session-get" => json!({ "version": "4.0.6", "rpc-version": 18, "encryption": "tolerated" }),
        "free-space" => json!({ "path": arguments["path"], "size-bytes": 1024 }),
        "blocklist-update" => json!({ "blocklist-size": 12 }),
        "port-test" => json!({ "port-is-open": true }),
        _ => json!({}),
    }));
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );

    let session = client.session_get_fields(["version", "rpc-version", "encryption"]).await.unwrap();
    assert_eq!(session.rpc_version, Some(18));

    let free = client.free_space("/downloads").await.unwrap();
    assert_eq!(free.path, "/downloads");
    assert_eq!(free.size_bytes, 1024);

    assert_eq!(client.blocklist_update().await.unwrap().size, 12);
    assert!(client.port_test().await.unwrap().is_open);
}

#[tokio::test]
async fn torrent_methods_send_their_arguments() {
    let daemon = Arc::new(FakeDaemon::new("S"));
    let client = client_with(
        ClientConfig::default().with_session_id("S"),
        daemon.clone(),
    );

    client.torrent_start_now([1]).await.unwrap();
    client.torrent_remove([2], true).await.unwrap();
    client.torrent_set_location([3], "/new", true).await.unwrap();
    client.queue_move_up([4]).await.unwrap();
    client.queue_move_down([5]).await.unwrap();
    client.queue_move_bottom([6]).await.unwrap();
    client
        .torrent_set(&TorrentSet::new([7]).with_bandwidth_priority(Priority::Low))
        .await
        .unwrap();

    let sent: Vec<_> = daemon
        .accepted()
        .into_iter()
        .map(|b| (b["method"].as_str().unwrap().to_owned(), b["arguments"].clone()))
        .collect();
    assert_eq!(
        sent,
        [
            ("torrent-start-now".to_owned(), json!({ "ids": [1] })),
            ("torrent-remove".to_owned(), json!({ "ids": [2], "delete-local-data": true })),
            ("torrent-set-location".to_owned(), json!({ "ids": [3], "location": "/new", "move": true })),
            ("queue-move-up".to_owned(), json!({ "ids": [4] })),
            ("queue-move-down".to_owned(), json!({ "ids": [5] })),
            ("queue-move-bottom".to_owned(), json!({ "ids": [6] })),
            ("torrent-set".to_owned(), json!({ "ids": [7], "bandwidthPriority": -1 })),
        ]
    );
}

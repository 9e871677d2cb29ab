#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::time::Duration;

use statsink_agent::config::{SinkConfig, StatsConfig};
use statsink_agent::{EventSink, SinkClient, Stats};
use statsink_core::{Event, EventMetric, StatsError};

async fn read_lines(listener: &TcpListener) -> Vec<Value> {
    let (mut sock, _) = listener.accept().await.unwrap();
    let mut buf = String::new();
    tokio::time::timeout(Duration::from_secs(5), sock.read_to_string(&mut buf))
        .await
        .expect("sink closed its side")
        .unwrap();
    buf.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
}

#[tokio::test]
async fn empty_address_is_rejected() {
    let err = SinkClient::connect(SinkConfig::default()).await.err().unwrap();
    assert!(matches!(err, StatsError::EmptyAddress));
}

#[tokio::test]
async fn connect_failure_is_propagated() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = SinkClient::connect(SinkConfig {
        address: addr.to_string(),
        ..SinkConfig::default()
    })
    .await
    .err()
    .unwrap();
    assert!(matches!(err, StatsError::Connect(_)));
}

#[tokio::test]
async fn events_are_written_as_json_lines() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = SinkClient::connect(SinkConfig {
        address: listener.local_addr().unwrap().to_string(),
        queue_capacity: 8,
    })
    .await
    .unwrap();

    client.send_event(Event::stat("svc.one", EventMetric::Int(1), 2.0));
    client.send_events(vec![
        Event::stat("svc.two", EventMetric::Float(2.5), 2.0),
        Event::stat("svc.three", EventMetric::Int(3), 2.0),
    ]);
    client.send_events(Vec::new());
    client.close().await;
    client.close().await;

    // after close nothing is queued any more
    client.send_event(Event::stat("svc.late", EventMetric::Int(9), 2.0));

    let lines = read_lines(&listener).await;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["service"], json!("svc.one"));
    assert_eq!(lines[1]["metric"], json!(2.5));
    assert_eq!(lines[2]["tags"], json!(["stat"]));
}

#[tokio::test]
async fn shared_client_outlives_stats_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = Arc::new(
        SinkClient::connect(SinkConfig {
            address: listener.local_addr().unwrap().to_string(),
            ..SinkConfig::default()
        })
        .await
        .unwrap(),
    );

    let stats = Stats::new(StatsConfig::default());
    stats
        .use_sink(Some(Arc::clone(&client) as Arc<dyn EventSink>))
        .unwrap();
    stats.incr("requests", 3).await;
    let sent = stats.flush(Duration::from_secs(1)).await.unwrap();

    stats.close();
    stats.closed().await;

    // still usable by its owner
    client.send_event(Event::stat("owner.ping", EventMetric::Int(1), 1.0));
    client.close().await;

    let lines = read_lines(&listener).await;
    assert_eq!(lines.len(), sent + 1);
    assert!(lines
        .iter()
        .any(|l| l["service"] == json!("service.requests") && l["metric"] == json!(3)));
    assert_eq!(lines.last().unwrap()["service"], json!("owner.ping"));
}

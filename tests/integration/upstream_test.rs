use asset_dev_gateway::upstream::UpstreamServer;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

#[tokio::test]
async fn serves_files_from_the_build_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("app.js"), "console.log(1)").expect("write fixture");

    let (reload_tx, _) = broadcast::channel(4);
    let addr = UpstreamServer::new(dir.path().to_path_buf(), reload_tx)
        .start()
        .await
        .expect("start upstream");

    let response = Client::new()
        .get(format!("http://{}/app.js", addr))
        .send()
        .await
        .expect("fetch asset");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "console.log(1)");

    let missing = Client::new()
        .get(format!("http://{}/nope.js", addr))
        .send()
        .await
        .expect("fetch missing");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn livereload_streams_an_event_per_rebuild() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (reload_tx, _) = broadcast::channel(4);
    let addr = UpstreamServer::new(dir.path().to_path_buf(), reload_tx.clone())
        .start()
        .await
        .expect("start upstream");

    let response = Client::new()
        .get(format!("http://{}/__livereload", addr))
        .send()
        .await
        .expect("open event stream");
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/event-stream"
    );

    let mut stream = response.bytes_stream();

    // Give the subscription a moment to register, then signal a rebuild.
    tokio::time::sleep(Duration::from_millis(100)).await;
    reload_tx.send(()).expect("at least one subscriber");

    let chunk = timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("event within deadline")
        .expect("stream still open")
        .expect("chunk read");
    assert_eq!(&chunk[..], b"data: reload\n\n");
}

// Integration tests for the chunk-buffering recorder
//
// These verify that encoded chunks are buffered in arrival order and
// finalized into a single artifact, and that stop is idempotent.

use tokio::sync::mpsc;
use viva_screen::{MediaChunk, Recorder};

fn chunk(fill: u8, timestamp_ms: u64) -> MediaChunk {
    MediaChunk {
        bytes: vec![fill; 4],
        timestamp_ms,
    }
}

#[tokio::test]
async fn finalizes_chunks_in_arrival_order() {
    let (tx, rx) = mpsc::channel(16);
    let mut recorder = Recorder::start(rx, "video/webm");

    for i in 0..5u8 {
        tx.send(chunk(i, i as u64 * 100)).await.unwrap();
    }
    drop(tx);

    let artifact = recorder.stop().await.unwrap().expect("artifact");
    assert_eq!(artifact.mime_type, "video/webm");
    assert_eq!(artifact.chunk_count, 5);
    assert_eq!(artifact.bytes.len(), 20);
    assert_eq!(&artifact.bytes[0..4], &[0, 0, 0, 0]);
    assert_eq!(&artifact.bytes[16..20], &[4, 4, 4, 4]);
    assert_eq!(artifact.duration_ms, 400);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let (tx, rx) = mpsc::channel(16);
    let mut recorder = Recorder::start(rx, "video/webm");

    tx.send(chunk(7, 0)).await.unwrap();
    drop(tx);

    let first = recorder.stop().await.unwrap();
    assert!(first.is_some());
    assert!(!recorder.is_open());

    // Second stop: no error, no new artifact
    let second = recorder.stop().await.unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn stop_drains_chunks_queued_before_the_signal() {
    let (tx, rx) = mpsc::channel(16);
    let mut recorder = Recorder::start(rx, "video/webm");

    for i in 0..3u8 {
        tx.send(chunk(i, i as u64 * 10)).await.unwrap();
    }

    // Sender still alive; the stop signal must not lose queued chunks
    let artifact = recorder.stop().await.unwrap().expect("artifact");
    assert_eq!(artifact.chunk_count, 3);
}

#[tokio::test]
async fn empty_stream_finalizes_to_an_empty_artifact() {
    let (tx, rx) = mpsc::channel::<MediaChunk>(16);
    drop(tx);

    let mut recorder = Recorder::start(rx, "video/webm");
    let artifact = recorder.stop().await.unwrap().expect("artifact");
    assert_eq!(artifact.chunk_count, 0);
    assert!(artifact.bytes.is_empty());
    assert_eq!(artifact.duration_ms, 0);
}

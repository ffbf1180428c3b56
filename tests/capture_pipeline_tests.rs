use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use wavescope::capture::{CapturePipeline, PipelineState};
use wavescope::config::CaptureConfig;
use wavescope::sinks::RecordingSink;
use wavescope::transport::{MockStep, MockSubscription};

fn test_config() -> CaptureConfig {
    CaptureConfig {
        units: 2,
        channels: 2,
        samples_per_channel: 2,
        tick_period_ms: 50,
        queue_capacity: 16,
        poll_backoff_us: 100,
    }
}

fn payload(waveform: &[i16]) -> Vec<u8> {
    rmp_serde::to_vec(&json!({
        "waveform": waveform,
        "sample_count": waveform.len(),
    }))
    .unwrap()
}

fn pipeline_with(
    config: CaptureConfig,
    steps: Vec<MockStep>,
) -> (CapturePipeline, RecordingSink) {
    let sink = RecordingSink::new();
    let pipeline = CapturePipeline::new(
        config,
        Box::new(MockSubscription::new(steps)),
        Box::new(sink.clone()),
    )
    .unwrap();
    (pipeline, sink)
}

#[tokio::test]
async fn test_end_to_end_reconstruction() {
    let steps = vec![MockStep::Message(payload(&[10, 11, 12, 13, 14, 15, 16, 17]))];
    let (mut pipeline, sink) = pipeline_with(test_config(), steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(200)).await;
    pipeline.stop().await.unwrap();

    assert!(sink.update_count() >= 1);
    let bank = sink.last_update().unwrap();
    assert_eq!(bank[0][0], vec![10, 14]);
    assert_eq!(bank[0][1], vec![11, 15]);
    assert_eq!(bank[1][0], vec![12, 16]);
    assert_eq!(bank[1][1], vec![13, 17]);

    let metrics = pipeline.metrics();
    assert_eq!(metrics.frames_received(), 1);
    assert_eq!(metrics.frames_reconstructed(), 1);
    assert_eq!(metrics.decode_failures(), 0);
    assert_eq!(pipeline.state(), PipelineState::Stopped);
}

#[tokio::test]
async fn test_malformed_message_does_not_halt_capture() {
    let steps = vec![
        MockStep::Message(b"not msgpack at all".to_vec()),
        MockStep::NoData,
        MockStep::Message(payload(&[1, 2, 3, 4, 5, 6, 7, 8])),
    ];
    let (mut pipeline, sink) = pipeline_with(test_config(), steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(200)).await;
    pipeline.stop().await.unwrap();

    let metrics = pipeline.metrics();
    assert_eq!(metrics.decode_failures(), 1);
    assert_eq!(metrics.frames_received(), 1);

    let bank = sink.last_update().unwrap();
    assert_eq!(bank[0][0], vec![1, 5]);
}

#[tokio::test]
async fn test_wrong_length_frame_is_filtered_before_reconstruction() {
    let steps = vec![MockStep::Message(payload(&[1, 2, 3]))];
    let (mut pipeline, sink) = pipeline_with(test_config(), steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(150)).await;
    pipeline.stop().await.unwrap();

    let metrics = pipeline.metrics();
    assert_eq!(metrics.decode_failures(), 1);
    assert_eq!(metrics.frames_reconstructed(), 0);
    assert_eq!(sink.update_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_surfaces_to_owner() {
    let steps = vec![MockStep::Failure("socket closed".to_string())];
    let (mut pipeline, sink) = pipeline_with(test_config(), steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(100)).await;

    match pipeline.state() {
        PipelineState::Failed { message } => assert!(message.contains("socket closed")),
        other => panic!("expected Failed state, got {:?}", other),
    }

    // stop() must report the failure rather than swallow it
    assert!(pipeline.stop().await.is_err());
    assert_eq!(sink.update_count(), 0);
}

#[tokio::test]
async fn test_empty_stream_never_notifies_sink() {
    let (mut pipeline, sink) = pipeline_with(test_config(), Vec::new());

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(200)).await;
    pipeline.stop().await.unwrap();

    assert_eq!(sink.update_count(), 0);
    assert!(pipeline.metrics().ticks() >= 2);
}

#[tokio::test]
async fn test_burst_yields_one_update_with_last_frame() {
    // Both frames land in the queue long before the first 300 ms tick,
    // so they drain as one batch: a single sink update showing the
    // later frame.
    let config = CaptureConfig {
        tick_period_ms: 300,
        ..test_config()
    };
    let steps = vec![
        MockStep::Message(payload(&[10, 11, 12, 13, 14, 15, 16, 17])),
        MockStep::Message(payload(&[20, 21, 22, 23, 24, 25, 26, 27])),
    ];
    let (mut pipeline, sink) = pipeline_with(config, steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(450)).await;
    pipeline.stop().await.unwrap();

    assert_eq!(sink.update_count(), 1);
    assert_eq!(pipeline.metrics().frames_reconstructed(), 2);

    let bank = sink.last_update().unwrap();
    assert_eq!(bank[0][0], vec![20, 24]);
    assert_eq!(bank[1][1], vec![23, 27]);
}

#[tokio::test]
async fn test_clean_shutdown_with_backlog() {
    // A tick period far beyond the test duration keeps every received
    // frame queued; stop() must still return promptly and cleanly.
    let config = CaptureConfig {
        tick_period_ms: 60_000,
        ..test_config()
    };
    let steps = (0..5)
        .map(|i| MockStep::Message(payload(&[i, i, i, i, i, i, i, i])))
        .collect();
    let (mut pipeline, sink) = pipeline_with(config, steps);

    pipeline.start().await.unwrap();
    sleep(Duration::from_millis(100)).await;
    pipeline.stop().await.unwrap();

    assert_eq!(pipeline.metrics().frames_received(), 5);
    assert_eq!(sink.update_count(), 0);
    assert_eq!(pipeline.state(), PipelineState::Stopped);
}

#[tokio::test]
async fn test_pipeline_cannot_restart() {
    let (mut pipeline, _sink) = pipeline_with(test_config(), Vec::new());

    pipeline.start().await.unwrap();
    pipeline.stop().await.unwrap();
    assert!(pipeline.start().await.is_err());
}

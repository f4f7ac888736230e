use tts::{ConnectOptions, FishSpeech, FishSpeechOptions, Tts, TtsError};

mod mock_tts_server;
use mock_tts_server::{spawn_failing_tts, spawn_mock_tts};

#[tokio::test]
async fn synthesizes_over_http() {
    // One full frame plus a 10 sample tail.
    let audio = vec![0u8; 8_820 + 20];
    let (url, seen, shutdown) = spawn_mock_tts(audio).await;
    let options = FishSpeechOptions {
        reference_id: Some("speaker".into()),
        ..FishSpeechOptions::default()
    };
    let tts = FishSpeech::new(url, options);

    let frames = tts
        .synthesize("Привет", ConnectOptions::default())
        .unwrap()
        .collect_frames()
        .await
        .unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame.samples_per_channel, 4_410);
    assert_eq!(frames[1].frame.samples_per_channel, 10);

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["text"], "Привет");
    assert_eq!(body["session_id"], 1);
    assert_eq!(body["reference_id"], "speaker");
    assert_eq!(body["max_new_tokens"], 1024);
    assert_eq!(body["format"], "pcm");
    assert!(body.get("seed").is_none());
    assert!(body["client_id"].as_str().unwrap().starts_with("voice-agent-"));

    tts.aclose().await;
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn server_error_is_a_connection_error() {
    let (url, shutdown) = spawn_failing_tts().await;
    let tts = FishSpeech::new(url, FishSpeechOptions::default());
    let err = tts
        .synthesize("hi", ConnectOptions::default())
        .unwrap()
        .collect_frames()
        .await
        .unwrap_err();
    assert!(matches!(err, TtsError::Connection(_)));
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let tts = FishSpeech::new("http://127.0.0.1:1", FishSpeechOptions::default());
    let err = tts
        .synthesize("hi", ConnectOptions::default())
        .unwrap()
        .collect_frames()
        .await
        .unwrap_err();
    assert!(matches!(err, TtsError::Connection(_)));
}

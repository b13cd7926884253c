mod common;

use common::{config, descriptor, FakeLoader};
use smartrf_cover::{
    setup_cover, tasks::event_channel, try_setup_cover, FileDescriptorLoader, SetupError,
    TransmitterError,
};

#[tokio::test]
async fn unavailable_descriptor_creates_no_cover() {
    let loader = FakeLoader::default();
    let (events, _receiver) = event_channel();

    let mut settings = config(Some(10), None);
    settings.device_code = 9999;

    assert!(setup_cover(&settings, &loader, events).await.is_none());
}

#[tokio::test]
async fn known_descriptor_creates_idle_cover() {
    let loader = FakeLoader::with(1000, descriptor());
    let (events, _receiver) = event_channel();

    let controller = setup_cover(&config(Some(10), Some(25)), &loader, events)
        .await
        .expect("cover should be created");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.manufacturer, "Dooya");
    assert_eq!(snapshot.supported_models, vec!["DC1600"]);
    assert_eq!(snapshot.position, Some(25));
    assert!(snapshot.features.set_position);
    assert!(!snapshot.is_opening && !snapshot.is_closing);
}

#[tokio::test]
async fn unsupported_controller_is_a_setup_failure() {
    let mut unsupported = descriptor();
    unsupported.supported_controller = "ESPHome".to_string();
    unsupported.commands_encoding = "Base64".to_string();
    let loader = FakeLoader::with(1000, unsupported);
    let (events, _receiver) = event_channel();

    let err = try_setup_cover(&config(None, None), &loader, events)
        .await
        .err()
        .expect("setup should fail");
    assert!(matches!(
        err,
        SetupError::Transmitter(TransmitterError::IncompatibleEncoding { .. })
    ));
}

#[tokio::test]
async fn descriptor_file_round_trip_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let document = serde_json::to_string(&descriptor()).unwrap();
    std::fs::write(dir.path().join("1000.json"), document).unwrap();
    std::fs::write(dir.path().join("1001.json"), "[]").unwrap();

    let loader = FileDescriptorLoader::local(dir.path());
    let (events, _receiver) = event_channel();
    assert!(setup_cover(&config(None, None), &loader, events.clone())
        .await
        .is_some());

    let mut broken = config(None, None);
    broken.device_code = 1001;
    let err = try_setup_cover(&broken, &loader, events)
        .await
        .err()
        .expect("invalid descriptor should fail");
    assert!(matches!(err, SetupError::Descriptor(_)));
}

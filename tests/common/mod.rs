#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use smartrf_cover::{
    services::{CommandSet, DescriptorLoader, DeviceDescriptor, Transmitter},
    tasks::{event_channel, EventReceiver, EventSender},
    CoverConfig, CoverController, DescriptorError,
};

pub const OPEN: &str = "OPEN";
pub const CLOSE: &str = "CLOSE";
pub const STOP: &str = "STOP";

/// Transmitter that records payloads and can be told to fail
#[derive(Clone, Default)]
pub struct RecordingTransmitter {
    sent: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingTransmitter {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transmitter for RecordingTransmitter {
    async fn emit(&self, payload: &str) -> bool {
        if self.failing.load(Ordering::SeqCst) {
            return false;
        }
        self.sent.lock().unwrap().push(payload.to_string());
        true
    }
}

/// In-memory descriptor source
#[derive(Default)]
pub struct FakeLoader {
    descriptors: HashMap<u32, DeviceDescriptor>,
}

impl FakeLoader {
    pub fn with(device_code: u32, descriptor: DeviceDescriptor) -> Self {
        let mut descriptors = HashMap::new();
        descriptors.insert(device_code, descriptor);
        Self { descriptors }
    }
}

#[async_trait]
impl DescriptorLoader for FakeLoader {
    async fn load(&self, device_code: u32) -> Result<DeviceDescriptor, DescriptorError> {
        self.descriptors
            .get(&device_code)
            .cloned()
            .ok_or_else(|| DescriptorError::Download {
                url: format!("fake://{}", device_code),
                cause: "404 Not Found".to_string(),
            })
    }
}

pub fn descriptor() -> DeviceDescriptor {
    DeviceDescriptor {
        manufacturer: "Dooya".to_string(),
        supported_models: vec!["DC1600".to_string()],
        supported_controller: "MQTT".to_string(),
        commands_encoding: "Raw".to_string(),
        commands: CommandSet {
            open: OPEN.to_string(),
            close: CLOSE.to_string(),
            stop: STOP.to_string(),
        },
    }
}

/// Config whose tick task stays quiet; tests deliver ticks by hand
pub fn config(travel_time: Option<u32>, initial_position: Option<u8>) -> CoverConfig {
    let mut config = CoverConfig::new(1000, "bridge");
    config.travel_time = travel_time;
    config.initial_position = initial_position;
    config.tick_interval = Duration::from_secs(3600);
    config
}

pub fn build(
    config: CoverConfig,
) -> (CoverController, RecordingTransmitter, EventSender, EventReceiver) {
    let transmitter = RecordingTransmitter::default();
    let (events, receiver) = event_channel();
    let controller = CoverController::new(
        config,
        descriptor(),
        Box::new(transmitter.clone()),
        events.clone(),
    );
    (controller, transmitter, events, receiver)
}

pub fn cover(
    travel_time: Option<u32>,
    initial_position: Option<u8>,
) -> (CoverController, RecordingTransmitter) {
    let (controller, transmitter, _, _) = build(config(travel_time, initial_position));
    (controller, transmitter)
}

/// Deliver one tick of the running subscription
pub async fn tick(controller: &mut CoverController) {
    let generation = controller
        .tick_generation()
        .expect("no active tick subscription");
    controller.on_tick(generation).await;
}

//! Cover runtime background task
//!
//! Every event touching a cover (host commands, sensor notifications and
//! ticks) goes through one channel and is handled in arrival order by the task
//! that owns the controller.

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{control::CoverController, error::RuntimeError, state::CoverSnapshot};

pub type EventSender = mpsc::UnboundedSender<CoverEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<CoverEvent>;

/// Operations the host can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverCommand {
    Open,
    Close,
    Stop,
    SetPosition(i32),
    /// State change of an external sensor; `None` when the entity vanished
    Sensor {
        entity_id: String,
        state: Option<String>,
    },
}

/// Events processed by the cover runtime
#[derive(Debug)]
pub enum CoverEvent {
    Command {
        command: CoverCommand,
        reply: Option<oneshot::Sender<CoverSnapshot>>,
    },
    Tick {
        generation: u64,
    },
}

/// Create the channel feeding a cover runtime
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Cloneable access to a running cover
#[derive(Debug, Clone)]
pub struct CoverHandle {
    events: EventSender,
    snapshots: watch::Receiver<CoverSnapshot>,
}

impl CoverHandle {
    pub fn new(events: EventSender, snapshots: watch::Receiver<CoverSnapshot>) -> Self {
        Self { events, snapshots }
    }

    /// Run a command and return the snapshot right after it was handled
    pub async fn send(&self, command: CoverCommand) -> Result<CoverSnapshot, RuntimeError> {
        let (reply, response) = oneshot::channel();
        self.events
            .send(CoverEvent::Command {
                command,
                reply: Some(reply),
            })
            .map_err(|_| RuntimeError)?;
        response.await.map_err(|_| RuntimeError)
    }

    /// Queue a command without waiting for it
    pub fn notify(&self, command: CoverCommand) -> Result<(), RuntimeError> {
        self.events
            .send(CoverEvent::Command {
                command,
                reply: None,
            })
            .map_err(|_| RuntimeError)
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> CoverSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<CoverSnapshot> {
        self.snapshots.clone()
    }
}

/// Background task that owns the controller and processes its events
pub async fn cover_runtime_task(mut controller: CoverController, mut events: EventReceiver) {
    info!("Starting cover runtime for {}", controller.config().name);

    while let Some(event) = events.recv().await {
        match event {
            CoverEvent::Tick { generation } => controller.on_tick(generation).await,
            CoverEvent::Command { command, reply } => {
                debug!("Handling {:?}", command);
                controller.apply(command).await;
                if let Some(reply) = reply {
                    // The caller may have given up waiting.
                    let _ = reply.send(controller.snapshot());
                }
            }
        }
    }

    info!("Cover runtime for {} stopped", controller.config().name);
}

/// Spawn the runtime for a controller built on `events`/`receiver`
pub fn spawn_cover_runtime(
    controller: CoverController,
    events: EventSender,
    receiver: EventReceiver,
) -> (CoverHandle, JoinHandle<()>) {
    let handle = CoverHandle::new(events, controller.subscribe());
    let task = tokio::spawn(cover_runtime_task(controller, receiver));
    (handle, task)
}

//! Cover position controller

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::estimator::{SeekPlan, TravelEstimator};
use super::reconciler::{reconcile, SensorReading};
use crate::{
    config::CoverConfig,
    services::{DeviceDescriptor, Transmitter},
    state::{CoverFeatures, CoverSnapshot, CoverState, CoverStatus, Direction, Motion},
    tasks::{
        cover_runtime::{CoverCommand, EventSender},
        tick_scheduler::{TickDisposition, TickScheduler},
    },
};

/// The three signals a cover understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Open,
    Close,
    Stop,
}

impl From<Direction> for Signal {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Open => Signal::Open,
            Direction::Close => Signal::Close,
        }
    }
}

/// Estimates and drives the position of one cover without position feedback
pub struct CoverController {
    config: CoverConfig,
    descriptor: DeviceDescriptor,
    transmitter: Box<dyn Transmitter>,
    estimator: Option<TravelEstimator>,
    features: CoverFeatures,
    state: CoverState,
    ticks: TickScheduler,
    publisher: watch::Sender<CoverSnapshot>,
}

impl CoverController {
    /// Create an idle controller; ticks are delivered through `events`, which
    /// the controller only holds weakly
    pub fn new(
        config: CoverConfig,
        descriptor: DeviceDescriptor,
        transmitter: Box<dyn Transmitter>,
        events: EventSender,
    ) -> Self {
        let estimator = config.travel_time.map(TravelEstimator::new);
        // Without a travel time the position stays unknown.
        let seed = estimator.and(config.initial_position).map(f64::from);
        let features = CoverFeatures::for_travel_time(config.travel_time);
        let ticks = TickScheduler::new(&events, config.tick_interval);
        let state = CoverState::new(seed);
        let (publisher, _) =
            watch::channel(build_snapshot(&config, &descriptor, features, &state));

        Self {
            config,
            descriptor,
            transmitter,
            estimator,
            features,
            state,
            ticks,
            publisher,
        }
    }

    pub fn config(&self) -> &CoverConfig {
        &self.config
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &CoverState {
        &self.state
    }

    /// Generation of the running tick subscription, if any
    pub fn tick_generation(&self) -> Option<u64> {
        self.ticks.generation()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticks.is_active()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<CoverSnapshot> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> CoverSnapshot {
        build_snapshot(&self.config, &self.descriptor, self.features, &self.state)
    }

    /// Apply one host command
    pub async fn apply(&mut self, command: CoverCommand) {
        match command {
            CoverCommand::Open => self.open().await,
            CoverCommand::Close => self.close().await,
            CoverCommand::Stop => self.stop().await,
            CoverCommand::SetPosition(target) => self.set_position(target).await,
            CoverCommand::Sensor { entity_id, state } => {
                self.on_sensor(&entity_id, state.as_deref())
            }
        }
    }

    pub async fn open(&mut self) {
        self.request_move(Direction::Open).await;
    }

    pub async fn close(&mut self) {
        self.request_move(Direction::Close).await;
    }

    /// Stop any movement and publish the result
    pub async fn stop(&mut self) {
        info!("Stopping {}", self.config.name);
        self.request_stop().await;
        self.publish();
    }

    /// Move to an absolute position
    pub async fn set_position(&mut self, target: i32) {
        let plan = match self.estimator {
            Some(estimator) => {
                estimator.plan_seek(self.state.position, target, self.state.is_moving())
            }
            None => SeekPlan::for_end_stop(target).unwrap_or(SeekPlan::NoOp),
        };

        match plan {
            SeekPlan::Close => self.request_move(Direction::Close).await,
            SeekPlan::Open => self.request_move(Direction::Open).await,
            SeekPlan::NoOp => {
                debug!("Seek to {} ignored at {:?}", target, self.state.position);
            }
            SeekPlan::Travel { ticks, direction } => {
                info!(
                    "Moving {} to {} ({:?}, {} ticks)",
                    self.config.name, target, direction, ticks
                );
                if !self.emit(direction.into()).await {
                    return;
                }
                self.begin_travel(direction, ticks);
                self.publish();
            }
        }
    }

    /// Handle a tick from the scheduler
    pub async fn on_tick(&mut self, generation: u64) {
        match self.ticks.accept(generation) {
            TickDisposition::Stale => {
                debug!("Dropping tick from released subscription {}", generation);
                return;
            }
            TickDisposition::WarmUp => return,
            TickDisposition::Advance => {}
        }

        let (Some(position), Some(estimator)) = (self.state.position, self.estimator) else {
            self.request_stop().await;
            self.publish();
            return;
        };
        let step = estimator.step_size();

        match self.state.motion {
            Motion::Closing => {
                if (position - step).round() > 0.0 {
                    self.state.position = Some(position - step);
                } else {
                    self.state.position = Some(0.0);
                    self.state.remaining_ticks = 0;
                }
            }
            Motion::Opening => {
                if (position + step).round() < 100.0 {
                    self.state.position = Some(position + step);
                } else {
                    self.state.position = Some(100.0);
                    self.state.remaining_ticks = 0;
                }
            }
            Motion::Idle => {
                self.ticks.cancel();
                return;
            }
        }

        self.state.remaining_ticks = self.state.remaining_ticks.saturating_sub(1);
        debug!(
            "Tick: position {:.1}, {} ticks left",
            self.state.position.unwrap_or_default(),
            self.state.remaining_ticks
        );

        if self.state.remaining_ticks == 0 {
            self.request_stop().await;
        }
        self.publish();
    }

    /// Merge a sensor notification into the simulated state
    pub fn on_sensor(&mut self, entity_id: &str, reading: Option<&str>) {
        if self.config.position_sensor.as_deref() != Some(entity_id) {
            debug!("Ignoring state of unrelated entity {}", entity_id);
            return;
        }
        let Some(reading) = reading else {
            return;
        };

        let reading = SensorReading::parse(reading);
        debug!("Position sensor {} reports {:?}", entity_id, reading);
        reconcile(
            &mut self.state,
            reading,
            self.config.device_class,
            self.estimator.is_some(),
        );
        self.publish();
    }

    async fn request_move(&mut self, direction: Direction) {
        if self.state.is_moving() {
            debug!(
                "{:?} ignored while {:?}; stop the cover first",
                direction, self.state.motion
            );
            return;
        }

        let end_stop = match direction {
            Direction::Open => 100,
            Direction::Close => 0,
        };
        if self.state.rounded_position() == Some(end_stop) {
            debug!("{:?} ignored, already at {}", direction, end_stop);
            return;
        }

        info!("{:?} requested for {}", direction, self.config.name);
        match (self.state.position, self.estimator) {
            (Some(_), Some(estimator)) => {
                if !self.emit(direction.into()).await {
                    return;
                }
                self.begin_travel(direction, estimator.full_travel_ticks());
            }
            _ => {
                if !self.emit(direction.into()).await {
                    return;
                }
                match direction {
                    Direction::Open => self.state.opened = true,
                    Direction::Close => self.state.closed = true,
                }
            }
        }
        self.publish();
    }

    async fn request_stop(&mut self) {
        self.state.halt();
        self.ticks.cancel();

        let mid_travel = match self.state.position {
            None => true,
            Some(position) => position > 0.0 && position < 100.0,
        };
        if mid_travel {
            self.emit(Signal::Stop).await;
        }
    }

    fn begin_travel(&mut self, direction: Direction, ticks: u32) {
        self.ticks.cancel();
        self.state.begin_travel(direction, ticks);
        self.ticks.start();
    }

    async fn emit(&self, signal: Signal) -> bool {
        let commands = &self.descriptor.commands;
        let payload = match signal {
            Signal::Open => &commands.open,
            Signal::Close => &commands.close,
            Signal::Stop => &commands.stop,
        };

        let sent = self.transmitter.emit(payload).await;
        if !sent {
            warn!("Failed to send {:?} command for {}", signal, self.config.name);
        }
        sent
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }
}

fn build_snapshot(
    config: &CoverConfig,
    descriptor: &DeviceDescriptor,
    features: CoverFeatures,
    state: &CoverState,
) -> CoverSnapshot {
    let is_closed = state.is_closed();
    let is_opening = state.is_opening();
    let is_closing = state.is_closing();

    CoverSnapshot {
        unique_id: config.unique_id.clone(),
        name: config.name.clone(),
        device_class: config.device_class,
        device_code: config.device_code,
        manufacturer: descriptor.manufacturer.clone(),
        supported_models: descriptor.supported_models.clone(),
        features,
        state: CoverStatus::from_flags(is_opening, is_closing, is_closed),
        position: state.rounded_position(),
        is_closed,
        is_opened: state.is_opened(),
        is_opening,
        is_closing,
    }
}

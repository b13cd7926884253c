//! Periodic tick subscription owned by a cover controller

use std::time::Duration;

use tokio::{sync::mpsc::WeakUnboundedSender, task::JoinHandle, time::interval};
use tracing::debug;

use super::cover_runtime::{CoverEvent, EventSender};

/// How the controller should treat an incoming tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDisposition {
    /// Tick from a released subscription
    Stale,
    /// First fire of a subscription, discarded
    WarmUp,
    /// Advance the position by one step
    Advance,
}

struct Subscription {
    generation: u64,
    task: JoinHandle<()>,
    warming_up: bool,
}

/// At most one running tick task at a time.
///
/// Ticks are delivered as [`CoverEvent::Tick`] on the runtime channel, stamped
/// with the generation of the subscription that produced them. The scheduler
/// holds the channel weakly, so it never keeps a runtime alive on its own.
pub struct TickScheduler {
    events: WeakUnboundedSender<CoverEvent>,
    period: Duration,
    active: Option<Subscription>,
    next_generation: u64,
}

impl TickScheduler {
    pub fn new(events: &EventSender, period: Duration) -> Self {
        Self {
            events: events.downgrade(),
            period,
            active: None,
            next_generation: 0,
        }
    }

    /// Subscribe to ticks; returns `false` if a subscription is already running
    pub fn start(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let events = self.events.clone();
        let period = self.period;

        // The interval completes its first tick immediately; that fire is the warm-up.
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                let Some(sender) = events.upgrade() else {
                    break;
                };
                if sender.send(CoverEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        });

        debug!("Tick subscription {} started ({:?} period)", generation, period);
        self.active = Some(Subscription {
            generation,
            task,
            warming_up: true,
        });
        true
    }

    /// Release the running subscription; no tick of it is accepted afterwards
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(subscription) => {
                subscription.task.abort();
                debug!("Tick subscription {} released", subscription.generation);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the running subscription
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|s| s.generation)
    }

    /// Classify a tick and clear the warm-up flag on its first fire
    pub fn accept(&mut self, generation: u64) -> TickDisposition {
        match self.active.as_mut() {
            Some(subscription) if subscription.generation == generation => {
                if subscription.warming_up {
                    subscription.warming_up = false;
                    TickDisposition::WarmUp
                } else {
                    TickDisposition::Advance
                }
            }
            _ => TickDisposition::Stale,
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

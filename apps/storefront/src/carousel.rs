//! # Carousel Service
//!
//! Drives the testimonial [`Carousel`] from a spawned tokio task.
//!
//! ## Task Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Carousel Service                                   │
//! │                                                                         │
//! │  CarouselHandle (Clone)                    spawned run() loop           │
//! │  ──────────────────────                    ──────────────────           │
//! │  next() / prev() / go_to(i) ──┐                                        │
//! │  set_hovered / set_hidden  ───┼── mpsc(32) ──► select! {               │
//! │  set_autoplay / reduced    ───┤                  cmd   → apply          │
//! │  shutdown() ──────────────────┘                  tick  → carousel.tick  │
//! │                                                }                       │
//! │  current() / subscribe() ◄──── watch ◄─────── CarouselState            │
//! │                                                                         │
//! │  EventBus ◄──────────────────────────────────  SlideChanged{index,total}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timer
//! The ticker fires every `interval` and is restarted after any manual
//! navigation and whenever the carousel resumes, so the slide on screen
//! always gets a full interval before it advances.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crafts_core::{Carousel, CarouselMode, PauseReason};

use crate::error::{ApiError, ApiResult};
use crate::events::{EventBus, StorefrontEvent};
use crate::state::CarouselConfig;

/// Snapshot published on the watch channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselState {
    /// Slide on screen; `None` when there are no slides.
    pub current: Option<usize>,
    pub total: usize,
    pub mode: CarouselMode,
    pub pause_reasons: Vec<PauseReason>,
}

impl From<&Carousel> for CarouselState {
    fn from(carousel: &Carousel) -> Self {
        CarouselState {
            current: carousel.current(),
            total: carousel.len(),
            mode: carousel.mode(),
            pause_reasons: carousel.pause_reasons(),
        }
    }
}

/// Commands accepted by the carousel task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Prev,
    GoTo(usize),
    SetHovered(bool),
    SetHidden(bool),
    SetReducedMotion(bool),
    SetAutoplay(bool),
    Shutdown,
}

impl CarouselCommand {
    fn is_navigation(self) -> bool {
        matches!(
            self,
            CarouselCommand::Next | CarouselCommand::Prev | CarouselCommand::GoTo(_)
        )
    }
}

// =============================================================================
// Handle
// =============================================================================

#[derive(Debug, Clone)]
pub struct CarouselHandle {
    state_rx: watch::Receiver<CarouselState>,
    cmd_tx: mpsc::Sender<CarouselCommand>,
}

impl CarouselHandle {
    /// Latest published state.
    pub fn state(&self) -> CarouselState {
        self.state_rx.borrow().clone()
    }

    pub fn current(&self) -> Option<usize> {
        self.state_rx.borrow().current
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.state_rx.clone()
    }

    /// True once the task has exited.
    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    pub async fn next(&self) -> ApiResult<()> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn prev(&self) -> ApiResult<()> {
        self.send(CarouselCommand::Prev).await
    }

    pub async fn go_to(&self, index: usize) -> ApiResult<()> {
        self.send(CarouselCommand::GoTo(index)).await
    }

    pub async fn set_hovered(&self, hovered: bool) -> ApiResult<()> {
        self.send(CarouselCommand::SetHovered(hovered)).await
    }

    pub async fn set_hidden(&self, hidden: bool) -> ApiResult<()> {
        self.send(CarouselCommand::SetHidden(hidden)).await
    }

    pub async fn set_reduced_motion(&self, reduced: bool) -> ApiResult<()> {
        self.send(CarouselCommand::SetReducedMotion(reduced)).await
    }

    pub async fn set_autoplay(&self, enabled: bool) -> ApiResult<()> {
        self.send(CarouselCommand::SetAutoplay(enabled)).await
    }

    /// Stops the task. Later calls on any clone fail with `UNAVAILABLE`.
    pub async fn shutdown(&self) -> ApiResult<()> {
        self.send(CarouselCommand::Shutdown).await
    }

    async fn send(&self, cmd: CarouselCommand) -> ApiResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| ApiError::unavailable("Carousel has shut down"))
    }
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug)]
pub struct CarouselService {
    carousel: Carousel,
    interval: Duration,
    events: EventBus,
    state_tx: watch::Sender<CarouselState>,
}

impl CarouselService {
    /// Creates a carousel over `slides` testimonials.
    pub fn new(slides: usize, config: &CarouselConfig, events: EventBus) -> Self {
        let mut carousel = Carousel::new(slides, config.autoplay);
        carousel.set_reduced_motion(config.reduced_motion);
        let (state_tx, _) = watch::channel(CarouselState::from(&carousel));

        CarouselService {
            carousel,
            // tokio intervals reject a zero period
            interval: config.interval().max(Duration::from_millis(1)),
            events,
            state_tx,
        }
    }

    /// Spawns the carousel task and returns a handle to it.
    pub fn start(self) -> CarouselHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let handle = CarouselHandle {
            state_rx: self.state_tx.subscribe(),
            cmd_tx,
        };

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        handle
    }

    async fn run(mut self, mut cmd_rx: mpsc::Receiver<CarouselCommand>) {
        info!(
            slides = self.carousel.len(),
            interval_ms = self.interval.as_millis() as u64,
            mode = ?self.carousel.mode(),
            "Carousel started"
        );

        let mut ticker = self.ticker();

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let cmd = match cmd {
                        None | Some(CarouselCommand::Shutdown) => break,
                        Some(cmd) => cmd,
                    };
                    if self.apply(cmd) {
                        ticker.reset();
                    }
                }
                _ = ticker.tick() => {
                    if let Some(index) = self.carousel.tick() {
                        debug!(index, "Carousel auto-advanced");
                        self.slide_changed(index);
                    }
                }
            }
        }

        info!("Carousel shutting down");
    }

    fn ticker(&self) -> Interval {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Applies one command. Returns true when the timer should restart.
    fn apply(&mut self, cmd: CarouselCommand) -> bool {
        let moved = match cmd {
            CarouselCommand::Next => self.carousel.next(),
            CarouselCommand::Prev => self.carousel.prev(),
            CarouselCommand::GoTo(index) => self.carousel.go_to(index),
            _ => None,
        };

        if let Some(index) = moved {
            debug!(?cmd, index, "Carousel navigated");
            self.slide_changed(index);
            return true;
        }
        if cmd.is_navigation() {
            // Empty carousel or index out of range.
            return false;
        }

        let flipped = match cmd {
            CarouselCommand::SetHovered(v) => self.carousel.set_hovered(v),
            CarouselCommand::SetHidden(v) => self.carousel.set_hidden(v),
            CarouselCommand::SetReducedMotion(v) => self.carousel.set_reduced_motion(v),
            CarouselCommand::SetAutoplay(v) => self.carousel.set_autoplay(v),
            _ => false,
        };
        self.publish_state();

        if flipped {
            debug!(mode = ?self.carousel.mode(), "Carousel mode changed");
        }
        flipped && self.carousel.is_auto_advancing()
    }

    fn slide_changed(&self, index: usize) {
        self.publish_state();
        self.events.publish(StorefrontEvent::SlideChanged {
            index,
            total: self.carousel.len(),
        });
    }

    fn publish_state(&self) {
        self.state_tx.send_replace(CarouselState::from(&self.carousel));
    }
}

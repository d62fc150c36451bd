//! # Carousel
//!
//! Rotation state for the testimonial carousel. Timers live in the app; this
//! module only answers "which slide is showing" and "should the timer run".
//!
//! ## State Machine
//! ```text
//!                     any pause condition set
//!   ┌────────────────┐ ─────────────────────► ┌────────────────┐
//!   │ AutoAdvancing  │                        │     Paused     │
//!   │  tick → +1     │ ◄───────────────────── │  tick ignored  │
//!   └────────────────┘  all conditions clear  └────────────────┘
//!
//!   Pause conditions: autoplay off, reduced motion, hovered, page hidden
//!   prev/next/go_to work in both modes and wrap around: -1 → N-1, N → 0
//! ```
//!
//! A carousel with no slides has no current index and ignores everything.

use serde::{Deserialize, Serialize};

/// Whether the timer should be advancing slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselMode {
    AutoAdvancing,
    Paused,
}

/// One reason the carousel is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
    AutoplayDisabled,
    ReducedMotion,
    Hovered,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    autoplay: bool,
    reduced_motion: bool,
    hovered: bool,
    hidden: bool,
}

impl Carousel {
    /// Creates a carousel over `len` slides starting at slide 0.
    pub fn new(len: usize, autoplay: bool) -> Self {
        Carousel {
            len,
            index: 0,
            autoplay,
            reduced_motion: false,
            hovered: false,
            hidden: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The slide being shown, `None` when there are no slides.
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    /// Moves one slide forward, wrapping past the end.
    pub fn next(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.index)
    }

    /// Moves one slide back, wrapping past the start.
    pub fn prev(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + self.len - 1) % self.len;
        Some(self.index)
    }

    /// Jumps to a slide. Out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.index = index;
        Some(self.index)
    }

    /// Timer tick: advances only while auto-advancing.
    pub fn tick(&mut self) -> Option<usize> {
        match self.mode() {
            CarouselMode::AutoAdvancing => self.next(),
            CarouselMode::Paused => None,
        }
    }

    // -------------------------------------------------------------------------
    // Pause conditions
    //
    // Each setter returns true when the mode flipped as a result.
    // -------------------------------------------------------------------------

    pub fn set_autoplay(&mut self, enabled: bool) -> bool {
        self.update(|c| c.autoplay = enabled)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        self.update(|c| c.reduced_motion = reduced)
    }

    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        self.update(|c| c.hovered = hovered)
    }

    pub fn set_hidden(&mut self, hidden: bool) -> bool {
        self.update(|c| c.hidden = hidden)
    }

    fn update(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        let before = self.mode();
        apply(self);
        before != self.mode()
    }

    pub fn mode(&self) -> CarouselMode {
        if self.is_empty() || !self.pause_reasons().is_empty() {
            CarouselMode::Paused
        } else {
            CarouselMode::AutoAdvancing
        }
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.mode() == CarouselMode::AutoAdvancing
    }

    /// Every condition currently holding the carousel paused.
    pub fn pause_reasons(&self) -> Vec<PauseReason> {
        [
            (!self.autoplay, PauseReason::AutoplayDisabled),
            (self.reduced_motion, PauseReason::ReducedMotion),
            (self.hovered, PauseReason::Hovered),
            (self.hidden, PauseReason::Hidden),
        ]
        .into_iter()
        .filter_map(|(active, reason)| active.then_some(reason))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_directions() {
        let mut carousel = Carousel::new(5, true);

        assert_eq!(carousel.prev(), Some(4));
        assert_eq!(carousel.next(), Some(0));

        carousel.go_to(4);
        assert_eq!(carousel.next(), Some(0));
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut carousel = Carousel::new(3, true);
        assert_eq!(carousel.go_to(2), Some(2));
        assert_eq!(carousel.go_to(3), None);
        assert_eq!(carousel.current(), Some(2));
    }

    #[test]
    fn test_tick_only_advances_when_auto() {
        let mut carousel = Carousel::new(3, true);
        assert_eq!(carousel.tick(), Some(1));

        assert!(carousel.set_hovered(true));
        assert_eq!(carousel.tick(), None);
        assert_eq!(carousel.current(), Some(1));

        assert!(carousel.set_hovered(false));
        assert_eq!(carousel.tick(), Some(2));
    }

    #[test]
    fn test_pause_reasons_stack() {
        let mut carousel = Carousel::new(3, true);
        assert!(carousel.set_hidden(true));
        assert!(!carousel.set_hovered(true));
        assert_eq!(
            carousel.pause_reasons(),
            vec![PauseReason::Hovered, PauseReason::Hidden]
        );

        // Still hovered, so clearing hidden keeps it paused.
        assert!(!carousel.set_hidden(false));
        assert_eq!(carousel.mode(), CarouselMode::Paused);
    }

    #[test]
    fn test_reduced_motion_and_disabled_autoplay_pause() {
        let mut carousel = Carousel::new(3, false);
        assert_eq!(carousel.pause_reasons(), vec![PauseReason::AutoplayDisabled]);

        carousel.set_autoplay(true);
        carousel.set_reduced_motion(true);
        assert_eq!(carousel.pause_reasons(), vec![PauseReason::ReducedMotion]);
        assert_eq!(carousel.tick(), None);

        // Manual navigation still works while paused.
        assert_eq!(carousel.next(), Some(1));
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut carousel = Carousel::new(0, true);
        assert_eq!(carousel.current(), None);
        assert_eq!(carousel.next(), None);
        assert_eq!(carousel.prev(), None);
        assert_eq!(carousel.go_to(0), None);
        assert_eq!(carousel.tick(), None);
        assert_eq!(carousel.mode(), CarouselMode::Paused);
    }

    #[test]
    fn test_single_slide_stays_put() {
        let mut carousel = Carousel::new(1, true);
        assert_eq!(carousel.next(), Some(0));
        assert_eq!(carousel.prev(), Some(0));
        assert_eq!(carousel.tick(), Some(0));
    }
}

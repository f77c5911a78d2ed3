//! Carousel interaction state.
//!
//! A [`Carousel`] is bound to one scanned container and owns its slide index.
//! Navigation wraps in both directions, and every transition recomputes the
//! active flag of each slide and indicator from the index, so exactly one slide
//! is active at all times.
//!
//! Containers with fewer than two slides get no bindings: their arrow controls
//! are hidden and every event is a no-op.
//!
//! ## Touch
//!
//! A swipe is measured from the touch-start X to the touch-end X. Moving left
//! by at least [`SWIPE_THRESHOLD`] pixels advances, moving right by as much goes
//! back. While a touch is in progress on an interactive carousel the default
//! scroll is suppressed so a horizontal swipe does not also scroll the page.

use crate::dom::CarouselNode;

/// Minimum horizontal travel, in CSS pixels, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Direction of a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Classify a completed touch by its horizontal travel.
pub fn classify_swipe(start_x: f64, end_x: f64) -> Option<Step> {
    let delta = end_x - start_x;
    if delta <= -SWIPE_THRESHOLD {
        Some(Step::Next)
    } else if delta >= SWIPE_THRESHOLD {
        Some(Step::Previous)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    id: Option<String>,
    slide_images: Vec<Option<String>>,
    /// Encoded position per indicator; `None` means the indicator is not wired.
    indicator_targets: Vec<Option<usize>>,
    slide_active: Vec<bool>,
    indicator_active: Vec<bool>,
    current: usize,
    touch_start_x: Option<f64>,
}

impl Carousel {
    /// Bind a scanned container.
    pub fn bind(node: &CarouselNode) -> Self {
        let len = node.slides.len();
        let indicator_targets = node
            .indicators
            .iter()
            .map(|indicator| indicator.position.filter(|&position| position < len))
            .collect();

        let mut carousel = Self {
            id: node.id.clone(),
            slide_images: node.slides.iter().map(|slide| slide.image.clone()).collect(),
            indicator_targets,
            slide_active: vec![false; len],
            indicator_active: vec![false; node.indicators.len()],
            current: 0,
            touch_start_x: None,
        };
        if len > 0 {
            carousel.show(0);
        }
        carousel
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn len(&self) -> usize {
        self.slide_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slide_images.is_empty()
    }

    /// Whether navigation is bound (two or more slides).
    pub fn is_interactive(&self) -> bool {
        self.len() > 1
    }

    /// Arrow controls are hidden on carousels that cannot navigate.
    pub fn controls_hidden(&self) -> bool {
        !self.is_interactive()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the slide carrying the active flag.
    pub fn active_slide(&self) -> Option<usize> {
        self.slide_active.iter().position(|&active| active)
    }

    /// Ordinal of the indicator carrying the active flag.
    pub fn active_indicator(&self) -> Option<usize> {
        self.indicator_active.iter().position(|&active| active)
    }

    pub fn slide_flags(&self) -> &[bool] {
        &self.slide_active
    }

    pub fn indicator_flags(&self) -> &[bool] {
        &self.indicator_active
    }

    /// Image source of the active slide, if that slide shows an image.
    pub fn active_image(&self) -> Option<&str> {
        self.slide_images.get(self.current)?.as_deref()
    }

    /// Apply a step. Returns `false` when the carousel is not interactive.
    pub fn step(&mut self, step: Step) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let n = self.len();
        let index = match step {
            Step::Next => (self.current + 1) % n,
            Step::Previous => (self.current + n - 1) % n,
        };
        self.show(index);
        true
    }

    pub fn next(&mut self) -> bool {
        self.step(Step::Next)
    }

    pub fn previous(&mut self) -> bool {
        self.step(Step::Previous)
    }

    /// Click on the indicator at `ordinal` (document order within this carousel).
    ///
    /// Jumps straight to the indicator's encoded position. Unwired indicators
    /// do nothing.
    pub fn select_indicator(&mut self, ordinal: usize) -> bool {
        if !self.is_interactive() {
            return false;
        }
        match self.indicator_targets.get(ordinal).copied().flatten() {
            Some(position) => {
                self.show(position);
                true
            }
            None => false,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        if self.is_interactive() {
            self.touch_start_x = Some(x);
        }
    }

    /// Returns whether the default scroll action is prevented.
    pub fn touch_move(&self) -> bool {
        self.is_interactive()
    }

    /// Finish a touch; performs and returns the swipe step, if any.
    pub fn touch_end(&mut self, x: f64) -> Option<Step> {
        let start = self.touch_start_x.take()?;
        let step = classify_swipe(start, x)?;
        self.step(step);
        Some(step)
    }

    fn show(&mut self, index: usize) {
        self.current = index;
        for (i, active) in self.slide_active.iter_mut().enumerate() {
            *active = i == index;
        }
        for (i, active) in self.indicator_active.iter_mut().enumerate() {
            *active = i == index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{IndicatorNode, SlideNode};

    fn node(slides: usize) -> CarouselNode {
        CarouselNode {
            id: Some("carousel-1".to_string()),
            slides: (0..slides)
                .map(|i| SlideNode {
                    image: Some(format!("p/{i}.webp")),
                })
                .collect(),
            indicators: (0..slides)
                .map(|i| IndicatorNode { position: Some(i) })
                .collect(),
            has_prev: slides > 1,
            has_next: slides > 1,
        }
    }

    fn assert_consistent(carousel: &Carousel) {
        assert_eq!(carousel.active_slide(), Some(carousel.current_index()));
        assert_eq!(carousel.slide_flags().iter().filter(|&&a| a).count(), 1);
        if !carousel.indicator_flags().is_empty() {
            assert_eq!(carousel.active_indicator(), Some(carousel.current_index()));
        }
    }

    #[test]
    fn starts_on_first_slide() {
        let carousel = Carousel::bind(&node(3));
        assert_eq!(carousel.current_index(), 0);
        assert_consistent(&carousel);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut carousel = Carousel::bind(&node(4));
        assert!(carousel.previous());
        assert_eq!(carousel.current_index(), 3);
        assert_consistent(&carousel);
    }

    #[test]
    fn next_wraps_to_first() {
        let mut carousel = Carousel::bind(&node(4));
        carousel.previous();
        assert!(carousel.next());
        assert_eq!(carousel.current_index(), 0);
        assert_consistent(&carousel);
    }

    #[test]
    fn full_cycle_returns_home() {
        let mut carousel = Carousel::bind(&node(5));
        for _ in 0..5 {
            carousel.next();
            assert_consistent(&carousel);
        }
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn indicator_jumps_directly() {
        let mut carousel = Carousel::bind(&node(4));
        assert!(carousel.select_indicator(2));
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.active_image(), Some("p/2.webp"));
        assert_consistent(&carousel);
    }

    #[test]
    fn out_of_range_indicator_is_not_wired() {
        let mut n = node(2);
        n.indicators[1].position = Some(9);
        let mut carousel = Carousel::bind(&n);
        assert!(!carousel.select_indicator(1));
        assert!(!carousel.select_indicator(7));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn missing_indicators_are_tolerated() {
        let mut n = node(3);
        n.indicators.clear();
        let mut carousel = Carousel::bind(&n);
        assert!(carousel.next());
        assert_consistent(&carousel);
        assert_eq!(carousel.active_indicator(), None);
    }

    #[test]
    fn single_slide_is_inert() {
        let mut carousel = Carousel::bind(&node(1));
        assert!(carousel.controls_hidden());
        assert!(!carousel.next());
        assert!(!carousel.previous());
        assert!(!carousel.touch_move());
        carousel.touch_start(200.0);
        assert_eq!(carousel.touch_end(100.0), None);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.active_image(), Some("p/0.webp"));
    }

    #[test]
    fn empty_carousel_has_no_active_slide() {
        let carousel = Carousel::bind(&node(0));
        assert!(carousel.is_empty());
        assert_eq!(carousel.active_slide(), None);
        assert_eq!(carousel.active_image(), None);
    }

    #[test]
    fn swipe_left_past_threshold_advances() {
        let mut carousel = Carousel::bind(&node(3));
        carousel.touch_start(200.0);
        assert!(carousel.touch_move());
        assert_eq!(carousel.touch_end(140.0), Some(Step::Next));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn short_swipe_does_nothing() {
        let mut carousel = Carousel::bind(&node(3));
        carousel.touch_start(200.0);
        assert_eq!(carousel.touch_end(170.0), None);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn swipe_right_goes_back() {
        let mut carousel = Carousel::bind(&node(3));
        carousel.touch_start(100.0);
        assert_eq!(carousel.touch_end(180.0), Some(Step::Previous));
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut carousel = Carousel::bind(&node(3));
        assert_eq!(carousel.touch_end(0.0), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(classify_swipe(200.0, 150.0), Some(Step::Next));
        assert_eq!(classify_swipe(150.0, 200.0), Some(Step::Previous));
        assert_eq!(classify_swipe(200.0, 150.5), None);
        assert_eq!(classify_swipe(10.0, 10.0), None);
    }
}

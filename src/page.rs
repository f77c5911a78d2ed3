//! Page-level controller.
//!
//! A [`Page`] activates carousels over the content regions it is given and
//! dispatches user events to them and to the page's [`Lightbox`]. Events run
//! one at a time to completion, like UI callbacks.
//!
//! Click routing mirrors event propagation on the live page:
//!
//! - arrow and indicator clicks are consumed by their carousel and never reach
//!   the lightbox;
//! - clicks on a content image open the lightbox, unless a link wraps the image
//!   (the click falls through to the link);
//! - clicks anywhere in a carousel open the lightbox on the active slide's
//!   image, whatever element was hit;
//! - a click on the open overlay closes it.

use crate::carousel::{Carousel, Step};
use crate::dom::Document;
use crate::lightbox::{Lightbox, Viewport};

/// Arrow or indicator inside a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    /// Indicator by ordinal within its carousel.
    Indicator(usize),
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Content image by index into [`Document::images`].
    Image(usize),
    /// Any non-control element inside a carousel container.
    Carousel(usize),
    Control { carousel: usize, control: Control },
    Overlay,
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A carousel changed slides.
    SlideChanged { carousel: usize, index: usize },
    LightboxOpened(String),
    LightboxClosed,
    /// Nothing intercepted the click; default behavior (e.g. following a link) applies.
    FellThrough,
    /// The click was consumed but changed nothing.
    Ignored,
}

/// Counts reported by [`Page::activate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activation {
    pub interactive: usize,
    pub static_carousels: usize,
}

#[derive(Debug)]
pub struct Page {
    viewport: Viewport,
    document: Document,
    carousels: Vec<Carousel>,
    lightbox: Option<Lightbox>,
}

impl Page {
    /// `lightbox` is `None` on pages without the overlay.
    pub fn new(viewport: Viewport, lightbox: Option<Lightbox>) -> Self {
        Self {
            viewport,
            document: Document::default(),
            carousels: Vec::new(),
            lightbox,
        }
    }

    /// Bind every carousel found in `roots`.
    ///
    /// Replaces the bindings of any earlier activation, so each container is
    /// bound exactly once.
    pub fn activate<'a>(&mut self, roots: impl IntoIterator<Item = &'a str>) -> Activation {
        self.document = Document::scan_all(roots);
        self.carousels = self.document.carousels.iter().map(Carousel::bind).collect();

        let interactive = self.carousels.iter().filter(|c| c.is_interactive()).count();
        Activation {
            interactive,
            static_carousels: self.carousels.len() - interactive,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn carousel(&self, index: usize) -> Option<&Carousel> {
        self.carousels.get(index)
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn click(&mut self, target: Target) -> ClickOutcome {
        match target {
            Target::Control { carousel, control } => self.click_control(carousel, control),
            Target::Image(index) => {
                let Some(image) = self.document.images.get(index) else {
                    return ClickOutcome::FellThrough;
                };
                if image.linked {
                    return ClickOutcome::FellThrough;
                }
                let url = match image.carousel {
                    Some(carousel) => self
                        .carousels
                        .get(carousel)
                        .and_then(Carousel::active_image)
                        .unwrap_or(image.src.as_str())
                        .to_string(),
                    None => image.src.clone(),
                };
                self.open_lightbox(&url)
            }
            Target::Carousel(index) => {
                let url = self
                    .carousels
                    .get(index)
                    .and_then(Carousel::active_image)
                    .map(str::to_string);
                match url {
                    Some(url) => self.open_lightbox(&url),
                    None => ClickOutcome::FellThrough,
                }
            }
            Target::Overlay => match self.lightbox.as_mut().map(Lightbox::close) {
                Some(true) => ClickOutcome::LightboxClosed,
                _ => ClickOutcome::FellThrough,
            },
            Target::Elsewhere => ClickOutcome::FellThrough,
        }
    }

    /// Key press anywhere on the page. Returns whether the overlay closed.
    pub fn key(&mut self, key: &str) -> bool {
        self.lightbox
            .as_mut()
            .is_some_and(|lightbox| lightbox.handle_key(key))
    }

    pub fn touch_start(&mut self, carousel: usize, x: f64) {
        if let Some(carousel) = self.carousels.get_mut(carousel) {
            carousel.touch_start(x);
        }
    }

    /// Returns whether the default scroll is prevented.
    pub fn touch_move(&self, carousel: usize) -> bool {
        self.carousels
            .get(carousel)
            .is_some_and(Carousel::touch_move)
    }

    pub fn touch_end(&mut self, carousel: usize, x: f64) -> Option<Step> {
        self.carousels.get_mut(carousel)?.touch_end(x)
    }

    fn click_control(&mut self, index: usize, control: Control) -> ClickOutcome {
        let Some(carousel) = self.carousels.get_mut(index) else {
            return ClickOutcome::Ignored;
        };
        let changed = match control {
            Control::Previous => carousel.previous(),
            Control::Next => carousel.next(),
            Control::Indicator(ordinal) => carousel.select_indicator(ordinal),
        };
        if changed {
            ClickOutcome::SlideChanged {
                carousel: index,
                index: carousel.current_index(),
            }
        } else {
            ClickOutcome::Ignored
        }
    }

    fn open_lightbox(&mut self, url: &str) -> ClickOutcome {
        let viewport = self.viewport;
        match self.lightbox.as_mut().map(|lightbox| lightbox.open(url, &viewport)) {
            Some(true) => ClickOutcome::LightboxOpened(url.to_string()),
            _ => ClickOutcome::FellThrough,
        }
    }
}

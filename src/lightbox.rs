//! Full-viewport image overlay.
//!
//! One [`Lightbox`] serves the whole page. The page controller owns it and
//! routes image clicks, overlay clicks and key presses to it.
//!
//! Opening locks page scroll. When the page currently has a vertical
//! scrollbar, removing it would shift the layout sideways, so the body and a
//! fixed header (if the page has one) are first padded by the scrollbar width
//! and only then is scrolling frozen. Closing undoes both.

/// Page geometry needed for scroll locking, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Full height of the document content.
    pub scroll_height: f64,
    /// Visible height of the document.
    pub client_height: f64,
    /// Window width including any scrollbar.
    pub window_width: f64,
    /// Document width excluding the scrollbar.
    pub client_width: f64,
}

impl Viewport {
    pub fn overflows_vertically(&self) -> bool {
        self.scroll_height > self.client_height
    }

    pub fn scrollbar_width(&self) -> f64 {
        (self.window_width - self.client_width).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_height: 0.0,
            client_height: 0.0,
            window_width: 1280.0,
            client_width: 1280.0,
        }
    }
}

/// Inline style state the lightbox applies to the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStyle {
    pub scroll_locked: bool,
    pub body_padding_right: Option<f64>,
    pub header_padding_right: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    source: Option<String>,
    escape_listener: bool,
    fixed_header: bool,
    style: PageStyle,
}

impl Lightbox {
    /// `fixed_header` says whether the page has a fixed header that needs the
    /// same padding compensation as the body.
    pub fn new(fixed_header: bool) -> Self {
        Self {
            fixed_header,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// URL of the displayed image while open.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    /// Whether the Escape listener is registered.
    pub fn listens_for_escape(&self) -> bool {
        self.escape_listener
    }

    /// Show `url`. An empty URL leaves the overlay untouched.
    ///
    /// Opening while already open swaps the image and keeps the existing
    /// scroll lock.
    pub fn open(&mut self, url: &str, viewport: &Viewport) -> bool {
        if url.is_empty() {
            return false;
        }
        if !self.is_open() {
            if viewport.overflows_vertically() {
                let width = viewport.scrollbar_width();
                self.style.body_padding_right = Some(width);
                if self.fixed_header {
                    self.style.header_padding_right = Some(width);
                }
            }
            self.style.scroll_locked = true;
            self.escape_listener = true;
        }
        self.source = Some(url.to_string());
        true
    }

    /// Hide the overlay and restore the page. Returns `false` if it was closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.style = PageStyle::default();
        self.source = None;
        self.escape_listener = false;
        true
    }

    /// Key press anywhere on the page. Escape closes the overlay.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.escape_listener && matches!(key, "Escape" | "Esc") {
            return self.close();
        }
        false
    }
}

//! Headless view of rendered content.
//!
//! The controller does not hold a browser DOM. Instead it scans the HTML that
//! was injected into the content area and recovers the parts it binds to:
//! carousel containers with their slides, indicators and arrow controls, and
//! every content image together with whether a link wraps it.
//!
//! Elements are recognised by class token, the same way the stylesheet and
//! the translator name them:
//!
//! | Class | Meaning |
//! |-------|---------|
//! | `carousel` | carousel container |
//! | `carousel-slide` | one slide, in document order |
//! | `carousel-dot` | indicator; position from `data-slide` |
//! | `carousel-arrow prev` / `carousel-arrow next` | arrow controls |
//!
//! Content is parsed with html5ever, so markup is read the way a browser
//! reads it. Entities are decoded and commented-out markup stays inert.

mod tree_sink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use serde::Serialize;
use std::rc::Rc;
use tree_sink::{Node, SkeletonSink};

/// Carousels and images found in a content region, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub carousels: Vec<CarouselNode>,
    pub images: Vec<ImageNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarouselNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slides: Vec<SlideNode>,
    pub indicators: Vec<IndicatorNode>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// A slide; `image` is the `src` of its first image, if it has one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An indicator. `position` is `None` when `data-slide` is missing or not a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorNode {
    pub position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub src: String,
    /// An `<a>` element encloses the image.
    pub linked: bool,
    /// Index into [`Document::carousels`] when the image sits inside a carousel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel: Option<usize>,
}

/// Where the walk currently is, relative to the parts it records.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    carousel: Option<usize>,
    slide: Option<(usize, usize)>,
    linked: bool,
}

impl Document {
    /// Scan one content region.
    pub fn scan(html: &str) -> Self {
        let sink = parse_document(SkeletonSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes());
        let mut doc = Document::default();
        doc.visit(&sink.into_document(), Context::default());
        doc
    }

    /// Scan several regions into one document, keeping carousel indices unique.
    pub fn scan_all<'a>(roots: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc = Document::default();
        for root in roots {
            doc.append(Document::scan(root));
        }
        doc
    }

    fn append(&mut self, other: Document) {
        let offset = self.carousels.len();
        self.carousels.extend(other.carousels);
        self.images.extend(other.images.into_iter().map(|mut image| {
            image.carousel = image.carousel.map(|index| index + offset);
            image
        }));
    }

    fn visit(&mut self, node: &Rc<Node>, context: Context) {
        for child in node.children.borrow().iter() {
            let inner = self.record(child, context);
            self.visit(child, inner);
        }
    }

    /// Record what `node` contributes and return the context for its children.
    fn record(&mut self, node: &Node, mut context: Context) -> Context {
        let Some(name) = node.local_name() else {
            return context;
        };
        let class = node.attr("class").unwrap_or_default();
        let has_class = |token: &str| class.split_whitespace().any(|c| c == token);

        if name == "img" {
            if let Some(src) = node.attr("src") {
                if let Some((owner, slide)) = context.slide {
                    let slot = &mut self.carousels[owner].slides[slide].image;
                    if slot.is_none() {
                        *slot = Some(src.clone());
                    }
                }
                self.images.push(ImageNode {
                    src,
                    linked: context.linked,
                    carousel: context.carousel,
                });
            }
        } else if has_class("carousel") {
            self.carousels.push(CarouselNode {
                id: node.attr("id"),
                ..CarouselNode::default()
            });
            context.carousel = Some(self.carousels.len() - 1);
            context.slide = None;
        } else if let Some(index) = context.carousel {
            let carousel = &mut self.carousels[index];
            if has_class("carousel-slide") {
                carousel.slides.push(SlideNode::default());
                context.slide = Some((index, carousel.slides.len() - 1));
            } else if has_class("carousel-dot") {
                carousel.indicators.push(IndicatorNode {
                    position: node.attr("data-slide").and_then(|v| v.trim().parse().ok()),
                });
            } else if has_class("carousel-arrow") {
                carousel.has_prev |= has_class("prev");
                carousel.has_next |= has_class("next");
            }
        }

        if name == "a" {
            context.linked = true;
        }
        context
    }
}

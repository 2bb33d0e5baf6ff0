//! Gallery identity and navigation.
//!
//! Galleries are rendered as plain markup with `data-*` attributes. The render
//! result carries one [`GalleryHandle`] per gallery so the caller can bind
//! navigation to each gallery's element by id after inserting the HTML.
//! [`SlideshowState`] and [`CarouselTrack`] hold the navigation arithmetic.

use std::collections::HashSet;

use rand::RngExt;

use crate::block::GalleryLayout;

/// Fraction of the visible track width a carousel moves per step.
pub const CAROUSEL_SCROLL_FRACTION: f64 = 0.8;

/// How gallery element ids are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GalleryIds {
    /// `gallery-1`, `gallery-2`, ... restarting on every render.
    ///
    /// Output is byte-identical across renders of the same input.
    #[default]
    Sequential,
    /// `gallery-<random hex>`.
    ///
    /// For pages that insert several independently rendered documents into
    /// one page, where sequential ids would collide.
    Random,
}

/// Hands out gallery ids unique within one render.
#[derive(Debug)]
pub(crate) struct GalleryIdGenerator {
    mode: GalleryIds,
    issued: HashSet<String>,
}

impl GalleryIdGenerator {
    pub(crate) fn new(mode: GalleryIds) -> Self {
        Self {
            mode,
            issued: HashSet::new(),
        }
    }

    pub(crate) fn next_id(&mut self) -> String {
        loop {
            let id = match self.mode {
                GalleryIds::Sequential => format!("gallery-{}", self.issued.len() + 1),
                GalleryIds::Random => format!("gallery-{:08x}", rand::rng().random::<u32>()),
            };
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// A rendered gallery, for binding navigation after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryHandle {
    /// Element id of the gallery root.
    pub id: String,
    /// Layout the gallery was rendered with.
    pub layout: GalleryLayout,
    /// Number of rendered items.
    pub len: usize,
}

impl GalleryHandle {
    /// Initial slideshow state, for slideshow galleries.
    #[must_use]
    pub fn slideshow(&self) -> Option<SlideshowState> {
        (self.layout == GalleryLayout::Slideshow).then(|| SlideshowState::new(self.len))
    }
}

/// Navigation direction of a gallery control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first item.
    Previous,
    /// Towards the last item.
    Next,
}

impl Direction {
    /// Parse the `data-action` attribute of a navigation control.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "prev" => Some(Self::Previous),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    /// Value of the `data-action` attribute.
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            Self::Previous => "prev",
            Self::Next => "next",
        }
    }
}

/// Current slide of one slideshow.
///
/// Moving before the first slide shows the last one and moving past the last
/// slide shows the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowState {
    len: usize,
    current: usize,
}

impl SlideshowState {
    /// State showing the first of `len` slides.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Index of the visible slide.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the slideshow has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Show slide `index`, wrapping out-of-range indices. Returns the new index.
    pub fn go_to(&mut self, index: isize) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.current = match usize::try_from(index) {
            Err(_) => self.len - 1,
            Ok(index) if index >= self.len => 0,
            Ok(index) => index,
        };
        self.current
    }

    /// Move one slide in `direction`. Returns the new index.
    pub fn step(&mut self, direction: Direction) -> usize {
        let current = isize::try_from(self.current).unwrap_or(isize::MAX);
        match direction {
            Direction::Previous => self.go_to(current - 1),
            Direction::Next => self.go_to(current.saturating_add(1)),
        }
    }
}

/// Scroll arithmetic of one carousel track.
///
/// Carousels keep no current index; each step scrolls by a fixed share of the
/// visible width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselTrack {
    visible_width: f64,
}

impl CarouselTrack {
    /// Track whose visible area is `visible_width` pixels wide.
    #[must_use]
    pub fn new(visible_width: f64) -> Self {
        Self { visible_width }
    }

    /// Horizontal scroll offset for one step in `direction`.
    #[must_use]
    pub fn scroll_by(&self, direction: Direction) -> f64 {
        let step = self.visible_width * CAROUSEL_SCROLL_FRACTION;
        match direction {
            Direction::Previous => -step,
            Direction::Next => step,
        }
    }
}

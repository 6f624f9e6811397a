//! Scroll-spy: which section is currently being read.

use super::registry::SectionRegistry;
use super::viewport::Viewport;

/// Result of sampling the viewport once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    /// Scroll offset is past the chrome threshold.
    pub is_scrolled: bool,
    /// Registry index of the first section straddling the detection line.
    pub matched: Option<usize>,
}

/// Stateless scroll sampler.
///
/// A section matches when its element's top is at or above the detection line
/// and its bottom at or below it. Unmounted anchors never match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    pub scroll_threshold: f32,
    pub detection_offset: f32,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            detection_offset: 100.0,
        }
    }
}

impl ScrollTracker {
    pub fn new(scroll_threshold: f32, detection_offset: f32) -> Self {
        Self {
            scroll_threshold,
            detection_offset,
        }
    }

    pub fn sample<V: Viewport + ?Sized>(&self, registry: &SectionRegistry, viewport: &V) -> ScrollSample {
        ScrollSample {
            is_scrolled: viewport.scroll_y() > self.scroll_threshold,
            matched: self.first_match(registry, viewport),
        }
    }

    /// First section in registry order whose element straddles the detection line.
    pub fn first_match<V: Viewport + ?Sized>(&self, registry: &SectionRegistry, viewport: &V) -> Option<usize> {
        registry.iter().position(|section| {
            viewport
                .element_rect(&section.anchor)
                .is_some_and(|rect| rect.straddles(self.detection_offset))
        })
    }
}

//! The scroll/viewport seam and a laid-out page that implements it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Vertical extent of an element relative to the viewport top, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub bottom: f32,
}

impl ElementRect {
    /// Whether the horizontal line `y` px below the viewport top crosses this element.
    pub fn straddles(&self, y: f32) -> bool {
        self.top <= y && self.bottom >= y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Identifies a registered scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// What the navigation layer needs from the host document.
pub trait Viewport {
    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> f32;

    /// Bounding box of the element matching `anchor`, or `None` if it is not mounted.
    fn element_rect(&self, anchor: &str) -> Option<ElementRect>;

    /// Ask the host to bring `anchor` to the viewport top.
    ///
    /// Fire-and-forget: `true` only means the request was issued.
    fn scroll_into_view(&mut self, anchor: &str, behavior: ScrollBehavior) -> bool;

    fn add_scroll_listener(&mut self) -> ListenerId;

    fn remove_scroll_listener(&mut self, id: ListenerId);

    fn apply_theme(&mut self, theme: Theme);

    fn open_url(&mut self, url: &str);
}

/// A block placed on a [`StaticPage`], positioned in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock {
    pub anchor: String,
    pub offset: f32,
    pub height: f32,
}

#[derive(Debug, Default)]
struct PageState {
    blocks: Vec<PageBlock>,
    scroll_y: f32,
    next_listener: u64,
    listeners: BTreeSet<ListenerId>,
    scroll_requests: Vec<(String, ScrollBehavior)>,
    theme: Option<Theme>,
    opened: Vec<String>,
}

/// An in-memory document of stacked blocks with a scroll position.
///
/// Cloning shares the document, so a host can keep a handle while the
/// navigation controller owns another.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    inner: Rc<RefCell<PageState>>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack blocks top to bottom with the given heights.
    pub fn stacked(blocks: &[(&str, f32)]) -> Self {
        let page = Self::new();
        let mut offset = 0.0;
        for &(anchor, height) in blocks {
            page.mount(anchor, offset, height);
            offset += height;
        }
        page
    }

    /// Place (or move) a block.
    pub fn mount(&self, anchor: &str, offset: f32, height: f32) {
        let mut state = self.inner.borrow_mut();
        state.blocks.retain(|b| b.anchor != anchor);
        state.blocks.push(PageBlock {
            anchor: anchor.to_string(),
            offset,
            height,
        });
    }

    pub fn unmount(&self, anchor: &str) {
        self.inner.borrow_mut().blocks.retain(|b| b.anchor != anchor);
    }

    pub fn set_scroll(&self, y: f32) {
        self.inner.borrow_mut().scroll_y = y.max(0.0);
    }

    /// Jump to the most recent scroll request, as if the smooth scroll finished.
    pub fn finish_scroll(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        let Some((anchor, _)) = state.scroll_requests.last().cloned() else {
            return false;
        };
        match state.blocks.iter().find(|b| b.anchor == anchor).map(|b| b.offset) {
            Some(offset) => {
                state.scroll_y = offset;
                true
            }
            None => false,
        }
    }

    pub fn scroll_requests(&self) -> Vec<(String, ScrollBehavior)> {
        self.inner.borrow().scroll_requests.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.inner.borrow().theme
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.inner.borrow().opened.clone()
    }
}

impl Viewport for StaticPage {
    fn scroll_y(&self) -> f32 {
        self.inner.borrow().scroll_y
    }

    fn element_rect(&self, anchor: &str) -> Option<ElementRect> {
        let state = self.inner.borrow();
        state.blocks.iter().find(|b| b.anchor == anchor).map(|b| {
            let top = b.offset - state.scroll_y;
            ElementRect {
                top,
                bottom: top + b.height,
            }
        })
    }

    fn scroll_into_view(&mut self, anchor: &str, behavior: ScrollBehavior) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.blocks.iter().any(|b| b.anchor == anchor) {
            return false;
        }
        state.scroll_requests.push((anchor.to_string(), behavior));
        true
    }

    fn add_scroll_listener(&mut self) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        state.next_listener += 1;
        let id = ListenerId(state.next_listener);
        state.listeners.insert(id);
        id
    }

    fn remove_scroll_listener(&mut self, id: ListenerId) {
        self.inner.borrow_mut().listeners.remove(&id);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.inner.borrow_mut().theme = Some(theme);
    }

    fn open_url(&mut self, url: &str) {
        self.inner.borrow_mut().opened.push(url.to_string());
    }
}

//! Sticky navigation bar state.

use super::registry::{Section, SectionRegistry};
use super::tracker::ScrollTracker;
use super::viewport::{ListenerId, ScrollBehavior, Theme, Viewport};
use crate::config::NavigationConfig;

/// Observable navigation state.
///
/// The active section is stored as a registry index, so it can only ever name
/// a section that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub active: Option<usize>,
    pub is_scrolled: bool,
    pub is_mobile_menu_open: bool,
    pub theme: Theme,
}

/// Owns the scroll listener for as long as it is mounted.
///
/// Dropping the controller removes the listener, whatever state it is in.
pub struct NavigationController<V: Viewport> {
    registry: SectionRegistry,
    tracker: ScrollTracker,
    viewport: V,
    listener: Option<ListenerId>,
    state: NavigationState,
    resume_url: String,
}

impl<V: Viewport> NavigationController<V> {
    /// Subscribe to scroll events and take an initial sample.
    pub fn mount(registry: SectionRegistry, tracker: ScrollTracker, mut viewport: V) -> Self {
        let listener = viewport.add_scroll_listener();
        let state = NavigationState::default();
        viewport.apply_theme(state.theme);

        let mut controller = Self {
            registry,
            tracker,
            viewport,
            listener: Some(listener),
            state,
            resume_url: NavigationConfig::default().resume_url,
        };
        controller.on_scroll();
        log::info!("Navigation mounted with {} sections", controller.registry.len());
        controller
    }

    /// Mount using thresholds, sections and resume link from configuration.
    pub fn from_config(
        config: &NavigationConfig,
        viewport: V,
    ) -> Result<Self, super::registry::RegistryError> {
        let registry = SectionRegistry::new(config.sections.clone())?;
        let tracker = ScrollTracker::new(config.scroll_threshold, config.detection_offset);
        let mut controller = Self::mount(registry, tracker, viewport);
        controller.resume_url = config.resume_url.clone();
        Ok(controller)
    }

    /// Recompute state from the current document. Call on every scroll event.
    ///
    /// When no section straddles the detection line the previous one stays active.
    pub fn on_scroll(&mut self) -> NavigationState {
        let sample = self.tracker.sample(&self.registry, &self.viewport);
        self.state.is_scrolled = sample.is_scrolled;

        if let Some(index) = sample.matched {
            if self.state.active != Some(index) {
                log::debug!("Active section -> {}", self.registry.sections()[index].id);
            }
            self.state.active = Some(index);
        }
        self.state
    }

    /// Smooth-scroll to a section and close the mobile menu.
    ///
    /// Unknown ids and unmounted anchors are logged and ignored.
    pub fn navigate_to(&mut self, section_id: &str) -> bool {
        let Some(section) = self.registry.find(section_id) else {
            log::warn!("Ignoring navigation to unknown section {:?}", section_id);
            return false;
        };

        if !self.viewport.scroll_into_view(&section.anchor, ScrollBehavior::Smooth) {
            log::warn!("Section {:?} has no mounted anchor {:?}", section.id, section.anchor);
            return false;
        }

        self.state.is_mobile_menu_open = false;
        true
    }

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.state.is_mobile_menu_open = !self.state.is_mobile_menu_open;
        self.state.is_mobile_menu_open
    }

    /// Backdrop tap or close button.
    pub fn close_mobile_menu(&mut self) {
        self.state.is_mobile_menu_open = false;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.viewport.apply_theme(self.state.theme);
        self.state.theme
    }

    pub fn open_resume(&mut self) {
        self.viewport.open_url(&self.resume_url);
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.state.active.and_then(|i| self.registry.get(i))
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.active_section().map(|s| s.id.as_str())
    }

    pub fn is_active(&self, section_id: &str) -> bool {
        self.active_section_id() == Some(section_id)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Remove the scroll listener. Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        if let Some(id) = self.listener.take() {
            self.viewport.remove_scroll_listener(id);
            log::info!("Navigation unmounted");
        }
    }
}

impl<V: Viewport> Drop for NavigationController<V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::viewport::StaticPage;

    fn mounted() -> (NavigationController<StaticPage>, StaticPage) {
        let page = StaticPage::stacked(&[("#about", 600.0), ("#projects", 600.0)]);
        let registry = SectionRegistry::new(vec![
            Section::new("about", "About", "#about"),
            Section::new("projects", "Projects", "#projects"),
        ])
        .unwrap();
        let nav = NavigationController::mount(registry, ScrollTracker::default(), page.clone());
        (nav, page)
    }

    #[test]
    fn test_mount_samples_immediately() {
        let (nav, page) = mounted();
        assert_eq!(nav.active_section_id(), Some("about"));
        assert!(!nav.state().is_scrolled);
        assert_eq!(page.listener_count(), 1);
        assert_eq!(page.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_menu_toggle_is_independent_of_scroll() {
        let (mut nav, page) = mounted();
        assert!(nav.toggle_mobile_menu());
        page.set_scroll(700.0);
        nav.on_scroll();
        assert!(nav.state().is_mobile_menu_open);
        assert!(!nav.toggle_mobile_menu());
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let (mut nav, page) = mounted();
        nav.unmount();
        nav.unmount();
        assert!(!nav.is_mounted());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_theme_toggle_applies_to_document() {
        let (mut nav, page) = mounted();
        assert_eq!(nav.toggle_theme(), Theme::Light);
        assert_eq!(page.theme(), Some(Theme::Light));
        assert_eq!(nav.toggle_theme(), Theme::Dark);
    }
}

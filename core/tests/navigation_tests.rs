//! Integration tests for scroll-synchronised navigation.

use folio::navigation::{
    NavigationController, ScrollBehavior, ScrollTracker, Section, SectionRegistry, StaticPage,
};
use folio::{NavigationConfig, SiteConfig};

/// The published page: hero, about, skills, projects, achievements, contact.
fn portfolio_page() -> StaticPage {
    StaticPage::stacked(&[
        ("#hero", 900.0),
        ("#about", 700.0),
        ("#skills", 800.0),
        ("#projects", 1200.0),
        ("#achievements", 600.0),
        ("#contact", 700.0),
    ])
}

fn mount(page: &StaticPage) -> NavigationController<StaticPage> {
    NavigationController::mount(SectionRegistry::portfolio(), ScrollTracker::default(), page.clone())
}

// ==================== Scroll Spy ====================

#[test]
fn test_active_section_always_in_registry() {
    let page = portfolio_page();
    let mut nav = mount(&page);

    for y in (0..5000).step_by(37) {
        page.set_scroll(y as f32);
        let state = nav.on_scroll();
        if let Some(index) = state.active {
            assert!(index < nav.registry().len());
        }
        if let Some(id) = nav.active_section_id() {
            assert!(nav.registry().find(id).is_some(), "stale id {id} at y={y}");
        }
    }
}

#[test]
fn test_recompute_is_idempotent() {
    let page = portfolio_page();
    let mut nav = mount(&page);

    for y in [0.0, 850.0, 1700.0, 2500.0, 4100.0] {
        page.set_scroll(y);
        let first = nav.on_scroll();
        let second = nav.on_scroll();
        assert_eq!(first, second, "differs at y={y}");
    }
}

#[test]
fn test_overlapping_sections_resolve_in_registry_order() {
    // Two blocks stacked on top of each other: both straddle the detection line
    let page = StaticPage::new();
    page.mount("#a", 0.0, 500.0);
    page.mount("#b", 50.0, 500.0);

    let registry = SectionRegistry::new(vec![
        Section::new("about", "About", "#a"),
        Section::new("projects", "Projects", "#b"),
    ])
    .unwrap();

    let mut nav = NavigationController::mount(registry, ScrollTracker::default(), page.clone());
    page.set_scroll(20.0);
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("about"));
}

#[test]
fn test_gap_keeps_previous_section() {
    let page = portfolio_page();
    let mut nav = mount(&page);

    page.set_scroll(950.0);
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("about"));

    page.set_scroll(2500.0);
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("projects"));

    // achievements is not a nav item, so nothing matches here
    page.set_scroll(3700.0);
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("projects"));
}

#[test]
fn test_nothing_active_until_first_match() {
    let page = portfolio_page();
    let nav = mount(&page);
    assert_eq!(nav.active_section_id(), None);
    assert_eq!(nav.state().active, None);
}

#[test]
fn test_scrolled_flag_tracks_threshold() {
    let page = portfolio_page();
    let mut nav = mount(&page);
    assert!(!nav.state().is_scrolled);

    page.set_scroll(51.0);
    assert!(nav.on_scroll().is_scrolled);

    page.set_scroll(0.0);
    assert!(!nav.on_scroll().is_scrolled);
}

#[test]
fn test_missing_anchor_degrades_gracefully() {
    let page = portfolio_page();
    let mut nav = mount(&page);

    page.set_scroll(950.0);
    nav.on_scroll();
    page.unmount("#about");
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("about"));
}

// ==================== Navigation ====================

#[test]
fn test_navigate_issues_smooth_scroll_and_closes_menu() {
    let page = portfolio_page();
    let mut nav = mount(&page);
    nav.toggle_mobile_menu();

    assert!(nav.navigate_to("projects"));
    assert!(!nav.state().is_mobile_menu_open);
    assert_eq!(
        page.scroll_requests(),
        vec![("#projects".to_string(), ScrollBehavior::Smooth)]
    );

    page.finish_scroll();
    nav.on_scroll();
    assert_eq!(nav.active_section_id(), Some("projects"));
}

#[test]
fn test_navigate_to_unknown_is_noop() {
    let page = portfolio_page();
    let mut nav = mount(&page);
    nav.toggle_mobile_menu();
    let before = nav.state();

    assert!(!nav.navigate_to("unknown-id"));
    assert_eq!(nav.state(), before);
    assert!(page.scroll_requests().is_empty());
}

#[test]
fn test_navigate_to_unmounted_section_keeps_menu_open() {
    let page = portfolio_page();
    page.unmount("#contact");
    let mut nav = mount(&page);
    nav.toggle_mobile_menu();

    assert!(!nav.navigate_to("contact"));
    assert!(nav.state().is_mobile_menu_open);
}

#[test]
fn test_backdrop_closes_menu() {
    let page = portfolio_page();
    let mut nav = mount(&page);
    nav.toggle_mobile_menu();
    nav.close_mobile_menu();
    nav.close_mobile_menu();
    assert!(!nav.state().is_mobile_menu_open);
}

// ==================== Lifecycle & Config ====================

#[test]
fn test_drop_removes_scroll_listener() {
    let page = portfolio_page();
    {
        let _nav = mount(&page);
        assert_eq!(page.listener_count(), 1);
    }
    assert_eq!(page.listener_count(), 0);
}

#[test]
fn test_from_config_uses_custom_band_and_resume_link() {
    let config = SiteConfig::from_json_str(
        r##"{"navigation": {
            "detection_offset": 10,
            "resume_url": "/cv.pdf",
            "sections": [
                {"id": "hero", "label": "Home", "anchor": "#hero"},
                {"id": "about", "label": "About", "anchor": "#about"}
            ]
        }}"##,
    )
    .unwrap();

    let page = portfolio_page();
    page.set_scroll(895.0);
    let mut nav = NavigationController::from_config(&config.navigation, page.clone()).unwrap();
    assert_eq!(nav.active_section_id(), Some("about"));

    nav.open_resume();
    assert_eq!(page.opened_urls(), vec!["/cv.pdf".to_string()]);
}

#[test]
fn test_default_config_matches_portfolio_registry() {
    let config = NavigationConfig::default();
    assert_eq!(config.sections, SectionRegistry::portfolio().sections());
    assert_eq!(config.resume_url, "/resume.pdf");
}

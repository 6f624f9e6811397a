//! Example: drive the navigation bar and music player without a browser.
//!
//! Scrolls through a laid-out page, clicks a nav item, then plays the track
//! and prints the visualiser bars for a few frames.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example headless_tour -- [config.json] [track]

use std::path::Path;

use anyhow::Context;
use folio::audio::{generate_chord, load_track, TrackData, TrackOutput};
use folio::navigation::{NavigationController, StaticPage};
use folio::{PlayerController, SiteConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SiteConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => SiteConfig::default(),
    };

    // ---- Navigation ----
    let page = StaticPage::stacked(&[
        ("#hero", 900.0),
        ("#about", 700.0),
        ("#skills", 800.0),
        ("#projects", 1200.0),
        ("#achievements", 600.0),
        ("#contact", 700.0),
    ]);
    let mut nav = NavigationController::from_config(&config.navigation, page.clone())?;

    println!("Scrolling...");
    for y in (0..=4800).step_by(400) {
        page.set_scroll(y as f32);
        let state = nav.on_scroll();
        println!(
            "  y={:>4}  scrolled={:<5}  active={}",
            y,
            state.is_scrolled,
            nav.active_section_id().unwrap_or("-")
        );
    }

    nav.toggle_mobile_menu();
    nav.navigate_to("skills");
    page.finish_scroll();
    nav.on_scroll();
    println!(
        "Clicked Skills -> active={} menu_open={}\n",
        nav.active_section_id().unwrap_or("-"),
        nav.state().is_mobile_menu_open
    );

    // ---- Music player ----
    let track = match args.next() {
        Some(path) => load_track(Path::new(&path)).with_context(|| format!("decoding {path}"))?,
        None => TrackData::from_mono(generate_chord(&[344.5, 689.0, 1378.0], 44100, 3.0, 0.8), 44100),
    };
    let output = TrackOutput::new(track);
    let mut player = PlayerController::new(output.clone(), &config.player)?;

    if let Err(err) = player.toggle_playback_blocking() {
        println!("First click rejected: {err}");
    }
    output.grant_user_gesture();
    player.toggle_playback_blocking()?;
    println!("{}", player.status_line());

    for _ in 0..6 {
        output.advance(1.0 / 60.0);
        player.tick();
        let bars: Vec<String> = player.bar_heights().iter().map(|h| format!("{h:>4.1}")).collect();
        println!("  [{}]", bars.join(" "));
    }

    player.toggle_mute();
    println!("{}", player.status_line());
    player.toggle_playback_blocking()?;
    println!("{}  pending frames: {}", player.status_line(), player.pending_frames());

    Ok(())
}

//! Scroll-synchronised navigation.
//!
//! - [`SectionRegistry`]: the ordered, immutable list of navigable sections
//! - [`ScrollTracker`]: samples the viewport and finds the section under the detection line
//! - [`NavigationController`]: active section, smooth-scroll navigation, mobile menu and theme
//! - [`Viewport`]: the host document seam, with [`StaticPage`] as an in-memory implementation

pub mod controller;
pub mod registry;
pub mod tracker;
pub mod viewport;

pub use controller::{NavigationController, NavigationState};
pub use registry::{RegistryError, Section, SectionRegistry};
pub use tracker::{ScrollSample, ScrollTracker};
pub use viewport::{ElementRect, ListenerId, PageBlock, ScrollBehavior, StaticPage, Theme, Viewport};

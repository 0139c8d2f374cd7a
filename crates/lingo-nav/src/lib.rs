//! Reader navigation for Lingo.
//!
//! - [`Navigator`]: selected language and entry, collapsed categories and the
//!   scroll effects a selection produces.
//! - [`ScrollTracker`]: scroll progress and the active section, fed by a
//!   [`VisibilityObserver`].
//! - [`SearchPanel`]: the keyboard-driven search overlay.
//!
//! Everything here is single-threaded; the host forwards scroll and key
//! events and performs the returned [`ScrollEffect`]s.

mod controller;
mod observer;
mod search_panel;
mod tracker;

pub use controller::{
    DEFAULT_SCROLL_DELAY, NavigationState, Navigator, NavigatorOptions, ScrollEffect, TocItem,
};
#[cfg(any(test, feature = "mock"))]
pub use observer::ScriptedObserver;
pub use observer::{
    AnchorBox, GeometryObserver, IntersectionEntry, ObserverOptions, RootMargin,
    VisibilityObserver,
};
pub use search_panel::{Key, KeyPress, PanelAction, SearchPanel};
pub use tracker::{ScrollMetrics, ScrollTracker};

//! Visibility observation of section anchors.
//!
//! [`VisibilityObserver`] is the seam to the host's intersection detection.
//! [`GeometryObserver`] computes intersections from known section boxes;
//! [`ScriptedObserver`] (feature `mock`) replays hand-written batches.

use std::collections::HashMap;

use crate::tracker::ScrollMetrics;

/// Margins that shrink the observed viewport, as fractions of its height.
///
/// The default is asymmetric: a section becomes visible slightly below the
/// top edge and stops counting well before it leaves through the bottom, so
/// the "active" section is biased toward the top of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: 0.1,
            bottom: 0.7,
        }
    }
}

/// Options passed to [`VisibilityObserver::observe`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Vertical band of the container (content coordinates) that counts as visible.
    #[must_use]
    pub fn visible_band(&self, metrics: &ScrollMetrics) -> (f64, f64) {
        let height = metrics.client_height;
        let start = metrics.scroll_top + height * self.root_margin.top;
        let end = metrics.scroll_top + height * (1.0 - self.root_margin.bottom);
        (start, end)
    }
}

/// Intersection state of one observed anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Section id of the anchor.
    pub target: String,
    pub is_intersecting: bool,
    /// Offset of the anchor's top edge from the container's top edge.
    pub top: f64,
}

impl IntersectionEntry {
    #[must_use]
    pub fn new(target: impl Into<String>, is_intersecting: bool, top: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            top,
        }
    }
}

/// Source of intersection changes for a set of anchors.
pub trait VisibilityObserver {
    /// Start observing `targets`.
    fn observe(&mut self, targets: &[String], options: &ObserverOptions);

    /// Stop observing `targets`.
    fn unobserve(&mut self, targets: &[String]);

    /// Intersection records since the previous call.
    ///
    /// Contains an entry for every target whose intersection state changed
    /// and for every target currently intersecting, with its current offset.
    fn take_records(&mut self, metrics: &ScrollMetrics) -> Vec<IntersectionEntry>;
}

/// Vertical extent of a section anchor in content coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl AnchorBox {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Observer that derives intersections from a known layout.
#[derive(Debug, Default)]
pub struct GeometryObserver {
    layout: HashMap<String, AnchorBox>,
    observed: Vec<String>,
    options: ObserverOptions,
    last_state: HashMap<String, bool>,
}

impl GeometryObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known section boxes (e.g. after the new entry mounted).
    pub fn set_layout(&mut self, boxes: impl IntoIterator<Item = AnchorBox>) {
        self.layout = boxes.into_iter().map(|b| (b.id.clone(), b)).collect();
    }

    /// Targets currently being observed.
    #[must_use]
    pub fn observed(&self) -> &[String] {
        &self.observed
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, targets: &[String], options: &ObserverOptions) {
        self.options = *options;
        for target in targets {
            if !self.observed.contains(target) {
                self.observed.push(target.clone());
            }
        }
    }

    fn unobserve(&mut self, targets: &[String]) {
        self.observed.retain(|t| !targets.contains(t));
        for target in targets {
            self.last_state.remove(target);
        }
    }

    fn take_records(&mut self, metrics: &ScrollMetrics) -> Vec<IntersectionEntry> {
        let (band_start, band_end) = self.options.visible_band(metrics);
        let mut records = Vec::new();

        for target in &self.observed {
            // Anchors without layout have not mounted yet.
            let Some(anchor) = self.layout.get(target) else {
                continue;
            };
            let bottom = anchor.top + anchor.height;
            let intersecting = anchor.top < band_end && bottom > band_start;
            let changed = self.last_state.insert(target.clone(), intersecting) != Some(intersecting);

            if intersecting || changed {
                records.push(IntersectionEntry {
                    target: target.clone(),
                    is_intersecting: intersecting,
                    top: anchor.top - metrics.scroll_top,
                });
            }
        }
        records
    }
}

/// Observer that replays scripted record batches.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct ScriptedObserver {
    observed: Vec<String>,
    batches: std::collections::VecDeque<Vec<IntersectionEntry>>,
    observe_calls: usize,
}

#[cfg(any(test, feature = "mock"))]
impl ScriptedObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch to be returned by the next `take_records` call.
    pub fn push_batch(&mut self, batch: Vec<IntersectionEntry>) {
        self.batches.push_back(batch);
    }

    /// Targets currently being observed.
    #[must_use]
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Number of `observe` calls so far.
    #[must_use]
    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }
}

#[cfg(any(test, feature = "mock"))]
impl VisibilityObserver for ScriptedObserver {
    fn observe(&mut self, targets: &[String], _options: &ObserverOptions) {
        self.observe_calls += 1;
        self.observed.extend(targets.iter().cloned());
    }

    fn unobserve(&mut self, targets: &[String]) {
        self.observed.retain(|t| !targets.contains(t));
    }

    fn take_records(&mut self, _metrics: &ScrollMetrics) -> Vec<IntersectionEntry> {
        self.batches.pop_front().unwrap_or_default()
    }
}

//! Scroll progress and active-section tracking.

use std::collections::HashMap;

use crate::observer::{IntersectionEntry, ObserverOptions, VisibilityObserver};

/// Scroll position of the content container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Scroll progress as a percentage in `[0, 100]`.
    ///
    /// Content that fits in the viewport has progress 0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_top * 100.0 / scrollable).clamp(0.0, 100.0)
    }
}

/// Tracks which section anchor is active and how far the reader has scrolled.
#[derive(Debug)]
pub struct ScrollTracker<O> {
    observer: O,
    options: ObserverOptions,
    anchors: Vec<String>,
    /// Top offsets of anchors currently intersecting the visible band.
    visible: HashMap<String, f64>,
    active: Option<String>,
    progress: f64,
}

impl<O: VisibilityObserver> ScrollTracker<O> {
    #[must_use]
    pub fn new(observer: O, options: ObserverOptions) -> Self {
        Self {
            observer,
            options,
            anchors: Vec::new(),
            visible: HashMap::new(),
            active: None,
            progress: 0.0,
        }
    }

    /// Swap the observed anchors for a new entry's section ids.
    ///
    /// Clears the active section and progress so nothing carries over from
    /// the previous entry.
    pub fn resubscribe(&mut self, anchor_ids: Vec<String>) {
        self.observer.unobserve(&self.anchors);
        self.anchors = anchor_ids;
        self.reset();
        self.observer.observe(&self.anchors, &self.options);
        tracing::trace!(anchors = self.anchors.len(), "resubscribed scroll tracker");
    }

    /// Clear the active section and progress.
    pub fn reset(&mut self) {
        self.visible.clear();
        self.active = None;
        self.progress = 0.0;
    }

    /// Handle a scroll event: update progress and drain observer records.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) {
        self.progress = metrics.progress();
        let records = self.observer.take_records(metrics);
        self.apply_records(&records);
    }

    /// Fold intersection records into the active section.
    ///
    /// The intersecting anchor nearest the top wins. With nothing
    /// intersecting the previous active section is kept.
    pub fn apply_records(&mut self, records: &[IntersectionEntry]) {
        for record in records {
            if !self.anchors.contains(&record.target) {
                continue;
            }
            if record.is_intersecting {
                self.visible.insert(record.target.clone(), record.top);
            } else {
                self.visible.remove(&record.target);
            }
        }

        let mut best: Option<(&String, f64)> = None;
        for anchor in &self.anchors {
            if let Some(&top) = self.visible.get(anchor)
                && best.is_none_or(|(_, best_top)| top < best_top)
            {
                best = Some((anchor, top));
            }
        }
        if let Some((anchor, _)) = best
            && self.active.as_ref() != Some(anchor)
        {
            tracing::trace!(section = %anchor, "active section changed");
            self.active = Some(anchor.clone());
        }
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    #[must_use]
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{AnchorBox, GeometryObserver, ScriptedObserver};
    use pretty_assertions::assert_eq;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_progress_zero_when_content_fits() {
        assert_eq!(ScrollMetrics::new(0.0, 500.0, 600.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(40.0, 600.0, 600.0).progress(), 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(ScrollMetrics::new(0.0, 1600.0, 600.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(500.0, 1600.0, 600.0).progress(), 50.0);
        assert_eq!(ScrollMetrics::new(1000.0, 1600.0, 600.0).progress(), 100.0);
        // Overscroll bounce.
        assert_eq!(ScrollMetrics::new(1100.0, 1600.0, 600.0).progress(), 100.0);
        assert_eq!(ScrollMetrics::new(-30.0, 1600.0, 600.0).progress(), 0.0);
    }

    #[test]
    fn test_progress_approaches_hundred() {
        let near_end = ScrollMetrics::new(999.0, 1600.0, 600.0).progress();
        assert!(near_end > 99.0 && near_end < 100.0);
    }

    #[test]
    fn test_smallest_top_wins() {
        let mut tracker = ScrollTracker::new(ScriptedObserver::new(), ObserverOptions::default());
        tracker.resubscribe(ids(&["a", "b", "c"]));

        tracker.apply_records(&[
            IntersectionEntry::new("b", true, 40.0),
            IntersectionEntry::new("c", true, 300.0),
        ]);
        assert_eq!(tracker.active_section(), Some("b"));

        tracker.apply_records(&[IntersectionEntry::new("a", true, -20.0)]);
        assert_eq!(tracker.active_section(), Some("a"));

        tracker.apply_records(&[IntersectionEntry::new("a", false, -400.0)]);
        assert_eq!(tracker.active_section(), Some("b"));
    }

    #[test]
    fn test_active_kept_when_nothing_intersects() {
        let mut tracker = ScrollTracker::new(ScriptedObserver::new(), ObserverOptions::default());
        tracker.resubscribe(ids(&["a", "b"]));
        tracker.apply_records(&[IntersectionEntry::new("a", true, 10.0)]);
        tracker.apply_records(&[IntersectionEntry::new("a", false, -900.0)]);
        assert_eq!(tracker.active_section(), Some("a"));
    }

    #[test]
    fn test_foreign_records_ignored() {
        let mut tracker = ScrollTracker::new(ScriptedObserver::new(), ObserverOptions::default());
        tracker.resubscribe(ids(&["a"]));
        tracker.apply_records(&[IntersectionEntry::new("stale", true, -50.0)]);
        assert_eq!(tracker.active_section(), None);
    }

    #[test]
    fn test_resubscribe_clears_state() {
        let mut tracker = ScrollTracker::new(ScriptedObserver::new(), ObserverOptions::default());
        tracker.resubscribe(ids(&["a", "b"]));
        tracker
            .observer_mut()
            .push_batch(vec![IntersectionEntry::new("b", true, 5.0)]);
        tracker.on_scroll(&ScrollMetrics::new(300.0, 1600.0, 600.0));
        assert_eq!(tracker.active_section(), Some("b"));
        assert_eq!(tracker.progress(), 30.0);

        tracker.resubscribe(ids(&["x", "y"]));
        assert_eq!(tracker.active_section(), None);
        assert_eq!(tracker.progress(), 0.0);
        assert_eq!(tracker.observer().observed(), ids(&["x", "y"]).as_slice());
        assert_eq!(tracker.observer().observe_calls(), 2);
    }

    #[test]
    fn test_geometry_driven_scroll() {
        let mut observer = GeometryObserver::new();
        observer.set_layout([
            AnchorBox::new("your-first-program", 0.0, 800.0),
            AnchorBox::new("using-the-namespace", 800.0, 800.0),
        ]);
        let mut tracker = ScrollTracker::new(observer, ObserverOptions::default());
        tracker.resubscribe(ids(&["your-first-program", "using-the-namespace"]));

        tracker.on_scroll(&ScrollMetrics::new(0.0, 1600.0, 600.0));
        assert_eq!(tracker.active_section(), Some("your-first-program"));

        // Both intersect; the first is still nearer the top.
        tracker.on_scroll(&ScrollMetrics::new(700.0, 1600.0, 600.0));
        assert_eq!(tracker.active_section(), Some("your-first-program"));

        tracker.on_scroll(&ScrollMetrics::new(750.0, 1600.0, 600.0));
        assert_eq!(tracker.active_section(), Some("using-the-namespace"));
        assert_eq!(tracker.progress(), 75.0);

        tracker.on_scroll(&ScrollMetrics::new(100.0, 1600.0, 600.0));
        assert_eq!(tracker.active_section(), Some("your-first-program"));
    }
}

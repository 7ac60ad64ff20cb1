//! Scroll spy: which navigation link is highlighted for a scroll position.

use std::time::{Duration, Instant};

/// A section becomes active once the viewport is this close to its top.
pub const ACTIVATION_OFFSET: f64 = 200.0;

/// Quiet period before a burst of scroll events is evaluated.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(80);

/// A page section and its vertical offset from the document top.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// The last section (in document order) whose top, less the activation
/// offset, has been scrolled past.
#[must_use]
pub fn active_section(scroll_y: f64, sections: &[Section]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| scroll_y >= section.top - ACTIVATION_OFFSET)
        .map(|section| section.id.as_str())
}

/// Pair each `#fragment` link with whether it points at `active`.
#[must_use]
pub fn nav_states<'a>(links: &'a [String], active: Option<&str>) -> Vec<(&'a str, bool)> {
    links
        .iter()
        .map(|href| {
            let target = href.strip_prefix('#').unwrap_or(href);
            (href.as_str(), active.is_some_and(|id| id == target))
        })
        .collect()
}

/// Debounced scroll tracking.
///
/// Feed every scroll event to [`on_scroll`](Self::on_scroll) and call
/// [`poll`](Self::poll) from the host's timer; the active section is only
/// recomputed once events stop arriving for [`SCROLL_DEBOUNCE`].
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    active: Option<String>,
    pending: Option<(f64, Instant)>,
}

impl ScrollSpy {
    /// Start tracking, evaluating the initial scroll position immediately.
    #[must_use]
    pub fn new(sections: Vec<Section>, scroll_y: f64) -> Self {
        let active = active_section(scroll_y, &sections).map(str::to_owned);
        Self {
            sections,
            active,
            pending: None,
        }
    }

    /// Currently highlighted section.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record a scroll event.
    pub fn on_scroll(&mut self, scroll_y: f64, now: Instant) {
        self.pending = Some((scroll_y, now));
    }

    /// Evaluate the latest scroll position if the debounce period has
    /// elapsed. Returns the new active section when it changed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let (scroll_y, at) = self.pending?;
        if now.saturating_duration_since(at) < SCROLL_DEBOUNCE {
            return None;
        }
        self.pending = None;

        let next = active_section(scroll_y, &self.sections).map(str::to_owned);
        if next == self.active {
            return None;
        }
        tracing::trace!(from = ?self.active, to = ?next, "Active section changed");
        self.active = next;
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("inicio", 0.0),
            Section::new("productos", 800.0),
            Section::new("nosotros", 1600.0),
            Section::new("contacto", 2400.0),
        ]
    }

    #[test]
    fn test_active_section_offsets() {
        let sections = sections();
        assert_eq!(active_section(0.0, &sections), Some("inicio"));
        assert_eq!(active_section(599.0, &sections), Some("inicio"));
        assert_eq!(active_section(600.0, &sections), Some("productos"));
        assert_eq!(active_section(5000.0, &sections), Some("contacto"));
    }

    #[test]
    fn test_active_section_none() {
        assert_eq!(active_section(0.0, &[]), None);
        assert_eq!(active_section(0.0, &[Section::new("late", 500.0)]), None);
    }

    #[test]
    fn test_nav_states() {
        let links = vec![
            "#inicio".to_string(),
            "#productos".to_string(),
            "contacto".to_string(),
        ];
        assert_eq!(
            nav_states(&links, Some("productos")),
            [("#inicio", false), ("#productos", true), ("contacto", false)]
        );
        assert!(nav_states(&links, None).iter().all(|(_, active)| !active));
    }

    #[test]
    fn test_scroll_spy_debounces() {
        let start = Instant::now();
        let mut spy = ScrollSpy::new(sections(), 0.0);
        assert_eq!(spy.active(), Some("inicio"));

        spy.on_scroll(900.0, start);
        assert_eq!(spy.poll(start + Duration::from_millis(40)), None);

        spy.on_scroll(1700.0, start + Duration::from_millis(60));
        assert_eq!(spy.poll(start + Duration::from_millis(100)), None);
        assert_eq!(
            spy.poll(start + Duration::from_millis(140)),
            Some("nosotros")
        );
        assert_eq!(spy.active(), Some("nosotros"));
    }

    #[test]
    fn test_scroll_spy_unchanged_section_reports_nothing() {
        let start = Instant::now();
        let mut spy = ScrollSpy::new(sections(), 0.0);
        spy.on_scroll(100.0, start);
        assert_eq!(spy.poll(start + SCROLL_DEBOUNCE), None);
        assert_eq!(spy.poll(start + SCROLL_DEBOUNCE * 2), None);
        assert_eq!(spy.active(), Some("inicio"));
    }
}

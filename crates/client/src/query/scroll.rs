//! Infinite-scroll sentinel state machine.

/// Decides when sentinel visibility should trigger a next-page fetch.
///
/// Fires at most once per hidden-to-visible transition, never while a fetch
/// for the query is already in flight, and never once the query is
/// exhausted. After a fetch completes with the sentinel still visible the
/// trigger re-arms, so a long dwell at the end of the list drains pages one
/// at a time without overlapping requests.
#[derive(Debug, Default)]
pub struct ScrollTrigger {
    visible: bool,
    fired_while_visible: bool,
}

impl ScrollTrigger {
    /// Create a trigger with the sentinel out of view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a sentinel visibility change. Returns `true` when the caller
    /// should request the next page.
    pub fn on_visibility(&mut self, visible: bool, fetching: bool, exhausted: bool) -> bool {
        let was_visible = self.visible;
        self.visible = visible;

        if !visible {
            self.fired_while_visible = false;
            return false;
        }
        if was_visible && self.fired_while_visible {
            return false;
        }
        if fetching || exhausted {
            return false;
        }

        self.fired_while_visible = true;
        true
    }

    /// Report that a page fetch finished. Returns `true` when the sentinel
    /// is still visible and another page should be requested.
    pub fn on_fetch_complete(&mut self, exhausted: bool) -> bool {
        if !self.visible || exhausted {
            self.fired_while_visible = self.visible;
            return false;
        }
        self.fired_while_visible = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_visibility_transition() {
        let mut trigger = ScrollTrigger::new();
        assert!(trigger.on_visibility(true, false, false));
        // Rapid repeated observer callbacks while still visible.
        assert!(!trigger.on_visibility(true, false, false));
        assert!(!trigger.on_visibility(true, true, false));
    }

    #[test]
    fn test_rearms_after_leaving_viewport() {
        let mut trigger = ScrollTrigger::new();
        assert!(trigger.on_visibility(true, false, false));
        assert!(!trigger.on_visibility(false, false, false));
        assert!(trigger.on_visibility(true, false, false));
    }

    #[test]
    fn test_suppressed_while_fetch_in_flight() {
        let mut trigger = ScrollTrigger::new();
        assert!(!trigger.on_visibility(true, true, false));
    }

    #[test]
    fn test_noop_when_exhausted() {
        let mut trigger = ScrollTrigger::new();
        assert!(!trigger.on_visibility(true, false, true));
        assert!(!trigger.on_fetch_complete(true));
    }

    #[test]
    fn test_drains_pages_while_dwelling_at_end() {
        let mut trigger = ScrollTrigger::new();
        assert!(trigger.on_visibility(true, false, false));
        // Fetch finishes, sentinel still visible: fire again.
        assert!(trigger.on_fetch_complete(false));
        // And again, until the query is exhausted.
        assert!(trigger.on_fetch_complete(false));
        assert!(!trigger.on_fetch_complete(true));
    }
}

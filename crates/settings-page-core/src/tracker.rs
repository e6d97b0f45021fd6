use std::collections::BTreeMap;

use crate::control::{ControlKey, ControlState};

/// Supplies the current state of tracked controls.
///
/// Returning `None` means the control is gone (detached or never rendered);
/// such controls count as clean.
pub trait ControlSource {
    fn control_state(&self, key: &ControlKey) -> Option<ControlState>;
}

impl ControlSource for BTreeMap<ControlKey, ControlState> {
    fn control_state(&self, key: &ControlKey) -> Option<ControlState> {
        self.get(key).cloned()
    }
}

/// Baselines captured once at page load.
///
/// Dirtiness is never stored: every query re-reads the source and compares
/// fingerprints against the baselines.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    baselines: BTreeMap<ControlKey, String>,
}

impl DirtyTracker {
    pub fn capture<I>(controls: I) -> Self
    where
        I: IntoIterator<Item = (ControlKey, ControlState)>,
    {
        let baselines: BTreeMap<_, _> = controls
            .into_iter()
            .map(|(key, state)| (key, state.fingerprint()))
            .collect();
        tracing::debug!(tracked = baselines.len(), "captured control baselines");
        Self { baselines }
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    pub fn is_tracked(&self, key: &ControlKey) -> bool {
        self.baselines.contains_key(key)
    }

    /// Untracked keys are never dirty.
    pub fn is_dirty(&self, key: &ControlKey, source: &impl ControlSource) -> bool {
        let Some(baseline) = self.baselines.get(key) else {
            return false;
        };
        source
            .control_state(key)
            .is_some_and(|state| state.fingerprint() != *baseline)
    }

    pub fn dirty_keys(&self, source: &impl ControlSource) -> Vec<ControlKey> {
        self.baselines
            .keys()
            .filter(|key| self.is_dirty(key, source))
            .cloned()
            .collect()
    }

    pub fn has_changes(&self, source: &impl ControlSource) -> bool {
        self.baselines.keys().any(|key| self.is_dirty(key, source))
    }

    /// Drops controls that left the tracked container, e.g. after they were
    /// moved into an outgoing form.
    pub fn release<'a>(&mut self, keys: impl IntoIterator<Item = &'a ControlKey>) -> usize {
        let mut released = 0;
        for key in keys {
            if self.baselines.remove(key).is_some() {
                released += 1;
            }
        }
        if released > 0 {
            tracing::debug!(released, remaining = self.baselines.len(), "released controls");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> BTreeMap<ControlKey, ControlState> {
        BTreeMap::from([
            (ControlKey::new(0, "#name"), ControlState::text("alice")),
            (ControlKey::new(1, "#newsletter"), ControlState::new("on", false)),
            (ControlKey::new(2, "#theme"), ControlState::text("dark")),
        ])
    }

    #[test]
    fn fresh_capture_is_clean() {
        let page = page();
        let tracker = DirtyTracker::capture(page.clone());
        assert_eq!(tracker.len(), 3);
        assert!(!tracker.is_empty());
        assert!(!tracker.has_changes(&page));
        assert!(tracker.dirty_keys(&page).is_empty());
    }

    #[test]
    fn checkbox_toggle_marks_control_dirty() {
        let mut page = page();
        let tracker = DirtyTracker::capture(page.clone());
        let key = ControlKey::new(1, "#newsletter");
        page.insert(key.clone(), ControlState::new("on", true));

        assert!(tracker.is_dirty(&key, &page));
        assert_eq!(tracker.dirty_keys(&page), vec![key]);
    }

    #[test]
    fn reverting_a_value_makes_it_clean_again() {
        let mut page = page();
        let tracker = DirtyTracker::capture(page.clone());
        let key = ControlKey::new(0, "#name");

        page.insert(key.clone(), ControlState::text("bob"));
        assert!(tracker.has_changes(&page));

        page.insert(key, ControlState::text("alice"));
        assert!(!tracker.has_changes(&page));
    }

    #[test]
    fn late_controls_are_ignored() {
        let mut page = page();
        let tracker = DirtyTracker::capture(page.clone());
        let late = ControlKey::new(9, "#late");
        page.insert(late.clone(), ControlState::text("anything"));

        assert!(!tracker.is_tracked(&late));
        assert!(!tracker.is_dirty(&late, &page));
        assert!(!tracker.has_changes(&page));
    }

    #[test]
    fn missing_controls_count_as_clean() {
        let mut page = page();
        let tracker = DirtyTracker::capture(page.clone());
        page.remove(&ControlKey::new(2, "#theme"));

        assert!(!tracker.has_changes(&page));
    }

    #[test]
    fn release_forgets_baselines() {
        let mut page = page();
        let mut tracker = DirtyTracker::capture(page.clone());
        let key = ControlKey::new(0, "#name");
        page.insert(key.clone(), ControlState::text("bob"));

        assert_eq!(tracker.release([&key]), 1);
        assert_eq!(tracker.release([&key]), 0);
        assert!(!tracker.is_tracked(&key));
        assert!(!tracker.has_changes(&page));
        assert_eq!(tracker.len(), 2);
    }
}

use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen, QuickCheck};
use settings_page_core::{ControlKey, ControlState, DirtyTracker, SettingsFormState};

const CONTROL_COUNT: usize = 4;
const VALUES: [&str; 3] = ["", "alice", "bob"];

/// A user edit: sets one control to one of a few values and checked flags.
#[derive(Debug, Clone)]
struct Edit {
    control: usize,
    value: usize,
    checked: bool,
}

impl Arbitrary for Edit {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            control: usize::arbitrary(g) % CONTROL_COUNT,
            value: usize::arbitrary(g) % VALUES.len(),
            checked: bool::arbitrary(g),
        }
    }
}

fn key(index: usize) -> ControlKey {
    ControlKey::from_scan(index, &format!("field{index}"), "")
}

fn initial_page() -> BTreeMap<ControlKey, ControlState> {
    (0..CONTROL_COUNT)
        .map(|index| (key(index), ControlState::new(VALUES[index % VALUES.len()], index == 1)))
        .collect()
}

fn submit_enabled_iff_any_control_differs(edits: Vec<Edit>) -> bool {
    let baseline = initial_page();
    let state = SettingsFormState::new(DirtyTracker::capture(baseline.clone()));
    let mut page = baseline.clone();

    for edit in edits {
        page.insert(
            key(edit.control),
            ControlState::new(VALUES[edit.value], edit.checked),
        );
        let all_clean = page
            .iter()
            .all(|(key, state)| baseline[key].fingerprint() == state.fingerprint());
        if state.submit_enabled(&page) == all_clean {
            return false;
        }
    }
    true
}

#[test]
fn submit_button_tracks_dirtiness_over_any_edit_sequence() {
    QuickCheck::new()
        .tests(500)
        .quickcheck(submit_enabled_iff_any_control_differs as fn(Vec<Edit>) -> bool);
}

#[test]
fn submission_moves_only_the_changed_nickname() {
    let nickname = ControlKey::from_scan(0, "nickname", "nickname");
    let bio = ControlKey::from_scan(1, "bio", "bio");
    let mut page = BTreeMap::from([
        (nickname.clone(), ControlState::text("ally")),
        (bio.clone(), ControlState::text("hello")),
    ]);
    let mut state = SettingsFormState::new(DirtyTracker::capture(page.clone()));

    page.insert(nickname.clone(), ControlState::text("ally2"));
    assert!(state.submit_enabled(&page));

    let form = state
        .prepare_submission(&page, "/settings")
        .expect("first submission succeeds");
    assert_eq!(form.fields, vec![nickname.clone()]);
    assert_eq!(page[&nickname].value, "ally2");
    assert!(state.tracker().is_tracked(&bio));
    assert!(!state.tracker().is_tracked(&nickname));
}

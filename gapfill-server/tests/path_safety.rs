use std::path::Component;

use gapfill_server::models::SafeFileName;
use gapfill_server::storage::normalize_relative;
use proptest::prelude::*;

proptest! {
    /// Property: a sanitized filename is never empty, never a path and only uses safe characters
    #[test]
    fn prop_safe_file_name_is_flat(raw in ".{0,64}") {
        if let Ok(name) = SafeFileName::new(&raw, "modelUpload") {
            let name = name.as_str();
            prop_assert!(!name.is_empty());
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')));
            prop_assert!(!name.starts_with(['.', '_']));
            prop_assert!(!name.ends_with(['.', '_']));
        }
    }

    /// Property: normalized download paths stay below the root
    #[test]
    fn prop_normalized_paths_never_escape(
        segments in prop::collection::vec(prop_oneof![
            Just("..".to_string()),
            Just(".".to_string()),
            Just(String::new()),
            "[a-z0-9_]{1,8}",
        ], 0..8),
        leading_slash in any::<bool>(),
    ) {
        let mut requested = segments.join("/");
        if leading_slash {
            requested.insert(0, '/');
        }

        if let Some(path) = normalize_relative(&requested) {
            prop_assert!(!leading_slash);
            prop_assert!(path
                .components()
                .all(|component| matches!(component, Component::Normal(_))));
        }
    }
}

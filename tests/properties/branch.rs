//! Property tests for the deployment branch check.

use proptest::prelude::*;

use controlla::domain::entities::branch_matches;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The branch check never panics on arbitrary input.
    #[test]
    fn property_branch_check_never_panics(branch in ".*") {
        let _ = branch_matches(&branch);
    }

    /// PROPERTY: Names without dashes are always accepted.
    #[test]
    fn property_dashless_names_match(branch in "[^-]*") {
        prop_assert!(branch_matches(&branch));
    }

    /// PROPERTY: Ordered flags followed by a non-flag suffix are accepted.
    #[test]
    fn property_ordered_flags_match(
        name in "[a-z]{1,8}",
        flags in proptest::sample::subsequence(vec!["-ex", "-d", "-b", "-f"], 0..=4),
        suffix in prop_oneof![Just(String::new()), "-[acg-z][a-z]{0,5}"],
    ) {
        let branch = format!("{}{}{}", name, flags.concat(), suffix);
        prop_assert!(branch_matches(&branch), "{:?} should match", branch);
    }

    /// PROPERTY: Repeating any flag is rejected.
    #[test]
    fn property_repeated_flag_is_rejected(
        name in "[a-z]{1,8}",
        flag in prop_oneof![Just("-ex"), Just("-d"), Just("-b"), Just("-f")],
    ) {
        let branch = format!("{}{}{}", name, flag, flag);
        prop_assert!(!branch_matches(&branch), "{:?} should be rejected", branch);
    }
}

//! Property-based tests for human-readable size formatting.
//!
//! The formatter scales by 1024 through B, KB, MB, GB and TB, printing at most
//! two decimals with trailing zeros removed.

use buraunza::managers::download_manager::human_readable_size;
use proptest::prelude::*;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn size_has_number_and_known_unit(bytes in any::<u64>()) {
        let text = human_readable_size(bytes);
        let (number, unit) = text.split_once(' ').expect("number and unit separated by a space");
        prop_assert!(UNITS.contains(&unit), "unknown unit in '{}'", text);

        let value: f64 = number.parse().expect("number part parses");
        if unit != "TB" {
            prop_assert!(value < 1024.0 + f64::EPSILON, "'{}' should have scaled further", text);
        }
        if let Some((_, decimals)) = number.split_once('.') {
            prop_assert!(decimals.len() <= 2);
            prop_assert!(!decimals.ends_with('0'));
        }
    }

    #[test]
    fn bytes_below_one_kib_are_exact(bytes in 0u64..1024) {
        prop_assert_eq!(human_readable_size(bytes), format!("{} B", bytes));
    }

    #[test]
    fn whole_kibibytes_have_no_decimals(kib in 1u64..1024) {
        prop_assert_eq!(human_readable_size(kib * 1024), format!("{} KB", kib));
    }
}

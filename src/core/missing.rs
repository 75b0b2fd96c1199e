//! core::missing
//!
//! Required-minus-available, sorted.

use std::collections::HashSet;

use super::resolve::RequiredSet;
use super::types::RoleName;

/// Roles in `required` that are not in `available`, in ascending order.
pub fn detect(required: &RequiredSet, available: &HashSet<RoleName>) -> Vec<RoleName> {
    let mut missing: Vec<RoleName> = required
        .iter()
        .filter(|role| !available.contains(*role))
        .cloned()
        .collect();
    missing.sort();
    missing
}

/// Split `missing` into roles still reported and roles suppressed by `ignore`.
///
/// Both halves keep the input order.
pub fn partition_ignored(
    missing: Vec<RoleName>,
    ignore: &[RoleName],
) -> (Vec<RoleName>, Vec<RoleName>) {
    missing.into_iter().partition(|role| !ignore.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<RoleName> {
        names.iter().map(|n| RoleName::new(*n).unwrap()).collect()
    }

    #[test]
    fn missing_is_sorted_difference() {
        let required: RequiredSet = roles(&["E", "D", "C", "B", "A"]).into_iter().collect();
        let available: HashSet<RoleName> = roles(&["A", "C", "E"]).into_iter().collect();

        assert_eq!(detect(&required, &available), roles(&["B", "D"]));
    }

    #[test]
    fn nothing_missing() {
        let required: RequiredSet = roles(&["A"]).into_iter().collect();
        let available: HashSet<RoleName> = roles(&["A", "Z"]).into_iter().collect();

        assert!(detect(&required, &available).is_empty());
    }

    #[test]
    fn everything_missing_when_nothing_available() {
        let required: RequiredSet = roles(&["web", "db", "app"]).into_iter().collect();

        assert_eq!(
            detect(&required, &HashSet::new()),
            roles(&["app", "db", "web"])
        );
    }

    #[test]
    fn ignored_roles_split_out() {
        let (reported, ignored) =
            partition_ignored(roles(&["a", "b", "c"]), &roles(&["b", "zzz"]));

        assert_eq!(reported, roles(&["a", "c"]));
        assert_eq!(ignored, roles(&["b"]));
    }
}

//! Version specifier comparison.
//!
//! Catalog entries are pnpm version specifiers (`^1.2.0`, `>=18`, `1.2`),
//! not plain semver versions, so this module implements the narrow numeric
//! comparison the aligner needs instead of pulling in a range resolver:
//! strip the operator prefix, then compare dot-separated components as
//! integers with missing components treated as 0.

use std::cmp::Ordering;

/// Characters that may prefix a specifier before the numeric part.
const SPECIFIER_PREFIX: &[char] = &['^', '~', '>', '=', '<'];

/// Compare two version specifiers by numeric precedence.
///
/// Only the leading digits of each dot component participate. A component
/// with no leading digits ends the comparison: non-numeric segments never
/// produce an ordering on their own, so `1.0.0-beta` compares equal to
/// `1.0.0` rather than being rejected or mis-ordered.
pub fn compare_specifiers(a: &str, b: &str) -> Ordering {
    let mut left = strip_prefix(a).split('.');
    let mut right = strip_prefix(b).split('.');

    loop {
        let (l, r) = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => (numeric_component(l), numeric_component(r)),
        };

        match (l, r) {
            (Some(l), Some(r)) => match l.cmp(&r) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
            _ => return Ordering::Equal,
        }
    }
}

/// Strip the operator prefix (`^ ~ > = <`) and any whitespace after it.
fn strip_prefix(specifier: &str) -> &str {
    specifier.trim_start_matches(SPECIFIER_PREFIX).trim_start()
}

/// The leading decimal digits of a dot component, or 0 for a missing
/// trailing component, or `None` when there are no digits to compare.
fn numeric_component(component: Option<&str>) -> Option<u64> {
    let component = match component {
        None => return Some(0),
        Some(c) => c,
    };

    let digits_end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());

    component[..digits_end].parse().ok()
}

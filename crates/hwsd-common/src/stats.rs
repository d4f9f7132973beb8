//! Categorical reductions.

/// Most frequent present value; ties go to the value seen first.
///
/// Values for which `is_missing` returns true are not counted. When no value
/// is present the first value of the slice is returned (which may itself be
/// missing); an empty slice yields `None`.
///
/// # Examples
///
/// ```
/// use hwsd_common::mode_or_first;
///
/// let values = [Some(2), Some(1), Some(1), Some(2), None];
/// assert_eq!(mode_or_first(&values, Option::is_none), Some(Some(2)));
///
/// let empty: [Option<i32>; 2] = [None, None];
/// assert_eq!(mode_or_first(&empty, Option::is_none), Some(None));
/// ```
pub fn mode_or_first<T, F>(values: &[T], is_missing: F) -> Option<T>
where
    T: PartialEq + Clone,
    F: Fn(&T) -> bool,
{
    // (value, count, first index); small groups make a linear scan fine.
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for value in values.iter().filter(|&value| !is_missing(value)) {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&T, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    match best {
        Some((value, _)) => Some(value.clone()),
        None => values.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_missing(_: &&str) -> bool {
        false
    }

    #[test]
    fn picks_most_frequent() {
        let values = ["a", "b", "b", "c"];
        assert_eq!(mode_or_first(&values, never_missing), Some("b"));
    }

    #[test]
    fn ties_break_on_first_occurrence() {
        let values = ["c", "a", "a", "c", "b"];
        assert_eq!(mode_or_first(&values, never_missing), Some("c"));
    }

    #[test]
    fn empty_slice_has_no_mode() {
        let values: [&str; 0] = [];
        assert_eq!(mode_or_first(&values, never_missing), None);
    }

    #[test]
    fn missing_values_do_not_count() {
        let values = [None, None, Some(3), None];
        assert_eq!(mode_or_first(&values, Option::is_none), Some(Some(3)));
    }
}

#![forbid(unsafe_code)]

//! Pane priority.

/// Ordinal rank of a pane.
///
/// Panes render in ascending priority (later writes win) and receive clicks
/// in descending priority (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

impl Priority {
    /// All levels from lowest to highest.
    pub const ALL: [Self; 6] = [
        Self::Lowest,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::Highest,
        Self::Monitor,
    ];

    #[inline]
    #[must_use]
    pub fn is_less_than(self, other: Self) -> bool {
        self < other
    }

    #[inline]
    #[must_use]
    pub fn is_greater_than(self, other: Self) -> bool {
        self > other
    }
}

/// Insert `value` into a list kept in non-decreasing priority order.
///
/// Binary search for the end of the run of equal priority; the new entry
/// lands after every existing entry of the same priority. Returns the index
/// it was inserted at.
pub fn insert_by_priority<T>(
    list: &mut Vec<T>,
    value: T,
    priority: impl Fn(&T) -> Priority,
) -> usize {
    let rank = priority(&value);
    let index = list.partition_point(|existing| !priority(existing).is_greater_than(rank));
    list.insert(index, value);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        for pair in Priority::ALL.windows(2) {
            assert!(pair[0].is_less_than(pair[1]));
            assert!(pair[1].is_greater_than(pair[0]));
        }
        assert!(!Priority::Normal.is_less_than(Priority::Normal));
    }

    #[test]
    fn insert_keeps_runs_contiguous() {
        let mut list = Vec::new();
        for p in [
            Priority::High,
            Priority::Lowest,
            Priority::High,
            Priority::Monitor,
            Priority::Normal,
            Priority::Lowest,
        ] {
            insert_by_priority(&mut list, p, |p| *p);
        }
        assert_eq!(
            list,
            vec![
                Priority::Lowest,
                Priority::Lowest,
                Priority::Normal,
                Priority::High,
                Priority::High,
                Priority::Monitor
            ]
        );
    }

    #[test]
    fn equal_priority_lands_after_existing_run() {
        let mut list = vec![(Priority::Normal, 'a'), (Priority::High, 'b')];
        let at = insert_by_priority(&mut list, (Priority::Normal, 'c'), |e| e.0);
        assert_eq!(at, 1);
        assert_eq!(list[1].1, 'c');
    }
}

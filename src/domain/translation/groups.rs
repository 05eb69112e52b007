//! Greedy grouping of input into same-shift batches

use crate::domain::keymap;

use super::batch_size::BatchSize;

/// A contiguous run of input sharing one shift state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchGroup<'a> {
    /// Character offset of the first character in the input
    pub offset: usize,
    /// The characters in this group
    pub text: &'a str,
    /// Whether every character in the group requires shift
    pub shifted: bool,
}

impl<'a> DispatchGroup<'a> {
    /// Number of characters in the group
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Groups produced by [`DispatchGroups`] are never empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character offset one past the last character
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }
}

/// Iterator splitting input into the minimal sequence of same-shift runs,
/// each at most `batch_size` characters long.
///
/// Left to right and greedy: a run is only cut early at the size cap.
#[derive(Debug, Clone)]
pub struct DispatchGroups<'a> {
    rest: &'a str,
    offset: usize,
    batch_size: usize,
}

impl<'a> DispatchGroups<'a> {
    /// Create a grouping iterator over the input
    pub fn new(input: &'a str, batch_size: BatchSize) -> Self {
        Self {
            rest: input,
            offset: 0,
            batch_size: batch_size.get(),
        }
    }
}

impl<'a> Iterator for DispatchGroups<'a> {
    type Item = DispatchGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;
        let shifted = keymap::requires_shift(first);

        let mut count = 1;
        let mut end = self.rest.len();
        for (index, c) in chars {
            if count == self.batch_size || keymap::requires_shift(c) != shifted {
                end = index;
                break;
            }
            count += 1;
        }

        let (text, rest) = self.rest.split_at(end);
        let group = DispatchGroup {
            offset: self.offset,
            text,
            shifted,
        };

        self.rest = rest;
        self.offset += count;

        Some(group)
    }
}

impl std::iter::FusedIterator for DispatchGroups<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(input: &str, size: u8) -> Vec<(&str, bool)> {
        DispatchGroups::new(input, BatchSize::new(size).unwrap())
            .map(|g| (g.text, g.shifted))
            .collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(groups("", 1).is_empty());
        assert!(groups("", 15).is_empty());
    }

    #[test]
    fn single_size_sends_one_at_a_time() {
        assert_eq!(
            groups("Hi!", 1),
            vec![("H", true), ("i", false), ("!", true)]
        );
    }

    #[test]
    fn alternating_shift_never_merges() {
        assert_eq!(
            groups("Hi!", 15),
            vec![("H", true), ("i", false), ("!", true)]
        );
    }

    #[test]
    fn long_runs_split_at_cap() {
        assert_eq!(
            groups("aaaBBBccc", 2),
            vec![
                ("aa", false),
                ("a", false),
                ("BB", true),
                ("B", true),
                ("cc", false),
                ("c", false),
            ]
        );
    }

    #[test]
    fn same_shift_run_merges_up_to_cap() {
        assert_eq!(groups("hello world", 15), vec![("hello world", false)]);
        assert_eq!(
            groups("hello world", 5),
            vec![("hello", false), (" worl", false), ("d", false)]
        );
    }

    #[test]
    fn symbols_group_with_capitals() {
        assert_eq!(
            groups("ABC!@#def", 15),
            vec![("ABC!@#", true), ("def", false)]
        );
    }

    #[test]
    fn offsets_count_characters() {
        let all: Vec<_> =
            DispatchGroups::new("aéB", BatchSize::new(15).unwrap()).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].offset, 0);
        assert_eq!(all[0].text, "aé");
        assert_eq!(all[0].len(), 2);
        assert_eq!(all[1].offset, 2);
        assert_eq!(all[1].text, "B");
        assert_eq!(all[1].end(), 3);
    }

    #[test]
    fn unsupported_characters_are_grouped_unshifted() {
        assert_eq!(groups("a€b", 15), vec![("a€b", false)]);
    }

    #[test]
    fn iterator_is_fused() {
        let mut iter = DispatchGroups::new("a", BatchSize::single());
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}

/// One selection range. `anchor` may be after `head` for a backwards selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A zero-width range (a caret).
    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// The lower bound of the range.
    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// The upper bound of the range.
    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Inclusive on both ends, so a caret touching either edge counts.
    pub fn touches(&self, from: usize, to: usize) -> bool {
        from <= self.to() && to >= self.from()
    }
}

/// The editor's selection: one or more ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelRange>,
}

impl Selection {
    pub fn new(ranges: impl IntoIterator<Item = SelRange>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new([SelRange::cursor(pos)])
    }

    pub fn single(anchor: usize, head: usize) -> Self {
        Self::new([SelRange::new(anchor, head)])
    }

    pub fn ranges(&self) -> &[SelRange] {
        &self.ranges
    }

    /// The first range, which drives caret movement.
    pub fn main(&self) -> Option<SelRange> {
        self.ranges.first().copied()
    }

    /// True if any range touches the inclusive span `from..=to`.
    pub fn touches(&self, from: usize, to: usize) -> bool {
        range_in_selection(from, to, &self.ranges)
    }
}

/// Whether the inclusive span `from..=to` intersects any selection range.
///
/// Ranges are normalized first, so backwards selections behave like forward ones.
pub fn range_in_selection(from: usize, to: usize, selection: &[SelRange]) -> bool {
    selection.iter().any(|r| r.touches(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::overlaps_one_selection((1, 2), vec![(0, 1)], true)]
    #[case::outside_one_selection((2, 3), vec![(0, 1)], false)]
    #[case::larger_than_selection((0, 20), vec![(10, 10)], true)]
    #[case::overlaps_one_of_many((1, 2), vec![(0, 1), (3, 4)], true)]
    #[case::overlaps_none_of_many((2, 2), vec![(0, 1), (3, 4)], false)]
    #[case::inverse_selection((1, 2), vec![(1, 0)], true)]
    #[case::caret_inside((10, 20), vec![(15, 15)], true)]
    #[case::caret_after((10, 20), vec![(21, 25)], false)]
    #[case::caret_on_end((10, 20), vec![(20, 20)], true)]
    #[case::empty_selection((10, 20), vec![], false)]
    fn range_in_selection_cases(
        #[case] range: (usize, usize),
        #[case] selection: Vec<(usize, usize)>,
        #[case] expected: bool,
    ) {
        let ranges: Vec<_> = selection
            .into_iter()
            .map(|(anchor, head)| SelRange::new(anchor, head))
            .collect();
        assert_eq!(range_in_selection(range.0, range.1, &ranges), expected);
    }

    #[test]
    fn sel_range_normalizes_bounds() {
        let r = SelRange::new(7, 3);
        assert_eq!((r.from(), r.to()), (3, 7));
        assert!(!r.is_empty());
        assert!(SelRange::cursor(4).is_empty());
    }

    #[test]
    fn selection_helpers() {
        let sel = Selection::new([SelRange::new(9, 2), SelRange::cursor(5)]);
        assert_eq!(sel.main(), Some(SelRange::new(9, 2)));
        assert!(sel.touches(0, 2));
        assert!(!sel.touches(10, 12));
        assert!(!Selection::new(Vec::<SelRange>::new()).touches(0, 100));
    }
}

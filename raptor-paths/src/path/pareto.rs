//! Pareto-optimal set.
//!
//! A set that only keeps elements no other element dominates. Dominance
//! is derived from a "left dominance exists" relation: `l` has an
//! advantage over `r` if it is better on at least one criterion. `l`
//! dominates `r` if it has an advantage and `r` has none.
//!
//! A new element is rejected if it has no advantage over some element
//! already in the set (it is dominated by or equal to it). Otherwise it is
//! added and every element it dominates is evicted.

use std::slice::Iter as SliceIter;

/// Tells whether the left element is better than the right element on at
/// least one criterion.
pub trait ParetoComparator<T> {
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool;

    /// `left` is at least as good everywhere and better somewhere.
    fn dominates(&self, left: &T, right: &T) -> bool {
        self.left_dominance_exist(left, right) && !self.left_dominance_exist(right, left)
    }
}

impl<T, F> ParetoComparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

/// Result of offering an element to a [`ParetoSet`].
#[derive(Debug)]
pub enum Insert<T> {
    /// Added; these elements were evicted because the new one dominates them.
    Accepted { evicted: Vec<T> },
    /// An element in the set dominates the new one.
    Dominated,
    /// An element in the set is equal on every criterion.
    Equal,
}

impl<T> Insert<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Insert::Accepted { .. })
    }
}

/// A set of mutually non-dominating elements.
#[derive(Debug, Clone)]
pub struct ParetoSet<T, C> {
    elements: Vec<T>,
    comparator: C,
}

impl<T, C: ParetoComparator<T>> ParetoSet<T, C> {
    pub fn new(comparator: C) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Would `candidate` be accepted if added now?
    pub fn qualify(&self, candidate: &T) -> bool {
        self.elements
            .iter()
            .all(|existing| self.comparator.left_dominance_exist(candidate, existing))
    }

    /// Offer an element to the set.
    pub fn add(&mut self, candidate: T) -> Insert<T> {
        for existing in &self.elements {
            if !self.comparator.left_dominance_exist(&candidate, existing) {
                return if self.comparator.left_dominance_exist(existing, &candidate) {
                    Insert::Dominated
                } else {
                    Insert::Equal
                };
            }
        }

        let mut evicted = Vec::new();
        let mut kept = Vec::with_capacity(self.elements.len() + 1);
        for existing in self.elements.drain(..) {
            if self.comparator.left_dominance_exist(&existing, &candidate) {
                kept.push(existing);
            } else {
                evicted.push(existing);
            }
        }
        kept.push(candidate);
        self.elements = kept;

        Insert::Accepted { evicted }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> SliceIter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Take all elements out, leaving the set empty.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (arrival, transfers): lower is better on both.
    fn two_criteria(l: &(u32, u32), r: &(u32, u32)) -> bool {
        l.0 < r.0 || l.1 < r.1
    }

    #[test]
    fn keeps_pareto_front() {
        let mut set = ParetoSet::new(two_criteria);

        assert!(set.add((600, 2)).is_accepted());
        assert!(set.add((605, 1)).is_accepted());
        assert!(matches!(set.add((610, 2)), Insert::Dominated));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn evicts_dominated() {
        let mut set = ParetoSet::new(two_criteria);
        set.add((610, 2));
        set.add((620, 1));

        match set.add((600, 1)) {
            Insert::Accepted { evicted } => assert_eq!(evicted.len(), 2),
            other => panic!("expected accept, got {other:?}"),
        }
        assert_eq!(set.as_slice(), &[(600, 1)]);
    }

    #[test]
    fn equal_rejected() {
        let mut set = ParetoSet::new(two_criteria);
        set.add((600, 1));
        assert!(matches!(set.add((600, 1)), Insert::Equal));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn qualify_does_not_insert() {
        let mut set = ParetoSet::new(two_criteria);
        set.add((600, 2));
        assert!(set.qualify(&(590, 3)));
        assert!(!set.qualify(&(600, 2)));
        assert!(!set.qualify(&(601, 2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn clear_and_into_vec() {
        let mut set = ParetoSet::new(two_criteria);
        set.add((1, 1));
        let v = set.clone().into_vec();
        assert_eq!(v, vec![(1, 1)]);
        set.clear();
        assert!(set.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn three_criteria(l: &(u8, u8, u8), r: &(u8, u8, u8)) -> bool {
        l.0 < r.0 || l.1 < r.1 || l.2 < r.2
    }

    fn dominates(a: &(u8, u8, u8), b: &(u8, u8, u8)) -> bool {
        a.0 <= b.0 && a.1 <= b.1 && a.2 <= b.2 && a != b
    }

    fn elements() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
        prop::collection::vec((0u8..8, 0u8..4, 0u8..8), 0..30)
    }

    proptest! {
        #[test]
        fn no_internal_domination(items in elements()) {
            let mut set = ParetoSet::new(three_criteria);
            for item in items {
                set.add(item);
            }

            for (i, a) in set.iter().enumerate() {
                for (j, b) in set.iter().enumerate() {
                    if i != j {
                        prop_assert!(!dominates(a, b), "{:?} dominates {:?}", a, b);
                        prop_assert!(a != b, "duplicate {:?}", a);
                    }
                }
            }
        }

        #[test]
        fn every_offered_item_is_covered(items in elements()) {
            let mut set = ParetoSet::new(three_criteria);
            for item in &items {
                set.add(*item);
            }

            // Anything offered is either kept or dominated/equalled by a kept item.
            for item in &items {
                prop_assert!(set.iter().any(|kept| kept == item || dominates(kept, item)));
            }
        }

        #[test]
        fn adding_twice_is_idempotent(items in elements()) {
            let mut once = ParetoSet::new(three_criteria);
            let mut twice = ParetoSet::new(three_criteria);
            for item in &items {
                once.add(*item);
                twice.add(*item);
                twice.add(*item);
            }

            let mut a = once.into_vec();
            let mut b = twice.into_vec();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }
    }
}

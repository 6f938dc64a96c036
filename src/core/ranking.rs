//! Insertion-ordered counters and stable rankings.
//!
//! Every accumulator keeps keys in first-seen order. Rankings sort by
//! descending count with a stable sort, so ties keep that order, and are
//! then truncated to a cap.

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

/// A counter keyed by first-seen order.
///
/// # Example
///
/// ```rust
/// use talkstats::core::ranking::Tally;
///
/// let mut tally: Tally<String> = Tally::new();
/// tally.bump("영희");
/// tally.bump("철수");
/// tally.bump("철수");
/// tally.bump("민수");
///
/// let ranked = tally.ranked(2);
/// assert_eq!(ranked, vec![("철수".to_string(), 2), ("영희".to_string(), 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally<K: Hash + Eq> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> Tally<K> {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` to a key, inserting it at the end if unseen.
    pub fn add<Q>(&mut self, key: &Q, n: usize)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(count) = self.counts.get_mut(key) {
            *count += n;
        } else {
            self.counts.insert(key.to_owned(), n);
        }
    }

    /// Adds one to a key.
    pub fn bump<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.add(key, 1);
    }

    /// Raises a key's value to `value` if it is larger than the current one.
    pub fn record_max<Q>(&mut self, key: &Q, value: usize)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        match self.counts.get_mut(key) {
            Some(best) if *best >= value => {}
            Some(best) => *best = value,
            None => {
                self.counts.insert(key.to_owned(), value);
            }
        }
    }

    /// Count for a key (zero if unseen).
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no key has been seen.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Sorts keys by their natural order (for calendar keys).
    pub fn sort_keys(&mut self)
    where
        K: Ord,
    {
        self.counts.sort_keys();
    }

    /// Entries by descending count, ties in first-seen order, capped.
    pub fn ranked(&self, limit: usize) -> Vec<(K, usize)>
    where
        K: Clone,
    {
        let entries = self.counts.iter().map(|(k, &v)| (k.clone(), v)).collect();
        rank_by(entries, |&(_, count)| count, limit)
    }

    /// Consumes the tally, returning the underlying map.
    pub fn into_map(self) -> IndexMap<K, usize> {
        self.counts
    }
}

impl<K: Hash + Eq> FromIterator<(K, usize)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Stable sort by descending `key`, truncated to `limit`.
pub fn rank_by<T, F>(mut items: Vec<T>, key: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    items.sort_by_key(|item| Reverse(key(item)));
    items.truncate(limit);
    items
}

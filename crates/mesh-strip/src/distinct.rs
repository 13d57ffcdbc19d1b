//! Collapsing equal per-corner values to shared indices.

use std::hash::Hash;

use hashbrown::HashMap;

/// Distinct values plus, for each input position, the index of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctValues<T> {
    /// One entry per distinct value, in first-seen order.
    pub values: Vec<T>,
    /// `values[map[i]] == input[i]` for every input position `i`.
    pub map: Vec<u32>,
}

impl<T: Clone> DistinctValues<T> {
    /// Mapping where every input position is its own value.
    pub fn identity(values: &[T]) -> Self {
        Self {
            values: values.to_vec(),
            map: (0..values.len() as u32).collect(),
        }
    }
}

/// Collaborator that finds duplicate corner values.
pub trait Deduplicate<T> {
    /// Returns `None` when every value is distinct.
    fn deduplicate(&self, values: &[T]) -> Option<DistinctValues<T>>;
}

/// Hash-based [`Deduplicate`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashDistinct;

impl<T: Eq + Hash + Clone> Deduplicate<T> for HashDistinct {
    fn deduplicate(&self, values: &[T]) -> Option<DistinctValues<T>> {
        let mut lookup: HashMap<&T, u32> = HashMap::with_capacity(values.len());
        let mut distinct = Vec::new();
        let mut map = Vec::with_capacity(values.len());

        for value in values {
            let index = *lookup.entry(value).or_insert_with(|| {
                distinct.push(value.clone());
                (distinct.len() - 1) as u32
            });
            map.push(index);
        }

        if distinct.len() == values.len() {
            return None;
        }

        Some(DistinctValues {
            values: distinct,
            map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        assert_eq!(HashDistinct.deduplicate(&["a", "b", "c"]), None);
    }

    #[test]
    fn test_duplicates_first_seen_order() {
        let distinct = HashDistinct
            .deduplicate(&["b", "a", "b", "c", "a"])
            .expect("has duplicates");
        assert_eq!(distinct.values, vec!["b", "a", "c"]);
        assert_eq!(distinct.map, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_identity() {
        let identity = DistinctValues::identity(&[7u8, 7, 9]);
        assert_eq!(identity.values, vec![7, 7, 9]);
        assert_eq!(identity.map, vec![0, 1, 2]);
    }
}

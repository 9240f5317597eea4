//! Slice and map helpers in the spirit of PHP's `array_*` family.

use crate::utils::error::{KitError, Result};
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Remove the first element equal to `val`. The vector is returned unchanged when `val` is absent.
pub fn array_string_delete_val(val: &str, mut array: Vec<String>) -> Vec<String> {
    if let Some(index) = array.iter().position(|item| item == val) {
        array.remove(index);
    }
    array
}

pub fn array_string_delete_one(index: usize, mut array: Vec<String>) -> Result<Vec<String>> {
    if index >= array.len() {
        return Err(KitError::invalid_argument(format!(
            "index {} out of range for array of length {}",
            index,
            array.len()
        )));
    }
    array.remove(index);
    Ok(array)
}

/// Works on anything iterable by reference: slices, `Vec`, or `map.values()`.
pub fn in_array<'a, T, I>(value: &T, haystack: I) -> bool
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    haystack.into_iter().any(|item| item == value)
}

pub fn int_array_desc(mut arr: Vec<i64>) -> Vec<i64> {
    arr.sort_unstable_by(|a, b| b.cmp(a));
    arr
}

pub fn join_with_commas(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn array_fill<T: Clone>(start_index: i64, num: usize, value: T) -> BTreeMap<i64, T> {
    (0..num as i64)
        .map(|offset| (start_index + offset, value.clone()))
        .collect()
}

/// Later entries win when several keys share a value.
pub fn array_flip<K, V>(map: HashMap<K, V>) -> HashMap<V, K>
where
    V: Eq + Hash,
{
    map.into_iter().map(|(k, v)| (v, k)).collect()
}

pub fn array_keys<K: Clone, V>(map: &HashMap<K, V>) -> Vec<K> {
    map.keys().cloned().collect()
}

pub fn array_values<K, V: Clone>(map: &HashMap<K, V>) -> Vec<V> {
    map.values().cloned().collect()
}

pub fn array_merge<T: Clone>(slices: &[&[T]]) -> Vec<T> {
    let total = slices.iter().map(|s| s.len()).sum();
    let mut merged = Vec::with_capacity(total);
    for slice in slices {
        merged.extend_from_slice(slice);
    }
    merged
}

pub fn array_chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size < 1 {
        return Err(KitError::invalid_argument("chunk size cannot be less than 1"));
    }
    Ok(items.chunks(size).map(|chunk| chunk.to_vec()).collect())
}

/// Positive `size` pads on the right, negative on the left.
pub fn array_pad<T: Clone>(mut items: Vec<T>, size: i64, value: T) -> Vec<T> {
    let target = size.unsigned_abs() as usize;
    if size == 0 || target <= items.len() {
        return items;
    }
    let padding = vec![value; target - items.len()];
    if size > 0 {
        items.extend(padding);
        items
    } else {
        let mut padded = padding;
        padded.extend(items);
        padded
    }
}

pub fn array_slice<T: Clone>(items: &[T], offset: usize, length: usize) -> Result<Vec<T>> {
    if offset > items.len() {
        return Err(KitError::invalid_argument(format!(
            "offset {} is greater than the length {}",
            offset,
            items.len()
        )));
    }
    let end = offset.saturating_add(length).min(items.len());
    Ok(items[offset..end].to_vec())
}

/// A random permutation of `items`.
pub fn array_rand<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled
}

/// Collect `row[column_key]` from every row that has it.
pub fn array_column<'a, I>(rows: I, column_key: &str) -> Vec<Value>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    rows.into_iter()
        .filter_map(|row| row.get(column_key).cloned())
        .collect()
}

pub fn array_push<T>(items: &mut Vec<T>, elements: impl IntoIterator<Item = T>) -> usize {
    items.extend(elements);
    items.len()
}

pub fn array_pop<T>(items: &mut Vec<T>) -> Option<T> {
    items.pop()
}

pub fn array_unshift<T>(items: &mut Vec<T>, elements: Vec<T>) -> usize {
    items.splice(0..0, elements);
    items.len()
}

pub fn array_shift<T>(items: &mut Vec<T>) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items.remove(0))
    }
}

pub fn array_combine<K, V>(keys: Vec<K>, values: Vec<V>) -> Result<HashMap<K, V>>
where
    K: Eq + Hash,
{
    if keys.len() != values.len() {
        return Err(KitError::invalid_argument(format!(
            "the number of keys ({}) and values ({}) is not equal",
            keys.len(),
            values.len()
        )));
    }
    Ok(keys.into_iter().zip(values).collect())
}

pub fn array_reverse<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

pub fn implode<S: AsRef<str>>(glue: &str, pieces: &[S]) -> String {
    pieces
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(glue)
}

pub fn array_key_exists<K: Eq + Hash, V>(key: &K, map: &HashMap<K, V>) -> bool {
    map.contains_key(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_delete_val_and_index() {
        let arr = strings(&["a", "b", "c", "b"]);
        assert_eq!(array_string_delete_val("b", arr.clone()), strings(&["a", "c", "b"]));
        assert_eq!(array_string_delete_val("z", arr.clone()), arr);
        assert_eq!(array_string_delete_one(0, arr.clone()).unwrap(), strings(&["b", "c", "b"]));
        assert!(array_string_delete_one(4, arr).is_err());
    }

    #[test]
    fn test_in_array_over_slice_and_map() {
        assert!(in_array(&3, &[1, 2, 3]));
        assert!(!in_array(&4, &[1, 2, 3]));

        let mut map = HashMap::new();
        map.insert("k", "needle".to_string());
        assert!(in_array(&"needle".to_string(), map.values()));
    }

    #[test]
    fn test_sorting_and_joining() {
        assert_eq!(int_array_desc(vec![3, 1, 2]), vec![3, 2, 1]);
        assert_eq!(join_with_commas(&[1, 2, 3]), "1,2,3");
        assert_eq!(join_with_commas(&[]), "");
        assert_eq!(implode("-", &["a", "b", "c"]), "a-b-c");
    }

    #[test]
    fn test_fill_flip_combine() {
        let filled = array_fill(5, 3, "x");
        assert_eq!(filled.keys().copied().collect::<Vec<_>>(), vec![5, 6, 7]);

        let mut map = HashMap::new();
        map.insert("a", 1);
        let flipped = array_flip(map);
        assert_eq!(flipped.get(&1), Some(&"a"));

        let combined = array_combine(vec!["x", "y"], vec![1, 2]).unwrap();
        assert_eq!(combined["y"], 2);
        assert!(array_combine(vec!["x"], vec![1, 2]).is_err());
        assert!(array_key_exists(&"x", &combined));
    }

    #[test]
    fn test_chunk_pad_slice() {
        let chunks = array_chunk(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert!(array_chunk(&[1], 0).is_err());

        assert_eq!(array_pad(vec![1, 2], 4, 0), vec![1, 2, 0, 0]);
        assert_eq!(array_pad(vec![1, 2], -4, 0), vec![0, 0, 1, 2]);
        assert_eq!(array_pad(vec![1, 2, 3], 2, 0), vec![1, 2, 3]);

        assert_eq!(array_slice(&[1, 2, 3, 4], 1, 2).unwrap(), vec![2, 3]);
        assert_eq!(array_slice(&[1, 2, 3, 4], 2, 10).unwrap(), vec![3, 4]);
        assert!(array_slice(&[1, 2], 3, 1).is_err());
    }

    #[test]
    fn test_stack_and_queue_ops() {
        let mut v = vec![2, 3];
        assert_eq!(array_push(&mut v, [4, 5]), 4);
        assert_eq!(array_pop(&mut v), Some(5));
        assert_eq!(array_unshift(&mut v, vec![0, 1]), 5);
        assert_eq!(v, vec![0, 1, 2, 3, 4]);
        assert_eq!(array_shift(&mut v), Some(0));
        assert_eq!(array_reverse(v), vec![4, 3, 2, 1]);

        let mut empty: Vec<i32> = Vec::new();
        assert_eq!(array_pop(&mut empty), None);
        assert_eq!(array_shift(&mut empty), None);
    }

    #[test]
    fn test_rand_is_permutation() {
        let items = vec![1, 2, 3, 4, 5, 6];
        let mut shuffled = array_rand(&items);
        shuffled.sort();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_array_column() {
        let rows: Vec<Map<String, Value>> = vec![
            json!({"id": 1, "name": "a"}).as_object().cloned().unwrap(),
            json!({"id": 2}).as_object().cloned().unwrap(),
            json!({"id": 3, "name": "c"}).as_object().cloned().unwrap(),
        ];
        assert_eq!(array_column(&rows, "name"), vec![json!("a"), json!("c")]);

        let mut keyed: HashMap<String, Map<String, Value>> = HashMap::new();
        keyed.insert("first".into(), rows[0].clone());
        assert_eq!(array_column(keyed.values(), "id"), vec![json!(1)]);
    }
}

use std::collections::HashMap;
use std::hash::Hash;

/// Visit the entries of `map` in ascending key order.
///
/// ```
/// use std::collections::HashMap;
///
/// let map = HashMap::from([(5, "five"), (2, "two")]);
/// let mut ordered = Vec::new();
/// cvkit::sortkit::ksort(&map, |k, v| ordered.push(format!("{}={}", k, v)));
/// assert_eq!(ordered, ["2=two", "5=five"]);
/// ```
pub fn ksort<K, V, F>(map: &HashMap<K, V>, mut f: F)
where
    K: Ord + Hash,
    F: FnMut(&K, &V),
{
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        f(key, value);
    }
}

pub fn sort_ints<T: Ord>(values: &mut [T]) {
    values.sort();
}

/// Ascending in IEEE total order, so NaN sorts last.
pub fn sort_floats(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

pub fn sort_strings<S: AsRef<str>>(values: &mut [S]) {
    values.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
}

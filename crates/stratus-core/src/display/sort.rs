//! Type-aware, multi-key row ordering.

use std::cmp::Ordering;

use super::column::ColumnDefinition;
use crate::graph::PropertyValue;

/// Compare two cell values
///
/// Timestamps compare chronologically, integers and then floats numerically;
/// anything else, including mixed pairs, compares as text with an absent
/// value treated as the empty string.
pub fn compare_values(a: Option<&PropertyValue>, b: Option<&PropertyValue>) -> Ordering {
    if let (Some(a), Some(b)) = (a, b) {
        if let (PropertyValue::Time { at: x, .. }, PropertyValue::Time { at: y, .. }) = (a, b) {
            return x.cmp(y);
        }
        if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
            return x.cmp(&y);
        }
        if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
            return x.total_cmp(&y);
        }
    }
    let text = |v: Option<&PropertyValue>| v.map(|v| v.to_string()).unwrap_or_default();
    text(a).cmp(&text(b))
}

/// Column indices for the declared sort keys, in declared order
///
/// Keys match a column's property or friendly name case-insensitively;
/// keys matching no column are skipped.
pub fn resolve_sort_keys(columns: &[ColumnDefinition], keys: &[String]) -> Vec<usize> {
    let mut resolved = Vec::new();
    for key in keys {
        if let Some(idx) = columns.iter().position(|c| c.matches_key(key)) {
            if !resolved.contains(&idx) {
                resolved.push(idx);
            }
        }
    }
    resolved
}

/// Stable ascending sort on the given value columns
pub fn sort_rows<R, F>(rows: &mut [R], keys: &[usize], value: F)
where
    F: Fn(&R, usize) -> Option<&PropertyValue>,
{
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        keys.iter().fold(Ordering::Equal, |acc, &k| {
            acc.then_with(|| compare_values(value(a, k), value(b, k)))
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PropertyValue {
        PropertyValue::from(s)
    }

    fn int(i: i64) -> PropertyValue {
        PropertyValue::Int(i)
    }

    fn float(f: f64) -> PropertyValue {
        PropertyValue::Float(f)
    }

    #[test]
    fn test_compare_numeric_before_text() {
        assert_eq!(compare_values(Some(&int(1)), Some(&int(4))), Ordering::Less);
        assert_eq!(compare_values(Some(&int(1)), Some(&int(1))), Ordering::Equal);
        assert_eq!(compare_values(Some(&int(1)), Some(&int(-3))), Ordering::Greater);
        assert_eq!(compare_values(Some(&v("10")), Some(&v("9"))), Ordering::Greater);
        assert_eq!(compare_values(Some(&float(1.2)), Some(&float(1.3))), Ordering::Less);
        assert_eq!(compare_values(Some(&float(1.2)), Some(&float(1.1))), Ordering::Greater);
        assert_eq!(compare_values(Some(&int(2)), Some(&float(1.5))), Ordering::Greater);
    }

    #[test]
    fn test_compare_text_and_absent() {
        assert_eq!(compare_values(Some(&v("abc")), Some(&v("bbc"))), Ordering::Less);
        assert_eq!(compare_values(Some(&v("abc")), Some(&v("aac"))), Ordering::Greater);
        assert_eq!(compare_values(None, Some(&v("a"))), Ordering::Less);
        assert_eq!(compare_values(Some(&v("10")), Some(&v("x"))), Ordering::Less);
    }

    #[test]
    fn test_compare_times() {
        let early = v("2016-12-10T08:35:37Z");
        let late = v("2016-12-22T11:13:23Z");
        assert_eq!(compare_values(Some(&early), Some(&late)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&early)), Ordering::Less);
    }

    #[test]
    fn test_resolve_skips_unknown_keys() {
        let cols = vec![
            ColumnDefinition::new("Id"),
            ColumnDefinition::new("State").with_friendly("S"),
        ];
        let keys = vec!["nope".to_string(), "s".to_string(), "ID".to_string()];
        assert_eq!(resolve_sort_keys(&cols, &keys), vec![1, 0]);
    }

    #[test]
    fn test_multi_key_sort_is_stable() {
        let mut rows = vec![
            ("redis", vec![Some(v("running")), Some(v("redis"))]),
            ("django", vec![Some(v("stopped")), Some(v("django"))]),
            ("apache", vec![Some(v("running")), Some(v("apache"))]),
        ];
        sort_rows(&mut rows, &[0, 1], |r, k| r.1[k].as_ref());
        let names: Vec<&str> = rows.iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["apache", "redis", "django"]);
    }
}

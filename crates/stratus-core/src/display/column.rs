//! Column declarations: which property to extract, how to format it and how
//! to truncate it.

use chrono::{DateTime, Utc};
use colored::Color;
use std::collections::BTreeMap;

use crate::graph::{Node, PropertyValue};

/// Budget applied in table format when a column sets none
pub const DEFAULT_TRUNCATE_SIZE: usize = 25;

const ELLIPSIS: &str = "...";

/// Labels shown instead of raw property keys in multi-type listings
const FRIENDLY_PROPERTY_NAMES: &[(&str, &str)] = &[
    ("PasswordLastUsedDate", "Password Last Used"),
    ("PrivateDns", "Private DNS"),
    ("PrivateIp", "Private IP"),
    ("PublicDns", "Public DNS"),
    ("PublicIp", "Public IP"),
];

/// Display label for a property key, the key itself when none is known
pub fn friendly_property_name(key: &str) -> &str {
    FRIENDLY_PROPERTY_NAMES
        .iter()
        .find(|(prop, _)| prop.eq_ignore_ascii_case(key))
        .map_or(key, |(_, friendly)| *friendly)
}

/// Display layout for timestamp columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `12/22/16 11:13`
    Short,
    /// `Dec 22, 2016 11:13`
    Basic,
    /// Relative age, e.g. `3 days ago`
    Humanize,
}

/// Which end of an overlong value is replaced by the ellipsis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncateSide {
    /// Keep the suffix: `...rge`
    #[default]
    Left,
    /// Keep the prefix: `i...`
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TruncatePolicy {
    pub size: Option<usize>,
    pub side: TruncateSide,
    pub disabled: bool,
}

impl TruncatePolicy {
    /// Effective budget, `None` when truncation is disabled
    pub fn budget(&self) -> Option<usize> {
        if self.disabled {
            None
        } else {
            Some(self.size.unwrap_or(DEFAULT_TRUNCATE_SIZE))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayStrategy {
    #[default]
    Plain,
    Time(TimeFormat),
    /// Exact cell text → foreground color
    Colored(BTreeMap<String, Color>),
}

/// One displayable column
///
/// ```
/// use stratus_core::display::{ColumnDefinition, TimeFormat};
///
/// let id = ColumnDefinition::new("Id").with_truncate_size(4).truncate_right();
/// let ip = ColumnDefinition::new("PublicIp").with_friendly("Public IP");
/// let seen = ColumnDefinition::new("PasswordLastUsedDate").with_time_format(TimeFormat::Short);
/// assert_eq!(ip.title(), "PUBLIC IP");
/// # let _ = (id, seen);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    prop: String,
    friendly: Option<String>,
    strategy: DisplayStrategy,
    truncate: TruncatePolicy,
}

impl ColumnDefinition {
    pub fn new(prop: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            friendly: None,
            strategy: DisplayStrategy::Plain,
            truncate: TruncatePolicy::default(),
        }
    }

    pub fn with_friendly(mut self, friendly: impl Into<String>) -> Self {
        self.friendly = Some(friendly.into());
        self
    }

    pub fn with_truncate_size(mut self, size: usize) -> Self {
        self.truncate.size = Some(size);
        self
    }

    pub fn truncate_right(mut self) -> Self {
        self.truncate.side = TruncateSide::Right;
        self
    }

    /// Never shrink this column's values; it may still be dropped to fit width
    pub fn without_truncate(mut self) -> Self {
        self.truncate.disabled = true;
        self
    }

    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.strategy = DisplayStrategy::Time(format);
        self
    }

    pub fn with_colored_values<I, K>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, Color)>,
        K: Into<String>,
    {
        self.strategy =
            DisplayStrategy::Colored(values.into_iter().map(|(k, c)| (k.into(), c)).collect());
        self
    }

    pub fn prop(&self) -> &str {
        &self.prop
    }

    /// Friendly name, falling back to the property key
    pub fn friendly(&self) -> &str {
        self.friendly.as_deref().unwrap_or(&self.prop)
    }

    /// Upper-cased header text
    pub fn title(&self) -> String {
        self.friendly().to_uppercase()
    }

    pub fn strategy(&self) -> &DisplayStrategy {
        &self.strategy
    }

    pub fn truncate_policy(&self) -> TruncatePolicy {
        self.truncate
    }

    /// Sort keys resolve against the property key or the friendly name
    pub fn matches_key(&self, key: &str) -> bool {
        self.prop.eq_ignore_ascii_case(key)
            || self
                .friendly
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(key))
    }

    pub fn extract(&self, node: &Node) -> Option<PropertyValue> {
        node.property(&self.prop).cloned()
    }

    /// Cell text for a value; absent or unparsable timestamps render empty
    pub fn format(&self, value: Option<&PropertyValue>, now: DateTime<Utc>) -> String {
        let Some(value) = value else {
            return String::new();
        };
        match &self.strategy {
            DisplayStrategy::Time(format) => value
                .as_time()
                .map(|t| format_time(t, *format, now))
                .unwrap_or_default(),
            DisplayStrategy::Plain | DisplayStrategy::Colored(_) => value.to_string(),
        }
    }

    pub fn color_for(&self, text: &str) -> Option<Color> {
        match &self.strategy {
            DisplayStrategy::Colored(map) => map.get(text).copied(),
            _ => None,
        }
    }
}

pub fn format_time(t: DateTime<Utc>, format: TimeFormat, now: DateTime<Utc>) -> String {
    match format {
        TimeFormat::Short => t.format("%m/%d/%y %H:%M").to_string(),
        TimeFormat::Basic => t.format("%b %-d, %Y %H:%M").to_string(),
        TimeFormat::Humanize => humanize(t, now),
    }
}

const UNITS: [(i64, &str); 7] = [
    (365 * 24 * 3600, "year"),
    (30 * 24 * 3600, "month"),
    (7 * 24 * 3600, "week"),
    (24 * 3600, "day"),
    (3600, "hour"),
    (60, "minute"),
    (1, "second"),
];

/// Relative age of `t` as seen from `now`
pub fn humanize(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(t).num_seconds();
    let (secs, suffix) = if delta >= 0 {
        (delta, "ago")
    } else {
        (-delta, "from now")
    };

    for (size, unit) in UNITS {
        if secs >= size {
            let n = secs / size;
            let plural = if n == 1 { "" } else { "s" };
            return format!("{} {}{} {}", n, unit, plural, suffix);
        }
    }
    "now".to_string()
}

/// Shrink `text` to at most `budget` characters
///
/// The removed part is replaced by `...`; budgets of three or fewer
/// characters cut without an ellipsis.
pub fn truncate(text: &str, budget: usize, side: TruncateSide) -> String {
    let len = text.chars().count();
    if len <= budget {
        return text.to_string();
    }
    if budget <= ELLIPSIS.len() {
        return match side {
            TruncateSide::Right => text.chars().take(budget).collect(),
            TruncateSide::Left => text.chars().skip(len - budget).collect(),
        };
    }

    let keep = budget - ELLIPSIS.len();
    match side {
        TruncateSide::Right => {
            let head: String = text.chars().take(keep).collect();
            format!("{}{}", head, ELLIPSIS)
        }
        TruncateSide::Left => {
            let tail: String = text.chars().skip(len - keep).collect();
            format!("{}{}", ELLIPSIS, tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_friendly_property_names() {
        assert_eq!(friendly_property_name("PublicIp"), "Public IP");
        assert_eq!(friendly_property_name("publicip"), "Public IP");
        assert_eq!(friendly_property_name("VpcId"), "VpcId");
    }

    #[test]
    fn test_truncate_sides() {
        assert_eq!(truncate("inst_1", 4, TruncateSide::Right), "i...");
        assert_eq!(truncate("t2.xlarge", 6, TruncateSide::Left), "...rge");
        assert_eq!(truncate("1.2.3.4", 5, TruncateSide::Left), "....4");
        assert_eq!(truncate("redis", 5, TruncateSide::Left), "redis");
    }

    #[test]
    fn test_truncate_tiny_budget_has_no_ellipsis() {
        assert_eq!(truncate("abcdef", 3, TruncateSide::Right), "abc");
        assert_eq!(truncate("abcdef", 2, TruncateSide::Left), "ef");
        assert_eq!(truncate("abcdef", 0, TruncateSide::Left), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ééééé", 4, TruncateSide::Right), "é...");
    }

    #[test]
    fn test_policy_budget() {
        assert_eq!(TruncatePolicy::default().budget(), Some(DEFAULT_TRUNCATE_SIZE));
        let col = ColumnDefinition::new("Name").without_truncate();
        assert_eq!(col.truncate_policy().budget(), None);
    }

    #[test]
    fn test_matches_prop_or_friendly() {
        let col = ColumnDefinition::new("PublicIp").with_friendly("Public IP");
        assert!(col.matches_key("publicip"));
        assert!(col.matches_key("PUBLIC IP"));
        assert!(!col.matches_key("ip"));
    }

    #[test]
    fn test_time_formats() {
        let t = Utc.with_ymd_and_hms(2016, 12, 22, 11, 13, 23).unwrap();
        assert_eq!(format_time(t, TimeFormat::Short, t), "12/22/16 11:13");
        assert_eq!(format_time(t, TimeFormat::Basic, t), "Dec 22, 2016 11:13");

        let now = Utc.with_ymd_and_hms(2016, 12, 25, 11, 13, 23).unwrap();
        assert_eq!(format_time(t, TimeFormat::Humanize, now), "3 days ago");
        assert_eq!(humanize(now, t), "3 days from now");
        assert_eq!(humanize(t, t), "now");
    }

    #[test]
    fn test_time_column_renders_unparsable_as_empty() {
        let col = ColumnDefinition::new("Created").with_time_format(TimeFormat::Short);
        let now = Utc::now();
        assert_eq!(col.format(Some(&PropertyValue::from("yesterday")), now), "");
        assert_eq!(col.format(None, now), "");
    }

    #[test]
    fn test_colored_lookup() {
        let col = ColumnDefinition::new("State").with_colored_values([("running", Color::Green)]);
        assert_eq!(col.color_for("running"), Some(Color::Green));
        assert_eq!(col.color_for("stopped"), None);
    }
}

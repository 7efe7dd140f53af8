//! Field keys and event names shared by operation logs and error reports.
//!
//! Macros emit these keys as bare identifiers; readers of captured or
//! JSON-formatted events look them up through the constants below.

/// Module path of the emitting code
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, e.g. `load_graph`
pub const FIELD_OP: &str = "op";
/// One of [`EVENT_START`], [`EVENT_END`], [`EVENT_END_ERROR`]
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

pub const FIELD_PATH: &str = "path";
pub const FIELD_FORMAT: &str = "format";

pub const FIELD_TRIPLE_COUNT: &str = "triple_count";
pub const FIELD_LOCAL_TRIPLES: &str = "local_triples";
pub const FIELD_REMOTE_TRIPLES: &str = "remote_triples";
pub const FIELD_ROW_COUNT: &str = "row_count";
pub const FIELD_INSERTED_COUNT: &str = "inserted_count";
pub const FIELD_DELETED_COUNT: &str = "deleted_count";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_fields_share_prefix() {
        assert!(FIELD_ERR_KIND.starts_with("err."));
        assert!(FIELD_ERR_CODE.starts_with("err."));
    }

    #[test]
    fn test_count_fields_are_snake_case() {
        for key in [
            FIELD_TRIPLE_COUNT,
            FIELD_LOCAL_TRIPLES,
            FIELD_REMOTE_TRIPLES,
            FIELD_ROW_COUNT,
            FIELD_INSERTED_COUNT,
            FIELD_DELETED_COUNT,
        ] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}

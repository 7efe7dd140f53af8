//! Operation boundary macros.
//!
//! Every instrumented operation emits exactly one `start` event and then
//! either one `end` or one `end_error` event, all carrying the same `op`.

/// Shared expansion of the boundary macros
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::stratus_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use stratus_core::log_op_start;
/// log_op_start!("display_print");
/// log_op_start!("display_print", format = "table");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation with its duration
///
/// ```
/// # use stratus_core::log_op_end;
/// log_op_end!("compute_diff", duration_ms = 3, inserted_count = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info, $op, EVENT_END,
            duration_ms = $duration $(, $($field)*)?
        )
    };
}

/// Log a failed operation
///
/// The error is converted into an [`ExError`](crate::errors::ExError) so the
/// event carries its kind and stable code.
///
/// ```
/// # use stratus_core::{log_op_error, errors::StratusError};
/// log_op_error!("display_print", StratusError::MissingRootNode, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error, $op, EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}

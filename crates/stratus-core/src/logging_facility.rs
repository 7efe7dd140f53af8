//! Structured operation logging.
//!
//! Loading a graph, computing a diff and printing a report each emit a
//! `start` event and a closing `end` or `end_error` event through the
//! `log_op_*` macros. Binaries pick an output [`Profile`] once with
//! [`init`]; tests record events with [`init_test_capture`].

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

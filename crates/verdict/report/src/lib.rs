//! Validation failure accumulation for request handlers.
//!
//! An [`ErrorReport`] collects (message, member key) failures while a
//! business operation runs, then hands out immutable
//! [`ErrorList`](verdict_types::ErrorList) snapshots or converts straight
//! into a 400 [`StatusEnvelope`](verdict_types::StatusEnvelope). Member keys
//! come from literal strings or from a [`MemberPath`] descriptor, so a typed
//! field access maps back to the key a client-side validation layer expects
//! (`"items[0]"`) without the caller hand-writing it.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod labels;
mod path;
mod report;
mod template;

pub use labels::{LabelSource, NoLabels};
pub use path::MemberPath;
pub use report::ErrorReport;

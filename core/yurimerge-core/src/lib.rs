//! yurimerge-core: folds the split libyuri headers into one `yuri.h`
//!
//! libyuri is developed as a handful of headers that include each other.
//! Users want a single drop-in header instead, so this crate stitches the
//! pieces together and throws away the lines that only make sense while
//! the headers are still separate.
//!
//! ## What gets dropped
//!
//! Every line that starts with one of these literal prefixes:
//!
//! - `#ifndef LIB` and `#define LIB` (per-header include guards)
//! - `#include "reflect.h"` (the cross-header include)
//! - `#endif` (guard close, and any other column-zero `#endif`)
//!
//! Everything else is copied byte for byte, in source order. The merged
//! document gets its own guard around the body.
//!
//! ## Example
//!
//! ```rust,no_run
//! use yurimerge_core::config::MergeConfig;
//! use yurimerge_core::merge::amalgamate;
//!
//! // Run from libyuri's src/ directory: reads reflect.h, serializer.h and
//! // deserializer.h, writes ../yuri.h.
//! let report = amalgamate(&MergeConfig::default())?;
//! println!("wrote {} lines to {}", report.lines_written, report.output.display());
//! #
//! # Ok::<(), yurimerge_core::error::MergeError>(())
//! ```
//!
//! ## Caveat
//!
//! The `#include "reflect.h"` filter relies on list order. If a header that
//! needs `reflect.h` is merged before it, the include still disappears; a
//! warning is logged through `tracing`, nothing is reordered.

pub mod config;
pub mod error;
pub mod filter;
pub mod merge;
pub mod output;

pub use config::MergeConfig;
pub use error::MergeError;
pub use merge::{amalgamate, check, render, CheckOutcome, MergeReport, SourceStats};

//! Wire message definitions.
//!
//! Each supported schema snapshot lives in its own submodule, named after
//! the upstream release it mirrors. Which snapshot a deployment speaks is
//! chosen at construction time through the version markers in
//! [`crate::handler`]; there is no process-wide default.
//!
//! Applications are written against the latest snapshot, re-exported at
//! this level. Older snapshots convert to and from it at the wire
//! boundary.

pub mod v0_22_8;
pub mod v0_31_5;

pub use v0_31_5::*;

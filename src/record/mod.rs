//! Log record model.
//!
//! - `level` - level ordinals and names
//! - `context` - typed context bag with consumable well-known keys
//! - `entry` - the record itself

pub mod context;
pub mod entry;
pub mod level;

pub use context::*;
pub use entry::*;
pub use level::*;

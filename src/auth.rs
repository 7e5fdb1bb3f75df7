//! Auth-domain identifiers, token models, and the per-run session state.

pub mod id;
pub mod session;
pub mod token;

pub use id::*;
pub use session::*;
pub use token::{record::*, secret::*};

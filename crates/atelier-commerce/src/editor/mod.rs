//! Admin-side editing of a product's variant list.
//!
//! Edits are staged in an [`EditingSession`] and only reach the backend as a
//! single [`SavePayload`].

mod session;

pub use session::{EditingSession, SavePayload};

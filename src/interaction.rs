//! Form-submission handling
//!
//! A submitted modal is routed by its view tag to exactly one of forward,
//! edit, or regenerate. Expected failures become notifications; anything
//! else is logged and reported to the UI as a failure acknowledgment.

mod dispatcher;
mod submission;

pub use dispatcher::{Acknowledgment, DispatchError, InteractionDispatcher};
pub use submission::{FieldAddress, ViewSubmission, ViewTag};

use crate::platform::{DatabaseStateStore, RestPlatform};

/// Dispatcher wired to SQLite state and the platform REST API
pub type ProductionDispatcher = InteractionDispatcher<DatabaseStateStore, RestPlatform>;

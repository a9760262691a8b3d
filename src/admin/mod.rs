pub mod draft;
pub mod form;
pub mod list;

pub use draft::{DraftError, EntityDraft};
pub use form::{FormMachine, FormPhase, SubmitOutcome};
pub use list::{Identified, ListScreen};

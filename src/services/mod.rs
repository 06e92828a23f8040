pub mod failure_journal;
pub mod persistence;
pub mod upload;

pub use failure_journal::FailureJournal;
pub use persistence::{ApiPersistence, SaveRequest, SavedRecord, WizardPersistence};
pub use upload::{DocumentUploader, LocalUploader, RemoteUploader};

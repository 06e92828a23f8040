pub mod client;
pub mod document;
pub mod draft;
pub mod form_value;
pub mod loaders;
pub mod procedure;

pub use client::{ClientOut, ClientRef, CreateClientRequest, MaritalStatus};
pub use document::{FileHandle, UploadedDocument};
pub use draft::{Draft, PendingUpload};
pub use form_value::FieldValue;
pub use loaders::{load_all_drafts, load_draft, parse_draft};
pub use procedure::ProcedureKind;

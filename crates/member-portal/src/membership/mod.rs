//! Membership applications: rejected-application mapping, the step wizard and resubmission.
//!
//! A rejected application's snapshot is mapped into the flat form the wizard edits, the
//! wizard opens on the step the reviewer's note points at, and the edited form goes back
//! upstream as comment, update and document uploads.

pub mod domain;
pub mod form;
pub mod gateway;
pub mod mapping;
pub mod router;
pub mod steps;
pub mod submission;
pub mod wizard;


pub use domain::{
    AddressType, CommentEntry, CommentPolicy, CommentType, DocumentType, MembershipId,
    MembershipType, RejectedApplication, UnknownMembershipType,
};
pub use form::FlatForm;
pub use gateway::MembershipGateway;
pub use mapping::{initial_step, map_rejection_data, table_for, MappingError, MappingTable};
pub use router::resubmission_router;
pub use steps::{steps_for, StepDefinition, StepKey};
pub use submission::{
    ApplicationOverview, DocumentUpload, ResubmissionDraft, ResubmissionPayload, ResubmissionRequest,
    ResubmissionService, ResubmissionServiceError, SubmissionError, SubmissionReceipt,
    SubmissionStage,
};
pub use wizard::{StepWizard, WizardError};

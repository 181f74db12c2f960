//! Application layer - Use cases and orchestration

pub mod form_session;
pub mod login_service;
pub mod view;

pub use form_session::{
    FormSession, LoadOutcome, LoadTicket, NextOutcome, SessionError, SubmitOutcome,
};
pub use login_service::{LoginError, LoginService};
pub use view::{Control, FieldView, FormView, OptionView, SessionView, SubmissionStatus};

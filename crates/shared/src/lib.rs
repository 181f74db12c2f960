//! Formwalk Shared - wire-format types for the form API
//!
//! This crate contains the JSON shapes exchanged with the remote form service:
//! - `form` - the `get-form` response and its conversion into a `FormSchema`
//! - `user` - the `create-user` request/response pair
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **Lenient in, strict out** - optional wire fields default, but every
//!    response is converted through the domain's invariant checks before use
//! 3. **camelCase on the wire** - matching the service's JSON

pub mod form;
pub mod user;

pub use form::{
    FieldDto, FieldValidationDto, FormDto, FormResponse, OptionDto, SchemaConversionError,
    SectionDto, WireId,
};
pub use user::{CreateUserRequest, CreateUserResponse};

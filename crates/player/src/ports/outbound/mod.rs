//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the form session to talk to the form service, deliver answers and
//! draw itself without depending on concrete implementations.

pub mod form_sink_port;
pub mod form_source_port;
pub mod identity_port;
pub mod render_surface_port;

pub use form_sink_port::{FormSinkPort, SubmitError};
pub use form_source_port::{FetchError, FormSourcePort};
pub use identity_port::{IdentityError, IdentityPort};
pub use render_surface_port::RenderSurfacePort;

#[cfg(any(test, feature = "testing"))]
pub use form_sink_port::MockFormSinkPort;
#[cfg(any(test, feature = "testing"))]
pub use form_source_port::MockFormSourcePort;
#[cfg(any(test, feature = "testing"))]
pub use identity_port::MockIdentityPort;
#[cfg(any(test, feature = "testing"))]
pub use render_surface_port::MockRenderSurfacePort;

//! Render Surface Port - where session views are drawn
//!
//! The form session calls `present` after every state change with a complete
//! view of what should be on screen. Implementations must not call back into
//! the session.

use crate::application::view::SessionView;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RenderSurfacePort: Send + Sync {
    fn present(&self, view: &SessionView);
}

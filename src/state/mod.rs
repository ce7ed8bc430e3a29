//! Application state module

mod app_state;
mod choices;
mod draft;
mod store;

pub use app_state::*;
pub use choices::*;
pub use draft::*;
pub use store::*;

//! Form rendering module
//!
//! - `field_renderer`: single field widgets and error lines
//! - `choice_list`: the editable choice rows
//! - `field_form`: the assembled field builder form

mod choice_list;
mod field_form;
mod field_renderer;

pub use field_form::draw_field_form;

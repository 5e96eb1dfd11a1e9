//! Page handlers.

pub mod link_form;
pub mod redirect;

pub use link_form::{link_form_handler, link_form_submit_handler};
pub use redirect::redirect_page_handler;

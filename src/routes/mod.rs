//! Route handlers behind `handle_request`. Each returns an HTML (or JSON)
//! fragment for HTMX to swap into the page.

pub mod gems;
pub mod util;

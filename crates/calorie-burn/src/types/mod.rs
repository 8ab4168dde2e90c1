//! Request and response bodies for the HTTP API.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;

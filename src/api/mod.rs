pub mod handler;
pub mod helpers;

pub use handler::{Services, function_handler, handle_request};

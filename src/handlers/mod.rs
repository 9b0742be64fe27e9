pub mod convert;
pub mod health;

pub use convert::{convert_form_handler, convert_query_handler};
pub use health::{health_handler, openapi_handler};

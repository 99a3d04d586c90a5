pub mod error;

pub use error::{domain_error, gate_rejection, handle_domain_error, handle_validation_error};

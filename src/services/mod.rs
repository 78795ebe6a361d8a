//! Business operations, generic over the repository traits.

pub mod auth;
pub mod contact;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};

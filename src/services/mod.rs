pub mod authorization;

pub use authorization::{AuthorizationError, AuthorizationResolver};

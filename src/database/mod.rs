pub mod manager;
pub mod repository;
pub mod store;

pub use manager::{ConnectionTarget, DatabaseError, DatabaseManager};
pub use repository::{PgAppSupportStore, PgEmployeeStore};
pub use store::{AppSupportStore, EmployeeStore};

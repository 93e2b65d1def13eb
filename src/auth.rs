//! App credentials, tenant access tokens, and the manager that keeps them fresh.

pub mod credentials;
pub mod manager;
pub mod token;

pub use credentials::*;
pub use manager::*;
pub use token::{record::*, secret::*};

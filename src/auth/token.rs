//! Tenant token models.

pub mod record;
pub mod secret;

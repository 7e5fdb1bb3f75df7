//! Token secrets and the records issued by the token endpoint.

pub mod record;
pub mod secret;

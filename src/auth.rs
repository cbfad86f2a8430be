//! Auth-domain types: redacted secrets, grant kinds, and the held credential pair.

pub mod grant;
pub mod secret;

pub(crate) mod credentials;

pub use grant::*;
pub use secret::*;

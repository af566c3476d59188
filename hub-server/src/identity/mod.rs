//! Identity
//!
//! Phone-number identity over an email-shaped credential layer: credential
//! records (argon2), JWT session tokens, the customer profile store and the
//! local session cache.

pub mod credential;
pub mod extractor;
pub mod jwt;
pub mod service;

pub use credential::CredentialService;
pub use extractor::{AdminUser, CurrentUser};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use service::IdentityService;

//! `claimtrack-auth`: pure authentication/authorization boundary.
//!
//! Tokens are decoded once at the transport edge into an explicit
//! [`Session`] carrying a resolved capability set. Handlers receive the
//! session and ask [`has_capability`]; nothing reads ambient role state.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod capability;
pub mod claims;
pub mod jwt;
pub mod roles;
pub mod session;

pub use capability::Capability;
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use roles::{Role, capabilities_for_role};
pub use session::{AuthzError, Session, authorize, has_capability};

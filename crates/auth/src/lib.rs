//! `consultdesk-auth` — session tokens, roles and the authorization gate.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod gate;
pub mod paths;
pub mod principal;
pub mod roles;
pub mod token;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use gate::{Gate, GateOutcome};
pub use paths::{PathClass, PathRules};
pub use principal::{CallerIdentity, UserId};
pub use roles::{Role, RoleParseError};
pub use token::{SessionTokens, SessionVerifier, TokenError};

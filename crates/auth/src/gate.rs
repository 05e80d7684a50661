//! Per-request authorization decision.
//!
//! Transport-agnostic: the caller supplies the request path and the raw
//! session cookie value, and turns the outcome into a forward or a redirect.
//! Nothing is retained between calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::paths::PathRules;
use crate::token::{SessionVerifier, TokenError};
use crate::{CallerIdentity, Role};

/// Terminal state of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Public or unmatched path; forward untouched.
    PublicPass,
    /// Protected path without a session cookie.
    NoToken,
    /// Cookie present but verification failed; the cookie must be cleared.
    TokenInvalid(TokenError),
    /// Valid session, wrong role for the path.
    RoleDenied {
        identity: CallerIdentity,
        required: Role,
    },
    /// Forward with identity attached.
    Authorized(CallerIdentity),
}

impl GateOutcome {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GateOutcome::PublicPass => "public_pass",
            GateOutcome::NoToken => "no_token",
            GateOutcome::TokenInvalid(_) => "token_invalid",
            GateOutcome::RoleDenied { .. } => "role_denied",
            GateOutcome::Authorized(_) => "authorized",
        }
    }

}

/// The authorization gate: verifier plus path rules, both fixed at startup.
#[derive(Clone)]
pub struct Gate {
    verifier: Arc<dyn SessionVerifier>,
    rules: Arc<PathRules>,
}

impl Gate {
    pub fn new(verifier: Arc<dyn SessionVerifier>, rules: PathRules) -> Self {
        Self {
            verifier,
            rules: Arc::new(rules),
        }
    }

    pub fn evaluate(&self, path: &str, token: Option<&str>, now: DateTime<Utc>) -> GateOutcome {
        let Some(required) = self.rules.classify(path).required_role() else {
            return GateOutcome::PublicPass;
        };

        // An empty cookie value carries no credential at all.
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return GateOutcome::NoToken;
        };

        let identity = match self.verifier.verify(token, now) {
            Ok(claims) => claims.identity(),
            Err(err) => return GateOutcome::TokenInvalid(err),
        };

        if identity.role != required {
            return GateOutcome::RoleDenied { identity, required };
        }

        GateOutcome::Authorized(identity)
    }
}

impl core::fmt::Debug for Gate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gate").field("rules", &self.rules).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SessionTokens;
    use chrono::Duration;
    use proptest::prelude::*;

    const SECRET: &[u8] = b"gate-secret";

    fn tokens() -> SessionTokens {
        SessionTokens::new(SECRET, Duration::hours(24))
    }

    fn gate() -> Gate {
        Gate::new(Arc::new(tokens()), PathRules::standard())
    }

    fn token_for(user_id: &str, role: Role) -> String {
        tokens()
            .issue(&CallerIdentity::new(user_id, role), Utc::now())
            .unwrap()
    }

    #[test]
    fn public_path_passes_with_or_without_cookie() {
        let now = Utc::now();
        let g = gate();
        assert_eq!(g.evaluate("/login", None, now), GateOutcome::PublicPass);
        assert_eq!(g.evaluate("/login", Some("garbage"), now), GateOutcome::PublicPass);
        assert_eq!(
            g.evaluate("/", Some(&token_for("u1", Role::Admin)), now),
            GateOutcome::PublicPass
        );
    }

    #[test]
    fn outside_paths_are_not_gated() {
        assert_eq!(gate().evaluate("/health", None, Utc::now()), GateOutcome::PublicPass);
    }

    #[test]
    fn missing_or_empty_cookie_is_no_token() {
        let now = Utc::now();
        assert_eq!(gate().evaluate("/admin/dashboard", None, now), GateOutcome::NoToken);
        assert_eq!(gate().evaluate("/dashboard", Some(""), now), GateOutcome::NoToken);
    }

    #[test]
    fn foreign_signature_is_token_invalid() {
        let other = SessionTokens::new(b"different", Duration::hours(1));
        let token = other
            .issue(&CallerIdentity::new("u1", Role::Admin), Utc::now())
            .unwrap();

        let outcome = gate().evaluate("/admin/dashboard", Some(&token), Utc::now());
        assert_eq!(outcome, GateOutcome::TokenInvalid(TokenError::BadSignature));
    }

    #[test]
    fn user_on_admin_path_is_denied() {
        let outcome = gate().evaluate(
            "/admin/dashboard",
            Some(&token_for("u1", Role::User)),
            Utc::now(),
        );
        assert_eq!(
            outcome,
            GateOutcome::RoleDenied {
                identity: CallerIdentity::new("u1", Role::User),
                required: Role::Admin,
            }
        );
    }

    #[test]
    fn admin_on_tenant_path_is_denied() {
        let outcome = gate().evaluate("/api/empresas", Some(&token_for("a1", Role::Admin)), Utc::now());
        assert_eq!(outcome.kind(), "role_denied");
    }

    #[test]
    fn admin_on_admin_path_is_authorized() {
        let outcome = gate().evaluate(
            "/admin/dashboard",
            Some(&token_for("u1", Role::Admin)),
            Utc::now(),
        );
        assert_eq!(
            outcome,
            GateOutcome::Authorized(CallerIdentity::new("u1", Role::Admin))
        );
    }

    #[test]
    fn user_on_tenant_path_is_authorized() {
        let outcome = gate().evaluate("/dashboard/xyz", Some(&token_for("u2", Role::User)), Utc::now());
        assert_eq!(
            outcome,
            GateOutcome::Authorized(CallerIdentity::new("u2", Role::User))
        );
    }

    #[test]
    fn expired_session_is_token_invalid() {
        let issued = Utc::now() - Duration::days(2);
        let token = tokens()
            .issue(&CallerIdentity::new("u1", Role::User), issued)
            .unwrap();
        let outcome = gate().evaluate("/dashboard", Some(&token), Utc::now());
        assert_eq!(outcome.kind(), "token_invalid");
    }

    proptest! {
        #[test]
        fn authorized_identity_matches_token(user_id in "[A-Za-z0-9_-]{1,40}", admin in any::<bool>()) {
            let (role, path) = if admin {
                (Role::Admin, "/api/admin/usuarios")
            } else {
                (Role::User, "/api/problemas")
            };
            let token = token_for(&user_id, role);
            let outcome = gate().evaluate(path, Some(&token), Utc::now());
            prop_assert_eq!(outcome, GateOutcome::Authorized(CallerIdentity::new(user_id, role)));
        }

        #[test]
        fn evaluation_is_idempotent(user_id in "[a-z0-9]{1,16}", path in prop::sample::select(vec![
            "/", "/login", "/admin", "/admin/dashboard", "/dashboard/x", "/api/auth/me", "/health",
        ])) {
            let g = gate();
            let now = Utc::now();
            let token = token_for(&user_id, Role::User);
            prop_assert_eq!(g.evaluate(path, Some(&token), now), g.evaluate(path, Some(&token), now));
        }
    }
}

//! Static classification of request paths.
//!
//! Prefixes are matched per path segment: `/admin` covers `/admin` and
//! `/admin/...`, but not `/administrator`.

use std::borrow::Cow;

use crate::Role;

/// Where a request path falls in the URL space.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathClass {
    /// Home, login and signup. Never requires a session.
    Public,
    /// Staff area; requires `ADMIN`.
    AdminScoped,
    /// Company dashboard and its APIs; requires `USER`.
    TenantScoped,
    /// Not covered by any matcher; the gate does not apply.
    Outside,
}

impl PathClass {
    pub fn required_role(&self) -> Option<Role> {
        match self {
            PathClass::AdminScoped => Some(Role::Admin),
            PathClass::TenantScoped => Some(Role::User),
            PathClass::Public | PathClass::Outside => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRules {
    public: Vec<Cow<'static, str>>,
    admin: Vec<Cow<'static, str>>,
    tenant: Vec<Cow<'static, str>>,
}

impl PathRules {
    pub fn new(
        public: Vec<Cow<'static, str>>,
        admin: Vec<Cow<'static, str>>,
        tenant: Vec<Cow<'static, str>>,
    ) -> Self {
        Self {
            public,
            admin,
            tenant,
        }
    }

    /// The application's route layout.
    pub fn standard() -> Self {
        Self::new(
            vec!["/".into(), "/login".into(), "/cadastro".into()],
            vec!["/admin".into(), "/api/admin".into()],
            vec![
                "/dashboard".into(),
                "/api/empresas".into(),
                "/api/problemas".into(),
                "/api/auth/me".into(),
            ],
        )
    }

    /// Add a public path (e.g. a relocated login page) ahead of every scope.
    pub fn with_public(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.public.push(path.into());
        self
    }

    /// Public first, then admin, then tenant.
    pub fn classify(&self, path: &str) -> PathClass {
        if self.public.iter().any(|p| under(path, p)) {
            PathClass::Public
        } else if self.admin.iter().any(|p| under(path, p)) {
            PathClass::AdminScoped
        } else if self.tenant.iter().any(|p| under(path, p)) {
            PathClass::TenantScoped
        } else {
            PathClass::Outside
        }
    }
}

impl Default for PathRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn under(path: &str, prefix: &str) -> bool {
    // "/" is the home page only, not a prefix of everything.
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

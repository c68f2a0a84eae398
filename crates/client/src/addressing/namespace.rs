//! User/app scoping of REST paths.

use std::fmt;

use crate::addressing::resource_name::ResourceName;

/// Splunk's wildcard for "any user" or "any app".
pub const WILDCARD: &str = "-";

/// One half of a [`Namespace`]: either a concrete name or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Matches every user (or app).
    Any,
    /// A concrete user (or app) name.
    Named(String),
}

impl Scope {
    /// The segment used in a `servicesNS` path.
    pub fn as_segment(&self) -> &str {
        match self {
            Self::Any => WILDCARD,
            Self::Named(name) => name,
        }
    }

    /// True for [`Scope::Any`].
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            Self::Any
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        if value == WILDCARD {
            Self::Any
        } else {
            Self::Named(value)
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

/// The (user, app) prefix under which a resource path is addressed.
///
/// The default namespace renders as `services`; a scoped one as
/// `servicesNS/{user}/{app}`.
///
/// ```
/// use splunk_sdk::{Namespace, Scope};
///
/// assert_eq!(Namespace::Default.to_string(), "services");
/// assert_eq!(Namespace::new("nobody", "search").to_string(), "servicesNS/nobody/search");
/// assert_eq!(Namespace::new(Scope::Any, "-").to_string(), "servicesNS/-/-");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// The server's default context: the logged-in user and the default app.
    #[default]
    Default,
    /// An explicit user/app scope.
    Scoped { user: Scope, app: Scope },
}

impl Namespace {
    /// A scoped namespace.
    pub fn new(user: impl Into<Scope>, app: impl Into<Scope>) -> Self {
        Self::Scoped {
            user: user.into(),
            app: app.into(),
        }
    }

    /// Every user and every app.
    pub fn any() -> Self {
        Self::new(Scope::Any, Scope::Any)
    }

    /// The user half, if scoped.
    pub fn user(&self) -> Option<&Scope> {
        match self {
            Self::Default => None,
            Self::Scoped { user, .. } => Some(user),
        }
    }

    /// The app half, if scoped.
    pub fn app(&self) -> Option<&Scope> {
        match self {
            Self::Default => None,
            Self::Scoped { app, .. } => Some(app),
        }
    }

    /// True if either half is the wildcard.
    pub fn has_wildcard(&self) -> bool {
        match self {
            Self::Default => false,
            Self::Scoped { user, app } => user.is_wildcard() || app.is_wildcard(),
        }
    }

    /// The namespace as leading path segments.
    pub fn prefix(&self) -> ResourceName {
        match self {
            Self::Default => ResourceName::new(["services"]),
            Self::Scoped { user, app } => {
                ResourceName::new(["servicesNS", user.as_segment(), app.as_segment()])
            }
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.prefix(), f)
    }
}

//! Viewer roles.
//!
//! Roles are resolved outside the console (identity provider, config file or
//! command line) and handed in as plain identifiers.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Roles the console knows how to act on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum RoleName {
    /// Platform administrator. Unlocks shared services, the dashboard and cost data.
    TREAdmin,
    /// Regular platform user.
    TREUser,
}

/// The unordered set of role identifiers held by the current viewer.
///
/// Unknown identifiers are kept as-is; they simply never match a [`RoleName`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        roles.into_iter().collect()
    }

    /// Parses a comma separated list such as `"TREAdmin, TREUser"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, role: RoleName) -> bool {
        self.roles.contains(role.to_string().as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.contains(RoleName::TREAdmin)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let roles = iter
            .into_iter()
            .map(|role| role.as_ref().trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        Self { roles }
    }
}

impl Display for RoleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.roles.is_empty() {
            return write!(f, "(none)");
        }
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

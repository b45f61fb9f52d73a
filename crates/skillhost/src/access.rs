//! Group-based access control for skills.
//!
//! A skill restricts visibility by listing user and admin groups in its
//! config. The check is a pure intersection test over the caller's group
//! memberships: whole-skill, binary, safe for concurrent evaluation.

/// Access policy derived from a skill's config.
///
/// Unrestricted iff both group lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    pub user_groups: Vec<String>,
    pub admin_groups: Vec<String>,
}

impl AccessPolicy {
    pub fn new(user_groups: Vec<String>, admin_groups: Vec<String>) -> Self {
        Self {
            user_groups,
            admin_groups,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.user_groups.is_empty() && self.admin_groups.is_empty()
    }

    /// Allow iff unrestricted, or the caller belongs to at least one of the
    /// configured user or admin groups.
    pub fn allows(&self, caller_groups: &[String]) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        caller_groups
            .iter()
            .any(|g| self.user_groups.contains(g) || self.admin_groups.contains(g))
    }
}

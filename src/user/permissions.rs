use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ViewRecords,
    EditRecords,
    GenerateDocuments,
    ManageUsers,
}

const VIEWER_PERMISSIONS: &[Permission] = &[Permission::ViewRecords];
const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewRecords,
    Permission::EditRecords,
    Permission::GenerateDocuments,
];
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewRecords,
    Permission::EditRecords,
    Permission::GenerateDocuments,
    Permission::ManageUsers,
];

/// Roles form a strict hierarchy: every role includes what the roles below
/// it can do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Viewer,
    Manager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Viewer, UserRole::Manager, UserRole::Admin];

    pub fn level(self) -> u8 {
        match self {
            UserRole::Viewer => 1,
            UserRole::Manager => 2,
            UserRole::Admin => 3,
        }
    }

    /// True when this role is at least as privileged as `required`.
    pub fn has_role(self, required: UserRole) -> bool {
        self.level() >= required.level()
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            UserRole::Viewer => VIEWER_PERMISSIONS,
            UserRole::Manager => MANAGER_PERMISSIONS,
            UserRole::Admin => ADMIN_PERMISSIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Viewer => "viewer",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(UserRole::Viewer),
            "manager" => Some(UserRole::Manager),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_hierarchy() {
        assert_eq!(UserRole::Viewer.level(), 1);
        assert_eq!(UserRole::Manager.level(), 2);
        assert_eq!(UserRole::Admin.level(), 3);
    }

    #[test]
    fn has_role_compares_levels() {
        assert!(UserRole::Admin.has_role(UserRole::Viewer));
        assert!(UserRole::Admin.has_role(UserRole::Admin));
        assert!(UserRole::Manager.has_role(UserRole::Viewer));
        assert!(!UserRole::Manager.has_role(UserRole::Admin));
        assert!(!UserRole::Viewer.has_role(UserRole::Manager));
    }

    #[test]
    fn permissions_accumulate() {
        assert_eq!(UserRole::Viewer.permissions(), &[Permission::ViewRecords]);
        assert!(UserRole::Manager
            .permissions()
            .contains(&Permission::GenerateDocuments));
        assert!(!UserRole::Manager
            .permissions()
            .contains(&Permission::ManageUsers));
        assert!(UserRole::Admin
            .permissions()
            .contains(&Permission::ManageUsers));
    }

    #[test]
    fn role_from_str_is_case_insensitive() {
        assert_eq!(UserRole::from_str("Manager"), Some(UserRole::Manager));
        assert_eq!(UserRole::from_str("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("owner"), None);
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
    }
}

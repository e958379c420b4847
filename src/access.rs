//! Role gating for the navigation menu.

pub use crate::user::{Permission, UserRole};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub min_role: UserRole,
}

const fn nav(label: &'static str, path: &'static str, min_role: UserRole) -> NavItem {
    NavItem {
        label,
        path,
        min_role,
    }
}

pub const NAVIGATION: &[NavItem] = &[
    nav("Dashboard", "/", UserRole::Viewer),
    nav("Billboards", "/billboards", UserRole::Viewer),
    nav("Clients", "/clients", UserRole::Viewer),
    nav("Rentals", "/rentals", UserRole::Viewer),
    nav("Payments", "/payments", UserRole::Viewer),
    nav("Invoices", "/invoices", UserRole::Manager),
    nav("Reports", "/reports", UserRole::Viewer),
    nav("Partners", "/partners", UserRole::Manager),
    nav("Land Owners", "/land-owners", UserRole::Manager),
    nav("Users", "/users", UserRole::Admin),
];

pub fn navigation_for(role: UserRole) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .filter(|item| role.has_role(item.min_role))
        .copied()
        .collect()
}

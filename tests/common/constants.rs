//! Shared constants for end-to-end tests
//!
//! When seeded users or business data change, update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

pub const VIEWER_USER: &str = "viewer";
pub const VIEWER_PASS: &str = "viewerpass123";

pub const MANAGER_USER: &str = "manager";
pub const MANAGER_PASS: &str = "managerpass123";

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "adminpass123";

// ============================================================================
// Seeded Business Data
// ============================================================================

pub const RENTED_BILLBOARD_IDENTIFIER: &str = "BB-001";
pub const RENTED_BILLBOARD_LOCATION: &str = "Gulshan Avenue";
pub const FREE_BILLBOARD_IDENTIFIER: &str = "BB-002";
pub const FREE_BILLBOARD_LOCATION: &str = "Dhanmondi 27";

/// Monthly rent of the rented billboard.
pub const MONTHLY_RENT: f64 = 50_000.0;
pub const INSTALLATION_COSTS: [f64; 2] = [200_000.0, 100_000.0];
pub const PARTNER_PERCENTAGE: f64 = 60.0;
pub const PARTNER_INVESTMENT: f64 = 180_000.0;

pub const CLIENT_COMPANY: &str = "Grameenphone";
pub const PARTNER_NAME: &str = "Rahman Holdings";
pub const LAND_OWNER_NAME: &str = "Abdul Karim";

pub const COMPLETED_PAYMENT_AMOUNT: f64 = 50_000.0;
pub const PENDING_PAYMENT_AMOUNT: f64 = 45_000.0;
pub const COMPLETED_RECEIPT_ID: &str = "INV-20240105-0001";

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

//! Money arithmetic over already-loaded rows.
//!
//! Everything here is plain `f64` math with no rounding. Divisions by a zero
//! investment are only guarded where noted; elsewhere they produce `inf` or
//! `NaN`, which [`format_percentage`] renders as `Infinity%` / `NaN%`.

mod reports;
mod summaries;

pub use reports::{
    billboard_profitability, dashboard, partnership_report, BillboardProfitability,
    DashboardStats, MonthlyRevenue, PartnershipReportRow, StatusCount,
};
pub use summaries::{
    billboard_installation_details, billboard_profit_summaries, billboard_profit_summary,
    client_summary, land_owner_summary, partner_profit_shares, partner_summary,
    BillboardInstallationDetails, BillboardProfitSummary, ClientSummary, InstallationPartnerShare,
    LandOwnerSummary, PartnerInvestmentReturn, PartnerProfitShare, PartnerSummary,
};

use chrono::NaiveDate;
use serde::Serialize;

/// Statuses counted as money actually collected.
const SETTLED_PAYMENT_STATUSES: &[&str] = &["received", "paid", "completed"];

pub fn is_settled(status: &str) -> bool {
    let status = status.to_lowercase();
    SETTLED_PAYMENT_STATUSES.contains(&status.as_str())
}

pub fn is_pending(status: &str) -> bool {
    status.eq_ignore_ascii_case("pending")
}

/// Money totals start from `+0.0`. `Iterator::sum` over no `f64` gives
/// `-0.0`, which flips the sign of anything later divided by it.
pub trait Total: Iterator<Item = f64> + Sized {
    fn total(self) -> f64 {
        self.fold(0.0, |acc, amount| acc + amount)
    }
}

impl<I: Iterator<Item = f64>> Total for I {}

pub fn profit(yearly_rental: f64, total_installation_cost: f64) -> f64 {
    yearly_rental - total_installation_cost
}

/// Positive profits (including zero) are shown in the positive colour.
pub fn is_profitable(profit: f64) -> bool {
    profit >= 0.0
}

/// `(revenue - investment) / investment * 100`, unguarded.
pub fn roi(revenue: f64, investment: f64) -> f64 {
    (revenue - investment) / investment * 100.0
}

/// `margin / cost * 100`, unguarded.
pub fn roi_from_margin(margin: f64, cost: f64) -> f64 {
    margin / cost * 100.0
}

/// Like [`roi`] but yields 0 when there is nothing invested.
pub fn guarded_roi(revenue: f64, investment: f64) -> f64 {
    if investment > 0.0 {
        roi(revenue, investment)
    } else {
        0.0
    }
}

pub fn share(total: f64, percentage: f64) -> f64 {
    total * percentage / 100.0
}

pub fn yearly_partner_income(monthly_rent: f64, percentage: f64) -> f64 {
    share(monthly_rent * 12.0, percentage)
}

/// Length of a date range in 30-day months, rounded to the nearest month.
///
/// Halves round up, towards positive infinity, so a reversed range of half
/// a month is 0 rather than -1.
pub fn duration_months(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days() as f64;
    (days / 30.0 + 0.5).floor() as i64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RentalPaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl RentalPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalPaymentStatus::Paid => "Paid",
            RentalPaymentStatus::Partial => "Partial",
            RentalPaymentStatus::Unpaid => "Unpaid",
        }
    }
}

/// Collapses the statuses of a rental's payments into one.
///
/// A rental with no payments counts as paid.
pub fn rental_payment_status<'a, I>(statuses: I) -> RentalPaymentStatus
where
    I: IntoIterator<Item = &'a str>,
{
    let statuses: Vec<&str> = statuses.into_iter().collect();
    if statuses.iter().all(|s| is_settled(s)) {
        RentalPaymentStatus::Paid
    } else if statuses.iter().any(|s| is_pending(s)) {
        RentalPaymentStatus::Partial
    } else {
        RentalPaymentStatus::Unpaid
    }
}

pub fn format_percentage(value: f64) -> String {
    if value.is_nan() {
        "NaN%".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity%".to_string()
        } else {
            "-Infinity%".to_string()
        }
    } else {
        format!("{:.1}%", value)
    }
}

/// A ratio as sent to clients: the raw number (null in JSON when not
/// finite) next to its rendering.
#[derive(Clone, Debug, Serialize)]
pub struct Percentage {
    pub value: f64,
    pub display: String,
}

impl From<f64> for Percentage {
    fn from(value: f64) -> Self {
        Percentage {
            value,
            display: format_percentage(value),
        }
    }
}

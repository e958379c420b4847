use super::{is_pending, is_settled, roi, share, Percentage, Total};
use crate::business_store::BusinessSnapshot;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize)]
pub struct PartnershipReportRow {
    pub partner_id: String,
    pub partner_name: String,
    pub total_investment: f64,
    pub billboard_count: usize,
    pub monthly_revenue: f64,
    pub annual_revenue: f64,
    pub profit_margin: f64,
    pub roi: Percentage,
}

/// Revenue each partner draws from their stakes, against what they put in.
pub fn partnership_report(snapshot: &BusinessSnapshot) -> Vec<PartnershipReportRow> {
    snapshot
        .partners
        .iter()
        .map(|partner| {
            let investments: Vec<_> = snapshot
                .investments
                .iter()
                .filter(|i| i.fields.partner_id == partner.id)
                .collect();
            let billboards: Vec<_> = snapshot
                .billboards
                .iter()
                .filter(|b| investments.iter().any(|i| i.fields.billboard_id == b.id))
                .collect();

            let total_investment: f64 = investments
                .iter()
                .map(|i| i.fields.investment_amount)
                .total();
            let monthly_revenue: f64 = billboards
                .iter()
                .map(|b| {
                    let percentage = investments
                        .iter()
                        .find(|i| i.fields.billboard_id == b.id)
                        .map(|i| i.fields.investment_percentage)
                        .unwrap_or(0.0);
                    share(b.fields.rent_amount.unwrap_or(0.0), percentage)
                })
                .total();
            let annual_revenue = monthly_revenue * 12.0;

            PartnershipReportRow {
                partner_id: partner.id.clone(),
                partner_name: partner.fields.name.clone(),
                total_investment,
                billboard_count: billboards.len(),
                monthly_revenue,
                annual_revenue,
                profit_margin: annual_revenue - total_investment,
                roi: roi(annual_revenue, total_investment).into(),
            }
        })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct BillboardProfitability {
    pub billboard_id: String,
    pub billboard_identifier: Option<String>,
    pub location: String,
    pub monthly_rent: f64,
    pub annual_revenue: f64,
    pub total_cost: f64,
    pub roi: Percentage,
    /// Years of rent needed to cover the cost; `null` when the billboard
    /// earns nothing.
    pub payback_years: f64,
}

pub fn billboard_profitability(snapshot: &BusinessSnapshot) -> Vec<BillboardProfitability> {
    snapshot
        .billboards
        .iter()
        .map(|b| {
            let monthly_rent = b.fields.rent_amount.unwrap_or(0.0);
            let annual_revenue = monthly_rent * 12.0;
            let total_cost: f64 = snapshot
                .installation_costs
                .iter()
                .filter(|c| c.fields.billboard_id == b.id)
                .map(|c| c.fields.amount)
                .total();
            BillboardProfitability {
                billboard_id: b.id.clone(),
                billboard_identifier: b.fields.billboard_identifier.clone(),
                location: b.fields.location.clone(),
                monthly_rent,
                annual_revenue,
                total_cost,
                roi: roi(annual_revenue, total_cost).into(),
                payback_years: total_cost / annual_revenue,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub pending_amount: f64,
    pub total_billboards: usize,
    pub active_billboards: usize,
    pub active_rentals: usize,
    pub client_count: usize,
    pub billboard_status: Vec<StatusCount>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
}

pub fn dashboard(snapshot: &BusinessSnapshot) -> DashboardStats {
    let settled = snapshot
        .payments
        .iter()
        .filter(|p| is_settled(&p.fields.status));

    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
    for payment in settled.clone() {
        *by_month
            .entry(payment.fields.payment_date.format("%Y-%m").to_string())
            .or_insert(0.0) += payment.fields.amount;
    }

    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    for billboard in &snapshot.billboards {
        *by_status.entry(billboard.fields.status.as_str()).or_insert(0) += 1;
    }

    DashboardStats {
        total_revenue: settled.map(|p| p.fields.amount).total(),
        pending_amount: snapshot
            .payments
            .iter()
            .filter(|p| is_pending(&p.fields.status))
            .map(|p| p.fields.amount)
            .total(),
        total_billboards: snapshot.billboards.len(),
        active_billboards: snapshot
            .billboards
            .iter()
            .filter(|b| b.fields.status.eq_ignore_ascii_case("rented"))
            .count(),
        active_rentals: snapshot
            .rentals
            .iter()
            .filter(|r| r.fields.status.eq_ignore_ascii_case("active"))
            .count(),
        client_count: snapshot.clients.len(),
        billboard_status: by_status
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect(),
        revenue_by_month: by_month
            .into_iter()
            .map(|(month, amount)| MonthlyRevenue { month, amount })
            .collect(),
    }
}

use super::{
    guarded_roi, is_pending, is_profitable, profit, roi_from_margin, share, yearly_partner_income,
    Percentage, Total,
};
use crate::business_store::{
    BillboardRecord, BusinessSnapshot, ClientPaymentRecord, InstallationCostRecord,
    LandOwnerPaymentRecord, PartnerInvestmentRecord, PartnerRecord, RentalRecord,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

fn monthly_rent(billboard: &BillboardRecord) -> f64 {
    billboard.fields.rent_amount.unwrap_or(0.0)
}

fn yearly_rental(billboard: &BillboardRecord) -> f64 {
    monthly_rent(billboard) * 12.0
}

fn installation_cost_total(billboard_id: &str, costs: &[InstallationCostRecord]) -> f64 {
    costs
        .iter()
        .filter(|c| c.fields.billboard_id == billboard_id)
        .map(|c| c.fields.amount)
        .total()
}

#[derive(Clone, Debug, Serialize)]
pub struct BillboardProfitSummary {
    pub id: String,
    pub billboard_identifier: Option<String>,
    pub location: String,
    pub partner_count: usize,
    pub total_installation_cost: f64,
    pub total_yearly_rental: f64,
    pub total_profit: f64,
    pub profitable: bool,
}

pub fn billboard_profit_summary(
    billboard: &BillboardRecord,
    costs: &[InstallationCostRecord],
    investments: &[PartnerInvestmentRecord],
) -> BillboardProfitSummary {
    let partner_count = investments
        .iter()
        .filter(|i| i.fields.billboard_id == billboard.id)
        .map(|i| i.fields.partner_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_installation_cost = installation_cost_total(&billboard.id, costs);
    let total_yearly_rental = yearly_rental(billboard);
    let total_profit = profit(total_yearly_rental, total_installation_cost);

    BillboardProfitSummary {
        id: billboard.id.clone(),
        billboard_identifier: billboard.fields.billboard_identifier.clone(),
        location: billboard.fields.location.clone(),
        partner_count,
        total_installation_cost,
        total_yearly_rental,
        total_profit,
        profitable: is_profitable(total_profit),
    }
}

pub fn billboard_profit_summaries(snapshot: &BusinessSnapshot) -> Vec<BillboardProfitSummary> {
    snapshot
        .billboards
        .iter()
        .map(|b| billboard_profit_summary(b, &snapshot.installation_costs, &snapshot.investments))
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct PartnerProfitShare {
    pub investment_id: String,
    pub billboard_id: String,
    pub billboard_identifier: Option<String>,
    pub location: String,
    pub partner_id: String,
    pub partner_name: String,
    pub investment_amount: f64,
    pub investment_percentage: f64,
    pub total_profit: f64,
    pub total_yearly_rental: f64,
    pub partner_profit_share: f64,
}

/// One row per investment whose billboard and partner both still exist.
pub fn partner_profit_shares(snapshot: &BusinessSnapshot) -> Vec<PartnerProfitShare> {
    let summaries: HashMap<&str, BillboardProfitSummary> = snapshot
        .billboards
        .iter()
        .map(|b| {
            (
                b.id.as_str(),
                billboard_profit_summary(b, &snapshot.installation_costs, &snapshot.investments),
            )
        })
        .collect();
    let partners: HashMap<&str, &PartnerRecord> = snapshot
        .partners
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    snapshot
        .investments
        .iter()
        .filter_map(|investment| {
            let summary = summaries.get(investment.fields.billboard_id.as_str())?;
            let partner = partners.get(investment.fields.partner_id.as_str())?;
            Some(PartnerProfitShare {
                investment_id: investment.id.clone(),
                billboard_id: summary.id.clone(),
                billboard_identifier: summary.billboard_identifier.clone(),
                location: summary.location.clone(),
                partner_id: partner.id.clone(),
                partner_name: partner.fields.name.clone(),
                investment_amount: investment.fields.investment_amount,
                investment_percentage: investment.fields.investment_percentage,
                total_profit: summary.total_profit,
                total_yearly_rental: summary.total_yearly_rental,
                partner_profit_share: share(
                    summary.total_profit,
                    investment.fields.investment_percentage,
                ),
            })
        })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct ClientSummary {
    pub active_rentals: usize,
    pub total_rentals: usize,
    pub total_monthly_rent: f64,
    pub total_paid: f64,
    pub last_payment_date: Option<NaiveDate>,
}

/// Totals over the client's rentals and every payment made against them.
pub fn client_summary(
    client_id: &str,
    rentals: &[RentalRecord],
    payments: &[ClientPaymentRecord],
) -> ClientSummary {
    let client_rentals: Vec<&RentalRecord> = rentals
        .iter()
        .filter(|r| r.fields.client_id == client_id)
        .collect();
    let rental_ids: HashSet<&str> = client_rentals.iter().map(|r| r.id.as_str()).collect();
    let active: Vec<&&RentalRecord> = client_rentals
        .iter()
        .filter(|r| r.fields.status.eq_ignore_ascii_case("active"))
        .collect();
    let client_payments: Vec<&ClientPaymentRecord> = payments
        .iter()
        .filter(|p| rental_ids.contains(p.fields.rental_id.as_str()))
        .collect();

    ClientSummary {
        active_rentals: active.len(),
        total_rentals: client_rentals.len(),
        total_monthly_rent: active.iter().map(|r| r.fields.rental_amount).total(),
        total_paid: client_payments.iter().map(|p| p.fields.amount).total(),
        last_payment_date: client_payments.iter().map(|p| p.fields.payment_date).max(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LandOwnerSummary {
    pub billboard_count: usize,
    pub total_paid: f64,
    pub pending_amount: f64,
    pub last_payment_date: Option<NaiveDate>,
}

pub fn land_owner_summary(
    land_owner_id: &str,
    billboards: &[BillboardRecord],
    payments: &[LandOwnerPaymentRecord],
) -> LandOwnerSummary {
    let owner_payments: Vec<&LandOwnerPaymentRecord> = payments
        .iter()
        .filter(|p| p.fields.land_owner_id == land_owner_id)
        .collect();

    LandOwnerSummary {
        billboard_count: billboards
            .iter()
            .filter(|b| b.fields.land_owner_id.as_deref() == Some(land_owner_id))
            .count(),
        total_paid: owner_payments
            .iter()
            .filter(|p| p.fields.status.eq_ignore_ascii_case("paid"))
            .map(|p| p.fields.amount)
            .total(),
        pending_amount: owner_payments
            .iter()
            .filter(|p| is_pending(&p.fields.status))
            .map(|p| p.fields.amount)
            .total(),
        last_payment_date: owner_payments
            .iter()
            .filter_map(|p| p.fields.payment_date)
            .max(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PartnerInvestmentReturn {
    pub investment_id: String,
    pub billboard_id: String,
    pub billboard_identifier: Option<String>,
    pub location: Option<String>,
    pub investment_amount: f64,
    pub investment_percentage: f64,
    pub monthly_income: f64,
    pub annual_return: f64,
    pub roi: Percentage,
}

#[derive(Clone, Debug, Serialize)]
pub struct PartnerSummary {
    pub total_investment: f64,
    pub investment_count: usize,
    pub average_investment: f64,
    pub billboard_count: usize,
    pub rented_billboard_count: usize,
    pub total_installation_costs: f64,
    pub yearly_rental_income: f64,
    pub roi: Percentage,
    pub investments: Vec<PartnerInvestmentReturn>,
}

/// The partner's position across every billboard they invested in.
///
/// ROI here is guarded: a partner with nothing invested shows 0%.
pub fn partner_summary(
    partner_id: &str,
    investments: &[PartnerInvestmentRecord],
    billboards: &[BillboardRecord],
) -> PartnerSummary {
    let partner_investments: Vec<&PartnerInvestmentRecord> = investments
        .iter()
        .filter(|i| i.fields.partner_id == partner_id)
        .collect();
    let partner_billboards: Vec<&BillboardRecord> = billboards
        .iter()
        .filter(|b| {
            partner_investments
                .iter()
                .any(|i| i.fields.billboard_id == b.id)
        })
        .collect();

    let total_investment: f64 = partner_investments
        .iter()
        .map(|i| i.fields.investment_amount)
        .total();
    let average_investment = if partner_investments.is_empty() {
        0.0
    } else {
        total_investment / partner_investments.len() as f64
    };

    // First investment per billboard decides the partner's stake in it.
    let yearly_rental_income: f64 = partner_billboards
        .iter()
        .map(|b| {
            let percentage = partner_investments
                .iter()
                .find(|i| i.fields.billboard_id == b.id)
                .map(|i| i.fields.investment_percentage)
                .unwrap_or(0.0);
            yearly_partner_income(monthly_rent(b), percentage)
        })
        .total();

    let returns = partner_investments
        .iter()
        .map(|investment| {
            let billboard = partner_billboards
                .iter()
                .find(|b| b.id == investment.fields.billboard_id);
            let rent = billboard.map(|b| monthly_rent(b)).unwrap_or(0.0);
            let monthly_income = share(rent, investment.fields.investment_percentage);
            let annual_return = monthly_income * 12.0;
            PartnerInvestmentReturn {
                investment_id: investment.id.clone(),
                billboard_id: investment.fields.billboard_id.clone(),
                billboard_identifier: billboard
                    .and_then(|b| b.fields.billboard_identifier.clone()),
                location: billboard.map(|b| b.fields.location.clone()),
                investment_amount: investment.fields.investment_amount,
                investment_percentage: investment.fields.investment_percentage,
                monthly_income,
                annual_return,
                roi: guarded_roi(annual_return, investment.fields.investment_amount).into(),
            }
        })
        .collect();

    PartnerSummary {
        total_investment,
        investment_count: partner_investments.len(),
        average_investment,
        billboard_count: partner_billboards.len(),
        rented_billboard_count: partner_billboards
            .iter()
            .filter(|b| b.fields.status.eq_ignore_ascii_case("rented"))
            .count(),
        total_installation_costs: partner_billboards
            .iter()
            .map(|b| b.fields.total_installation_cost.unwrap_or(0.0))
            .total(),
        yearly_rental_income,
        roi: guarded_roi(yearly_rental_income, total_investment).into(),
        investments: returns,
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct InstallationPartnerShare {
    pub partner_id: String,
    pub partner_name: Option<String>,
    pub investment_percentage: f64,
    pub profit_share: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BillboardInstallationDetails {
    pub total_cost: f64,
    pub yearly_rental: f64,
    pub profit_margin: f64,
    pub profitable: bool,
    pub roi: Percentage,
    pub cost_by_type: Vec<(String, f64)>,
    pub partner_shares: Vec<InstallationPartnerShare>,
}

/// Cost, income and partner split for one billboard.
///
/// ROI is not guarded: a billboard with no recorded costs reports
/// `Infinity%` (or `NaN%` when it also earns nothing).
pub fn billboard_installation_details(
    billboard: &BillboardRecord,
    costs: &[InstallationCostRecord],
    investments: &[PartnerInvestmentRecord],
    partners: &[PartnerRecord],
) -> BillboardInstallationDetails {
    let total_cost = installation_cost_total(&billboard.id, costs);
    let yearly = yearly_rental(billboard);
    let profit_margin = profit(yearly, total_cost);

    let mut cost_by_type: Vec<(String, f64)> = Vec::new();
    for cost in costs.iter().filter(|c| c.fields.billboard_id == billboard.id) {
        match cost_by_type
            .iter_mut()
            .find(|(kind, _)| *kind == cost.fields.cost_type)
        {
            Some((_, total)) => *total += cost.fields.amount,
            None => cost_by_type.push((cost.fields.cost_type.clone(), cost.fields.amount)),
        }
    }

    let partner_shares = investments
        .iter()
        .filter(|i| i.fields.billboard_id == billboard.id)
        .map(|i| InstallationPartnerShare {
            partner_id: i.fields.partner_id.clone(),
            partner_name: partners
                .iter()
                .find(|p| p.id == i.fields.partner_id)
                .map(|p| p.fields.name.clone()),
            investment_percentage: i.fields.investment_percentage,
            profit_share: share(profit_margin, i.fields.investment_percentage),
        })
        .collect();

    BillboardInstallationDetails {
        total_cost,
        yearly_rental: yearly,
        profit_margin,
        profitable: is_profitable(profit_margin),
        roi: roi_from_margin(profit_margin, total_cost).into(),
        cost_by_type,
        partner_shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_store::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record<T>(id: &str, fields: T) -> Record<T> {
        Record {
            id: id.to_string(),
            fields,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn billboard(id: &str, rent: Option<f64>, status: &str) -> BillboardRecord {
        record(
            id,
            Billboard {
                billboard_identifier: Some(id.to_uppercase()),
                location: format!("Road {}", id),
                size: "20x10".to_string(),
                billboard_type: "Unipole".to_string(),
                status: status.to_string(),
                total_sft: None,
                installation_cost: None,
                total_installation_cost: Some(100_000.0),
                installation_date: None,
                land_owner_id: Some("owner".to_string()),
                rent_amount: rent,
                payment_month: None,
                agreement_start_date: None,
                agreement_end_date: None,
                agreement_document_url: None,
                image_urls: StringList::default(),
            },
        )
    }

    fn cost(id: &str, billboard_id: &str, kind: &str, amount: f64) -> InstallationCostRecord {
        record(
            id,
            InstallationCost {
                billboard_id: billboard_id.to_string(),
                partner_id: None,
                cost_type: kind.to_string(),
                amount,
                payment_date: date("2024-01-10"),
                payment_method: None,
                description: None,
                receipt_url: None,
            },
        )
    }

    fn investment(
        id: &str,
        billboard_id: &str,
        partner_id: &str,
        amount: f64,
        pct: f64,
    ) -> PartnerInvestmentRecord {
        record(
            id,
            PartnerInvestment {
                billboard_id: billboard_id.to_string(),
                partner_id: partner_id.to_string(),
                investment_amount: amount,
                investment_percentage: pct,
                investment_date: date("2024-01-01"),
                purpose: "Structure".to_string(),
                notes: None,
            },
        )
    }

    fn partner(id: &str, name: &str) -> PartnerRecord {
        record(
            id,
            Partner {
                name: name.to_string(),
                contact_person: None,
                email: None,
                phone: None,
                address: None,
            },
        )
    }

    #[test]
    fn profit_summary_uses_yearly_rent_and_cost_rows() {
        let b = billboard("b1", Some(10_000.0), "Rented");
        let costs = vec![
            cost("c1", "b1", "Structure Cost", 50_000.0),
            cost("c2", "b1", "VAT", 5_000.0),
            cost("c3", "other", "VAT", 999.0),
        ];
        let investments = vec![
            investment("i1", "b1", "p1", 30_000.0, 60.0),
            investment("i2", "b1", "p1", 5_000.0, 10.0),
            investment("i3", "b1", "p2", 20_000.0, 40.0),
        ];

        let summary = billboard_profit_summary(&b, &costs, &investments);
        assert_eq!(summary.partner_count, 2);
        assert_eq!(summary.total_installation_cost, 55_000.0);
        assert_eq!(summary.total_yearly_rental, 120_000.0);
        assert_eq!(summary.total_profit, 65_000.0);
        assert!(summary.profitable);
    }

    #[test]
    fn billboard_without_rent_is_loss_making() {
        let b = billboard("b1", None, "Available");
        let costs = vec![cost("c1", "b1", "Structure Cost", 1_000.0)];
        let summary = billboard_profit_summary(&b, &costs, &[]);
        assert_eq!(summary.total_profit, -1_000.0);
        assert!(!summary.profitable);
    }

    #[test]
    fn profit_shares_follow_percentages_without_normalising() {
        let snapshot = BusinessSnapshot {
            billboards: vec![billboard("b1", Some(10_000.0), "Rented")],
            partners: vec![partner("p1", "Karim"), partner("p2", "Rahim")],
            installation_costs: vec![cost("c1", "b1", "Structure Cost", 20_000.0)],
            investments: vec![
                investment("i1", "b1", "p1", 10_000.0, 80.0),
                investment("i2", "b1", "p2", 10_000.0, 40.0),
            ],
            ..Default::default()
        };

        let shares = partner_profit_shares(&snapshot);
        assert_eq!(shares.len(), 2);
        let total: f64 = shares.iter().map(|s| s.partner_profit_share).sum();
        // 120% of a 100_000 profit.
        assert_eq!(total, 120_000.0);
        assert!(shares.iter().any(|s| s.partner_name == "Karim"
            && s.partner_profit_share == 80_000.0));
    }

    #[test]
    fn client_summary_counts_active_rentals_and_payments() {
        let rental = |id: &str, client: &str, amount: f64, status: &str| {
            record(
                id,
                Rental {
                    billboard_id: "b1".to_string(),
                    client_id: client.to_string(),
                    start_date: date("2024-01-01"),
                    end_date: date("2024-12-31"),
                    rental_amount: amount,
                    invoice_date: 1,
                    invoice_frequency: "Monthly".to_string(),
                    payment_structure: None,
                    status: status.to_string(),
                    contract_document_url: None,
                    notes: None,
                },
            )
        };
        let payment = |id: &str, rental_id: &str, amount: f64, on: &str| {
            record(
                id,
                ClientPayment {
                    rental_id: rental_id.to_string(),
                    amount,
                    payment_date: date(on),
                    invoice_period_start: date(on),
                    invoice_period_end: date(on),
                    payment_method: None,
                    receipt_id: None,
                    status: "Received".to_string(),
                    notes: None,
                },
            )
        };
        let rentals = vec![
            rental("r1", "c1", 30_000.0, "Active"),
            rental("r2", "c1", 20_000.0, "Expired"),
            rental("r3", "c2", 99_000.0, "Active"),
        ];
        let payments = vec![
            payment("p1", "r1", 30_000.0, "2024-02-01"),
            payment("p2", "r2", 20_000.0, "2024-03-01"),
            payment("p3", "r3", 99_000.0, "2024-04-01"),
        ];

        let summary = client_summary("c1", &rentals, &payments);
        assert_eq!(summary.active_rentals, 1);
        assert_eq!(summary.total_rentals, 2);
        assert_eq!(summary.total_monthly_rent, 30_000.0);
        assert_eq!(summary.total_paid, 50_000.0);
        assert_eq!(summary.last_payment_date, Some(date("2024-03-01")));
    }

    #[test]
    fn land_owner_summary_splits_paid_and_pending() {
        let payment = |id: &str, amount: f64, status: &str, paid_on: Option<&str>| {
            record(
                id,
                LandOwnerPayment {
                    billboard_id: "b1".to_string(),
                    land_owner_id: "owner".to_string(),
                    amount,
                    payment_year_start: date("2024-01-01"),
                    payment_year_end: date("2024-12-31"),
                    payment_date: paid_on.map(date),
                    payment_method: None,
                    status: status.to_string(),
                    notes: None,
                },
            )
        };
        let billboards = vec![
            billboard("b1", None, "Rented"),
            billboard("b2", None, "Rented"),
        ];
        let payments = vec![
            payment("l1", 12_000.0, "Paid", Some("2024-01-05")),
            payment("l2", 8_000.0, "Pending", None),
            payment("l3", 1_000.0, "Overdue", Some("2023-12-01")),
        ];

        let summary = land_owner_summary("owner", &billboards, &payments);
        assert_eq!(summary.billboard_count, 2);
        assert_eq!(summary.total_paid, 12_000.0);
        assert_eq!(summary.pending_amount, 8_000.0);
        assert_eq!(summary.last_payment_date, Some(date("2024-01-05")));
    }

    #[test]
    fn partner_summary_uses_guarded_roi() {
        let billboards = vec![
            billboard("b1", Some(10_000.0), "Rented"),
            billboard("b2", Some(5_000.0), "Available"),
        ];
        let investments = vec![
            investment("i1", "b1", "p1", 60_000.0, 50.0),
            investment("i2", "b2", "p1", 0.0, 20.0),
        ];

        let summary = partner_summary("p1", &investments, &billboards);
        assert_eq!(summary.total_investment, 60_000.0);
        assert_eq!(summary.billboard_count, 2);
        assert_eq!(summary.rented_billboard_count, 1);
        assert_eq!(summary.total_installation_costs, 200_000.0);
        // 50% of 120_000 plus 20% of 60_000.
        assert_eq!(summary.yearly_rental_income, 72_000.0);
        assert_eq!(summary.roi.value, 20.0);

        let zero = summary
            .investments
            .iter()
            .find(|r| r.investment_id == "i2")
            .unwrap();
        assert_eq!(zero.monthly_income, 1_000.0);
        assert_eq!(zero.roi.value, 0.0);

        let nobody = partner_summary("ghost", &investments, &billboards);
        assert_eq!(nobody.roi.value, 0.0);
        assert_eq!(nobody.average_investment, 0.0);
    }

    #[test]
    fn installation_details_roi_is_unguarded() {
        let b = billboard("b1", Some(10_000.0), "Rented");
        let details = billboard_installation_details(&b, &[], &[], &[]);
        assert_eq!(details.total_cost, 0.0);
        assert!(details.roi.value.is_infinite());
        assert_eq!(details.roi.display, "Infinity%");
    }

    #[test]
    fn installation_details_split_profit_by_partner() {
        let b = billboard("b1", Some(10_000.0), "Rented");
        let costs = vec![
            cost("c1", "b1", "Structure Cost", 40_000.0),
            cost("c2", "b1", "Structure Cost", 20_000.0),
            cost("c3", "b1", "VAT", 20_000.0),
        ];
        let investments = vec![investment("i1", "b1", "p1", 80_000.0, 25.0)];
        let partners = vec![partner("p1", "Karim")];

        let details = billboard_installation_details(&b, &costs, &investments, &partners);
        assert_eq!(details.total_cost, 80_000.0);
        assert_eq!(details.profit_margin, 40_000.0);
        assert_eq!(details.roi.value, 50.0);
        assert_eq!(
            details.cost_by_type,
            vec![
                ("Structure Cost".to_string(), 60_000.0),
                ("VAT".to_string(), 20_000.0)
            ]
        );
        assert_eq!(details.partner_shares[0].profit_share, 10_000.0);
        assert_eq!(
            details.partner_shares[0].partner_name.as_deref(),
            Some("Karim")
        );
    }
}

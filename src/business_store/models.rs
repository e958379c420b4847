//! Row types for the business database.
//!
//! Every entity is stored as a [`Record`], which wraps the writable fields with
//! the store-assigned id and timestamps. Request bodies deserialize straight
//! into the field structs, so defaults declared here are the API defaults too.

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// A stored row: id and timestamps around the entity's own fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
    pub created_at: i64,
    pub updated_at: i64,
}

/// List of strings persisted as a JSON array in a TEXT column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl ToSql for StringList {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let json = serde_json::to_string(&self.0)
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
        Ok(ToSqlOutput::from(json))
    }
}

impl FromSql for StringList {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        serde_json::from_str(text)
            .map(StringList)
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

fn default_billboard_status() -> String {
    "Available".to_string()
}

fn default_rental_status() -> String {
    "Active".to_string()
}

fn default_invoice_frequency() -> String {
    "Monthly".to_string()
}

fn default_invoice_day() -> i64 {
    1
}

fn default_pending() -> String {
    "Pending".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Billboard {
    #[serde(default)]
    pub billboard_identifier: Option<String>,
    pub location: String,
    pub size: String,
    #[serde(rename = "type")]
    pub billboard_type: String,
    #[serde(default = "default_billboard_status")]
    pub status: String,
    #[serde(default)]
    pub total_sft: Option<f64>,
    #[serde(default)]
    pub installation_cost: Option<f64>,
    #[serde(default)]
    pub total_installation_cost: Option<f64>,
    #[serde(default)]
    pub installation_date: Option<NaiveDate>,
    #[serde(default)]
    pub land_owner_id: Option<String>,
    /// Monthly rent collected for the structure.
    #[serde(default)]
    pub rent_amount: Option<f64>,
    #[serde(default)]
    pub payment_month: Option<String>,
    #[serde(default)]
    pub agreement_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub agreement_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub agreement_document_url: Option<String>,
    #[serde(default)]
    pub image_urls: StringList,
}

impl Billboard {
    /// Identifier shown to users, falling back to the location.
    pub fn display_name(&self) -> &str {
        self.billboard_identifier
            .as_deref()
            .unwrap_or(self.location.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub company_name: String,
    pub contact_person: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandOwner {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub billboard_id: String,
    pub client_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_amount: f64,
    /// Day of the month invoices are issued on.
    #[serde(default = "default_invoice_day")]
    pub invoice_date: i64,
    #[serde(default = "default_invoice_frequency")]
    pub invoice_frequency: String,
    #[serde(default)]
    pub payment_structure: Option<String>,
    #[serde(default = "default_rental_status")]
    pub status: String,
    #[serde(default)]
    pub contract_document_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientPayment {
    pub rental_id: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub invoice_period_start: NaiveDate,
    pub invoice_period_end: NaiveDate,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub receipt_id: Option<String>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstallationCost {
    pub billboard_id: String,
    #[serde(default)]
    pub partner_id: Option<String>,
    pub cost_type: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandOwnerPayment {
    pub billboard_id: String,
    pub land_owner_id: String,
    pub amount: f64,
    pub payment_year_start: NaiveDate,
    pub payment_year_end: NaiveDate,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartnerInvestment {
    pub billboard_id: String,
    pub partner_id: String,
    pub investment_amount: f64,
    /// Stake in the billboard. Stakes on one billboard are not required to
    /// add up to 100.
    pub investment_percentage: f64,
    pub investment_date: NaiveDate,
    pub purpose: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillboardDocument {
    pub billboard_id: String,
    pub document_name: String,
    pub document_type: String,
    pub document_url: String,
    pub upload_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

pub type BillboardRecord = Record<Billboard>;
pub type ClientRecord = Record<Client>;
pub type PartnerRecord = Record<Partner>;
pub type LandOwnerRecord = Record<LandOwner>;
pub type RentalRecord = Record<Rental>;
pub type ClientPaymentRecord = Record<ClientPayment>;
pub type InstallationCostRecord = Record<InstallationCost>;
pub type LandOwnerPaymentRecord = Record<LandOwnerPayment>;
pub type PartnerInvestmentRecord = Record<PartnerInvestment>;
pub type BillboardDocumentRecord = Record<BillboardDocument>;

/// Cost categories offered when recording an installation cost.
pub const INSTALLATION_COST_TYPES: &[&str] = &[
    "Agreement Payment",
    "Structure Cost",
    "Installation Cost",
    "PVC Cost",
    "PVC Fitting Cost",
    "Painting Cost",
    "VAT",
    "Tax",
    "Transport Cost",
    "Labor Cost",
    "Electrical Cost",
    "Permit Cost",
    "Other",
];

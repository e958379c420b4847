use super::format::format_money;
use crate::business_store::{
    Billboard, BillboardRecord, BusinessStore, Client, ClientPayment, ClientPaymentRecord,
    RecordStore, Rental, RentalRecord, StoreError,
};
use crate::config::BusinessSettings;
use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("billboard {0} has no rental to invoice")]
    NoRental(String),

    #[error("rental {rental_id} does not belong to billboard {billboard_id}")]
    RentalMismatch {
        rental_id: String,
        billboard_id: String,
    },
}

/// `INV-YYYYMMDD-XXXX`, with four random uppercase letters or digits.
pub fn generate_invoice_number(date: NaiveDate) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("INV-{}-{}", date.format("%Y%m%d"), suffix)
}

/// Body of an invoice request. Everything except the amount is optional.
#[derive(Clone, Debug, Deserialize)]
pub struct InvoiceRequest {
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Defaults to the billboard's active rental.
    #[serde(default)]
    pub rental_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BillTo {
    pub company_name: String,
    pub contact_person: String,
    pub contact_email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub location: String,
    pub size: String,
    pub billboard_type: String,
    pub bill_to: Option<BillTo>,
    pub description: String,
    pub amount: f64,
}

impl InvoiceDocument {
    pub fn file_name(&self) -> String {
        format!("invoice-{}.txt", self.invoice_number)
    }

    pub fn render(&self, settings: &BusinessSettings) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, settings);
        out
    }

    fn write_to(&self, out: &mut String, settings: &BusinessSettings) -> std::fmt::Result {
        writeln!(out, "INVOICE")?;
        writeln!(out)?;
        writeln!(out, "Invoice No: {}", self.invoice_number)?;
        writeln!(out, "Date: {}", self.invoice_date)?;
        writeln!(out, "Due Date: {}", self.due_date)?;
        writeln!(out)?;
        writeln!(out, "Billboard Details:")?;
        writeln!(out, "Location: {}", self.location)?;
        writeln!(out, "Size: {}", self.size)?;
        writeln!(out, "Type: {}", self.billboard_type)?;
        if let Some(bill_to) = &self.bill_to {
            writeln!(out)?;
            writeln!(out, "Bill To:")?;
            writeln!(out, "Company: {}", bill_to.company_name)?;
            writeln!(out, "Contact: {}", bill_to.contact_person)?;
            writeln!(out, "Email: {}", bill_to.contact_email)?;
        }
        writeln!(out)?;
        writeln!(out, "Amount Details:")?;
        writeln!(out, "Description: {}", self.description)?;
        writeln!(
            out,
            "Amount: {}",
            format_money(&settings.currency_symbol, self.amount)
        )?;
        writeln!(out)?;
        writeln!(out, "Thank you for your business!")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedInvoice {
    pub payment: ClientPaymentRecord,
    pub invoice: InvoiceDocument,
    pub file_name: String,
    pub text: String,
}

fn pick_rental(
    store: &dyn BusinessStore,
    billboard_id: &str,
    requested: Option<&str>,
) -> Result<RentalRecord> {
    if let Some(rental_id) = requested {
        let rental = RecordStore::<Rental>::get(store, rental_id)?.ok_or_else(|| {
            anyhow!(StoreError::NotFound {
                kind: "rental",
                id: rental_id.to_string(),
            })
        })?;
        if rental.fields.billboard_id != billboard_id {
            return Err(anyhow!(InvoiceError::RentalMismatch {
                rental_id: rental_id.to_string(),
                billboard_id: billboard_id.to_string(),
            }));
        }
        return Ok(rental);
    }

    let rentals = RecordStore::<Rental>::list_by(store, "billboard_id", billboard_id)?;
    rentals
        .iter()
        .find(|r| r.fields.status == "Active")
        .or_else(|| rentals.first())
        .cloned()
        .ok_or_else(|| anyhow!(InvoiceError::NoRental(billboard_id.to_string())))
}

/// Records a pending payment for the billboard's rental and renders the
/// matching invoice.
///
/// The payment covers `invoice_date..=due_date`, carries the description as
/// its notes and the invoice number as its receipt id.
pub fn generate_invoice(
    store: &dyn BusinessStore,
    billboard_id: &str,
    request: InvoiceRequest,
    settings: &BusinessSettings,
    invoice_date: NaiveDate,
) -> Result<GeneratedInvoice> {
    let billboard: BillboardRecord = RecordStore::<Billboard>::get(store, billboard_id)?
        .ok_or_else(|| {
            anyhow!(StoreError::NotFound {
                kind: "billboard",
                id: billboard_id.to_string(),
            })
        })?;
    let rental = pick_rental(store, billboard_id, request.rental_id.as_deref())?;
    let client = RecordStore::<Client>::get(store, &rental.fields.client_id)?;

    let invoice_number = request
        .invoice_number
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| generate_invoice_number(invoice_date));
    let due_date = match request.due_date {
        Some(date) => date,
        None => invoice_date
            .checked_add_days(Days::new(settings.invoice_due_days.into()))
            .ok_or_else(|| anyhow!("Due date out of range"))?,
    };

    let payment = RecordStore::<ClientPayment>::create(
        store,
        ClientPayment {
            rental_id: rental.id.clone(),
            amount: request.amount,
            payment_date: invoice_date,
            invoice_period_start: invoice_date,
            invoice_period_end: due_date,
            payment_method: None,
            receipt_id: Some(invoice_number.clone()),
            status: "Pending".to_string(),
            notes: Some(request.description.clone()),
        },
    )?;

    let invoice = InvoiceDocument {
        invoice_number,
        invoice_date,
        due_date,
        location: billboard.fields.location,
        size: billboard.fields.size,
        billboard_type: billboard.fields.billboard_type,
        bill_to: client.map(|c| BillTo {
            company_name: c.fields.company_name,
            contact_person: c.fields.contact_person,
            contact_email: c.fields.contact_email,
        }),
        description: request.description,
        amount: request.amount,
    };
    info!(
        "Generated invoice {} for rental {}",
        invoice.invoice_number, rental.id
    );

    Ok(GeneratedInvoice {
        file_name: invoice.file_name(),
        text: invoice.render(settings),
        payment,
        invoice,
    })
}

use super::format::format_money;
use crate::business_store::PaymentView;
use crate::config::BusinessSettings;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Above this the receipt says "More than One Lakh Taka".
const ONE_LAKH: f64 = 100_000.0;

pub fn amount_in_words(amount: f64) -> &'static str {
    if amount < ONE_LAKH {
        "Less than One Lakh Taka"
    } else {
        "More than One Lakh Taka"
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoneyReceipt {
    pub receipt_id: String,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,
    pub client_company: Option<String>,
    pub billboard_location: Option<String>,
    pub amount: f64,
    pub notes: Option<String>,
    pub generated_on: NaiveDate,
}

impl MoneyReceipt {
    /// Builds the receipt for a joined payment row. Payments without a
    /// receipt id use their own id.
    pub fn from_payment(payment: &PaymentView, generated_on: NaiveDate) -> Self {
        let fields = &payment.payment.fields;
        MoneyReceipt {
            receipt_id: fields
                .receipt_id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| payment.payment.id.clone()),
            payment_date: fields.payment_date,
            payment_method: fields.payment_method.clone(),
            client_company: payment.client_company.clone(),
            billboard_location: payment.billboard.location.clone(),
            amount: fields.amount,
            notes: fields.notes.clone(),
            generated_on,
        }
    }

    pub fn file_name(&self) -> String {
        format!("receipt-{}.txt", self.receipt_id)
    }

    pub fn render(&self, settings: &BusinessSettings) -> String {
        let mut out = String::new();
        let _ = self.write_to(&mut out, settings);
        out
    }

    fn write_to(&self, out: &mut String, settings: &BusinessSettings) -> std::fmt::Result {
        writeln!(out, "{}", settings.company_name)?;
        writeln!(out, "Money Receipt")?;
        writeln!(out)?;
        writeln!(out, "Receipt ID: {}", self.receipt_id)?;
        writeln!(out, "Date: {}", self.payment_date)?;
        writeln!(
            out,
            "Payment Method: {}",
            self.payment_method.as_deref().unwrap_or("-")
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "Company: {}",
            self.client_company.as_deref().unwrap_or("-")
        )?;
        writeln!(
            out,
            "Billboard: {}",
            self.billboard_location.as_deref().unwrap_or("-")
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "Amount Received: {}",
            format_money(&settings.currency_symbol, self.amount)
        )?;
        writeln!(out, "In Words: {}", amount_in_words(self.amount))?;
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            writeln!(out)?;
            writeln!(out, "Notes:")?;
            writeln!(out, "{}", notes)?;
        }
        writeln!(out)?;
        writeln!(out, "Generated on: {}", self.generated_on)?;
        writeln!(out, "Authorized Signature")
    }
}

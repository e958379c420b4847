//! Binding between row types and their tables.

use super::models::*;
use super::schema::*;
use crate::sqlite_persistence::Table;
use rusqlite::{Row, ToSql};
use serde::{de::DeserializeOwned, Serialize};

/// A row type that can be stored through the generic record queries.
///
/// `sql_values` must yield one value per table column between `id` and the
/// trailing timestamps, in table order.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human readable kind, used in errors and logs.
    const KIND: &'static str;
    const TABLE: &'static Table;

    fn sql_values(&self) -> Vec<&dyn ToSql>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Columns written by inserts and updates.
    fn data_columns() -> impl Iterator<Item = &'static str> {
        let columns = Self::TABLE.columns;
        columns[1..columns.len() - 2].iter().map(|c| c.name)
    }
}

impl Entity for Billboard {
    const KIND: &'static str = "billboard";
    const TABLE: &'static Table = &BILLBOARDS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_identifier,
            &self.location,
            &self.size,
            &self.billboard_type,
            &self.status,
            &self.total_sft,
            &self.installation_cost,
            &self.total_installation_cost,
            &self.installation_date,
            &self.land_owner_id,
            &self.rent_amount,
            &self.payment_month,
            &self.agreement_start_date,
            &self.agreement_end_date,
            &self.agreement_document_url,
            &self.image_urls,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Billboard {
            billboard_identifier: row.get("billboard_identifier")?,
            location: row.get("location")?,
            size: row.get("size")?,
            billboard_type: row.get("billboard_type")?,
            status: row.get("status")?,
            total_sft: row.get("total_sft")?,
            installation_cost: row.get("installation_cost")?,
            total_installation_cost: row.get("total_installation_cost")?,
            installation_date: row.get("installation_date")?,
            land_owner_id: row.get("land_owner_id")?,
            rent_amount: row.get("rent_amount")?,
            payment_month: row.get("payment_month")?,
            agreement_start_date: row.get("agreement_start_date")?,
            agreement_end_date: row.get("agreement_end_date")?,
            agreement_document_url: row.get("agreement_document_url")?,
            image_urls: row.get("image_urls")?,
        })
    }
}

impl Entity for Client {
    const KIND: &'static str = "client";
    const TABLE: &'static Table = &CLIENTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.company_name,
            &self.contact_person,
            &self.contact_email,
            &self.contact_phone,
            &self.industry,
            &self.billing_address,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Client {
            company_name: row.get("company_name")?,
            contact_person: row.get("contact_person")?,
            contact_email: row.get("contact_email")?,
            contact_phone: row.get("contact_phone")?,
            industry: row.get("industry")?,
            billing_address: row.get("billing_address")?,
        })
    }
}

impl Entity for Partner {
    const KIND: &'static str = "partner";
    const TABLE: &'static Table = &PARTNERS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name,
            &self.contact_person,
            &self.email,
            &self.phone,
            &self.address,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Partner {
            name: row.get("name")?,
            contact_person: row.get("contact_person")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
        })
    }
}

impl Entity for LandOwner {
    const KIND: &'static str = "land owner";
    const TABLE: &'static Table = &LAND_OWNERS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name,
            &self.contact_person,
            &self.email,
            &self.phone,
            &self.address,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(LandOwner {
            name: row.get("name")?,
            contact_person: row.get("contact_person")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
        })
    }
}

impl Entity for Rental {
    const KIND: &'static str = "rental";
    const TABLE: &'static Table = &RENTALS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_id,
            &self.client_id,
            &self.start_date,
            &self.end_date,
            &self.rental_amount,
            &self.invoice_date,
            &self.invoice_frequency,
            &self.payment_structure,
            &self.status,
            &self.contract_document_url,
            &self.notes,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Rental {
            billboard_id: row.get("billboard_id")?,
            client_id: row.get("client_id")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            rental_amount: row.get("rental_amount")?,
            invoice_date: row.get("invoice_date")?,
            invoice_frequency: row.get("invoice_frequency")?,
            payment_structure: row.get("payment_structure")?,
            status: row.get("status")?,
            contract_document_url: row.get("contract_document_url")?,
            notes: row.get("notes")?,
        })
    }
}

impl Entity for ClientPayment {
    const KIND: &'static str = "payment";
    const TABLE: &'static Table = &CLIENT_PAYMENTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.rental_id,
            &self.amount,
            &self.payment_date,
            &self.invoice_period_start,
            &self.invoice_period_end,
            &self.payment_method,
            &self.receipt_id,
            &self.status,
            &self.notes,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ClientPayment {
            rental_id: row.get("rental_id")?,
            amount: row.get("amount")?,
            payment_date: row.get("payment_date")?,
            invoice_period_start: row.get("invoice_period_start")?,
            invoice_period_end: row.get("invoice_period_end")?,
            payment_method: row.get("payment_method")?,
            receipt_id: row.get("receipt_id")?,
            status: row.get("status")?,
            notes: row.get("notes")?,
        })
    }
}

impl Entity for InstallationCost {
    const KIND: &'static str = "installation cost";
    const TABLE: &'static Table = &INSTALLATION_COSTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_id,
            &self.partner_id,
            &self.cost_type,
            &self.amount,
            &self.payment_date,
            &self.payment_method,
            &self.description,
            &self.receipt_url,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(InstallationCost {
            billboard_id: row.get("billboard_id")?,
            partner_id: row.get("partner_id")?,
            cost_type: row.get("cost_type")?,
            amount: row.get("amount")?,
            payment_date: row.get("payment_date")?,
            payment_method: row.get("payment_method")?,
            description: row.get("description")?,
            receipt_url: row.get("receipt_url")?,
        })
    }
}

impl Entity for LandOwnerPayment {
    const KIND: &'static str = "land owner payment";
    const TABLE: &'static Table = &LAND_OWNER_PAYMENTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_id,
            &self.land_owner_id,
            &self.amount,
            &self.payment_year_start,
            &self.payment_year_end,
            &self.payment_date,
            &self.payment_method,
            &self.status,
            &self.notes,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(LandOwnerPayment {
            billboard_id: row.get("billboard_id")?,
            land_owner_id: row.get("land_owner_id")?,
            amount: row.get("amount")?,
            payment_year_start: row.get("payment_year_start")?,
            payment_year_end: row.get("payment_year_end")?,
            payment_date: row.get("payment_date")?,
            payment_method: row.get("payment_method")?,
            status: row.get("status")?,
            notes: row.get("notes")?,
        })
    }
}

impl Entity for PartnerInvestment {
    const KIND: &'static str = "investment";
    const TABLE: &'static Table = &PARTNER_INVESTMENTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_id,
            &self.partner_id,
            &self.investment_amount,
            &self.investment_percentage,
            &self.investment_date,
            &self.purpose,
            &self.notes,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PartnerInvestment {
            billboard_id: row.get("billboard_id")?,
            partner_id: row.get("partner_id")?,
            investment_amount: row.get("investment_amount")?,
            investment_percentage: row.get("investment_percentage")?,
            investment_date: row.get("investment_date")?,
            purpose: row.get("purpose")?,
            notes: row.get("notes")?,
        })
    }
}

impl Entity for BillboardDocument {
    const KIND: &'static str = "document";
    const TABLE: &'static Table = &BILLBOARD_DOCUMENTS_TABLE;

    fn sql_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.billboard_id,
            &self.document_name,
            &self.document_type,
            &self.document_url,
            &self.upload_date,
            &self.notes,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BillboardDocument {
            billboard_id: row.get("billboard_id")?,
            document_name: row.get("document_name")?,
            document_type: row.get("document_type")?,
            document_url: row.get("document_url")?,
            upload_date: row.get("upload_date")?,
            notes: row.get("notes")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assert_value_count<E: Entity>(sample: &E) {
        assert_eq!(
            sample.sql_values().len(),
            E::data_columns().count(),
            "{} values do not line up with its table",
            E::KIND
        );
    }

    #[test]
    fn values_line_up_with_columns() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_value_count(&Billboard {
            billboard_identifier: None,
            location: "Dhaka".into(),
            size: "10x20".into(),
            billboard_type: "Unipole".into(),
            status: "Available".into(),
            total_sft: None,
            installation_cost: None,
            total_installation_cost: None,
            installation_date: None,
            land_owner_id: None,
            rent_amount: None,
            payment_month: None,
            agreement_start_date: None,
            agreement_end_date: None,
            agreement_document_url: None,
            image_urls: StringList::default(),
        });
        assert_value_count(&Client {
            company_name: "Acme".into(),
            contact_person: "A".into(),
            contact_email: "a@acme.test".into(),
            contact_phone: None,
            industry: None,
            billing_address: None,
        });
        assert_value_count(&Partner {
            name: "P".into(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
        });
        assert_value_count(&LandOwner {
            name: "L".into(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
        });
        assert_value_count(&Rental {
            billboard_id: "b".into(),
            client_id: "c".into(),
            start_date: date,
            end_date: date,
            rental_amount: 1.0,
            invoice_date: 1,
            invoice_frequency: "Monthly".into(),
            payment_structure: None,
            status: "Active".into(),
            contract_document_url: None,
            notes: None,
        });
        assert_value_count(&ClientPayment {
            rental_id: "r".into(),
            amount: 1.0,
            payment_date: date,
            invoice_period_start: date,
            invoice_period_end: date,
            payment_method: None,
            receipt_id: None,
            status: "Pending".into(),
            notes: None,
        });
        assert_value_count(&InstallationCost {
            billboard_id: "b".into(),
            partner_id: None,
            cost_type: "VAT".into(),
            amount: 1.0,
            payment_date: date,
            payment_method: None,
            description: None,
            receipt_url: None,
        });
        assert_value_count(&LandOwnerPayment {
            billboard_id: "b".into(),
            land_owner_id: "l".into(),
            amount: 1.0,
            payment_year_start: date,
            payment_year_end: date,
            payment_date: None,
            payment_method: None,
            status: "Pending".into(),
            notes: None,
        });
        assert_value_count(&PartnerInvestment {
            billboard_id: "b".into(),
            partner_id: "p".into(),
            investment_amount: 1.0,
            investment_percentage: 50.0,
            investment_date: date,
            purpose: "Structure".into(),
            notes: None,
        });
        assert_value_count(&BillboardDocument {
            billboard_id: "b".into(),
            document_name: "Deed".into(),
            document_type: "Agreement".into(),
            document_url: "https://files.test/deed.pdf".into(),
            upload_date: date,
            notes: None,
        });
    }
}

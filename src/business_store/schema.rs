//! SQLite schema for the business database.
//!
//! Ids are UUID strings, dates are ISO `YYYY-MM-DD` text and money is REAL.
//! Column order matters: generic record queries rely on `id` being first and
//! `created_at`/`updated_at` being last.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const ID_COLUMN: Column = sqlite_column!(
    "id",
    &SqlType::Text,
    is_primary_key = true,
    non_null = true
);
const CREATED_AT_COLUMN: Column = sqlite_column!(
    "created_at",
    &SqlType::Integer,
    non_null = true,
    default_value = Some(DEFAULT_TIMESTAMP)
);
const UPDATED_AT_COLUMN: Column = sqlite_column!(
    "updated_at",
    &SqlType::Integer,
    non_null = true,
    default_value = Some(DEFAULT_TIMESTAMP)
);

const BILLBOARD_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "billboards",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};
const CLIENT_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "clients",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};
const PARTNER_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "partners",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};
const PARTNER_SET_NULL: ForeignKey = ForeignKey {
    foreign_table: "partners",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::SetNull,
};
const LAND_OWNER_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "land_owners",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};
const LAND_OWNER_SET_NULL: ForeignKey = ForeignKey {
    foreign_table: "land_owners",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::SetNull,
};
const RENTAL_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "billboard_rentals",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

pub const LAND_OWNERS_TABLE: Table = Table {
    name: "land_owners",
    columns: &[
        ID_COLUMN,
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("contact_person", &SqlType::Text),
        sqlite_column!("email", &SqlType::Text),
        sqlite_column!("phone", &SqlType::Text),
        sqlite_column!("address", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[],
    unique_constraints: &[],
};

pub const BILLBOARDS_TABLE: Table = Table {
    name: "billboards",
    columns: &[
        ID_COLUMN,
        sqlite_column!("billboard_identifier", &SqlType::Text),
        sqlite_column!("location", &SqlType::Text, non_null = true),
        sqlite_column!("size", &SqlType::Text, non_null = true),
        sqlite_column!("billboard_type", &SqlType::Text, non_null = true),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'Available'")
        ),
        sqlite_column!("total_sft", &SqlType::Real),
        sqlite_column!("installation_cost", &SqlType::Real),
        sqlite_column!("total_installation_cost", &SqlType::Real),
        sqlite_column!("installation_date", &SqlType::Text),
        sqlite_column!(
            "land_owner_id",
            &SqlType::Text,
            foreign_key = Some(&LAND_OWNER_SET_NULL)
        ),
        sqlite_column!("rent_amount", &SqlType::Real),
        sqlite_column!("payment_month", &SqlType::Text),
        sqlite_column!("agreement_start_date", &SqlType::Text),
        sqlite_column!("agreement_end_date", &SqlType::Text),
        sqlite_column!("agreement_document_url", &SqlType::Text),
        sqlite_column!(
            "image_urls",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'[]'")
        ),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[
        ("idx_billboards_status", "status"),
        ("idx_billboards_land_owner", "land_owner_id"),
    ],
    unique_constraints: &[],
};

pub const CLIENTS_TABLE: Table = Table {
    name: "clients",
    columns: &[
        ID_COLUMN,
        sqlite_column!("company_name", &SqlType::Text, non_null = true),
        sqlite_column!("contact_person", &SqlType::Text, non_null = true),
        sqlite_column!("contact_email", &SqlType::Text, non_null = true),
        sqlite_column!("contact_phone", &SqlType::Text),
        sqlite_column!("industry", &SqlType::Text),
        sqlite_column!("billing_address", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[],
    unique_constraints: &[],
};

pub const PARTNERS_TABLE: Table = Table {
    name: "partners",
    columns: &[
        ID_COLUMN,
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("contact_person", &SqlType::Text),
        sqlite_column!("email", &SqlType::Text),
        sqlite_column!("phone", &SqlType::Text),
        sqlite_column!("address", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[],
    unique_constraints: &[],
};

pub const RENTALS_TABLE: Table = Table {
    name: "billboard_rentals",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "billboard_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&BILLBOARD_CASCADE)
        ),
        sqlite_column!(
            "client_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&CLIENT_CASCADE)
        ),
        sqlite_column!("start_date", &SqlType::Text, non_null = true),
        sqlite_column!("end_date", &SqlType::Text, non_null = true),
        sqlite_column!("rental_amount", &SqlType::Real, non_null = true),
        sqlite_column!(
            "invoice_date",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "invoice_frequency",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'Monthly'")
        ),
        sqlite_column!("payment_structure", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'Active'")
        ),
        sqlite_column!("contract_document_url", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[
        ("idx_rentals_billboard", "billboard_id"),
        ("idx_rentals_client", "client_id"),
    ],
    unique_constraints: &[],
};

pub const CLIENT_PAYMENTS_TABLE: Table = Table {
    name: "client_payments",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "rental_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&RENTAL_CASCADE)
        ),
        sqlite_column!("amount", &SqlType::Real, non_null = true),
        sqlite_column!("payment_date", &SqlType::Text, non_null = true),
        sqlite_column!("invoice_period_start", &SqlType::Text, non_null = true),
        sqlite_column!("invoice_period_end", &SqlType::Text, non_null = true),
        sqlite_column!("payment_method", &SqlType::Text),
        sqlite_column!("receipt_id", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'Pending'")
        ),
        sqlite_column!("notes", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[("idx_client_payments_rental", "rental_id")],
    unique_constraints: &[],
};

pub const INSTALLATION_COSTS_TABLE: Table = Table {
    name: "installation_costs",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "billboard_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&BILLBOARD_CASCADE)
        ),
        sqlite_column!(
            "partner_id",
            &SqlType::Text,
            foreign_key = Some(&PARTNER_SET_NULL)
        ),
        sqlite_column!("cost_type", &SqlType::Text, non_null = true),
        sqlite_column!("amount", &SqlType::Real, non_null = true),
        sqlite_column!("payment_date", &SqlType::Text, non_null = true),
        sqlite_column!("payment_method", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("receipt_url", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[("idx_installation_costs_billboard", "billboard_id")],
    unique_constraints: &[],
};

pub const LAND_OWNER_PAYMENTS_TABLE: Table = Table {
    name: "land_owner_payments",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "billboard_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&BILLBOARD_CASCADE)
        ),
        sqlite_column!(
            "land_owner_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&LAND_OWNER_CASCADE)
        ),
        sqlite_column!("amount", &SqlType::Real, non_null = true),
        sqlite_column!("payment_year_start", &SqlType::Text, non_null = true),
        sqlite_column!("payment_year_end", &SqlType::Text, non_null = true),
        sqlite_column!("payment_date", &SqlType::Text),
        sqlite_column!("payment_method", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'Pending'")
        ),
        sqlite_column!("notes", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[("idx_land_owner_payments_owner", "land_owner_id")],
    unique_constraints: &[],
};

pub const PARTNER_INVESTMENTS_TABLE: Table = Table {
    name: "partner_investments",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "billboard_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&BILLBOARD_CASCADE)
        ),
        sqlite_column!(
            "partner_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&PARTNER_CASCADE)
        ),
        sqlite_column!("investment_amount", &SqlType::Real, non_null = true),
        sqlite_column!("investment_percentage", &SqlType::Real, non_null = true),
        sqlite_column!("investment_date", &SqlType::Text, non_null = true),
        sqlite_column!("purpose", &SqlType::Text, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[
        ("idx_partner_investments_billboard", "billboard_id"),
        ("idx_partner_investments_partner", "partner_id"),
    ],
    unique_constraints: &[],
};

pub const BILLBOARD_DOCUMENTS_TABLE: Table = Table {
    name: "billboard_documents",
    columns: &[
        ID_COLUMN,
        sqlite_column!(
            "billboard_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&BILLBOARD_CASCADE)
        ),
        sqlite_column!("document_name", &SqlType::Text, non_null = true),
        sqlite_column!("document_type", &SqlType::Text, non_null = true),
        sqlite_column!("document_url", &SqlType::Text, non_null = true),
        sqlite_column!("upload_date", &SqlType::Text, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
        CREATED_AT_COLUMN,
        UPDATED_AT_COLUMN,
    ],
    indices: &[("idx_billboard_documents_billboard", "billboard_id")],
    unique_constraints: &[],
};

pub const BUSINESS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        LAND_OWNERS_TABLE,
        BILLBOARDS_TABLE,
        CLIENTS_TABLE,
        PARTNERS_TABLE,
        RENTALS_TABLE,
        CLIENT_PAYMENTS_TABLE,
        INSTALLATION_COSTS_TABLE,
        LAND_OWNER_PAYMENTS_TABLE,
        PARTNER_INVESTMENTS_TABLE,
        BILLBOARD_DOCUMENTS_TABLE,
    ],
    migration: None,
}];

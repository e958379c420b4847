//! Test fixture creation for the business and user databases

use super::constants::*;
use anyhow::Result;
use billboard_server::business_store::*;
use billboard_server::user::{SqliteUserStore, UserManager, UserRole};
use chrono::NaiveDate;
use std::path::Path;

/// Ids of the records inserted by [`seed_business_db`].
#[derive(Debug, Clone)]
pub struct SeededIds {
    pub rented_billboard: String,
    pub free_billboard: String,
    pub land_owner: String,
    pub partner: String,
    pub client: String,
    pub rental: String,
    pub completed_payment: String,
    pub pending_payment: String,
    pub land_owner_payment: String,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn billboard(identifier: &str, location: &str, status: &str) -> Billboard {
    Billboard {
        billboard_identifier: Some(identifier.to_string()),
        location: location.to_string(),
        size: "20x10".to_string(),
        billboard_type: "Unipole".to_string(),
        status: status.to_string(),
        total_sft: Some(200.0),
        installation_cost: None,
        total_installation_cost: None,
        installation_date: Some(date(2023, 11, 1)),
        land_owner_id: None,
        rent_amount: None,
        payment_month: None,
        agreement_start_date: None,
        agreement_end_date: None,
        agreement_document_url: None,
        image_urls: StringList::default(),
    }
}

fn client_payment(rental_id: &str, amount: f64, day: NaiveDate, status: &str) -> ClientPayment {
    ClientPayment {
        rental_id: rental_id.to_string(),
        amount,
        payment_date: day,
        invoice_period_start: day,
        invoice_period_end: day + chrono::Duration::days(30),
        payment_method: Some("Bank Transfer".to_string()),
        receipt_id: None,
        status: status.to_string(),
        notes: None,
    }
}

/// Creates the viewer, manager and admin accounts.
pub fn create_test_users(db_path: &Path) -> Result<()> {
    let manager = UserManager::new(Box::new(SqliteUserStore::new(db_path)?));
    manager.add_user_with_login(VIEWER_USER, VIEWER_PASS.to_string(), UserRole::Viewer)?;
    manager.add_user_with_login(MANAGER_USER, MANAGER_PASS.to_string(), UserRole::Manager)?;
    manager.add_user_with_login(ADMIN_USER, ADMIN_PASS.to_string(), UserRole::Admin)?;
    Ok(())
}

/// Inserts one rented billboard with costs, a partner stake, a client
/// rental and its payments, plus one free billboard.
pub fn seed_business_db(store: &SqliteBusinessStore) -> Result<SeededIds> {
    let land_owner = RecordStore::<LandOwner>::create(
        store,
        LandOwner {
            name: LAND_OWNER_NAME.to_string(),
            contact_person: None,
            email: None,
            phone: Some("01700000000".to_string()),
            address: Some("Gulshan 2, Dhaka".to_string()),
        },
    )?;

    let mut rented = billboard(
        RENTED_BILLBOARD_IDENTIFIER,
        RENTED_BILLBOARD_LOCATION,
        "Rented",
    );
    rented.land_owner_id = Some(land_owner.id.clone());
    rented.rent_amount = Some(MONTHLY_RENT);
    let rented = RecordStore::<Billboard>::create(store, rented)?;

    let free = RecordStore::<Billboard>::create(
        store,
        billboard(
            FREE_BILLBOARD_IDENTIFIER,
            FREE_BILLBOARD_LOCATION,
            "Available",
        ),
    )?;

    for (cost_type, amount) in ["Structure Cost", "Installation Cost"]
        .into_iter()
        .zip(INSTALLATION_COSTS)
    {
        RecordStore::<InstallationCost>::create(
            store,
            InstallationCost {
                billboard_id: rented.id.clone(),
                partner_id: None,
                cost_type: cost_type.to_string(),
                amount,
                payment_date: date(2023, 10, 15),
                payment_method: None,
                description: None,
                receipt_url: None,
            },
        )?;
    }

    let partner = RecordStore::<Partner>::create(
        store,
        Partner {
            name: PARTNER_NAME.to_string(),
            contact_person: Some("Mr. Rahman".to_string()),
            email: None,
            phone: None,
            address: None,
        },
    )?;
    RecordStore::<PartnerInvestment>::create(
        store,
        PartnerInvestment {
            billboard_id: rented.id.clone(),
            partner_id: partner.id.clone(),
            investment_amount: PARTNER_INVESTMENT,
            investment_percentage: PARTNER_PERCENTAGE,
            investment_date: date(2023, 10, 1),
            purpose: "Structure".to_string(),
            notes: None,
        },
    )?;

    let client = RecordStore::<Client>::create(
        store,
        Client {
            company_name: CLIENT_COMPANY.to_string(),
            contact_person: "Rahim".to_string(),
            contact_email: "rahim@gp.test".to_string(),
            contact_phone: None,
            industry: Some("Telecom".to_string()),
            billing_address: Some("Bashundhara, Dhaka".to_string()),
        },
    )?;

    let rental = RecordStore::<Rental>::create(
        store,
        Rental {
            billboard_id: rented.id.clone(),
            client_id: client.id.clone(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            rental_amount: MONTHLY_RENT,
            invoice_date: 5,
            invoice_frequency: "Monthly".to_string(),
            payment_structure: None,
            status: "Active".to_string(),
            contract_document_url: None,
            notes: None,
        },
    )?;

    let mut completed = client_payment(
        &rental.id,
        COMPLETED_PAYMENT_AMOUNT,
        date(2024, 1, 5),
        "Completed",
    );
    completed.receipt_id = Some(COMPLETED_RECEIPT_ID.to_string());
    let completed = RecordStore::<ClientPayment>::create(store, completed)?;
    let pending = RecordStore::<ClientPayment>::create(
        store,
        client_payment(&rental.id, PENDING_PAYMENT_AMOUNT, date(2024, 2, 5), "Pending"),
    )?;

    let land_owner_payment = RecordStore::<LandOwnerPayment>::create(
        store,
        LandOwnerPayment {
            billboard_id: rented.id.clone(),
            land_owner_id: land_owner.id.clone(),
            amount: 120_000.0,
            payment_year_start: date(2024, 1, 1),
            payment_year_end: date(2024, 12, 31),
            payment_date: None,
            payment_method: None,
            status: "Pending".to_string(),
            notes: None,
        },
    )?;

    Ok(SeededIds {
        rented_billboard: rented.id,
        free_billboard: free.id,
        land_owner: land_owner.id,
        partner: partner.id,
        client: client.id,
        rental: rental.id,
        completed_payment: completed.id,
        pending_payment: pending.id,
        land_owner_payment: land_owner_payment.id,
    })
}

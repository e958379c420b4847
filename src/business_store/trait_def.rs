//! Storage traits for the business records.

use super::entity::Entity;
use super::models::*;
use anyhow::Result;

/// CRUD over one entity type.
///
/// Updates replace every writable field; concurrent writers are not
/// reconciled, the last update wins.
pub trait RecordStore<E: Entity>: Send + Sync {
    /// Returns every record, newest first.
    fn list(&self) -> Result<Vec<Record<E>>>;

    /// Returns the records whose `column` equals `value`, newest first.
    /// `column` must be one of the entity's columns.
    fn list_by(&self, column: &str, value: &str) -> Result<Vec<Record<E>>>;

    /// Returns Ok(None) if the record does not exist.
    fn get(&self, id: &str) -> Result<Option<Record<E>>>;

    fn create(&self, fields: E) -> Result<Record<E>>;

    /// Fails with `StoreError::NotFound` if the record does not exist.
    fn update(&self, id: &str, fields: E) -> Result<Record<E>>;

    /// Fails with `StoreError::NotFound` if the record does not exist.
    fn delete(&self, id: &str) -> Result<()>;
}

/// Every table loaded at once, for views that join in memory.
#[derive(Debug, Clone, Default)]
pub struct BusinessSnapshot {
    pub billboards: Vec<BillboardRecord>,
    pub clients: Vec<ClientRecord>,
    pub partners: Vec<PartnerRecord>,
    pub land_owners: Vec<LandOwnerRecord>,
    pub rentals: Vec<RentalRecord>,
    pub payments: Vec<ClientPaymentRecord>,
    pub installation_costs: Vec<InstallationCostRecord>,
    pub land_owner_payments: Vec<LandOwnerPaymentRecord>,
    pub investments: Vec<PartnerInvestmentRecord>,
}

pub trait BusinessStore:
    RecordStore<Billboard>
    + RecordStore<Client>
    + RecordStore<Partner>
    + RecordStore<LandOwner>
    + RecordStore<Rental>
    + RecordStore<ClientPayment>
    + RecordStore<InstallationCost>
    + RecordStore<LandOwnerPayment>
    + RecordStore<PartnerInvestment>
    + RecordStore<BillboardDocument>
    + Send
    + Sync
{
    fn snapshot(&self) -> Result<BusinessSnapshot> {
        Ok(BusinessSnapshot {
            billboards: <Self as RecordStore<Billboard>>::list(self)?,
            clients: <Self as RecordStore<Client>>::list(self)?,
            partners: <Self as RecordStore<Partner>>::list(self)?,
            land_owners: <Self as RecordStore<LandOwner>>::list(self)?,
            rentals: <Self as RecordStore<Rental>>::list(self)?,
            payments: <Self as RecordStore<ClientPayment>>::list(self)?,
            installation_costs: <Self as RecordStore<InstallationCost>>::list(self)?,
            land_owner_payments: <Self as RecordStore<LandOwnerPayment>>::list(self)?,
            investments: <Self as RecordStore<PartnerInvestment>>::list(self)?,
        })
    }
}

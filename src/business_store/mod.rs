//! Persistence for billboards, parties, rentals and money movements.

mod entity;
mod error;
mod models;
mod schema;
mod store;
mod trait_def;
mod views;

pub use entity::Entity;
pub use error::StoreError;
pub use models::*;
pub use store::SqliteBusinessStore;
pub use trait_def::{BusinessSnapshot, BusinessStore, RecordStore};
pub use views::{BillboardRef, LandOwnerPaymentView, PaymentView, RentalView};

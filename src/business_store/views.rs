//! Rows joined with the names of the records they point at.

use super::models::*;
use super::trait_def::BusinessSnapshot;
use serde::Serialize;
use std::collections::HashMap;

/// Billboard columns carried by joined rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BillboardRef {
    pub billboard_identifier: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RentalView {
    #[serde(flatten)]
    pub rental: RentalRecord,
    pub client_company: Option<String>,
    pub client_contact: Option<String>,
    pub client_email: Option<String>,
    #[serde(flatten)]
    pub billboard: BillboardRef,
}

#[derive(Clone, Debug, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: ClientPaymentRecord,
    pub client_company: Option<String>,
    #[serde(flatten)]
    pub billboard: BillboardRef,
}

#[derive(Clone, Debug, Serialize)]
pub struct LandOwnerPaymentView {
    #[serde(flatten)]
    pub payment: LandOwnerPaymentRecord,
    pub land_owner_name: Option<String>,
    #[serde(flatten)]
    pub billboard: BillboardRef,
}

struct Lookup<'a> {
    billboards: HashMap<&'a str, &'a BillboardRecord>,
    clients: HashMap<&'a str, &'a ClientRecord>,
    rentals: HashMap<&'a str, &'a RentalRecord>,
    land_owners: HashMap<&'a str, &'a LandOwnerRecord>,
}

impl<'a> Lookup<'a> {
    fn new(snapshot: &'a BusinessSnapshot) -> Self {
        Lookup {
            billboards: snapshot.billboards.iter().map(|r| (r.id.as_str(), r)).collect(),
            clients: snapshot.clients.iter().map(|r| (r.id.as_str(), r)).collect(),
            rentals: snapshot.rentals.iter().map(|r| (r.id.as_str(), r)).collect(),
            land_owners: snapshot
                .land_owners
                .iter()
                .map(|r| (r.id.as_str(), r))
                .collect(),
        }
    }

    fn billboard(&self, id: &str) -> BillboardRef {
        self.billboards
            .get(id)
            .map(|b| BillboardRef {
                billboard_identifier: b.fields.billboard_identifier.clone(),
                location: Some(b.fields.location.clone()),
            })
            .unwrap_or_default()
    }

    fn rental_view(&self, rental: &RentalRecord) -> RentalView {
        let client = self.clients.get(rental.fields.client_id.as_str());
        RentalView {
            rental: rental.clone(),
            client_company: client.map(|c| c.fields.company_name.clone()),
            client_contact: client.map(|c| c.fields.contact_person.clone()),
            client_email: client.map(|c| c.fields.contact_email.clone()),
            billboard: self.billboard(&rental.fields.billboard_id),
        }
    }

    fn payment_view(&self, payment: &ClientPaymentRecord) -> PaymentView {
        let rental = self.rentals.get(payment.fields.rental_id.as_str());
        PaymentView {
            payment: payment.clone(),
            client_company: rental
                .and_then(|r| self.clients.get(r.fields.client_id.as_str()))
                .map(|c| c.fields.company_name.clone()),
            billboard: rental
                .map(|r| self.billboard(&r.fields.billboard_id))
                .unwrap_or_default(),
        }
    }
}

impl BusinessSnapshot {
    pub fn rental_views(&self) -> Vec<RentalView> {
        let lookup = Lookup::new(self);
        self.rentals.iter().map(|r| lookup.rental_view(r)).collect()
    }

    pub fn rental_view(&self, rental_id: &str) -> Option<RentalView> {
        let lookup = Lookup::new(self);
        lookup.rentals.get(rental_id).map(|r| lookup.rental_view(r))
    }

    /// Client payments, most recent payment date first.
    pub fn payment_views(&self) -> Vec<PaymentView> {
        let lookup = Lookup::new(self);
        let mut views: Vec<PaymentView> = self
            .payments
            .iter()
            .map(|p| lookup.payment_view(p))
            .collect();
        views.sort_by(|a, b| b.payment.fields.payment_date.cmp(&a.payment.fields.payment_date));
        views
    }

    pub fn payment_view(&self, payment_id: &str) -> Option<PaymentView> {
        let lookup = Lookup::new(self);
        self.payments
            .iter()
            .find(|p| p.id == payment_id)
            .map(|p| lookup.payment_view(p))
    }

    pub fn land_owner_payment_views(&self) -> Vec<LandOwnerPaymentView> {
        let lookup = Lookup::new(self);
        self.land_owner_payments
            .iter()
            .map(|p| LandOwnerPaymentView {
                payment: p.clone(),
                land_owner_name: lookup
                    .land_owners
                    .get(p.fields.land_owner_id.as_str())
                    .map(|o| o.fields.name.clone()),
                billboard: lookup.billboard(&p.fields.billboard_id),
            })
            .collect()
    }

    /// Active rentals, the ones invoices are raised against.
    pub fn invoice_views(&self) -> Vec<RentalView> {
        let lookup = Lookup::new(self);
        self.rentals
            .iter()
            .filter(|r| r.fields.status == "Active")
            .map(|r| lookup.rental_view(r))
            .collect()
    }
}

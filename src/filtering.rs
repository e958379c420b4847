//! List filtering for the search boxes and status pickers.
//!
//! Matching is a lowercase substring test. Nothing is trimmed or
//! normalised, so `"  gulshan"` does not match `"Gulshan"`.

use crate::business_store::{
    BillboardRecord, ClientRecord, LandOwnerPaymentView, LandOwnerRecord, PartnerRecord,
    PaymentView, RentalView,
};
use serde::Deserialize;

/// Status value that disables status filtering.
pub const ALL: &str = "all";

/// Query parameters accepted by the list endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub method: Option<String>,
    pub rental_id: Option<String>,
}

impl ListFilter {
    pub fn search(term: &str) -> Self {
        ListFilter {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }
}

pub fn matches_term(term: &str, value: &str) -> bool {
    value.to_lowercase().contains(&term.to_lowercase())
}

/// True when `filter` is unset or `all`, or when it equals `value` ignoring case.
pub fn matches_choice(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter {
        None | Some("") => true,
        Some(f) if f.eq_ignore_ascii_case(ALL) => true,
        Some(f) => value.is_some_and(|v| v.to_lowercase() == f.to_lowercase()),
    }
}

/// A row that can be narrowed by [`ListFilter`].
pub trait Searchable {
    /// Fields the free-text search looks into.
    fn search_fields(&self) -> Vec<Option<&str>>;

    fn status(&self) -> Option<&str> {
        None
    }

    fn payment_method(&self) -> Option<&str> {
        None
    }

    fn rental_id(&self) -> Option<&str> {
        None
    }

    fn matches(&self, filter: &ListFilter) -> bool {
        let search_ok = match filter.search.as_deref() {
            None | Some("") => true,
            Some(term) => self
                .search_fields()
                .into_iter()
                .flatten()
                .any(|value| matches_term(term, value)),
        };
        let rental_ok = match filter.rental_id.as_deref() {
            None | Some("") => true,
            Some(id) => self.rental_id() == Some(id),
        };
        search_ok
            && rental_ok
            && matches_choice(filter.status.as_deref(), self.status())
            && matches_choice(filter.method.as_deref(), self.payment_method())
    }
}

/// Clones out the rows that pass `filter`, keeping their order.
pub fn apply<T: Searchable + Clone>(rows: &[T], filter: &ListFilter) -> Vec<T> {
    rows.iter().filter(|r| r.matches(filter)).cloned().collect()
}

impl Searchable for BillboardRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.fields.location.as_str()),
            self.fields.billboard_identifier.as_deref(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.fields.status.as_str())
    }
}

impl Searchable for ClientRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.fields.company_name.as_str()),
            self.fields.industry.as_deref(),
            Some(self.fields.contact_person.as_str()),
        ]
    }
}

impl Searchable for PartnerRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.fields.name.as_str()),
            self.fields.contact_person.as_deref(),
        ]
    }
}

impl Searchable for LandOwnerRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.fields.name.as_str()),
            self.fields.contact_person.as_deref(),
        ]
    }
}

/// Used for both the rental list and the invoice list.
impl Searchable for RentalView {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.client_company.as_deref(),
            self.billboard.location.as_deref(),
            self.billboard.billboard_identifier.as_deref(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.rental.fields.status.as_str())
    }
}

impl Searchable for PaymentView {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.client_company.as_deref(),
            self.billboard.location.as_deref(),
            Some(self.payment.fields.rental_id.as_str()),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.payment.fields.status.as_str())
    }

    fn payment_method(&self) -> Option<&str> {
        self.payment.fields.payment_method.as_deref()
    }

    fn rental_id(&self) -> Option<&str> {
        Some(self.payment.fields.rental_id.as_str())
    }
}

impl Searchable for LandOwnerPaymentView {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.land_owner_name.as_deref(),
            self.billboard.location.as_deref(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.payment.fields.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_store::{Client, Record};

    fn client(id: &str, company: &str, industry: Option<&str>, contact: &str) -> ClientRecord {
        Record {
            id: id.to_string(),
            fields: Client {
                company_name: company.to_string(),
                contact_person: contact.to_string(),
                contact_email: "x@y.test".to_string(),
                contact_phone: None,
                industry: industry.map(str::to_string),
                billing_address: None,
            },
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids(rows: &[ClientRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = vec![
            client("1", "Grameenphone", Some("Telecom"), "Rahim"),
            client("2", "Pran Foods", None, "Karim"),
        ];

        assert_eq!(ids(&apply(&rows, &ListFilter::search("PHONE"))), vec!["1"]);
        assert_eq!(ids(&apply(&rows, &ListFilter::search("tele"))), vec!["1"]);
        assert_eq!(ids(&apply(&rows, &ListFilter::search("kar"))), vec!["2"]);
        assert_eq!(ids(&apply(&rows, &ListFilter::search(""))), vec!["1", "2"]);
    }

    #[test]
    fn search_does_not_normalise() {
        let rows = vec![client("1", "Café Dhaka", None, "Rahim")];

        assert!(apply(&rows, &ListFilter::search("cafe")).is_empty());
        assert!(apply(&rows, &ListFilter::search(" café")).is_empty());
        assert_eq!(apply(&rows, &ListFilter::search("CAFÉ")).len(), 1);
    }

    #[test]
    fn status_choice_ignores_case_and_all() {
        assert!(matches_choice(None, Some("Rented")));
        assert!(matches_choice(Some("all"), Some("Rented")));
        assert!(matches_choice(Some("ALL"), None));
        assert!(matches_choice(Some("rented"), Some("Rented")));
        assert!(!matches_choice(Some("rent"), Some("Rented")));
        assert!(!matches_choice(Some("cash"), None));
    }

    #[test]
    fn filter_from_query_string() {
        let filter: ListFilter =
            serde_json::from_value(serde_json::json!({"search": "a", "status": "all"})).unwrap();
        assert_eq!(filter.search.as_deref(), Some("a"));
        assert!(filter.method.is_none());

        let rows = vec![client("1", "Acme", None, "Rahim")];
        assert_eq!(
            apply(&rows, &ListFilter::search("acme").with_status("Active")).len(),
            0
        );
    }
}

//! Colours for the status labels shown next to records.
//!
//! Statuses are free text; anything unrecognised is gray, except on the
//! settled-or-pending payment maps where it is red. No transitions between
//! statuses are enforced.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl BadgeColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeColor::Green => "bg-green-100 text-green-800",
            BadgeColor::Blue => "bg-blue-100 text-blue-800",
            BadgeColor::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeColor::Orange => "bg-orange-100 text-orange-800",
            BadgeColor::Red => "bg-red-100 text-red-800",
            BadgeColor::Gray => "bg-gray-100 text-gray-800",
        }
    }
}

/// A status with the colour it is shown in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub color: BadgeColor,
    pub css_class: &'static str,
}

impl Badge {
    pub fn new(label: &str, color: BadgeColor) -> Self {
        Badge {
            label: label.to_string(),
            color,
            css_class: color.css_class(),
        }
    }
}

/// A listed row with the badge for its status.
#[derive(Clone, Debug, Serialize)]
pub struct Badged<T> {
    #[serde(flatten)]
    pub row: T,
    pub status_badge: Badge,
}

impl<T> Badged<T> {
    pub fn new(row: T, status: &str, color: fn(&str) -> BadgeColor) -> Self {
        Badged {
            status_badge: Badge::new(status, color(status)),
            row,
        }
    }
}

pub fn billboard_status_color(status: &str) -> BadgeColor {
    match status {
        "Rented" => BadgeColor::Green,
        "Available" => BadgeColor::Blue,
        "Maintenance" => BadgeColor::Yellow,
        "Under Construction" => BadgeColor::Orange,
        _ => BadgeColor::Gray,
    }
}

pub fn rental_status_color(status: &str) -> BadgeColor {
    match status {
        "Active" => BadgeColor::Green,
        "Expired" => BadgeColor::Red,
        _ => BadgeColor::Gray,
    }
}

pub fn payment_status_color(status: &str) -> BadgeColor {
    match status {
        "Received" | "Paid" | "Completed" => BadgeColor::Green,
        "Pending" => BadgeColor::Yellow,
        "Failed" | "Overdue" => BadgeColor::Red,
        _ => BadgeColor::Gray,
    }
}

/// Invoice statuses are lowercase keys: `paid`, `pending`, `overdue`, `not_due`.
pub fn invoice_status_color(status: &str) -> BadgeColor {
    match status {
        "paid" => BadgeColor::Green,
        "pending" => BadgeColor::Yellow,
        "overdue" => BadgeColor::Red,
        _ => BadgeColor::Gray,
    }
}

pub fn land_owner_payment_status_color(status: &str) -> BadgeColor {
    match status {
        "Paid" => BadgeColor::Green,
        "Pending" => BadgeColor::Yellow,
        "Overdue" => BadgeColor::Red,
        "Due Soon" => BadgeColor::Yellow,
        _ => BadgeColor::Gray,
    }
}

fn settled_or_pending_color(status: &str, settled: &str) -> BadgeColor {
    match status {
        s if s == settled => BadgeColor::Green,
        "Pending" => BadgeColor::Yellow,
        _ => BadgeColor::Red,
    }
}

/// Client payments on the invoice board and in rental details.
pub fn received_payment_color(status: &str) -> BadgeColor {
    settled_or_pending_color(status, "Received")
}

/// Land-owner payments on the invoice board.
pub fn paid_payment_color(status: &str) -> BadgeColor {
    settled_or_pending_color(status, "Paid")
}

pub fn profit_color(profit: f64) -> BadgeColor {
    if crate::finance::is_profitable(profit) {
        BadgeColor::Green
    } else {
        BadgeColor::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billboard_statuses() {
        assert_eq!(billboard_status_color("Rented"), BadgeColor::Green);
        assert_eq!(billboard_status_color("Available"), BadgeColor::Blue);
        assert_eq!(
            billboard_status_color("Under Construction"),
            BadgeColor::Orange
        );
        assert_eq!(billboard_status_color("rented"), BadgeColor::Gray);
    }

    #[test]
    fn payment_and_invoice_statuses() {
        assert_eq!(payment_status_color("Completed"), BadgeColor::Green);
        assert_eq!(payment_status_color("Overdue"), BadgeColor::Red);
        assert_eq!(invoice_status_color("not_due"), BadgeColor::Gray);
        assert_eq!(invoice_status_color("pending"), BadgeColor::Yellow);
        assert_eq!(
            land_owner_payment_status_color("Due Soon"),
            BadgeColor::Yellow
        );
        assert_eq!(rental_status_color("Cancelled"), BadgeColor::Gray);
    }

    #[test]
    fn board_payment_statuses_fall_back_to_red() {
        assert_eq!(received_payment_color("Received"), BadgeColor::Green);
        assert_eq!(received_payment_color("Pending"), BadgeColor::Yellow);
        assert_eq!(received_payment_color("Completed"), BadgeColor::Red);
        assert_eq!(received_payment_color("Paid"), BadgeColor::Red);

        assert_eq!(paid_payment_color("Paid"), BadgeColor::Green);
        assert_eq!(paid_payment_color("Pending"), BadgeColor::Yellow);
        assert_eq!(paid_payment_color("Received"), BadgeColor::Red);
        assert_eq!(paid_payment_color(""), BadgeColor::Red);
    }

    #[test]
    fn profit_sign() {
        assert_eq!(profit_color(0.0), BadgeColor::Green);
        assert_eq!(profit_color(-0.01), BadgeColor::Red);
    }

    #[test]
    fn badge_serializes_colour_and_class() {
        let json = serde_json::to_value(Badge::new("Rented", BadgeColor::Green)).unwrap();
        assert_eq!(json["color"], "green");
        assert_eq!(json["css_class"], "bg-green-100 text-green-800");
    }

    #[test]
    fn badged_row_is_flattened() {
        #[derive(Serialize)]
        struct Row {
            id: &'static str,
        }
        let json =
            serde_json::to_value(Badged::new(Row { id: "r1" }, "Expired", rental_status_color))
                .unwrap();
        assert_eq!(json["id"], "r1");
        assert_eq!(json["status_badge"]["label"], "Expired");
        assert_eq!(json["status_badge"]["color"], "red");
    }
}

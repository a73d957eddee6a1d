//! Test Helpers

use boutique::{
    attributes::SelectedAttributes,
    products::{ProductDisplay, ProductSnapshot},
};
use rust_decimal::Decimal;

use crate::domain::orders::models::CheckoutDetails;

/// Products every test catalog starts with.
pub(crate) fn catalog_fixtures() -> Vec<(&'static str, ProductSnapshot)> {
    vec![
        (
            "abaya",
            ProductSnapshot::new(
                ProductDisplay::new("Nida Abaya", "abaya.jpg").with_slug("nida-abaya"),
                Decimal::new(650_050, 2),
            ),
        ),
        (
            "hijab",
            ProductSnapshot::new(
                ProductDisplay::new("Jersey Hijab", "hijab.jpg"),
                Decimal::from(900),
            ),
        ),
        (
            "lawn-suit",
            ProductSnapshot::new(
                ProductDisplay::new("Printed Lawn Suit", "lawn.jpg"),
                Decimal::from(3200),
            ),
        ),
    ]
}

pub(crate) fn red() -> SelectedAttributes {
    SelectedAttributes::new().with("Color", "Red")
}

pub(crate) fn details() -> CheckoutDetails {
    CheckoutDetails {
        full_name: "Amna Siddiqui".to_string(),
        email: "amna@example.com".to_string(),
        phone: "+92 300 1234567".to_string(),
        address: "House 12, Street 4, Gulberg".to_string(),
        city: "Lahore".to_string(),
        notes: Some("Call before delivery".to_string()),
    }
}

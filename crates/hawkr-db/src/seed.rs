//! Demo-data seeding for local development.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::menu_items::NewMenuItem;
use crate::DbError;

/// Insert a handful of located vendors with menus around downtown Austin.
///
/// Returns the number of vendors created. Intended for a fresh database;
/// running it twice just creates a second batch (ids are random).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails.
pub async fn seed_demo_data(pool: &PgPool) -> Result<usize, DbError> {
    let vendors: &[(&str, &str, f64, f64, &[(&str, &str)])] = &[
        (
            "El Primo Tacos",
            "+15125550101",
            30.2672,
            -97.7431,
            &[
                ("Tacos al Pastor", "8.50"),
                ("Birria Plate", "12.00"),
                ("Horchata", "3.00"),
            ],
        ),
        (
            "Noodle Cart 88",
            "+15125550102",
            30.2701,
            -97.7425,
            &[("Tonkotsu Ramen", "11.50"), ("Gyoza", "6.00")],
        ),
        (
            "Sunrise Breakfast Stand",
            "+15125550103",
            30.2598,
            -97.7388,
            &[
                ("Bacon Egg Taco", "4.25"),
                ("Pancake Stack", "7.00"),
                ("Cold Brew", "4.00"),
            ],
        ),
    ];

    for (name, phone, lat, lng, menu) in vendors {
        let vendor_id = crate::vendors::create_vendor(pool, name, phone, *lat, *lng).await?;

        let items: Vec<NewMenuItem> = menu
            .iter()
            .map(|(item_name, price)| NewMenuItem {
                id: hawkr_core::prefixed_id('m'),
                name: (*item_name).to_string(),
                description: None,
                price: price.parse::<Decimal>().unwrap_or(Decimal::ZERO),
            })
            .collect();
        crate::menu_items::insert_menu_items(pool, &vendor_id, &items).await?;

        tracing::info!(vendor = name, items = items.len(), "seeded vendor");
    }

    Ok(vendors.len())
}

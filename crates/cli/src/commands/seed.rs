//! Catalog seeding command.
//!
//! The API never writes to `shop.categories` / `shop.products`; this command
//! populates them with a small sample catalog so carts have something to
//! hold. It refuses to touch a catalog that already has products.

use rust_decimal::Decimal;

use super::CommandError;

/// Sample catalog: (category, product name, price).
const SAMPLE_PRODUCTS: &[(&str, &str, &str)] = &[
    ("Fruit", "Clementine Crate", "10.00"),
    ("Fruit", "Blood Orange Box", "12.50"),
    ("Pantry", "Honey Jar", "5.50"),
    ("Pantry", "Olive Oil Tin", "18.75"),
    ("Kitchen", "Citrus Press", "24.99"),
];

/// Seed the sample catalog.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let existing: i64 = sqlx::query_scalar("SELECT count(*) FROM shop.products")
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        tracing::info!(products = existing, "Catalog already seeded, nothing to do");
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for (category, name, price) in SAMPLE_PRODUCTS {
        let price: Decimal = price.parse().map_err(|_| {
            // A malformed constant is a programming error, but don't panic
            // in a tool that may run against production.
            CommandError::Database(sqlx::Error::Protocol(format!("bad seed price for {name}")))
        })?;

        let category_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO shop.categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            ",
        )
        .bind(category)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO shop.products (name, price, category_id)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(name)
        .bind(price)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(products = SAMPLE_PRODUCTS.len(), "Catalog seeded");
    Ok(())
}

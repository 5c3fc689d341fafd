//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p orderhub-db --bin seed
//!
//! # Specify database path
//! cargo run -p orderhub-db --bin seed -- --db ./data/orderhub.db
//! ```
//!
//! ## Generated Data
//! - 4 stores spread across the Ho Chi Minh City region
//! - A small apparel catalog, each product in several color/size variants
//! - Inventory for every variant at every store (uneven on purpose, so
//!   some orders split across stores)
//! - 2 customers with shipping addresses
//! - Fixed-amount and percentage vouchers, granted to the first customer

use std::env;

use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;

use orderhub_core::VoucherKind;
use orderhub_db::{Database, DbConfig};

/// (name, latitude, longitude)
const STORES: &[(&str, f64, f64)] = &[
    ("District 1 Flagship", 10.7769, 106.7009),
    ("Thu Duc Outlet", 10.8494, 106.7537),
    ("Bien Hoa Depot", 10.9447, 106.8243),
    ("Can Tho Branch", 10.0452, 105.7469),
];

/// (product, price_cents, colors, sizes)
const PRODUCTS: &[(&str, i64, &[&str], &[&str])] = &[
    ("Basic Tee", 25_000, &["black", "white", "navy"], &["S", "M", "L", "XL"]),
    ("Oxford Shirt", 55_000, &["white", "blue"], &["M", "L", "XL"]),
    ("Chino Pants", 65_000, &["khaki", "olive"], &["30", "32", "34"]),
    ("Zip Hoodie", 80_000, &["gray", "black"], &["M", "L"]),
    ("Canvas Sneakers", 120_000, &["white", "black"], &["40", "41", "42", "43"]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./orderhub_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("OrderHub Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./orderhub_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 OrderHub Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.stores().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} stores", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Stores
    let mut stores = Vec::new();
    for (name, lat, lon) in STORES {
        stores.push(db.stores().create(name, *lat, *lon).await?);
    }
    println!("✓ Created {} stores", stores.len());

    // Catalog + inventory
    let mut variant_count = 0;
    for (seed, (name, price_cents, colors, sizes)) in PRODUCTS.iter().enumerate() {
        let product = db.catalog().create_product(name, None).await?;

        for color in *colors {
            for size in *sizes {
                let variant = db
                    .catalog()
                    .create_variant(&product.id, color, size, *price_cents)
                    .await?;
                variant_count += 1;

                // Uneven stock: some stores hold a lot, some very little,
                // so allocation regularly needs more than one store.
                for (store_idx, store) in stores.iter().enumerate() {
                    let quantity = ((seed + store_idx * 3 + variant_count) % 8) as i64;
                    db.stores()
                        .set_inventory(&store.id, &variant.id, quantity)
                        .await?;
                }
            }
        }
    }
    println!("✓ Created {} products, {} variants", PRODUCTS.len(), variant_count);

    // Customers and addresses
    let alice = db.customers().create("Alice Tran", "alice@example.com").await?;
    db.customers()
        .add_address(&alice.id, "12 Nguyen Hue, District 1", 10.7740, 106.7020)
        .await?;

    let bob = db.customers().create("Bob Pham", "bob@example.com").await?;
    db.customers()
        .add_address(&bob.id, "45 Vo Van Ngan, Thu Duc", 10.8506, 106.7601)
        .await?;
    println!("✓ Created 2 customers with addresses");

    // Vouchers, granted to Alice
    let today = Utc::now().date_naive();
    let fixed = db
        .vouchers()
        .create(
            "WELCOME10K",
            Some("10,000 off your order"),
            Some(10_000),
            None,
            Some(today - Duration::days(1)),
            Some(today + Duration::days(90)),
            VoucherKind::Discount,
        )
        .await?;
    let percent = db
        .vouchers()
        .create(
            "SAVE10PCT",
            Some("10% off the running total"),
            None,
            Some(1000),
            Some(today - Duration::days(1)),
            Some(today + Duration::days(90)),
            VoucherKind::Discount,
        )
        .await?;

    db.vouchers().grant(&alice.id, &fixed.id).await?;
    db.vouchers().grant(&alice.id, &percent.id).await?;
    println!("✓ Created 2 vouchers, granted to {}", alice.full_name);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

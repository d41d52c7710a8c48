use storefront_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    services::account_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let ada = ensure_customer(&pool, "Ada Lovelace", "ada@example.com", "555-0100").await?;
    let alan = ensure_customer(&pool, "Alan Turing", "alan@example.com", "555-0101").await?;
    ensure_account(&pool, "ada", "ada123", ada).await?;
    seed_products(&pool).await?;

    println!("Seed completed. Customer IDs: {ada}, {alan}");
    Ok(())
}

async fn ensure_customer(
    pool: &DbPool,
    name: &str,
    email: &str,
    phone: &str,
) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM customers WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO customers (name, email, phone) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_one(pool)
    .await?;

    println!("Ensured customer {email}");
    Ok(id)
}

async fn ensure_account(
    pool: &DbPool,
    username: &str,
    password: &str,
    customer_id: i32,
) -> anyhow::Result<()> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO customer_accounts (username, password_hash, customer_id)
        VALUES ($1, $2, $3)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(customer_id)
    .execute(pool)
    .await?;

    println!("Ensured account {username}");
    Ok(())
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<()> {
    let products = vec![
        ("Ferris Mug", 12.5, 40),
        ("Rust Sticker Pack", 4.0, 6),
        ("Axum Hoodie", 55.0, 3),
        ("E-book: Async Rust", 25.0, 100),
    ];

    for (name, price, stock_level) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, price, stock_level)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(stock_level)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

use rotipang_api::{config::AppConfig, db::create_pool, services::auth_service::hash_password};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_admin(&pool, "owner@rotipang.id", "rotipang123", "Owner", "owner").await?;
    seed_products(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let digest = hash_password(password);

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO admins (id, email, password, name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name, role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(digest)
    .bind(name)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {email} (role={role})");
    Ok(row.0)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count.0 > 0 {
        println!("Products already present, skipping");
        return Ok(());
    }

    let products = vec![
        ("Roti Sobek Coklat", "Roti Manis", 25000, "Soft pull-apart bread with chocolate filling", Some(20)),
        ("Croissant Butter", "Pastry", 18000, "Flaky all-butter croissant", Some(30)),
        ("Roti Gandum", "Roti Tawar", 22000, "Whole wheat loaf, baked daily", Some(15)),
        ("Donat Gula", "Donat", 8000, "Classic sugar-dusted doughnut", Some(40)),
        ("Bolu Pandan", "Kue", 35000, "Pandan sponge cake", Some(10)),
    ];

    for (name, category, price, description, stock) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price, description, available, stock)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(category)
        .bind(price as i64)
        .bind(description)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

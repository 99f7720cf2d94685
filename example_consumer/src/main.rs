//! Example consumer: a separate Rust project that uses crudify as a dependency.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `DB_KIND`/`DB_URI` to point at MySQL, PostgreSQL, or MongoDB instead
//! of the default local SQLite file.

use crudify::{common_routes, crud_routes, Backend, Permissions, Schema};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crudify=info")),
        )
        .init();

    let db_kind = std::env::var("DB_KIND").unwrap_or_else(|_| "sqlite".into());
    let db_uri = std::env::var("DB_URI").unwrap_or_else(|_| "example.db?mode=rwc".into());
    let backend = Backend::connect(&db_kind, &db_uri).await?;

    let items = backend
        .register(
            "items",
            &Schema::from_tags([("name", "string"), ("price", "float")]),
        )
        .await?;
    let users = backend
        .register(
            "users",
            &Schema::from_tags([("name", "string"), ("email", "string")]),
        )
        .await?;

    let app = axum::Router::new()
        .merge(common_routes())
        .merge(crud_routes("items", items, Permissions::default()))
        // Users can be added and listed over HTTP, but not changed.
        .merge(crud_routes("users", users, Permissions::from_verbs(["create", "read"])));

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup. Everything
//! else (`DATABASE_URL`, `TOKEN_SECRET`, `BIND_ADDRESS`, ...) is read from the
//! environment or a `.env` file.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .map(|origins| {
            origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    let config = match allowed_origins {
        Some(allowed_origins) => ServerConfig { allowed_origins },
        None => ServerConfig::default(),
    };

    start_server(config).await
}

//! VoluntAí volunteer-matching REST API
//!
//! (c) VoluntAí 2026

use voluntai_api::TOKEN_KEY;
use voluntai_api::api;
use voluntai_api::core::services::{
    MyChatService, MyContaService, MyInscricaoService, MyRelatorioService, MyVagaService,
};
use voluntai_api::infrastructure::database::DatabaseConnection;
use voluntai_api::infrastructure::repositories::{
    DbChatRepository, DbInscricaoRepository, DbUsuarioRepository, DbVagaRepository,
};
use voluntai_api::infrastructure::token::TokenKey;

use anyhow::anyhow;
use axum::http::Method;
use di::{Injectable, ServiceCollection};
use log::info;
use std::env;
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    // The signing key is mandatory; there is no fallback secret.
    let secret = env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET must be set"))?;
    TOKEN_KEY
        .set(TokenKey::new(secret))
        .map_err(|_| anyhow!("token key should not be set"))?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(web_server_task());

    Ok(())
}

async fn web_server_task() {
    let provider = ServiceCollection::new()
        .add(DatabaseConnection::singleton())
        .add(DbUsuarioRepository::scoped())
        .add(DbVagaRepository::scoped())
        .add(DbInscricaoRepository::scoped())
        .add(DbChatRepository::scoped())
        .add(MyContaService::scoped())
        .add(MyVagaService::scoped())
        .add(MyInscricaoService::scoped())
        .add(MyChatService::scoped())
        .add(MyRelatorioService::scoped())
        .build_provider()
        .unwrap();

    let app = api::app(provider).layer(
        CorsLayer::new()
            .allow_headers(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_origin(Any),
    );

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
    info!("Shutting down...");
}

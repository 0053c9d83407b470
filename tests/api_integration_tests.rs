//! API Integration Tests
//!
//! Exercises the HTTP API end to end against a real database.
//!
//! Tests are serialized because they share a global test pool.
//!
//! Note: The `more-di` DI framework doesn't support injecting custom pools.
//! We work around this by using `DatabaseConnection::set_test_pool()` to set
//! a global pool that the DI-created DatabaseConnection will use.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use di::{Injectable, ServiceCollection};
use serde_json::{Value, json};
use serial_test::serial;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU32, Ordering};
use tower::ServiceExt;
use voluntai_api::{
    TOKEN_KEY,
    api,
    core::services::{
        MyChatService, MyContaService, MyInscricaoService, MyRelatorioService, MyVagaService,
    },
    infrastructure::database::DatabaseConnection,
    infrastructure::repositories::{
        DbChatRepository, DbInscricaoRepository, DbUsuarioRepository, DbVagaRepository,
    },
    infrastructure::token::TokenKey,
};

/// Counter for unique test database URIs
static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Setup test database with migrations and returns pool
/// Uses in-memory SQLite for test isolation
async fn setup_test_db() -> SqlitePool {
    let db_num = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    // Use file URI format with shared cache - each test gets a unique DB
    let db_url = format!("sqlite:file:testdb{}?mode=memory&cache=shared", db_num);

    let pool = SqlitePool::connect(&db_url).await.unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();

    // Set this pool as the global test pool so DI uses it
    DatabaseConnection::set_test_pool(pool.clone());

    pool
}

/// Clean up after test
fn cleanup_test_db() {
    DatabaseConnection::clear_test_pool();
}

/// Create test app - uses the global test pool set by setup_test_db()
fn create_test_app() -> axum::Router {
    let _ = TOKEN_KEY.set(TokenKey::new("segredo-de-teste"));

    let provider = ServiceCollection::new()
        .add(DatabaseConnection::transient())
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

    api::app(provider)
}

/// Fires a single request against a fresh app instance and decodes the JSON
/// body (requests consume the router, so each call rebuilds it).
async fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = create_test_app();

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Registers an individual volunteer and returns the response body
/// (token + user).
async fn register_fisico(nome: &str, email: &str, cpf: &str) -> Value {
    let (status, body) = request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "nome": nome,
            "email": email,
            "senha": "senha123",
            "tipo": "fisico",
            "cpf": cpf,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

/// Registers an organization account and returns the response body.
async fn register_juridico(nome: &str, email: &str, cnpj: &str) -> Value {
    let (status, body) = request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "nome": nome,
            "email": email,
            "senha": "senha123",
            "tipo": "juridico",
            "cnpj": cnpj,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_vaga(token: &str, nome: &str, categoria: &str, vagas_disponiveis: i64) -> Value {
    let (status, body) = request(
        "POST",
        "/api/vagas",
        Some(token),
        Some(json!({
            "nome": nome,
            "descricao": "Descrição de teste",
            "local": "Praça Central",
            "data_hora": "31/12/2025 18:30",
            "vagas_disponiveis": vagas_disponiveis,
            "categoria": categoria,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
#[serial]
async fn test_health_check() {
    let _pool = setup_test_db().await;

    let (status, body) = request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_register_fisico_sem_cpf() {
    let pool = setup_test_db().await;

    let (status, body) = request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "nome": "Maria",
            "email": "maria@example.com",
            "senha": "senha123",
            "tipo": "fisico",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("CPF"));

    // no account may be created on a rejected registration
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_register_email_duplicado() {
    let pool = setup_test_db().await;

    register_fisico("Maria", "maria@example.com", "12345678900").await;

    let (status, body) = request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "nome": "Outra Maria",
            "email": "maria@example.com",
            "senha": "outrasenha",
            "tipo": "fisico",
            "cpf": "98765432100",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email já cadastrado.");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_register_login_roundtrip() {
    let _pool = setup_test_db().await;

    let registered = register_fisico("Maria", "maria@example.com", "12345678900").await;

    let (status, body) = request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "maria@example.com", "senha": "senha123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], registered["user"]["id"]);
    assert!(body["token"].as_str().is_some());

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_login_senha_errada() {
    let _pool = setup_test_db().await;

    register_fisico("Maria", "maria@example.com", "12345678900").await;

    let (status, body) = request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "maria@example.com", "senha": "errada"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Credenciais inválidas.");

    // unknown email yields the same undifferentiated message
    let (status, body) = request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ninguem@example.com", "senha": "senha123"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Credenciais inválidas.");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_list_vagas_publico_e_create_exige_token() {
    let _pool = setup_test_db().await;

    let (status, body) = request("GET", "/api/vagas", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, _) = request(
        "POST",
        "/api/vagas",
        None,
        Some(json!({
            "nome": "Mutirão",
            "descricao": "Limpeza",
            "local": "Praça",
            "data_hora": "31/12/2025 18:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_create_vaga_data_invalida() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token = ong["token"].as_str().unwrap().to_string();

    let (status, body) = request(
        "POST",
        "/api/vagas",
        Some(&token),
        Some(json!({
            "nome": "Mutirão",
            "descricao": "Limpeza",
            "local": "Praça",
            "data_hora": "2025-12-31",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Formato de data inválido. Use DD/MM/AAAA HH:MM");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_vaga_update_delete_somente_dono() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();
    let intruso = register_juridico("ONG B", "outra@example.com", "22222222000100").await;
    let token_intruso = intruso["token"].as_str().unwrap().to_string();

    let vaga = create_vaga(&token_ong, "Mutirão de Limpeza", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    // date round-trips through the fixed client format
    assert_eq!(vaga["data_hora"], "2025-12-31T18:30:00");

    let (status, _) = request(
        "PUT",
        &format!("/api/vagas/{vaga_id}"),
        Some(&token_intruso),
        Some(json!({"nome": "Invadida"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        "PUT",
        &format!("/api/vagas/{vaga_id}"),
        Some(&token_ong),
        Some(json!({"nome": "Mutirão Atualizado"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "Mutirão Atualizado");
    // omitted fields keep their stored values
    assert_eq!(body["descricao"], "Descrição de teste");

    let (status, _) = request(
        "DELETE",
        &format!("/api/vagas/{vaga_id}"),
        Some(&token_intruso),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        "DELETE",
        &format!("/api/vagas/{vaga_id}"),
        Some(&token_ong),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, _) = request("GET", &format!("/api/vagas/{vaga_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_enroll_cancel_idempotente() {
    let pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let vaga = create_vaga(ong["token"].as_str().unwrap(), "Mutirão", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    let (status, _) = request(
        "POST",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // enrolling twice is rejected
    let (status, body) = request(
        "POST",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Você já está inscrito.");

    let (status, _) = request(
        "DELETE",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // cancelling again is a no-op, still 200
    let (status, body) = request(
        "DELETE",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Inscrição cancelada.");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inscricoes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_enroll_capacidade_esgotada() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let vaga = create_vaga(ong["token"].as_str().unwrap(), "Vaga Única", "Limpeza", 1).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let v2 = register_fisico("V2", "v2@example.com", "98765432100").await;

    let (status, _) = request(
        "POST",
        "/api/inscricoes",
        Some(v1["token"].as_str().unwrap()),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        "POST",
        "/api/inscricoes",
        Some(v2["token"].as_str().unwrap()),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Não há vagas disponíveis.");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_confirmar_presenca_nao_dono() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let vaga = create_vaga(ong["token"].as_str().unwrap(), "Mutirão", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    let (status, inscricao) = request(
        "POST",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inscricao_id = inscricao["id"].as_str().unwrap().to_string();

    // the volunteer is not the posting's owner
    let (status, _) = request(
        "POST",
        "/api/inscricoes/confirmar-presenca",
        Some(&token_v1),
        Some(json!({"inscricaoId": inscricao_id})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // confirming a non-existent enrollment is a 404, not a 403
    let (status, _) = request(
        "POST",
        "/api/inscricoes/confirmar-presenca",
        Some(ong["token"].as_str().unwrap()),
        Some(json!({"inscricaoId": uuid::Uuid::new_v4().to_string()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_fluxo_estatisticas() {
    let _pool = setup_test_db().await;

    // ONG A creates a posting, V1 enrolls, ONG A confirms 3 hours
    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();
    let vaga = create_vaga(&token_ong, "Mutirão de Limpeza", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    let (status, inscricao) = request(
        "POST",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inscricao_id = inscricao["id"].as_str().unwrap().to_string();

    // the owner sees the enrollment with the volunteer's public fields
    let (status, inscritos) = request(
        "GET",
        &format!("/api/inscricoes/vaga/{vaga_id}"),
        Some(&token_ong),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inscritos.as_array().unwrap().len(), 1);
    assert_eq!(inscritos[0]["voluntario"]["nome"], "V1");
    assert!(inscritos[0]["voluntario"]["senha_hash"].is_null());

    let (status, confirmada) = request(
        "POST",
        "/api/inscricoes/confirmar-presenca",
        Some(&token_ong),
        Some(json!({"inscricaoId": inscricao_id, "horasVoluntariadas": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmada["presencaConfirmada"], true);
    assert_eq!(confirmada["horasVoluntariadas"], 3);

    let (status, estatisticas) =
        request("GET", "/api/inscricoes/estatisticas", Some(&token_v1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(estatisticas["totalAcoes"], 1);
    assert_eq!(estatisticas["totalHoras"], 3);
    assert_eq!(estatisticas["categorias"]["Limpeza"], 1);
    assert_eq!(estatisticas["inscricoes"].as_array().unwrap().len(), 1);
    assert_eq!(
        estatisticas["inscricoes"][0]["vaga"]["nome"],
        "Mutirão de Limpeza"
    );

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_confirmar_sem_horas_usa_padrao() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();
    let vaga = create_vaga(&token_ong, "Mutirão", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;

    let (_, inscricao) = request(
        "POST",
        "/api/inscricoes",
        Some(v1["token"].as_str().unwrap()),
        Some(json!({"vagaId": vaga_id})),
    )
    .await;
    let inscricao_id = inscricao["id"].as_str().unwrap().to_string();

    let (status, confirmada) = request(
        "POST",
        "/api/inscricoes/confirmar-presenca",
        Some(&token_ong),
        Some(json!({"inscricaoId": inscricao_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmada["horasVoluntariadas"], 1);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_chat_envio_e_listagem() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();
    let vaga = create_vaga(&token_ong, "Mutirão", "Limpeza", 10).await;
    let vaga_id = vaga["id"].as_str().unwrap().to_string();

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    // blank text is rejected
    let (status, body) = request(
        "POST",
        "/api/chat/send",
        Some(&token_v1),
        Some(json!({"mensagem": "   ", "vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Mensagem vazia.");

    let (status, _) = request(
        "POST",
        "/api/chat/send",
        Some(&token_v1),
        Some(json!({"mensagem": "Olá!", "vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        "POST",
        "/api/chat/send",
        Some(&token_ong),
        Some(json!({"mensagem": "Bem-vinda!", "vagaId": vaga_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, mensagens) = request(
        "GET",
        &format!("/api/chat/vaga/{vaga_id}"),
        Some(&token_v1),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // oldest first, each with the author's public name
    let mensagens = mensagens.as_array().unwrap();
    assert_eq!(mensagens.len(), 2);
    assert_eq!(mensagens[0]["mensagem"], "Olá!");
    assert_eq!(mensagens[0]["usuario"]["nome"], "V1");
    assert_eq!(mensagens[1]["mensagem"], "Bem-vinda!");
    assert_eq!(mensagens[1]["usuario"]["nome"], "ONG A");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_relatorio_ong() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();

    let vaga1 = create_vaga(&token_ong, "Mutirão 1", "Limpeza", 10).await;
    let vaga2 = create_vaga(&token_ong, "Mutirão 2", "Educação", 10).await;

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    for vaga in [&vaga1, &vaga2] {
        let (status, _) = request(
            "POST",
            "/api/inscricoes",
            Some(v1["token"].as_str().unwrap()),
            Some(json!({"vagaId": vaga["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, metricas) =
        request("GET", "/api/relatorios/ong", Some(&token_ong), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metricas["total_vagas_criadas"], 2);
    assert_eq!(metricas["total_inscricoes"], 2);

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_perfil_update_parcial() {
    let _pool = setup_test_db().await;

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    let (status, perfil) = request("GET", "/api/auth/me", Some(&token_v1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(perfil["nome"], "V1");

    let (status, atualizado) = request(
        "PUT",
        "/api/usuarios/me",
        Some(&token_v1),
        Some(json!({"telefone": "11999990000", "cidade": "São Paulo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(atualizado["telefone"], "11999990000");
    assert_eq!(atualizado["cidade"], "São Paulo");
    // omitted fields keep their stored values
    assert_eq!(atualizado["nome"], "V1");
    assert_eq!(atualizado["cpf"], "12345678900");

    cleanup_test_db();
}

#[tokio::test]
#[serial]
async fn test_minhas_inscricoes_e_minhas_vagas() {
    let _pool = setup_test_db().await;

    let ong = register_juridico("ONG A", "ong@example.com", "11111111000100").await;
    let token_ong = ong["token"].as_str().unwrap().to_string();
    let vaga = create_vaga(&token_ong, "Mutirão", "Limpeza", 10).await;

    let v1 = register_fisico("V1", "v1@example.com", "12345678900").await;
    let token_v1 = v1["token"].as_str().unwrap().to_string();

    let (status, _) = request(
        "POST",
        "/api/inscricoes",
        Some(&token_v1),
        Some(json!({"vagaId": vaga["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, minhas) = request("GET", "/api/inscricoes/me", Some(&token_v1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(minhas.as_array().unwrap().len(), 1);
    assert_eq!(minhas[0]["vaga"]["nome"], "Mutirão");

    let (status, vagas) = request("GET", "/api/vagas/me", Some(&token_ong), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vagas.as_array().unwrap().len(), 1);

    // the volunteer owns no postings
    let (status, vagas) = request("GET", "/api/vagas/me", Some(&token_v1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vagas.as_array().unwrap().len(), 0);

    cleanup_test_db();
}

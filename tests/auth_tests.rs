//! Unit tests for the signing key and the bearer-token extractor

use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use chrono::{Duration, Utc};
use uuid::Uuid;
use voluntai_api::TOKEN_KEY;
use voluntai_api::api::CurrentUser;
use voluntai_api::infrastructure::entities::{TipoUsuario, Usuario};
use voluntai_api::infrastructure::token::{TokenError, TokenKey, VALIDADE_DIAS};

fn init_token_key() {
    let _ = TOKEN_KEY.set(TokenKey::new("segredo-de-teste"));
}

fn usuario_fisico() -> Usuario {
    Usuario {
        id: Uuid::new_v4(),
        nome: "Maria".to_string(),
        email: "maria@example.com".to_string(),
        senha_hash: "$2b$12$hash".to_string(),
        telefone: None,
        tipo: TipoUsuario::Fisico,
        cpf: Some("12345678900".to_string()),
        cnpj: None,
        cep: None,
        rua: None,
        cidade: None,
        estado: None,
        latitude: None,
        longitude: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_issue_and_verify_roundtrip() {
    let key = TokenKey::new("outro-segredo");
    let usuario = usuario_fisico();
    let agora = Utc::now();

    let token = key.issue(&usuario, agora).unwrap();
    let claims = key.verify(&token, agora).unwrap();

    assert_eq!(claims.id, usuario.id);
    assert_eq!(claims.email, usuario.email);
    assert_eq!(claims.tipo, TipoUsuario::Fisico);
    assert_eq!(claims.exp - claims.iat, VALIDADE_DIAS * 24 * 60 * 60);
}

#[tokio::test]
async fn test_verify_rejects_wrong_key() {
    let usuario = usuario_fisico();
    let agora = Utc::now();

    let token = TokenKey::new("chave-a").issue(&usuario, agora).unwrap();
    let result = TokenKey::new("chave-b").verify(&token, agora);

    assert_eq!(result.unwrap_err(), TokenError::Invalid);
}

#[tokio::test]
async fn test_verify_rejects_expired() {
    let key = TokenKey::new("outro-segredo");
    let usuario = usuario_fisico();
    let emitido = Utc::now() - Duration::days(VALIDADE_DIAS + 1);

    let token = key.issue(&usuario, emitido).unwrap();
    let result = key.verify(&token, Utc::now());

    assert_eq!(result.unwrap_err(), TokenError::Expired);
}

#[tokio::test]
async fn test_verify_rejects_garbage() {
    let key = TokenKey::new("outro-segredo");

    assert_eq!(key.verify("", Utc::now()).unwrap_err(), TokenError::Invalid);
    assert_eq!(
        key.verify("nao.e.jwt", Utc::now()).unwrap_err(),
        TokenError::Invalid
    );
    assert_eq!(
        key.verify("a.b", Utc::now()).unwrap_err(),
        TokenError::Invalid
    );
}

#[tokio::test]
async fn test_extract_user_valid_token() {
    init_token_key();

    let usuario = usuario_fisico();
    let token = TOKEN_KEY.get().unwrap().issue(&usuario, Utc::now()).unwrap();

    let req = Request::builder()
        .header("Authorization", format!("Bearer {token}"))
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &()).await;

    let current = result.unwrap();
    assert_eq!(current.id, usuario.id);
    assert_eq!(current.email, usuario.email);
}

#[tokio::test]
async fn test_extract_user_missing_header() {
    init_token_key();

    let req = Request::builder().body(()).unwrap();

    let (mut parts, _) = req.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &()).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extract_user_invalid_token() {
    init_token_key();

    let req = Request::builder()
        .header("Authorization", "Bearer nao-e-um-token")
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &()).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extract_user_expired_token() {
    init_token_key();

    let usuario = usuario_fisico();
    let emitido = Utc::now() - Duration::days(VALIDADE_DIAS + 1);
    let token = TOKEN_KEY.get().unwrap().issue(&usuario, emitido).unwrap();

    let req = Request::builder()
        .header("Authorization", format!("Bearer {token}"))
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = CurrentUser::from_request_parts(&mut parts, &()).await;

    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

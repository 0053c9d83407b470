//! Registration and login endpoints

use crate::api::{ApiError, CurrentUser, issue_token};
use crate::core::traits::{ContaService, NovoUsuario};
use crate::infrastructure::entities::TipoUsuario;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

fn parse_tipo(tipo: &str) -> Option<TipoUsuario> {
    match tipo {
        "fisico" => Some(TipoUsuario::Fisico),
        "juridico" => Some(TipoUsuario::Juridico),
        _ => None,
    }
}

async fn register(
    Inject(contas): Inject<dyn ContaService>,
    Json(body): Json<schemas::RegisterRequest>,
) -> Result<(StatusCode, Json<schemas::RegisterResponse>), ApiError> {
    let (Some(nome), Some(email), Some(senha), Some(tipo)) =
        (body.nome, body.email, body.senha, body.tipo)
    else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };
    let Some(tipo) = parse_tipo(&tipo) else {
        return Err(ApiError::bad_request("Tipo de usuário inválido."));
    };

    let usuario = contas
        .register(NovoUsuario {
            nome,
            email,
            senha,
            telefone: body.telefone,
            tipo,
            cpf: body.cpf,
            cnpj: body.cnpj,
            cep: body.cep,
            rua: body.rua,
            cidade: body.cidade,
            estado: body.estado,
            latitude: body.latitude,
            longitude: body.longitude,
        })
        .await?;

    let token = issue_token(&usuario)?;
    Ok((
        StatusCode::CREATED,
        Json(schemas::RegisterResponse {
            token,
            user: schemas::Perfil::from(usuario),
        }),
    ))
}

async fn login(
    Inject(contas): Inject<dyn ContaService>,
    Json(body): Json<schemas::LoginRequest>,
) -> Result<Json<schemas::LoginResponse>, ApiError> {
    let (Some(email), Some(senha)) = (body.email, body.senha) else {
        return Err(ApiError::bad_request("Email e senha são obrigatórios."));
    };

    let usuario = contas.login(&email, &senha).await?;
    let token = issue_token(&usuario)?;

    Ok(Json(schemas::LoginResponse {
        token,
        user: schemas::UsuarioResumo::from(usuario),
    }))
}

async fn me(
    Inject(contas): Inject<dyn ContaService>,
    current_user: CurrentUser,
) -> Result<Json<schemas::Perfil>, ApiError> {
    let usuario = contas.perfil(current_user.id).await?;
    Ok(Json(schemas::Perfil::from(usuario)))
}

pub mod schemas {
    use crate::infrastructure::entities::{TipoUsuario, Usuario};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct RegisterRequest {
        pub nome: Option<String>,
        pub email: Option<String>,
        pub senha: Option<String>,
        pub telefone: Option<String>,
        pub cep: Option<String>,
        pub rua: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub tipo: Option<String>,
        pub cpf: Option<String>,
        pub cnpj: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }

    #[derive(Deserialize, Debug)]
    pub struct LoginRequest {
        pub email: Option<String>,
        pub senha: Option<String>,
    }

    /// Public profile, without the password hash.
    #[derive(Serialize, Debug)]
    pub struct Perfil {
        pub id: Uuid,
        pub nome: String,
        pub email: String,
        pub tipo: TipoUsuario,
        pub telefone: Option<String>,
        pub cep: Option<String>,
        pub rua: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub cpf: Option<String>,
        pub cnpj: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }

    impl From<Usuario> for Perfil {
        fn from(usuario: Usuario) -> Self {
            Perfil {
                id: usuario.id,
                nome: usuario.nome,
                email: usuario.email,
                tipo: usuario.tipo,
                telefone: usuario.telefone,
                cep: usuario.cep,
                rua: usuario.rua,
                cidade: usuario.cidade,
                estado: usuario.estado,
                cpf: usuario.cpf,
                cnpj: usuario.cnpj,
                latitude: usuario.latitude,
                longitude: usuario.longitude,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct UsuarioResumo {
        pub id: Uuid,
        pub nome: String,
        pub email: String,
        pub tipo: TipoUsuario,
    }

    impl From<Usuario> for UsuarioResumo {
        fn from(usuario: Usuario) -> Self {
            UsuarioResumo {
                id: usuario.id,
                nome: usuario.nome,
                email: usuario.email,
                tipo: usuario.tipo,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct RegisterResponse {
        pub token: String,
        pub user: Perfil,
    }

    #[derive(Serialize, Debug)]
    pub struct LoginResponse {
        pub token: String,
        pub user: UsuarioResumo,
    }
}

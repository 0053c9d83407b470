//! Own-profile endpoints

use crate::api::auth::schemas::Perfil;
use crate::api::{ApiError, CurrentUser};
use crate::core::traits::ContaService;
use crate::infrastructure::traits::PerfilChanges;
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new().route("/me", get(get_my_profile).put(update_my_profile))
}

async fn get_my_profile(
    Inject(contas): Inject<dyn ContaService>,
    current_user: CurrentUser,
) -> Result<Json<Perfil>, ApiError> {
    let usuario = contas.perfil(current_user.id).await?;
    Ok(Json(Perfil::from(usuario)))
}

async fn update_my_profile(
    Inject(contas): Inject<dyn ContaService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::UpdatePerfilRequest>,
) -> Result<Json<Perfil>, ApiError> {
    let usuario = contas
        .atualizar_perfil(
            current_user.id,
            PerfilChanges {
                nome: body.nome,
                telefone: body.telefone,
                cpf: body.cpf,
                cnpj: body.cnpj,
                cep: body.cep,
                rua: body.rua,
                cidade: body.cidade,
                estado: body.estado,
                latitude: body.latitude,
                longitude: body.longitude,
            },
        )
        .await?;

    Ok(Json(Perfil::from(usuario)))
}

pub mod schemas {
    use serde::Deserialize;

    /// Partial update; omitted fields keep their stored values.
    #[derive(Deserialize, Debug)]
    pub struct UpdatePerfilRequest {
        pub nome: Option<String>,
        pub telefone: Option<String>,
        pub cpf: Option<String>,
        pub cnpj: Option<String>,
        pub cep: Option<String>,
        pub rua: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }
}

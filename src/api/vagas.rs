//! Job-posting endpoints

use crate::api::{ApiError, CurrentUser};
use crate::core::traits::{NovaVaga, VagaService};
use crate::infrastructure::traits::VagaChanges;
use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use di_axum::Inject;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_vagas).post(create_vaga))
        .route("/me", get(my_vagas))
        .route("/:id", get(get_vaga).put(update_vaga).delete(delete_vaga))
}

/// Parses the client's `DD/MM/AAAA HH:MM` date format.
pub fn parse_data_hora(texto: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(texto.trim(), "%d/%m/%Y %H:%M").ok()
}

async fn list_vagas(
    Inject(vagas): Inject<dyn VagaService>,
) -> Result<Json<Vec<schemas::VagaComCriador>>, ApiError> {
    let todas = vagas.listar().await?;
    Ok(Json(todas.into_iter().map(schemas::VagaComCriador::from).collect()))
}

async fn get_vaga(
    Inject(vagas): Inject<dyn VagaService>,
    Path(id): Path<Uuid>,
) -> Result<Json<schemas::VagaComCriador>, ApiError> {
    let vaga = vagas.buscar(id).await?;
    Ok(Json(schemas::VagaComCriador::from(vaga)))
}

async fn my_vagas(
    Inject(vagas): Inject<dyn VagaService>,
    current_user: CurrentUser,
) -> Result<Json<Vec<schemas::Vaga>>, ApiError> {
    let minhas = vagas.minhas(current_user.id).await?;
    Ok(Json(minhas.into_iter().map(schemas::Vaga::from).collect()))
}

async fn create_vaga(
    Inject(vagas): Inject<dyn VagaService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::CreateVagaRequest>,
) -> Result<Json<schemas::Vaga>, ApiError> {
    let (Some(nome), Some(descricao), Some(local), Some(data_hora)) =
        (body.nome, body.descricao, body.local, body.data_hora)
    else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };
    let Some(data_hora) = parse_data_hora(&data_hora) else {
        return Err(ApiError::bad_request(
            "Formato de data inválido. Use DD/MM/AAAA HH:MM",
        ));
    };

    let vaga = vagas
        .criar(
            current_user.id,
            NovaVaga {
                nome,
                descricao,
                local,
                data_hora,
                vagas_disponiveis: body.vagas_disponiveis,
                categoria: body.categoria,
                cep: body.cep,
                cidade: body.cidade,
                estado: body.estado,
                latitude: body.latitude,
                longitude: body.longitude,
            },
        )
        .await?;

    Ok(Json(schemas::Vaga::from(vaga)))
}

async fn update_vaga(
    Inject(vagas): Inject<dyn VagaService>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<schemas::UpdateVagaRequest>,
) -> Result<Json<schemas::Vaga>, ApiError> {
    let data_hora = match body.data_hora {
        Some(texto) => Some(parse_data_hora(&texto).ok_or_else(|| {
            ApiError::bad_request("Formato de data inválido. Use DD/MM/AAAA HH:MM")
        })?),
        None => None,
    };

    let vaga = vagas
        .atualizar(
            id,
            current_user.id,
            VagaChanges {
                nome: body.nome,
                descricao: body.descricao,
                local: body.local,
                data_hora,
                vagas_disponiveis: body.vagas_disponiveis,
                categoria: body.categoria,
                cep: body.cep,
                cidade: body.cidade,
                estado: body.estado,
                latitude: body.latitude,
                longitude: body.longitude,
            },
        )
        .await?;

    Ok(Json(schemas::Vaga::from(vaga)))
}

async fn delete_vaga(
    Inject(vagas): Inject<dyn VagaService>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<schemas::DeleteResponse>, ApiError> {
    vagas.excluir(id, current_user.id).await?;
    Ok(Json(schemas::DeleteResponse { ok: true }))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct CreateVagaRequest {
        pub nome: Option<String>,
        pub descricao: Option<String>,
        pub local: Option<String>,
        pub data_hora: Option<String>,
        pub vagas_disponiveis: Option<i64>,
        pub categoria: Option<String>,
        pub cep: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }

    /// Partial update; omitted fields keep their stored values.
    #[derive(Deserialize, Debug)]
    pub struct UpdateVagaRequest {
        pub nome: Option<String>,
        pub descricao: Option<String>,
        pub local: Option<String>,
        pub data_hora: Option<String>,
        pub vagas_disponiveis: Option<i64>,
        pub categoria: Option<String>,
        pub cep: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }

    #[derive(Serialize, Debug)]
    pub struct Vaga {
        pub id: Uuid,
        pub nome: String,
        pub descricao: String,
        pub local: String,
        pub data_hora: Option<NaiveDateTime>,
        pub vagas_disponiveis: Option<i64>,
        pub categoria: Option<String>,
        pub cep: Option<String>,
        pub cidade: Option<String>,
        pub estado: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        #[serde(rename = "criadorId")]
        pub criador_id: Uuid,
        #[serde(rename = "createdAt")]
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::Vaga> for Vaga {
        fn from(vaga: entities::Vaga) -> Self {
            Vaga {
                id: vaga.id,
                nome: vaga.nome,
                descricao: vaga.descricao,
                local: vaga.local,
                data_hora: vaga.data_hora,
                vagas_disponiveis: vaga.vagas_disponiveis,
                categoria: vaga.categoria,
                cep: vaga.cep,
                cidade: vaga.cidade,
                estado: vaga.estado,
                latitude: vaga.latitude,
                longitude: vaga.longitude,
                criador_id: vaga.criador_id,
                created_at: vaga.created_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct CriadorResumo {
        pub id: Uuid,
        pub nome: String,
        pub email: String,
    }

    #[derive(Serialize, Debug)]
    pub struct VagaComCriador {
        #[serde(flatten)]
        pub vaga: Vaga,
        pub criador: CriadorResumo,
    }

    impl From<entities::VagaComCriador> for VagaComCriador {
        fn from(row: entities::VagaComCriador) -> Self {
            let criador = CriadorResumo {
                id: row.vaga.criador_id,
                nome: row.criador_nome,
                email: row.criador_email,
            };
            VagaComCriador {
                vaga: Vaga::from(row.vaga),
                criador,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct DeleteResponse {
        pub ok: bool,
    }
}

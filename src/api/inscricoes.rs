//! Enrollment endpoints

use crate::api::{ApiError, CurrentUser};
use crate::core::traits::InscricaoService;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", post(inscrever).delete(cancelar_inscricao))
        .route("/me", get(minhas_inscricoes))
        .route("/vaga/:vaga_id", get(listar_inscritos))
        .route("/confirmar-presenca", post(confirmar_presenca))
        .route("/estatisticas", get(estatisticas_voluntario))
}

async fn inscrever(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::InscreverRequest>,
) -> Result<Json<schemas::Inscricao>, ApiError> {
    let Some(vaga_id) = body.vaga_id else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };

    let inscricao = inscricoes.inscrever(vaga_id, current_user.id).await?;
    Ok(Json(schemas::Inscricao::from(inscricao)))
}

async fn cancelar_inscricao(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::CancelarRequest>,
) -> Result<Json<schemas::CancelarResponse>, ApiError> {
    let Some(vaga_id) = body.vaga_id else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };

    inscricoes.cancelar(vaga_id, current_user.id).await?;
    Ok(Json(schemas::CancelarResponse {
        message: "Inscrição cancelada.".to_string(),
    }))
}

async fn minhas_inscricoes(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    current_user: CurrentUser,
) -> Result<Json<Vec<schemas::InscricaoComVaga>>, ApiError> {
    let minhas = inscricoes.minhas(current_user.id).await?;
    Ok(Json(minhas.into_iter().map(schemas::InscricaoComVaga::from).collect()))
}

async fn listar_inscritos(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    _current_user: CurrentUser,
    Path(vaga_id): Path<Uuid>,
) -> Result<Json<Vec<schemas::InscricaoComVoluntario>>, ApiError> {
    let inscritos = inscricoes.listar_inscritos(vaga_id).await?;
    Ok(Json(
        inscritos
            .into_iter()
            .map(schemas::InscricaoComVoluntario::from)
            .collect(),
    ))
}

async fn confirmar_presenca(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::ConfirmarPresencaRequest>,
) -> Result<Json<schemas::Inscricao>, ApiError> {
    let Some(inscricao_id) = body.inscricao_id else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };

    let atualizada = inscricoes
        .confirmar_presenca(inscricao_id, current_user.id, body.horas_voluntariadas)
        .await?;
    Ok(Json(schemas::Inscricao::from(atualizada)))
}

async fn estatisticas_voluntario(
    Inject(inscricoes): Inject<dyn InscricaoService>,
    current_user: CurrentUser,
) -> Result<Json<schemas::Estatisticas>, ApiError> {
    let estatisticas = inscricoes.estatisticas(current_user.id).await?;
    Ok(Json(schemas::Estatisticas::from(estatisticas)))
}

pub mod schemas {
    use crate::api::vagas::schemas::Vaga;
    use crate::core::traits;
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct InscreverRequest {
        #[serde(rename = "vagaId")]
        pub vaga_id: Option<Uuid>,
    }

    #[derive(Deserialize, Debug)]
    pub struct CancelarRequest {
        #[serde(rename = "vagaId")]
        pub vaga_id: Option<Uuid>,
    }

    #[derive(Deserialize, Debug)]
    pub struct ConfirmarPresencaRequest {
        #[serde(rename = "inscricaoId")]
        pub inscricao_id: Option<Uuid>,
        #[serde(rename = "horasVoluntariadas")]
        pub horas_voluntariadas: Option<i64>,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Inscricao {
        pub id: Uuid,
        pub vaga_id: Uuid,
        pub voluntario_id: Uuid,
        pub presenca_confirmada: bool,
        pub data_confirmacao: Option<DateTime<Utc>>,
        pub horas_voluntariadas: Option<i64>,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::Inscricao> for Inscricao {
        fn from(inscricao: entities::Inscricao) -> Self {
            Inscricao {
                id: inscricao.id,
                vaga_id: inscricao.vaga_id,
                voluntario_id: inscricao.voluntario_id,
                presenca_confirmada: inscricao.presenca_confirmada,
                data_confirmacao: inscricao.data_confirmacao,
                horas_voluntariadas: inscricao.horas_voluntariadas,
                created_at: inscricao.created_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct InscricaoComVaga {
        #[serde(flatten)]
        pub inscricao: Inscricao,
        pub vaga: Vaga,
    }

    impl From<entities::InscricaoComVaga> for InscricaoComVaga {
        fn from(row: entities::InscricaoComVaga) -> Self {
            let vaga = Vaga {
                id: row.inscricao.vaga_id,
                nome: row.vaga_nome,
                descricao: row.vaga_descricao,
                local: row.vaga_local,
                data_hora: row.vaga_data_hora,
                vagas_disponiveis: row.vaga_vagas_disponiveis,
                categoria: row.vaga_categoria,
                cep: row.vaga_cep,
                cidade: row.vaga_cidade,
                estado: row.vaga_estado,
                latitude: row.vaga_latitude,
                longitude: row.vaga_longitude,
                criador_id: row.vaga_criador_id,
                created_at: row.vaga_created_at,
            };
            InscricaoComVaga {
                inscricao: Inscricao::from(row.inscricao),
                vaga,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct VoluntarioResumo {
        pub id: Uuid,
        pub nome: String,
        pub email: String,
        pub telefone: Option<String>,
    }

    #[derive(Serialize, Debug)]
    pub struct InscricaoComVoluntario {
        #[serde(flatten)]
        pub inscricao: Inscricao,
        pub voluntario: VoluntarioResumo,
    }

    impl From<entities::InscricaoComVoluntario> for InscricaoComVoluntario {
        fn from(row: entities::InscricaoComVoluntario) -> Self {
            let voluntario = VoluntarioResumo {
                id: row.inscricao.voluntario_id,
                nome: row.voluntario_nome,
                email: row.voluntario_email,
                telefone: row.voluntario_telefone,
            };
            InscricaoComVoluntario {
                inscricao: Inscricao::from(row.inscricao),
                voluntario,
            }
        }
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Estatisticas {
        pub total_acoes: i64,
        pub total_horas: i64,
        pub categorias: HashMap<String, i64>,
        pub inscricoes: Vec<InscricaoComVaga>,
    }

    impl From<traits::Estatisticas> for Estatisticas {
        fn from(estatisticas: traits::Estatisticas) -> Self {
            Estatisticas {
                total_acoes: estatisticas.total_acoes,
                total_horas: estatisticas.total_horas,
                categorias: estatisticas.categorias,
                inscricoes: estatisticas
                    .inscricoes
                    .into_iter()
                    .map(InscricaoComVaga::from)
                    .collect(),
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct CancelarResponse {
        pub message: String,
    }
}

//! Posting chat endpoints

use crate::api::{ApiError, CurrentUser};
use crate::core::traits::ChatService;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/send", post(enviar_mensagem))
        .route("/vaga/:vaga_id", get(mensagens_por_vaga))
}

async fn enviar_mensagem(
    Inject(chat): Inject<dyn ChatService>,
    current_user: CurrentUser,
    Json(body): Json<schemas::EnviarMensagemRequest>,
) -> Result<Json<schemas::ChatMessage>, ApiError> {
    let Some(vaga_id) = body.vaga_id else {
        return Err(ApiError::bad_request("Campos obrigatórios faltando."));
    };
    // an absent text is rejected by the service just like a blank one
    let mensagem = body.mensagem.unwrap_or_default();

    let nova = chat.enviar(vaga_id, current_user.id, mensagem).await?;
    Ok(Json(schemas::ChatMessage::from(nova)))
}

async fn mensagens_por_vaga(
    Inject(chat): Inject<dyn ChatService>,
    _current_user: CurrentUser,
    Path(vaga_id): Path<Uuid>,
) -> Result<Json<Vec<schemas::ChatMessageComAutor>>, ApiError> {
    let mensagens = chat.mensagens_da_vaga(vaga_id).await?;
    Ok(Json(
        mensagens
            .into_iter()
            .map(schemas::ChatMessageComAutor::from)
            .collect(),
    ))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct EnviarMensagemRequest {
        pub mensagem: Option<String>,
        #[serde(rename = "vagaId")]
        pub vaga_id: Option<Uuid>,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct ChatMessage {
        pub id: Uuid,
        pub mensagem: String,
        pub vaga_id: Uuid,
        pub usuario_id: Uuid,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::ChatMessage> for ChatMessage {
        fn from(mensagem: entities::ChatMessage) -> Self {
            ChatMessage {
                id: mensagem.id,
                mensagem: mensagem.mensagem,
                vaga_id: mensagem.vaga_id,
                usuario_id: mensagem.usuario_id,
                created_at: mensagem.created_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct AutorResumo {
        pub id: Uuid,
        pub nome: String,
    }

    #[derive(Serialize, Debug)]
    pub struct ChatMessageComAutor {
        #[serde(flatten)]
        pub mensagem: ChatMessage,
        pub usuario: AutorResumo,
    }

    impl From<entities::ChatMessageComAutor> for ChatMessageComAutor {
        fn from(row: entities::ChatMessageComAutor) -> Self {
            let usuario = AutorResumo {
                id: row.mensagem.usuario_id,
                nome: row.autor_nome,
            };
            ChatMessageComAutor {
                mensagem: ChatMessage::from(row.mensagem),
                usuario,
            }
        }
    }
}

//! Database entities

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account kind. `Fisico` accounts are individual volunteers (identified by
/// CPF), `Juridico` accounts are organizations (identified by CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoUsuario {
    Fisico,
    Juridico,
}

#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub telefone: Option<String>,
    pub tipo: TipoUsuario,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
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
    pub criador_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Inscricao {
    pub id: Uuid,
    pub vaga_id: Uuid,
    pub voluntario_id: Uuid,
    pub presenca_confirmada: bool,
    pub data_confirmacao: Option<DateTime<Utc>>,
    pub horas_voluntariadas: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub mensagem: String,
    pub vaga_id: Uuid,
    pub usuario_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Posting joined with its creator's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct VagaComCriador {
    #[sqlx(flatten)]
    pub vaga: Vaga,
    pub criador_nome: String,
    pub criador_email: String,
}

/// Enrollment joined with the full posting, for the volunteer's own listings.
/// Posting columns are aliased with a `vaga_` prefix in the query.
#[derive(Debug, Clone, FromRow)]
pub struct InscricaoComVaga {
    #[sqlx(flatten)]
    pub inscricao: Inscricao,
    pub vaga_nome: String,
    pub vaga_descricao: String,
    pub vaga_local: String,
    pub vaga_data_hora: Option<NaiveDateTime>,
    pub vaga_vagas_disponiveis: Option<i64>,
    pub vaga_categoria: Option<String>,
    pub vaga_cep: Option<String>,
    pub vaga_cidade: Option<String>,
    pub vaga_estado: Option<String>,
    pub vaga_latitude: Option<f64>,
    pub vaga_longitude: Option<f64>,
    pub vaga_criador_id: Uuid,
    pub vaga_created_at: DateTime<Utc>,
}

/// Enrollment joined with the volunteer's public fields, for posting owners.
#[derive(Debug, Clone, FromRow)]
pub struct InscricaoComVoluntario {
    #[sqlx(flatten)]
    pub inscricao: Inscricao,
    pub voluntario_nome: String,
    pub voluntario_email: String,
    pub voluntario_telefone: Option<String>,
}

/// Enrollment joined with the owning posting's creator, for the
/// attendance-confirmation ownership check.
#[derive(Debug, Clone, FromRow)]
pub struct InscricaoComDono {
    #[sqlx(flatten)]
    pub inscricao: Inscricao,
    pub vaga_criador_id: Uuid,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageComAutor {
    #[sqlx(flatten)]
    pub mensagem: ChatMessage,
    pub autor_nome: String,
}

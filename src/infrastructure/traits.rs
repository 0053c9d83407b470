//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities::{
    ChatMessage, ChatMessageComAutor, Inscricao, InscricaoComDono, InscricaoComVaga,
    InscricaoComVoluntario, Usuario, Vaga, VagaComCriador,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// Partial profile update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct PerfilChanges {
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

/// Partial posting update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct VagaChanges {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub local: Option<String>,
    pub data_hora: Option<NaiveDateTime>,
    pub vagas_disponiveis: Option<i64>,
    pub categoria: Option<String>,
    pub cep: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Result of an enrollment attempt. The duplicate and capacity checks run in
/// the same transaction as the insert.
#[derive(Debug)]
pub enum EnrollOutcome {
    Created(Inscricao),
    AlreadyEnrolled,
    Full,
    MissingVaga,
}

#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, sqlx::Error>;

    async fn create(&self, usuario: Usuario) -> Result<Usuario, sqlx::Error>;

    /// Applies the non-`None` fields and returns the updated row, or `None`
    /// if the account does not exist.
    async fn update_perfil(
        &self,
        id: Uuid,
        changes: PerfilChanges,
    ) -> Result<Option<Usuario>, sqlx::Error>;
}

#[async_trait]
pub trait VagaRepository: Send + Sync {
    async fn list_with_criador(&self) -> Result<Vec<VagaComCriador>, sqlx::Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vaga>, sqlx::Error>;

    async fn find_with_criador(&self, id: Uuid) -> Result<Option<VagaComCriador>, sqlx::Error>;

    async fn list_by_criador(&self, criador_id: Uuid) -> Result<Vec<Vaga>, sqlx::Error>;

    async fn create(&self, vaga: Vaga) -> Result<Vaga, sqlx::Error>;

    async fn update(&self, id: Uuid, changes: VagaChanges) -> Result<Option<Vaga>, sqlx::Error>;

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error>;

    async fn count_by_criador(&self, criador_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
pub trait InscricaoRepository: Send + Sync {
    /// Enrolls the volunteer in the posting, enforcing the one-active-row
    /// invariant and the posting's slot capacity.
    async fn enroll(
        &self,
        vaga_id: Uuid,
        voluntario_id: Uuid,
        quando: DateTime<Utc>,
    ) -> Result<EnrollOutcome, sqlx::Error>;

    /// Deletes any enrollment matching the pair. Returns the number of rows
    /// removed; removing nothing is not an error.
    async fn cancel(&self, vaga_id: Uuid, voluntario_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn list_for_voluntario(
        &self,
        voluntario_id: Uuid,
    ) -> Result<Vec<InscricaoComVaga>, sqlx::Error>;

    async fn list_for_vaga(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<InscricaoComVoluntario>, sqlx::Error>;

    async fn find_with_dono(&self, id: Uuid) -> Result<Option<InscricaoComDono>, sqlx::Error>;

    async fn confirm(
        &self,
        id: Uuid,
        horas: i64,
        quando: DateTime<Utc>,
    ) -> Result<Inscricao, sqlx::Error>;

    async fn list_confirmed_for_voluntario(
        &self,
        voluntario_id: Uuid,
    ) -> Result<Vec<InscricaoComVaga>, sqlx::Error>;

    async fn count_for_criador(&self, criador_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create(&self, mensagem: ChatMessage) -> Result<ChatMessage, sqlx::Error>;

    async fn list_for_vaga(&self, vaga_id: Uuid) -> Result<Vec<ChatMessageComAutor>, sqlx::Error>;
}

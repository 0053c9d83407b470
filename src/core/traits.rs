//! DI "Interfaces"

use crate::core::error::ServiceError;
use crate::infrastructure::entities::{
    ChatMessage, ChatMessageComAutor, Inscricao, InscricaoComVaga, InscricaoComVoluntario,
    TipoUsuario, Usuario, Vaga, VagaComCriador,
};
use crate::infrastructure::traits::{PerfilChanges, VagaChanges};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use uuid::Uuid;

/// Validated registration input. Presence of the base fields is checked at
/// the HTTP boundary; the tax-id-per-kind rule lives in the service.
#[derive(Debug, Clone)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha: String,
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
}

/// Validated posting input. `data_hora` is already parsed from the
/// `DD/MM/AAAA HH:MM` wire format.
#[derive(Debug, Clone)]
pub struct NovaVaga {
    pub nome: String,
    pub descricao: String,
    pub local: String,
    pub data_hora: NaiveDateTime,
    pub vagas_disponiveis: Option<i64>,
    pub categoria: Option<String>,
    pub cep: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Per-volunteer statistics, derived fresh from confirmed enrollments.
#[derive(Debug, Clone)]
pub struct Estatisticas {
    pub total_acoes: i64,
    pub total_horas: i64,
    pub categorias: HashMap<String, i64>,
    pub inscricoes: Vec<InscricaoComVaga>,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricasOng {
    pub total_vagas_criadas: i64,
    pub total_inscricoes: i64,
}

#[async_trait]
pub trait ContaService: Send + Sync {
    /// Registers an account.
    ///
    /// Returns a validation error when the tax id required by the account
    /// kind is missing or the email is already registered. Only the tax id
    /// matching the kind is stored; the password is stored hashed.
    async fn register(&self, novo: NovoUsuario) -> Result<Usuario, ServiceError>;

    /// Looks up by email and compares the password against the stored hash.
    ///
    /// Unknown email and wrong password fail with the same message.
    async fn login(&self, email: &str, senha: &str) -> Result<Usuario, ServiceError>;

    async fn perfil(&self, usuario_id: Uuid) -> Result<Usuario, ServiceError>;

    /// Applies a partial profile update; omitted fields stay unchanged.
    async fn atualizar_perfil(
        &self,
        usuario_id: Uuid,
        changes: PerfilChanges,
    ) -> Result<Usuario, ServiceError>;
}

#[async_trait]
pub trait VagaService: Send + Sync {
    async fn listar(&self) -> Result<Vec<VagaComCriador>, ServiceError>;

    async fn buscar(&self, id: Uuid) -> Result<VagaComCriador, ServiceError>;

    async fn minhas(&self, criador_id: Uuid) -> Result<Vec<Vaga>, ServiceError>;

    async fn criar(&self, criador_id: Uuid, nova: NovaVaga) -> Result<Vaga, ServiceError>;

    /// Updates a posting. Fails with `NotFound` if it does not exist and
    /// `Forbidden` if the caller is not its owner.
    async fn atualizar(
        &self,
        id: Uuid,
        caller: Uuid,
        changes: VagaChanges,
    ) -> Result<Vaga, ServiceError>;

    /// Deletes a posting, with the same `NotFound`/`Forbidden` rules as
    /// [`VagaService::atualizar`].
    async fn excluir(&self, id: Uuid, caller: Uuid) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait InscricaoService: Send + Sync {
    /// Enrolls the caller in a posting. Fails when the posting is missing,
    /// the caller is already enrolled, or the slot capacity is reached.
    async fn inscrever(
        &self,
        vaga_id: Uuid,
        voluntario_id: Uuid,
    ) -> Result<Inscricao, ServiceError>;

    /// Cancels any enrollment for the pair. Idempotent.
    async fn cancelar(&self, vaga_id: Uuid, voluntario_id: Uuid) -> Result<(), ServiceError>;

    async fn minhas(&self, voluntario_id: Uuid) -> Result<Vec<InscricaoComVaga>, ServiceError>;

    async fn listar_inscritos(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<InscricaoComVoluntario>, ServiceError>;

    /// Confirms attendance. Only the posting's owner may confirm; hours
    /// default to 1 when no positive value is supplied.
    async fn confirmar_presenca(
        &self,
        inscricao_id: Uuid,
        caller: Uuid,
        horas: Option<i64>,
    ) -> Result<Inscricao, ServiceError>;

    async fn estatisticas(&self, voluntario_id: Uuid) -> Result<Estatisticas, ServiceError>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Appends a message to a posting's chat. The text must be non-empty
    /// after trimming.
    async fn enviar(
        &self,
        vaga_id: Uuid,
        usuario_id: Uuid,
        mensagem: String,
    ) -> Result<ChatMessage, ServiceError>;

    /// All messages for a posting with the author's public name, oldest
    /// first.
    async fn mensagens_da_vaga(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<ChatMessageComAutor>, ServiceError>;
}

#[async_trait]
pub trait RelatorioService: Send + Sync {
    /// Counts the caller's postings and the enrollments received in them.
    async fn metricas_ong(&self, criador_id: Uuid) -> Result<MetricasOng, ServiceError>;
}

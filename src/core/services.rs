//! Implementations for the services the app needs.

use crate::core::error::ServiceError;
use crate::core::traits::{
    ChatService, ContaService, Estatisticas, InscricaoService, MetricasOng, NovaVaga, NovoUsuario,
    RelatorioService, VagaService,
};
use crate::infrastructure::entities::{
    ChatMessage, ChatMessageComAutor, Inscricao, InscricaoComVaga, InscricaoComVoluntario,
    TipoUsuario, Usuario, Vaga, VagaComCriador,
};
use crate::infrastructure::traits::{
    ChatRepository, EnrollOutcome, InscricaoRepository, PerfilChanges, UsuarioRepository,
    VagaChanges, VagaRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use std::collections::HashMap;
use uuid::Uuid;

/// Category used in statistics for postings without one.
const CATEGORIA_PADRAO: &str = "Geral";

#[injectable(ContaService)]
pub struct MyContaService {
    usuarios: Ref<dyn UsuarioRepository>,
}

#[async_trait]
impl ContaService for MyContaService {
    async fn register(&self, novo: NovoUsuario) -> Result<Usuario, ServiceError> {
        match novo.tipo {
            TipoUsuario::Fisico if novo.cpf.is_none() => {
                return Err(ServiceError::validation(
                    "CPF é obrigatório para usuários do tipo físico.",
                ));
            }
            TipoUsuario::Juridico if novo.cnpj.is_none() => {
                return Err(ServiceError::validation(
                    "CNPJ é obrigatório para usuários do tipo jurídico.",
                ));
            }
            _ => {}
        }

        if self.usuarios.find_by_email(&novo.email).await?.is_some() {
            return Err(ServiceError::validation("Email já cadastrado."));
        }

        let senha_hash = bcrypt::hash(&novo.senha, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        // Only the tax id matching the account kind is stored.
        let (cpf, cnpj) = match novo.tipo {
            TipoUsuario::Fisico => (novo.cpf, None),
            TipoUsuario::Juridico => (None, novo.cnpj),
        };

        let usuario = self
            .usuarios
            .create(Usuario {
                id: Uuid::new_v4(),
                nome: novo.nome,
                email: novo.email,
                senha_hash,
                telefone: novo.telefone,
                tipo: novo.tipo,
                cpf,
                cnpj,
                cep: novo.cep,
                rua: novo.rua,
                cidade: novo.cidade,
                estado: novo.estado,
                latitude: novo.latitude,
                longitude: novo.longitude,
                created_at: Utc::now(),
            })
            .await?;

        Ok(usuario)
    }

    async fn login(&self, email: &str, senha: &str) -> Result<Usuario, ServiceError> {
        let Some(usuario) = self.usuarios.find_by_email(email).await? else {
            return Err(ServiceError::validation("Credenciais inválidas."));
        };

        let senha_valida = bcrypt::verify(senha, &usuario.senha_hash)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if !senha_valida {
            return Err(ServiceError::validation("Credenciais inválidas."));
        }

        Ok(usuario)
    }

    async fn perfil(&self, usuario_id: Uuid) -> Result<Usuario, ServiceError> {
        self.usuarios
            .find_by_id(usuario_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Usuário não encontrado."))
    }

    async fn atualizar_perfil(
        &self,
        usuario_id: Uuid,
        changes: PerfilChanges,
    ) -> Result<Usuario, ServiceError> {
        self.usuarios
            .update_perfil(usuario_id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Usuário não encontrado."))
    }
}

#[injectable(VagaService)]
pub struct MyVagaService {
    vagas: Ref<dyn VagaRepository>,
}

impl MyVagaService {
    /// Loads the posting and checks ownership, the shared precondition of
    /// every mutating posting operation.
    async fn vaga_do_criador(&self, id: Uuid, caller: Uuid) -> Result<Vaga, ServiceError> {
        let Some(vaga) = self.vagas.find_by_id(id).await? else {
            return Err(ServiceError::not_found("Vaga não encontrada"));
        };
        if vaga.criador_id != caller {
            return Err(ServiceError::forbidden("Não autorizado"));
        }
        Ok(vaga)
    }
}

#[async_trait]
impl VagaService for MyVagaService {
    async fn listar(&self) -> Result<Vec<VagaComCriador>, ServiceError> {
        Ok(self.vagas.list_with_criador().await?)
    }

    async fn buscar(&self, id: Uuid) -> Result<VagaComCriador, ServiceError> {
        self.vagas
            .find_with_criador(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Vaga não encontrada"))
    }

    async fn minhas(&self, criador_id: Uuid) -> Result<Vec<Vaga>, ServiceError> {
        Ok(self.vagas.list_by_criador(criador_id).await?)
    }

    async fn criar(&self, criador_id: Uuid, nova: NovaVaga) -> Result<Vaga, ServiceError> {
        let vaga = self
            .vagas
            .create(Vaga {
                id: Uuid::new_v4(),
                nome: nova.nome,
                descricao: nova.descricao,
                local: nova.local,
                data_hora: Some(nova.data_hora),
                vagas_disponiveis: nova.vagas_disponiveis,
                categoria: nova.categoria,
                cep: nova.cep,
                cidade: nova.cidade,
                estado: nova.estado,
                latitude: nova.latitude,
                longitude: nova.longitude,
                criador_id,
                created_at: Utc::now(),
            })
            .await?;

        Ok(vaga)
    }

    async fn atualizar(
        &self,
        id: Uuid,
        caller: Uuid,
        changes: VagaChanges,
    ) -> Result<Vaga, ServiceError> {
        self.vaga_do_criador(id, caller).await?;

        self.vagas
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Vaga não encontrada"))
    }

    async fn excluir(&self, id: Uuid, caller: Uuid) -> Result<(), ServiceError> {
        self.vaga_do_criador(id, caller).await?;
        self.vagas.delete(id).await?;
        Ok(())
    }
}

#[injectable(InscricaoService)]
pub struct MyInscricaoService {
    inscricoes: Ref<dyn InscricaoRepository>,
}

#[async_trait]
impl InscricaoService for MyInscricaoService {
    async fn inscrever(
        &self,
        vaga_id: Uuid,
        voluntario_id: Uuid,
    ) -> Result<Inscricao, ServiceError> {
        match self.inscricoes.enroll(vaga_id, voluntario_id, Utc::now()).await? {
            EnrollOutcome::Created(inscricao) => Ok(inscricao),
            EnrollOutcome::AlreadyEnrolled => {
                Err(ServiceError::validation("Você já está inscrito."))
            }
            EnrollOutcome::Full => Err(ServiceError::validation("Não há vagas disponíveis.")),
            EnrollOutcome::MissingVaga => Err(ServiceError::not_found("Vaga não encontrada")),
        }
    }

    async fn cancelar(&self, vaga_id: Uuid, voluntario_id: Uuid) -> Result<(), ServiceError> {
        self.inscricoes.cancel(vaga_id, voluntario_id).await?;
        Ok(())
    }

    async fn minhas(&self, voluntario_id: Uuid) -> Result<Vec<InscricaoComVaga>, ServiceError> {
        Ok(self.inscricoes.list_for_voluntario(voluntario_id).await?)
    }

    async fn listar_inscritos(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<InscricaoComVoluntario>, ServiceError> {
        Ok(self.inscricoes.list_for_vaga(vaga_id).await?)
    }

    async fn confirmar_presenca(
        &self,
        inscricao_id: Uuid,
        caller: Uuid,
        horas: Option<i64>,
    ) -> Result<Inscricao, ServiceError> {
        let Some(encontrada) = self.inscricoes.find_with_dono(inscricao_id).await? else {
            return Err(ServiceError::not_found("Inscrição não encontrada."));
        };

        if encontrada.vaga_criador_id != caller {
            return Err(ServiceError::forbidden(
                "Você não tem permissão para confirmar esta presença.",
            ));
        }

        let horas = horas.filter(|&h| h > 0).unwrap_or(1);
        Ok(self.inscricoes.confirm(inscricao_id, horas, Utc::now()).await?)
    }

    async fn estatisticas(&self, voluntario_id: Uuid) -> Result<Estatisticas, ServiceError> {
        let inscricoes = self
            .inscricoes
            .list_confirmed_for_voluntario(voluntario_id)
            .await?;

        let total_acoes = inscricoes.len() as i64;
        let total_horas = inscricoes
            .iter()
            .map(|i| i.inscricao.horas_voluntariadas.unwrap_or(0))
            .sum();

        let mut categorias: HashMap<String, i64> = HashMap::new();
        for inscricao in &inscricoes {
            let categoria = inscricao
                .vaga_categoria
                .clone()
                .unwrap_or_else(|| CATEGORIA_PADRAO.to_string());
            *categorias.entry(categoria).or_insert(0) += 1;
        }

        Ok(Estatisticas {
            total_acoes,
            total_horas,
            categorias,
            inscricoes,
        })
    }
}

#[injectable(ChatService)]
pub struct MyChatService {
    mensagens: Ref<dyn ChatRepository>,
}

#[async_trait]
impl ChatService for MyChatService {
    async fn enviar(
        &self,
        vaga_id: Uuid,
        usuario_id: Uuid,
        mensagem: String,
    ) -> Result<ChatMessage, ServiceError> {
        if mensagem.trim().is_empty() {
            return Err(ServiceError::validation("Mensagem vazia."));
        }

        let nova = self
            .mensagens
            .create(ChatMessage {
                id: Uuid::new_v4(),
                mensagem,
                vaga_id,
                usuario_id,
                created_at: Utc::now(),
            })
            .await?;

        Ok(nova)
    }

    async fn mensagens_da_vaga(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<ChatMessageComAutor>, ServiceError> {
        Ok(self.mensagens.list_for_vaga(vaga_id).await?)
    }
}

#[injectable(RelatorioService)]
pub struct MyRelatorioService {
    vagas: Ref<dyn VagaRepository>,
    inscricoes: Ref<dyn InscricaoRepository>,
}

#[async_trait]
impl RelatorioService for MyRelatorioService {
    async fn metricas_ong(&self, criador_id: Uuid) -> Result<MetricasOng, ServiceError> {
        let total_vagas_criadas = self.vagas.count_by_criador(criador_id).await?;
        let total_inscricoes = self.inscricoes.count_for_criador(criador_id).await?;

        Ok(MetricasOng {
            total_vagas_criadas,
            total_inscricoes,
        })
    }
}

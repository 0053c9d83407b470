//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{
    ChatMessage, ChatMessageComAutor, Inscricao, InscricaoComDono, InscricaoComVaga,
    InscricaoComVoluntario, Usuario, Vaga, VagaComCriador,
};
use crate::infrastructure::traits::{
    ChatRepository, EnrollOutcome, InscricaoRepository, PerfilChanges, UsuarioRepository,
    VagaChanges, VagaRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use di::{Ref, injectable};
use uuid::Uuid;

/// Join selecting an enrollment plus its posting, with posting columns
/// aliased under a `vaga_` prefix for [`InscricaoComVaga`].
const INSCRICAO_COM_VAGA: &str = "SELECT inscricoes.*, \
     vagas.nome AS vaga_nome, vagas.descricao AS vaga_descricao, vagas.local AS vaga_local, \
     vagas.data_hora AS vaga_data_hora, vagas.vagas_disponiveis AS vaga_vagas_disponiveis, \
     vagas.categoria AS vaga_categoria, vagas.cep AS vaga_cep, vagas.cidade AS vaga_cidade, \
     vagas.estado AS vaga_estado, vagas.latitude AS vaga_latitude, \
     vagas.longitude AS vaga_longitude, vagas.criador_id AS vaga_criador_id, \
     vagas.created_at AS vaga_created_at \
     FROM inscricoes INNER JOIN vagas ON vagas.id = inscricoes.vaga_id";

#[injectable(UsuarioRepository)]
pub struct DbUsuarioRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl UsuarioRepository for DbUsuarioRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM usuarios WHERE id = ?")
            .bind(id)
            .fetch_optional(&**self.connection)
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM usuarios WHERE email = ?")
            .bind(email)
            .fetch_optional(&**self.connection)
            .await
    }

    async fn create(&self, usuario: Usuario) -> Result<Usuario, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO usuarios (id, nome, email, senha_hash, telefone, tipo, cpf, cnpj, cep, rua, cidade, estado, latitude, longitude, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(usuario.id)
        .bind(usuario.nome)
        .bind(usuario.email)
        .bind(usuario.senha_hash)
        .bind(usuario.telefone)
        .bind(usuario.tipo)
        .bind(usuario.cpf)
        .bind(usuario.cnpj)
        .bind(usuario.cep)
        .bind(usuario.rua)
        .bind(usuario.cidade)
        .bind(usuario.estado)
        .bind(usuario.latitude)
        .bind(usuario.longitude)
        .bind(usuario.created_at)
        .fetch_one(&**self.connection)
        .await
    }

    async fn update_perfil(
        &self,
        id: Uuid,
        changes: PerfilChanges,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE usuarios SET \
             nome = COALESCE(?, nome), telefone = COALESCE(?, telefone), \
             cpf = COALESCE(?, cpf), cnpj = COALESCE(?, cnpj), cep = COALESCE(?, cep), \
             rua = COALESCE(?, rua), cidade = COALESCE(?, cidade), estado = COALESCE(?, estado), \
             latitude = COALESCE(?, latitude), longitude = COALESCE(?, longitude) \
             WHERE id = ? RETURNING *",
        )
        .bind(changes.nome)
        .bind(changes.telefone)
        .bind(changes.cpf)
        .bind(changes.cnpj)
        .bind(changes.cep)
        .bind(changes.rua)
        .bind(changes.cidade)
        .bind(changes.estado)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(id)
        .fetch_optional(&**self.connection)
        .await
    }
}

#[injectable(VagaRepository)]
pub struct DbVagaRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl VagaRepository for DbVagaRepository {
    async fn list_with_criador(&self) -> Result<Vec<VagaComCriador>, sqlx::Error> {
        sqlx::query_as(
            "SELECT vagas.*, usuarios.nome AS criador_nome, usuarios.email AS criador_email \
             FROM vagas INNER JOIN usuarios ON usuarios.id = vagas.criador_id \
             ORDER BY datetime(vagas.created_at) ASC",
        )
        .fetch_all(&**self.connection)
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vaga>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM vagas WHERE id = ?")
            .bind(id)
            .fetch_optional(&**self.connection)
            .await
    }

    async fn find_with_criador(&self, id: Uuid) -> Result<Option<VagaComCriador>, sqlx::Error> {
        sqlx::query_as(
            "SELECT vagas.*, usuarios.nome AS criador_nome, usuarios.email AS criador_email \
             FROM vagas INNER JOIN usuarios ON usuarios.id = vagas.criador_id \
             WHERE vagas.id = ?",
        )
        .bind(id)
        .fetch_optional(&**self.connection)
        .await
    }

    async fn list_by_criador(&self, criador_id: Uuid) -> Result<Vec<Vaga>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM vagas WHERE criador_id = ? ORDER BY datetime(created_at) ASC",
        )
        .bind(criador_id)
        .fetch_all(&**self.connection)
        .await
    }

    async fn create(&self, vaga: Vaga) -> Result<Vaga, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO vagas (id, nome, descricao, local, data_hora, vagas_disponiveis, categoria, cep, cidade, estado, latitude, longitude, criador_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(vaga.id)
        .bind(vaga.nome)
        .bind(vaga.descricao)
        .bind(vaga.local)
        .bind(vaga.data_hora)
        .bind(vaga.vagas_disponiveis)
        .bind(vaga.categoria)
        .bind(vaga.cep)
        .bind(vaga.cidade)
        .bind(vaga.estado)
        .bind(vaga.latitude)
        .bind(vaga.longitude)
        .bind(vaga.criador_id)
        .bind(vaga.created_at)
        .fetch_one(&**self.connection)
        .await
    }

    async fn update(&self, id: Uuid, changes: VagaChanges) -> Result<Option<Vaga>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE vagas SET \
             nome = COALESCE(?, nome), descricao = COALESCE(?, descricao), \
             local = COALESCE(?, local), data_hora = COALESCE(?, data_hora), \
             vagas_disponiveis = COALESCE(?, vagas_disponiveis), \
             categoria = COALESCE(?, categoria), cep = COALESCE(?, cep), \
             cidade = COALESCE(?, cidade), estado = COALESCE(?, estado), \
             latitude = COALESCE(?, latitude), longitude = COALESCE(?, longitude) \
             WHERE id = ? RETURNING *",
        )
        .bind(changes.nome)
        .bind(changes.descricao)
        .bind(changes.local)
        .bind(changes.data_hora)
        .bind(changes.vagas_disponiveis)
        .bind(changes.categoria)
        .bind(changes.cep)
        .bind(changes.cidade)
        .bind(changes.estado)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(id)
        .fetch_optional(&**self.connection)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM vagas WHERE id = ?")
            .bind(id)
            .execute(&**self.connection)
            .await?;
        Ok(())
    }

    async fn count_by_criador(&self, criador_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vagas WHERE criador_id = ?")
            .bind(criador_id)
            .fetch_one(&**self.connection)
            .await
    }
}

#[injectable(InscricaoRepository)]
pub struct DbInscricaoRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl InscricaoRepository for DbInscricaoRepository {
    async fn enroll(
        &self,
        vaga_id: Uuid,
        voluntario_id: Uuid,
        quando: DateTime<Utc>,
    ) -> Result<EnrollOutcome, sqlx::Error> {
        let mut tx = self.connection.begin().await?;

        let vaga: Option<Vaga> = sqlx::query_as("SELECT * FROM vagas WHERE id = ?")
            .bind(vaga_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(vaga) = vaga else {
            return Ok(EnrollOutcome::MissingVaga);
        };

        let existentes: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inscricoes WHERE vaga_id = ? AND voluntario_id = ?",
        )
        .bind(vaga_id)
        .bind(voluntario_id)
        .fetch_one(&mut *tx)
        .await?;
        if existentes > 0 {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        // A posting without a positive slot count is uncapped.
        if let Some(limite) = vaga.vagas_disponiveis.filter(|&l| l > 0) {
            let ocupadas: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM inscricoes WHERE vaga_id = ?")
                    .bind(vaga_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if ocupadas >= limite {
                return Ok(EnrollOutcome::Full);
            }
        }

        let inscricao: Inscricao = sqlx::query_as(
            "INSERT INTO inscricoes (id, vaga_id, voluntario_id, presenca_confirmada, data_confirmacao, horas_voluntariadas, created_at) \
             VALUES (?, ?, ?, 0, NULL, NULL, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(vaga_id)
        .bind(voluntario_id)
        .bind(quando)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(EnrollOutcome::Created(inscricao))
    }

    async fn cancel(&self, vaga_id: Uuid, voluntario_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inscricoes WHERE vaga_id = ? AND voluntario_id = ?")
            .bind(vaga_id)
            .bind(voluntario_id)
            .execute(&**self.connection)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_for_voluntario(
        &self,
        voluntario_id: Uuid,
    ) -> Result<Vec<InscricaoComVaga>, sqlx::Error> {
        let sql = format!(
            "{INSCRICAO_COM_VAGA} WHERE inscricoes.voluntario_id = ? \
             ORDER BY datetime(inscricoes.created_at) ASC"
        );
        sqlx::query_as(&sql)
            .bind(voluntario_id)
            .fetch_all(&**self.connection)
            .await
    }

    async fn list_for_vaga(
        &self,
        vaga_id: Uuid,
    ) -> Result<Vec<InscricaoComVoluntario>, sqlx::Error> {
        sqlx::query_as(
            "SELECT inscricoes.*, usuarios.nome AS voluntario_nome, \
             usuarios.email AS voluntario_email, usuarios.telefone AS voluntario_telefone \
             FROM inscricoes INNER JOIN usuarios ON usuarios.id = inscricoes.voluntario_id \
             WHERE inscricoes.vaga_id = ? ORDER BY datetime(inscricoes.created_at) ASC",
        )
        .bind(vaga_id)
        .fetch_all(&**self.connection)
        .await
    }

    async fn find_with_dono(&self, id: Uuid) -> Result<Option<InscricaoComDono>, sqlx::Error> {
        sqlx::query_as(
            "SELECT inscricoes.*, vagas.criador_id AS vaga_criador_id \
             FROM inscricoes INNER JOIN vagas ON vagas.id = inscricoes.vaga_id \
             WHERE inscricoes.id = ?",
        )
        .bind(id)
        .fetch_optional(&**self.connection)
        .await
    }

    async fn confirm(
        &self,
        id: Uuid,
        horas: i64,
        quando: DateTime<Utc>,
    ) -> Result<Inscricao, sqlx::Error> {
        sqlx::query_as(
            "UPDATE inscricoes SET presenca_confirmada = 1, data_confirmacao = ?, \
             horas_voluntariadas = ? WHERE id = ? RETURNING *",
        )
        .bind(quando)
        .bind(horas)
        .bind(id)
        .fetch_one(&**self.connection)
        .await
    }

    async fn list_confirmed_for_voluntario(
        &self,
        voluntario_id: Uuid,
    ) -> Result<Vec<InscricaoComVaga>, sqlx::Error> {
        let sql = format!(
            "{INSCRICAO_COM_VAGA} WHERE inscricoes.voluntario_id = ? \
             AND inscricoes.presenca_confirmada = 1 \
             ORDER BY datetime(inscricoes.created_at) ASC"
        );
        sqlx::query_as(&sql)
            .bind(voluntario_id)
            .fetch_all(&**self.connection)
            .await
    }

    async fn count_for_criador(&self, criador_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM inscricoes \
             INNER JOIN vagas ON vagas.id = inscricoes.vaga_id WHERE vagas.criador_id = ?",
        )
        .bind(criador_id)
        .fetch_one(&**self.connection)
        .await
    }
}

#[injectable(ChatRepository)]
pub struct DbChatRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl ChatRepository for DbChatRepository {
    async fn create(&self, mensagem: ChatMessage) -> Result<ChatMessage, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO chat_messages (id, mensagem, vaga_id, usuario_id, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(mensagem.id)
        .bind(mensagem.mensagem)
        .bind(mensagem.vaga_id)
        .bind(mensagem.usuario_id)
        .bind(mensagem.created_at)
        .fetch_one(&**self.connection)
        .await
    }

    async fn list_for_vaga(&self, vaga_id: Uuid) -> Result<Vec<ChatMessageComAutor>, sqlx::Error> {
        sqlx::query_as(
            "SELECT chat_messages.*, usuarios.nome AS autor_nome \
             FROM chat_messages INNER JOIN usuarios ON usuarios.id = chat_messages.usuario_id \
             WHERE chat_messages.vaga_id = ? ORDER BY chat_messages.created_at ASC",
        )
        .bind(vaga_id)
        .fetch_all(&**self.connection)
        .await
    }
}

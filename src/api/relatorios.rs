//! Organization reporting endpoints

use crate::api::{ApiError, CurrentUser};
use crate::core::traits::RelatorioService;
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new().route("/ong", get(metricas_ong))
}

async fn metricas_ong(
    Inject(relatorios): Inject<dyn RelatorioService>,
    current_user: CurrentUser,
) -> Result<Json<schemas::MetricasOng>, ApiError> {
    let metricas = relatorios.metricas_ong(current_user.id).await?;
    Ok(Json(schemas::MetricasOng {
        total_vagas_criadas: metricas.total_vagas_criadas,
        total_inscricoes: metricas.total_inscricoes,
    }))
}

pub mod schemas {
    use serde::Serialize;

    #[derive(Serialize, Debug)]
    pub struct MetricasOng {
        pub total_vagas_criadas: i64,
        pub total_inscricoes: i64,
    }
}

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::debug;

use super::render;
use crate::services::LinkService;

pub struct HistoryService;

impl HistoryService {
    /// Every version ever stored for the code, expired ones included.
    pub async fn show_history(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match links.history(&code) {
            Some(records) => {
                render::text(StatusCode::OK, render::records_body(&code, &records))
            }
            None => {
                debug!("History requested for unknown code: {}", code);
                render::not_found()
            }
        }
    }
}

pub fn history_routes() -> actix_web::Scope {
    web::scope("/history").route("/{code}", web::get().to(HistoryService::show_history))
}

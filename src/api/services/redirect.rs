use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, trace};

use super::render;
use crate::services::LinkService;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match links.resolve(&code) {
            Some(url) => {
                trace!("Redirecting {} -> {}", code, url);
                HttpResponse::Found()
                    .insert_header(("Location", url))
                    .insert_header(("Cache-Control", "no-cache"))
                    .finish()
            }
            None => {
                debug!("Redirect code not found or expired: {}", code);
                render::not_found()
            }
        }
    }

    pub async fn handle_unmatched() -> impl Responder {
        render::not_found()
    }
}

pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}

//! Privileged endpoints: `/list` and `/create/{code}`.
//!
//! Both sit behind [`BasicAuth`](crate::api::middleware::BasicAuth). Create
//! additionally passes the double-submit confirmation gate; the first call
//! only hands out a token cookie and a link that repeats the request.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::render;
use crate::api::GatewaySettings;
use crate::api::constants::{TEXT_HTML, TOKEN_QUERY_PARAM};
use crate::api::query::QueryParams;
use crate::services::confirm::confirmation_link;
use crate::services::{CreateOutcome, CreateRequest, ExpiryParams, LinkService};
use crate::utils::validate_url;

pub struct AdminService;

impl AdminService {
    pub async fn list_links(links: web::Data<Arc<LinkService>>) -> impl Responder {
        let current = links.list_current();
        debug!("Listing {} current links", current.len());
        render::text(StatusCode::OK, render::list_body(&current))
    }

    pub async fn create_link(
        req: HttpRequest,
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
        settings: web::Data<GatewaySettings>,
    ) -> HttpResponse {
        let code = path.into_inner();
        let query = QueryParams::parse(req.query_string());

        let url = match validate_url(query.last("url")) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!(code = %code, "Rejected create: {}", e);
                return render::bad_request(&e.to_string());
            }
        };

        let request = CreateRequest {
            code,
            url,
            expiry: ExpiryParams {
                month: query.contains("month"),
                week: query.contains("week"),
                day: query.contains("day"),
                expires_after: query.last("expires_after").map(str::to_owned),
            },
            query_token: query.last(TOKEN_QUERY_PARAM).map(str::to_owned),
            cookie_token: req
                .cookie(&settings.cookie_name)
                .map(|cookie| cookie.value().to_string()),
        };

        // 写日志需要 fsync，放到阻塞线程池
        let service = Arc::clone(links.get_ref());
        match web::block(move || service.create(request)).await {
            Ok(Ok(CreateOutcome::Created(record))) => render::text(
                StatusCode::OK,
                render::records_body(&record.code, std::slice::from_ref(&record)),
            ),
            Ok(Ok(CreateOutcome::NeedsConfirmation(token))) => {
                Self::confirmation_response(&req, &settings, token)
            }
            Ok(Ok(CreateOutcome::BadRequest(reason))) => render::bad_request(&reason),
            Ok(Err(e)) => {
                error!("Create failed: {}", e);
                render::internal_error()
            }
            Err(e) => {
                error!("Create task failed: {}", e);
                render::internal_error()
            }
        }
    }

    /// 400 page carrying a fresh token cookie and a link that repeats the
    /// request with the same token in the query.
    fn confirmation_response(
        req: &HttpRequest,
        settings: &GatewaySettings,
        token: String,
    ) -> HttpResponse {
        let link = confirmation_link(req.path(), req.query_string(), &token);
        let link = render::escape_html(&link);
        info!(path = req.path(), "Issued confirmation token");

        let body = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Confirm</title></head>\n<body>\n\
             <p>Open the link below to confirm this change.</p>\n\
             <p><a href=\"{link}\">{link}</a></p>\n</body>\n</html>\n"
        );

        HttpResponse::build(StatusCode::BAD_REQUEST)
            .insert_header(("Content-Type", TEXT_HTML))
            .insert_header(("X-Frame-Options", "DENY"))
            .insert_header(("Cache-Control", "no-store"))
            .cookie(settings.build_confirm_cookie(token))
            .body(body)
    }
}

pub fn list_routes() -> actix_web::Scope {
    web::scope("/list")
        .route("", web::get().to(AdminService::list_links))
        .route("", web::head().to(AdminService::list_links))
}

pub fn create_routes() -> actix_web::Scope {
    web::scope("/create").route("/{code}", web::get().to(AdminService::create_link))
}

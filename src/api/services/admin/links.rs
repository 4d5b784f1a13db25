//! 链接签发

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{info, trace};

use crate::api::ApiSettings;
use crate::services::{IssuedLink, TrackingService};

use super::error_code::ErrorCode;
use super::helpers::{error_from_linktrack, error_response, success_response};
use super::types::{
    GenerateLinkError, GenerateLinkQuery, GenerateLinksRequest, GenerateLinksResponse,
    GeneratedLink,
};

/// 拼出可直接分发的追踪链接
///
/// 配置了 `public_base_url` 时使用它，否则取本次请求的 scheme://host。
pub fn tracking_url(req: &HttpRequest, settings: &ApiSettings, token: &str) -> String {
    let base = match &settings.public_base_url {
        Some(base) => base.clone(),
        None => {
            let conn = req.connection_info();
            format!("{}://{}", conn.scheme(), conn.host())
        }
    };
    format!("{}{}/{}", base, settings.tracking_prefix, token)
}

fn to_generated(req: &HttpRequest, settings: &ApiSettings, link: IssuedLink) -> GeneratedLink {
    GeneratedLink {
        url: tracking_url(req, settings, &link.token),
        username: link.identity.into_inner(),
        token: link.token,
    }
}

/// GET /generate-link?username=
pub async fn generate_link(
    req: HttpRequest,
    query: web::Query<GenerateLinkQuery>,
    service: web::Data<Arc<TrackingService>>,
    settings: web::Data<ApiSettings>,
) -> impl Responder {
    let Some(username) = query.into_inner().username else {
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Username is required",
        );
    };

    match service.issue(&username) {
        Ok(link) => {
            trace!("Tracking link generated");
            success_response(to_generated(&req, &settings, link))
        }
        Err(e) => error_from_linktrack(&e),
    }
}

/// POST /generate-links，body: `{"usernames": [...]}`
pub async fn generate_links(
    req: HttpRequest,
    body: web::Json<GenerateLinksRequest>,
    service: web::Data<Arc<TrackingService>>,
    settings: web::Data<ApiSettings>,
) -> HttpResponse {
    let batch = service.issue_many(body.into_inner().usernames);
    info!(
        "Admin API: generated {} links ({} rejected)",
        batch.issued.len(),
        batch.failed.len()
    );

    let response = GenerateLinksResponse {
        links: batch
            .issued
            .into_iter()
            .map(|link| to_generated(&req, &settings, link))
            .collect(),
        errors: batch
            .failed
            .into_iter()
            .map(|f| GenerateLinkError {
                username: f.input,
                error: f.error,
            })
            .collect(),
    };
    success_response(response)
}

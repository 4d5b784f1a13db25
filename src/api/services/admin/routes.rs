//! Admin API 路由配置

use actix_web::web;

use super::links::{generate_link, generate_links};
use super::users::{clear_users, get_user, list_users};

/// 管理路由，挂在 `routes.admin_prefix` 下
///
/// - GET /generate-link - 单个签发
/// - POST /generate-links - 批量签发
/// - GET /users - 全部记录
/// - DELETE /users - 清空账本
/// - GET /users/{identity} - 单条记录
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-link", web::get().to(generate_link))
        .route("/generate-links", web::post().to(generate_links))
        .route("/users", web::get().to(list_users))
        .route("/users", web::delete().to(clear_users))
        .route("/users/{identity:.*}", web::get().to(get_user));
}

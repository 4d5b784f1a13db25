//! 客户端地址提取
//!
//! 有 `X-Forwarded-For` 时取第一个地址，否则使用连接的对端地址。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;

/// 规范化地址字符串：能解析为 IP / SocketAddr 时只保留 IP 部分
fn normalize(raw: &str) -> String {
    if let Ok(socket_addr) = raw.parse::<SocketAddr>() {
        socket_addr.ip().to_string()
    } else if let Ok(ip_addr) = raw.parse::<IpAddr>() {
        ip_addr.to_string()
    } else {
        raw.to_string()
    }
}

/// 从 `X-Forwarded-For` 头取第一个非空条目
pub fn first_forwarded_for(header: &str) -> Option<String> {
    header
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(normalize)
}

/// 提取请求来源地址
pub fn source_address(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(first_forwarded_for)
    {
        return Some(forwarded);
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

//! Admin API
//!
//! 链接签发与账本查询，全部挂在管理密钥守卫之后。

mod error_code;
mod helpers;
pub mod links;
pub mod routes;
mod types;
pub mod users;

pub use error_code::ErrorCode;
pub use helpers::{api_result, error_from_linktrack, error_response, success_response};
pub use routes::admin_routes;
pub use types::*;

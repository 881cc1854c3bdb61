pub mod auth;
pub mod response;

pub use auth::{require_admin, AdminUser};
pub use response::{ApiResponse, ApiResult};

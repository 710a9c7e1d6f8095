/*
 * Responsibility
 * - callback 形式の認証 middleware を、リクエスト単位の AuthContext として await できる形で公開する
 * - axum 連携 (middleware / extractor) の re-export
 */
pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use api::extractors::{AuthCtxExtractor, HttpAuthContext};
pub use config::{ConfigError, ContextConfig};
pub use error::{AppError, ContextError};
pub use services::auth::{
    AuthContext, Authenticator, ContextBuilder, Done, PassportRequest, Pending, RequestState,
    ResponseState, Verified, build_context, deferred,
};

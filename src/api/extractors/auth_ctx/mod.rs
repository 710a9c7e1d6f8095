/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証コンテキスト（AuthContext）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - HttpAuthContext
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::HttpAuthContext;

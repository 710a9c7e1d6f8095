/*
 * Responsibility
 * - Handler から見える「認証コンテキスト」の型
 * - middleware が request extensions に入れた状態から組み立てられる
 */
use crate::services::auth::{AuthContext, RequestState, ResponseState};

/// axum 上の AuthContext
///
/// - `A` はリクエストを跨いで共有される authenticator
/// - `U` は principal、`I` は request に載る authInfo
pub type HttpAuthContext<A, U, I = ()> = AuthContext<RequestState<U, I>, ResponseState, A>;

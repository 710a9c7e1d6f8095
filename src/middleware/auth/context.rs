//! request ごとに RequestState / ResponseState を作って extensions に入れる
//!
//! - handler (extractor) はこれを使って AuthContext を組み立てる
//! - strategy が ResponseState に書いた header はレスポンスへ反映する

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::{RequestState, ResponseState};

/// Router 全体に認証コンテキスト用の状態を載せる。
///
/// 例：
/// ```ignore
/// let app = Router::new().route("/login", post(login));
/// let app = middleware::auth::context::apply::<_, User, ()>(app).with_state(builder);
/// ```
pub fn apply<S, U, I>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    I: Send + Sync + 'static,
{
    router.layer(middleware::from_fn(attach_states::<U, I>))
}

async fn attach_states<U, I>(mut req: Request, next: Next) -> Response
where
    U: Send + Sync + 'static,
    I: Send + Sync + 'static,
{
    let request_state = Arc::new(RequestState::<U, I>::new());
    let response_state = Arc::new(ResponseState::new());

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(request_state);
    req.extensions_mut().insert(Arc::clone(&response_state));

    let mut response = next.run(req).await;
    response_state.drain_into(response.headers_mut());

    response
}

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{Authenticator, ContextBuilder, RequestState, ResponseState};

use super::HttpAuthContext;

/// Handler で AuthContext を受け取るための extractor
/// middleware が RequestState / ResponseState を request.extensions() に insert 済みである前提
/// 見つからない場合は 500 を返す（middleware 未設定は設定ミスなので）
pub struct AuthCtxExtractor<A, U, I = ()>(pub HttpAuthContext<A, U, I>);

impl<S, A, U, I> FromRequestParts<S> for AuthCtxExtractor<A, U, I>
where
    S: Send + Sync,
    ContextBuilder<A>: FromRef<S>,
    A: Authenticator<RequestState<U, I>, ResponseState>,
    U: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let req = parts.extensions.get::<Arc<RequestState<U, I>>>().cloned();
        let res = parts.extensions.get::<Arc<ResponseState>>().cloned();

        let (Some(req), Some(res)) = (req, res) else {
            tracing::error!("auth context requested on a route without the context middleware");
            return Err(AppError::Internal);
        };

        let builder = ContextBuilder::<A>::from_ref(state);
        Ok(Self(builder.build(req, res)))
    }
}

//! Strategy-dispatching middleware seen from the context side.
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::services::auth::done::Done;
use crate::services::auth::request::PassportRequest;

/// What a strategy produced: the principal and/or its verify-info.
///
/// Either may be `None` (e.g. a rejected login carries only `info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verified<U, I> {
    pub user: Option<U>,
    pub info: Option<I>,
}

/// Authentication middleware that runs named strategies against a
/// request/response pair and reports through a callback.
///
/// Implementations must eventually invoke `done` once. The strategy may
/// read or write cookies, headers, and session state on `req`/`res`.
pub trait Authenticator<R, S>: Send + Sync + 'static
where
    R: PassportRequest,
{
    type Info: Send + 'static;
    type Error: fmt::Debug + Send + 'static;

    fn authenticate(
        &self,
        req: Arc<R>,
        res: Arc<S>,
        strategy: &str,
        options: Option<Value>,
        done: Done<Verified<R::User, Self::Info>, Self::Error>,
    );
}

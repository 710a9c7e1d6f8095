/*
 * Responsibility
 * - 1 リクエストにつき 1 つ作られる認証コンテキスト (AuthContext)
 * - callback 形式の authenticate / login を await できる形に変換する
 * - logout / isAuthenticated などは request 側の実装へそのまま委譲する
 *
 * Notes
 * - principal (user) の保持・更新は request / authenticator の責務。ここでは持たない
 */
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::error::ContextError;
use crate::services::auth::authenticator::{Authenticator, Verified};
use crate::services::auth::done::deferred;
use crate::services::auth::request::PassportRequest;

/// Build a context for one request/response pair.
///
/// `authenticator` is the middleware instance to dispatch strategies on;
/// production code usually goes through [`ContextBuilder`] which carries a
/// shared one.
///
/// [`ContextBuilder`]: crate::services::auth::ContextBuilder
pub fn build_context<R, S, A>(
    req: Arc<R>,
    res: Arc<S>,
    authenticator: Arc<A>,
) -> AuthContext<R, S, A>
where
    R: PassportRequest,
    A: Authenticator<R, S>,
{
    AuthContext::new(req, res, authenticator, None)
}

pub struct AuthContext<R, S, A> {
    id: Uuid,
    req: Arc<R>,
    res: Arc<S>,
    authenticator: Arc<A>,
    callback_timeout: Option<Duration>,
}

impl<R, S, A> AuthContext<R, S, A>
where
    R: PassportRequest,
    A: Authenticator<R, S>,
{
    pub(crate) fn new(
        req: Arc<R>,
        res: Arc<S>,
        authenticator: Arc<A>,
        callback_timeout: Option<Duration>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            req,
            res,
            authenticator,
            callback_timeout,
        }
    }

    /// Bound how long `authenticate`/`login` wait for their callback.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.callback_timeout = Some(timeout);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run `strategy` against the stored request/response and wait for it.
    pub async fn authenticate(
        &self,
        strategy: &str,
        options: Option<Value>,
    ) -> Result<Verified<R::User, A::Info>, ContextError<A::Error>> {
        let (done, pending) = deferred();

        tracing::debug!(context_id = %self.id, strategy, "dispatching strategy");
        self.authenticator.authenticate(
            Arc::clone(&self.req),
            Arc::clone(&self.res),
            strategy,
            options,
            done,
        );

        let result = pending.settle(self.callback_timeout).await;
        trace_outcome(self.id, "authenticate", &result);
        result
    }

    /// Establish a login session for `user` through the request.
    pub async fn login(
        &self,
        user: R::User,
        options: Option<Value>,
    ) -> Result<(), ContextError<R::Error>> {
        let (done, pending) = deferred();

        tracing::debug!(context_id = %self.id, "dispatching login");
        self.req.login(user, options, done);

        let result = pending.settle(self.callback_timeout).await;
        trace_outcome(self.id, "login", &result);
        result
    }

    pub fn logout(&self) {
        self.req.logout()
    }

    pub fn log_out(&self) {
        self.req.log_out()
    }

    pub fn is_authenticated(&self) -> bool {
        self.req.is_authenticated()
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.req.is_unauthenticated()
    }

    /// Principal attached to the request right now.
    pub fn get_user(&self) -> Option<R::User> {
        self.req.user()
    }

    pub fn get_auth_info(&self) -> Option<R::AuthInfo> {
        self.req.auth_info()
    }

    /// The request this context was built for.
    pub fn request(&self) -> &Arc<R> {
        &self.req
    }

    pub fn response(&self) -> &Arc<S> {
        &self.res
    }
}

impl<R, S, A> Clone for AuthContext<R, S, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            req: Arc::clone(&self.req),
            res: Arc::clone(&self.res),
            authenticator: Arc::clone(&self.authenticator),
            callback_timeout: self.callback_timeout,
        }
    }
}

impl<R, S, A> fmt::Debug for AuthContext<R, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("id", &self.id)
            .field("callback_timeout", &self.callback_timeout)
            .finish_non_exhaustive()
    }
}

fn trace_outcome<T, E: fmt::Debug>(
    context_id: Uuid,
    operation: &'static str,
    result: &Result<T, ContextError<E>>,
) {
    match result {
        Ok(_) => tracing::debug!(%context_id, operation, "callback settled"),
        Err(ContextError::Failed(error)) => {
            tracing::warn!(%context_id, operation, ?error, "callback reported failure")
        }
        Err(ContextError::Abandoned) => {
            tracing::warn!(%context_id, operation, "callback dropped without being invoked")
        }
        Err(ContextError::TimedOut(limit)) => {
            tracing::warn!(%context_id, operation, ?limit, "no callback before the timeout")
        }
    }
}

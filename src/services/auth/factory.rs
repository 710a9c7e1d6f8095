//! Factory: one shared authenticator in, one `AuthContext` per request out.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ContextConfig;
use crate::services::auth::authenticator::Authenticator;
use crate::services::auth::context::AuthContext;
use crate::services::auth::request::PassportRequest;

/// Holds the authenticator every context dispatches to.
///
/// Cheap to clone, so it can sit in router state directly.
pub struct ContextBuilder<A> {
    authenticator: Arc<A>,
    callback_timeout: Option<Duration>,
}

impl<A> ContextBuilder<A> {
    pub fn new(authenticator: Arc<A>) -> Self {
        Self {
            authenticator,
            callback_timeout: None,
        }
    }

    pub fn from_config(authenticator: Arc<A>, config: &ContextConfig) -> Self {
        Self {
            authenticator,
            callback_timeout: config.callback_timeout,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.callback_timeout = Some(timeout);
        self
    }

    pub fn authenticator(&self) -> &Arc<A> {
        &self.authenticator
    }

    pub fn callback_timeout(&self) -> Option<Duration> {
        self.callback_timeout
    }

    pub fn build<R, S>(&self, req: Arc<R>, res: Arc<S>) -> AuthContext<R, S, A>
    where
        R: PassportRequest,
        A: Authenticator<R, S>,
    {
        AuthContext::new(
            req,
            res,
            Arc::clone(&self.authenticator),
            self.callback_timeout,
        )
    }
}

impl<A> Clone for ContextBuilder<A> {
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
            callback_timeout: self.callback_timeout,
        }
    }
}

impl<A> fmt::Debug for ContextBuilder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // authenticator は鍵や接続を持ちうるので出さない
        f.debug_struct("ContextBuilder")
            .field("callback_timeout", &self.callback_timeout)
            .finish_non_exhaustive()
    }
}

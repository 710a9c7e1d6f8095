use std::fmt;

use serde_json::Value;

use crate::services::auth::done::Done;

/// Request-side session helpers the context copies through.
///
/// The principal lives on the request and may be attached after a context
/// was built, so `user()` must read the current value every time.
pub trait PassportRequest: Send + Sync + 'static {
    type User: Clone + Send + Sync + 'static;
    type AuthInfo: Clone + Send + Sync + 'static;
    type Error: fmt::Debug + Send + 'static;

    /// Establish a login session for `user`, then report through `done`.
    fn login(&self, user: Self::User, options: Option<Value>, done: Done<(), Self::Error>);

    fn log_in(&self, user: Self::User, options: Option<Value>, done: Done<(), Self::Error>) {
        self.login(user, options, done)
    }

    fn logout(&self);

    fn log_out(&self) {
        self.logout()
    }

    fn is_authenticated(&self) -> bool;

    fn is_unauthenticated(&self) -> bool {
        !self.is_authenticated()
    }

    fn user(&self) -> Option<Self::User>;

    fn auth_info(&self) -> Option<Self::AuthInfo> {
        None
    }
}

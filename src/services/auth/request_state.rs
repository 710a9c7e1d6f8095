/*
 * Responsibility
 * - HTTP (axum) 上で使う具体的な request / response 側の状態
 *   - RequestState: principal (user) と authInfo を保持し、PassportRequest を実装する
 *   - ResponseState: strategy が書いた header (Set-Cookie など) を溜めておく
 * - middleware が request ごとに生成し、extensions 経由で extractor へ渡す
 *
 * Notes
 * - 永続化 (session store) はしない。リクエストの寿命の間だけ保持する
 */
use std::convert::Infallible;
use std::sync::{Mutex, PoisonError, RwLock};

use axum::http::{HeaderMap, HeaderName, HeaderValue, header::SET_COOKIE};
use serde_json::Value;

use crate::services::auth::done::Done;
use crate::services::auth::request::PassportRequest;

#[derive(Debug)]
pub struct RequestState<U, I = ()> {
    user: RwLock<Option<U>>,
    auth_info: RwLock<Option<I>>,
}

impl<U, I> Default for RequestState<U, I> {
    fn default() -> Self {
        Self {
            user: RwLock::new(None),
            auth_info: RwLock::new(None),
        }
    }
}

impl<U, I> RequestState<U, I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the principal (what a successful strategy or `login` does).
    pub fn set_user(&self, user: U) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn set_auth_info(&self, info: I) {
        *self.auth_info.write().unwrap_or_else(PoisonError::into_inner) = Some(info);
    }

    fn clear(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.auth_info.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<U, I> PassportRequest for RequestState<U, I>
where
    U: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    type User = U;
    type AuthInfo = I;
    type Error = Infallible;

    // options (session: false など) は保持先が request だけなので使わない
    fn login(&self, user: U, _options: Option<Value>, done: Done<(), Infallible>) {
        self.set_user(user);
        done.ok();
    }

    fn logout(&self) {
        self.clear();
    }

    fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn user(&self) -> Option<U> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn auth_info(&self) -> Option<I> {
        self.auth_info
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Headers a strategy wants on the eventual response.
#[derive(Debug, Default)]
pub struct ResponseState {
    headers: Mutex<HeaderMap>,
}

impl ResponseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_header(&self, name: HeaderName, value: HeaderValue) {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, value);
    }

    pub fn append_header(&self, name: HeaderName, value: HeaderValue) {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .append(name, value);
    }

    pub fn headers(&self) -> HeaderMap {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge collected headers into `target`.
    ///
    /// `Set-Cookie` values are appended next to the handler's own. Any other
    /// header is only added when the handler did not set it.
    pub fn drain_into(&self, target: &mut HeaderMap) {
        let collected = std::mem::take(
            &mut *self.headers.lock().unwrap_or_else(PoisonError::into_inner),
        );

        for name in collected.keys() {
            if *name != SET_COOKIE && target.contains_key(name) {
                continue;
            }
            for value in collected.get_all(name) {
                target.append(name.clone(), value.clone());
            }
        }
    }
}

//! Bridge to the externally provided identity client.
//!
//! The identity provider is embedded via a script tag and installs a global
//! capability object on `window` once it has loaded. This module waits for
//! that handle (bounded), and exposes the handful of capabilities the app
//! uses: current-session query, sign-out, and the auth-change subscription.
//! The provider itself is opaque; nothing here implements authentication.

use gloo_timers::future::sleep;
use js_sys::{Function, Promise, Reflect};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Name of the provider's global handle on `window`.
pub const IDENTITY_GLOBAL: &str = "$memberstackDom";

/// How often to re-check for the global handle while booting.
const READY_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Total time to wait for the identity script before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Attribute markers the embedded identity script recognizes on form
/// elements. The script wires submission itself; the app only renders them.
pub mod markers {
    pub const SIGNIN_FORM: &str = "signin";
    pub const EMAIL_FIELD: &str = "email";
    pub const PASSWORD_FIELD: &str = "password";
    pub const SIGNIN_ACTION: &str = "signin";
    pub const OAUTH_ACTION: &str = "google-oauth";
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Failed to load authentication. Please refresh the page.")]
    LoadTimeout,
    #[error("identity client call failed: {0}")]
    Provider(String),
}

/// A currently authenticated session, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

/// Handle to the provider's global capability object.
#[derive(Clone)]
pub struct IdentityClient {
    handle: JsValue,
}

impl IdentityClient {
    /// Returns the identity handle if the embedded script has installed it.
    pub fn try_get() -> Option<Self> {
        let window = web_sys::window()?;
        let handle =
            Reflect::get(&window, &JsValue::from_str(IDENTITY_GLOBAL)).ok()?;
        if handle.is_undefined() || handle.is_null() {
            None
        } else {
            Some(Self { handle })
        }
    }

    /// Readiness future: resolves once the identity script has installed
    /// its global handle, or fails with [`IdentityError::LoadTimeout`]
    /// after `timeout`.
    pub async fn wait_ready(timeout: Duration) -> Result<Self, IdentityError> {
        let mut waited = Duration::ZERO;
        loop {
            if let Some(client) = Self::try_get() {
                return Ok(client);
            }
            if waited >= timeout {
                return Err(IdentityError::LoadTimeout);
            }
            sleep(READY_CHECK_INTERVAL).await;
            waited += READY_CHECK_INTERVAL;
        }
    }

    /// Query the provider for a currently authenticated member.
    pub async fn current_member(
        &self,
    ) -> Result<Option<Session>, IdentityError> {
        let payload = self.call0("getCurrentMember").await?;
        Ok(session_from_member_payload(&payload))
    }

    /// Best-effort sign-out. Callers must navigate away regardless of the
    /// result; a failed provider call must never leave the user stuck.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.call0("logout").await.map(|_| ())
    }

    /// Subscribe to the provider's auth-change event, the authoritative
    /// session-changed channel. The returned guard keeps the JS callback
    /// alive; dropping it releases the subscription.
    pub fn on_auth_change(
        &self,
        on_session: yew::Callback<Session>,
    ) -> AuthSubscription {
        let closure =
            Closure::<dyn FnMut(JsValue)>::new(move |member: JsValue| {
                if let Some(session) = session_from_member(&member) {
                    on_session.emit(session);
                }
            });

        let handle =
            Reflect::get(&self.handle, &JsValue::from_str("onAuthChange"))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
                .and_then(|f| {
                    f.call1(&self.handle, closure.as_ref().unchecked_ref())
                        .ok()
                });
        if handle.is_none() {
            tracing::warn!("identity client does not expose onAuthChange");
        }

        AuthSubscription {
            handle,
            _closure: closure,
        }
    }

    /// Look up a method on the handle, call it, and await the result if
    /// the provider returned a promise.
    async fn call0(&self, method: &str) -> Result<JsValue, IdentityError> {
        let function = Reflect::get(&self.handle, &JsValue::from_str(method))
            .map_err(|e| provider_error(method, &e))?
            .dyn_into::<Function>()
            .map_err(|e| provider_error(method, &e))?;
        let result = function
            .call0(&self.handle)
            .map_err(|e| provider_error(method, &e))?;
        match result.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map_err(|e| provider_error(method, &e)),
            Err(value) => Ok(value),
        }
    }
}

/// Keeps the JS-side auth-change callback alive, and unhooks it from the
/// provider on drop. The provider must never be left holding a callback
/// whose closure has been freed.
pub struct AuthSubscription {
    handle: Option<JsValue>,
    _closure: Closure<dyn FnMut(JsValue)>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        // `onAuthChange` resolves to `{ unsubscribe }` on conforming
        // providers; without it the closure just drops.
        let Some(handle) = self.handle.take() else {
            return;
        };
        let unsubscribe =
            Reflect::get(&handle, &JsValue::from_str("unsubscribe"))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok());
        match unsubscribe {
            Some(unsubscribe) => {
                if let Err(e) = unsubscribe.call0(&handle) {
                    tracing::warn!("auth-change unsubscribe failed: {e:?}");
                }
            }
            None => {
                tracing::warn!(
                    "auth-change subscription has no unsubscribe method"
                );
            }
        }
    }
}

fn provider_error(method: &str, value: &JsValue) -> IdentityError {
    IdentityError::Provider(format!("{method}: {value:?}"))
}

/// `getCurrentMember` resolves `{ data: member | null }`.
fn session_from_member_payload(payload: &JsValue) -> Option<Session> {
    let member = Reflect::get(payload, &JsValue::from_str("data")).ok()?;
    session_from_member(&member)
}

/// The member object carries the email at `auth.email`.
fn session_from_member(member: &JsValue) -> Option<Session> {
    if member.is_null() || member.is_undefined() {
        return None;
    }
    let auth = Reflect::get(member, &JsValue::from_str("auth")).ok()?;
    let email = Reflect::get(&auth, &JsValue::from_str("email"))
        .ok()?
        .as_string()?;
    Some(Session { email })
}

use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::identity::IdentityClient;
use crate::{Route, State};

/// Best-effort identity sign-out. Navigation to the login page happens
/// unconditionally, even when the provider call fails or the provider
/// never loaded: logout must not leave the user stuck.
#[hook]
pub fn use_sign_out() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator().unwrap();

    Callback::from(move |_| {
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();

        yew::platform::spawn_local(async move {
            if let Some(identity) = IdentityClient::try_get() {
                if let Err(e) = identity.sign_out().await {
                    tracing::warn!("identity sign-out failed: {e}");
                }
            }

            dispatch.reduce_mut(|state| state.sign_out());
            navigator.push(&Route::Login);
        });
    })
}

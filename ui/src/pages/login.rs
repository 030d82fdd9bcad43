use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use payloads::requests;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::identity::{
    self, AuthSubscription, IdentityClient, Session, markers,
};
use crate::{SessionState, State, get_api_client};

/// Page state. Transitions are one-directional: `Booting` never recurs
/// for a page load, and a failed load is only resolved by a manual
/// refresh. A failed status check returns to `Form` (the form stays
/// usable), never to `Booting`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoginPhase {
    Booting,
    Form,
    Checking,
    Redirecting,
    LoadFailed,
}

/// Pure decisions of the login flow, kept out of the component so they
/// can be pinned by plain unit tests.
mod flow {
    use payloads::{ClientError, responses};

    use super::LoginPhase;
    use crate::identity::Session;

    /// An authenticated load goes straight to the status check; the
    /// credential form is only ever shown when no session was found.
    pub(super) fn phase_after_member_check(
        session: Option<&Session>,
    ) -> LoginPhase {
        if session.is_some() {
            LoginPhase::Checking
        } else {
            LoginPhase::Form
        }
    }

    /// What the view does with the routing call's result.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(super) enum RouteOutcome {
        /// Navigate the browser to this exact target.
        Redirect(String),
        /// Keep the form visible and show this message. No automatic retry.
        ShowError(String),
    }

    pub(super) fn route_outcome(
        result: Result<responses::CheckStatusOutcome, ClientError>,
    ) -> RouteOutcome {
        match result {
            Ok(outcome) => RouteOutcome::Redirect(outcome.redirect_url),
            Err(e) => RouteOutcome::ShowError(e.to_string()),
        }
    }

    /// Whether the once-per-load route guard re-arms. A failed check keeps
    /// the form usable, so a later sign-in must be able to route again; a
    /// redirect is final for this page load.
    pub(super) fn allows_reroute(outcome: &RouteOutcome) -> bool {
        matches!(outcome, RouteOutcome::ShowError(_))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use reqwest::StatusCode;

        #[test]
        fn existing_session_skips_the_form() {
            let session = Session {
                email: "jane@acme.test".to_string(),
            };
            assert_eq!(
                phase_after_member_check(Some(&session)),
                LoginPhase::Checking
            );
        }

        #[test]
        fn no_session_shows_the_form() {
            assert_eq!(phase_after_member_check(None), LoginPhase::Form);
        }

        #[test]
        fn success_redirects_to_the_exact_target() {
            let result = Ok(responses::CheckStatusOutcome {
                redirect_url: "/dashboard?client_id=abc".to_string(),
            });
            assert_eq!(
                route_outcome(result),
                RouteOutcome::Redirect("/dashboard?client_id=abc".to_string())
            );
        }

        #[test]
        fn api_error_shows_the_backend_error_text() {
            let result = Err(ClientError::APIError(
                StatusCode::NOT_FOUND,
                "Account not found".to_string(),
            ));
            assert_eq!(
                route_outcome(result),
                RouteOutcome::ShowError("Account not found".to_string())
            );
        }

        #[test]
        fn failed_check_rearms_routing_for_a_retry() {
            let outcome =
                RouteOutcome::ShowError("Account not found".to_string());
            assert!(allows_reroute(&outcome));
        }

        #[test]
        fn redirect_is_final_for_the_page_load() {
            let outcome = RouteOutcome::Redirect("/dashboard".to_string());
            assert!(!allows_reroute(&outcome));
        }
    }
}

#[function_component]
pub fn Login() -> Html {
    let phase = use_state(|| LoginPhase::Booting);
    let error = use_state(|| None::<String>);
    let (_, dispatch) = use_store::<State>();

    {
        let phase = phase.clone();
        let error = error.clone();
        let dispatch = dispatch.clone();

        use_effect_with((), move |_| {
            let mounted = Rc::new(AtomicBool::new(true));
            let subscription = Rc::new(RefCell::new(None::<AuthSubscription>));

            let mounted_task = mounted.clone();
            let subscription_task = subscription.clone();

            spawn_local(async move {
                let client = match IdentityClient::wait_ready(
                    identity::READY_TIMEOUT,
                )
                .await
                {
                    Ok(client) => client,
                    Err(e) => {
                        if mounted_task.load(Ordering::Relaxed) {
                            error.set(Some(e.to_string()));
                            phase.set(LoginPhase::LoadFailed);
                        }
                        return;
                    }
                };

                let member = client.current_member().await.unwrap_or_else(|e| {
                    tracing::warn!("current-member query failed: {e}");
                    None
                });
                if !mounted_task.load(Ordering::Relaxed) {
                    return;
                }
                phase.set(flow::phase_after_member_check(member.as_ref()));

                // At most one routing attempt in flight; a failed check
                // re-arms the guard so a later sign-in can route again.
                let routed = Rc::new(Cell::new(false));

                match member {
                    Some(session) => {
                        routed.set(true);
                        check_status_and_route(
                            session,
                            phase,
                            error,
                            dispatch,
                            mounted_task,
                            routed,
                        )
                        .await;
                    }
                    None => {
                        // The auth-change event is the authoritative
                        // session-changed channel.
                        let on_session = {
                            let phase = phase.clone();
                            let error = error.clone();
                            let dispatch = dispatch.clone();
                            let mounted = mounted_task.clone();
                            let routed = routed.clone();
                            Callback::from(move |session: Session| {
                                if routed.replace(true) {
                                    return;
                                }
                                phase.set(flow::phase_after_member_check(
                                    Some(&session),
                                ));
                                spawn_local(check_status_and_route(
                                    session,
                                    phase.clone(),
                                    error.clone(),
                                    dispatch.clone(),
                                    mounted.clone(),
                                    routed.clone(),
                                ));
                            })
                        };

                        *subscription_task.borrow_mut() =
                            Some(client.on_auth_change(on_session.clone()));

                        #[cfg(feature = "session-poll-fallback")]
                        poll_for_session(client, on_session, mounted_task, routed)
                            .await;
                    }
                }
            });

            move || {
                mounted.store(false, Ordering::Relaxed);
                subscription.borrow_mut().take();
            }
        });
    }

    html! {
        <main class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900 py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900 dark:text-white">
                        {"Welcome back"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-gray-600 dark:text-gray-400">
                        {"Sign in to access your dashboard"}
                    </p>
                </div>

                if let Some(error) = &*error {
                    <div class="bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 text-red-600 dark:text-red-400 px-4 py-3 rounded">
                        {error.clone()}
                    </div>
                }

                { match &*phase {
                    LoginPhase::Booting => spinner("Loading authentication..."),
                    LoginPhase::Checking | LoginPhase::Redirecting => {
                        spinner("Checking your account...")
                    }
                    // The error box above carries the message; refresh is the
                    // only way out of a failed load.
                    LoginPhase::LoadFailed => html! {},
                    LoginPhase::Form => signin_form(),
                } }
            </div>
        </main>
    }
}

/// Post the authenticated email to the status-check endpoint and act on
/// the response. A torn-down view neither updates state nor navigates.
async fn check_status_and_route(
    session: Session,
    phase: UseStateHandle<LoginPhase>,
    error: UseStateHandle<Option<String>>,
    dispatch: Dispatch<State>,
    mounted: Rc<AtomicBool>,
    routed: Rc<Cell<bool>>,
) {
    tracing::info!("checking onboarding status for {}", session.email);
    dispatch.reduce_mut(|state| {
        state.session = SessionState::SignedIn {
            email: session.email.clone(),
        };
    });

    let api_client = get_api_client();
    let request = requests::CheckStatus {
        email: session.email,
    };
    let result = api_client.check_status(&request).await;

    if !mounted.load(Ordering::Relaxed) {
        return;
    }
    let outcome = flow::route_outcome(result);
    if flow::allows_reroute(&outcome) {
        routed.set(false);
    }
    match outcome {
        flow::RouteOutcome::Redirect(url) => {
            tracing::info!("redirecting to {url}");
            phase.set(LoginPhase::Redirecting);
            let window = web_sys::window().unwrap();
            if let Err(e) = window.location().set_href(&url) {
                tracing::error!("navigation failed: {e:?}");
            }
        }
        flow::RouteOutcome::ShowError(message) => {
            error.set(Some(message));
            phase.set(LoginPhase::Form);
        }
    }
}

/// Degraded-mode fallback for providers whose auth-change event is
/// unreliable: check for a session on a fixed interval until one appears,
/// the event path wins, or the view unmounts.
#[cfg(feature = "session-poll-fallback")]
async fn poll_for_session(
    client: IdentityClient,
    on_session: Callback<Session>,
    mounted: Rc<AtomicBool>,
    routed: Rc<Cell<bool>>,
) {
    use gloo_timers::future::sleep;
    use std::time::Duration;

    // Grace delay so a just-submitted credential form can settle first.
    sleep(Duration::from_millis(500)).await;
    loop {
        if !mounted.load(Ordering::Relaxed) || routed.get() {
            return;
        }
        if let Ok(Some(session)) = client.current_member().await {
            on_session.emit(session);
            return;
        }
        sleep(Duration::from_secs(1)).await;
    }
}

fn spinner(message: &str) -> Html {
    html! {
        <div class="text-center py-12">
            <svg class="animate-spin mx-auto h-12 w-12 text-blue-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path>
            </svg>
            <p class="mt-4 text-gray-600 dark:text-gray-400 font-medium">{message}</p>
        </div>
    }
}

/// The credential form. The embedded identity script wires submission and
/// OAuth through the marker attributes; this code never reads the fields.
fn signin_form() -> Html {
    html! {
        <div data-ms-form={markers::SIGNIN_FORM}>
            <button
                data-ms-action={markers::OAUTH_ACTION}
                class="w-full mb-4 py-3 px-4 border-2 border-gray-300 dark:border-gray-600 rounded-lg font-semibold text-gray-700 dark:text-gray-300 hover:border-gray-400 transition-all"
            >
                {"Continue with Google"}
            </button>

            <div class="relative my-6">
                <div class="absolute inset-0 flex items-center">
                    <div class="w-full border-t border-gray-300 dark:border-gray-600"></div>
                </div>
                <div class="relative flex justify-center text-sm">
                    <span class="px-4 bg-gray-50 dark:bg-gray-900 text-gray-500 font-medium">
                        {"Or continue with email"}
                    </span>
                </div>
            </div>

            <div class="space-y-4">
                <div>
                    <label for="email" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        {"Email address"}
                    </label>
                    <input
                        id="email"
                        data-ms-member={markers::EMAIL_FIELD}
                        type="email"
                        placeholder="you@example.com"
                        required=true
                        class="w-full px-4 py-3 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white focus:ring-2 focus:ring-blue-500 outline-none transition-all"
                    />
                </div>
                <div>
                    <label for="password" class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                        {"Password"}
                    </label>
                    <input
                        id="password"
                        data-ms-member={markers::PASSWORD_FIELD}
                        type="password"
                        placeholder="••••••••"
                        required=true
                        class="w-full px-4 py-3 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white focus:ring-2 focus:ring-blue-500 outline-none transition-all"
                    />
                </div>
                <button
                    data-ms-action={markers::SIGNIN_ACTION}
                    class="w-full py-3 bg-blue-600 text-white font-semibold rounded-lg hover:bg-blue-700 transition-all"
                >
                    {"Sign in"}
                </button>
            </div>
        </div>
    }
}

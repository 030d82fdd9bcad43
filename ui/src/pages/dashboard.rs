use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gloo_timers::future::sleep;
use payloads::{Client, ClientId, SiteBuild, StoreClient};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::MainLayout;
use crate::components::{StatusCardView, select_card};
use crate::{Route, get_store_client, query_param};

/// Fixed delay between fetch cycles while a build is non-terminal.
/// No backoff, no cap: requests are cheap and page visits short-lived.
const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Whether a follow-up fetch cycle should be scheduled: only while a
/// build record exists and has not reached a terminal status.
fn should_poll(build: Option<&SiteBuild>) -> bool {
    build.is_some_and(|b| !b.status.is_terminal())
}

#[derive(Clone, PartialEq)]
enum DashboardState {
    Loading,
    Failed(String),
    Loaded {
        client: Client,
        build: Option<SiteBuild>,
    },
}

/// One full fetch cycle. The client record is required; a failed build
/// read is tolerated and rendered as "no build yet".
async fn load_dashboard(
    store: &StoreClient,
    client_id: &ClientId,
) -> DashboardState {
    let client = match store.client_by_id(client_id).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("failed to load client record: {e}");
            return DashboardState::Failed(
                "Failed to load dashboard".to_string(),
            );
        }
    };

    let build = match store.latest_site_build(&client.client_slug).await {
        Ok(build) => build,
        Err(e) => {
            tracing::debug!("failed to load site build record: {e}");
            None
        }
    };

    DashboardState::Loaded { client, build }
}

#[function_component]
pub fn Dashboard() -> Html {
    let navigator = use_navigator().unwrap();

    // Required page parameter; without it no network call is made.
    let client_id: Option<ClientId> = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| query_param(&search, "client_id"))
        .and_then(|value| value.parse().ok());

    let state = use_state(|| DashboardState::Loading);

    {
        let state = state.clone();
        use_effect_with(client_id, move |client_id| {
            let mounted = Rc::new(AtomicBool::new(true));

            if let Some(client_id) = *client_id {
                let mounted_task = mounted.clone();
                spawn_local(async move {
                    let store = get_store_client();
                    loop {
                        if !mounted_task.load(Ordering::Relaxed) {
                            return;
                        }
                        let loaded = load_dashboard(&store, &client_id).await;
                        if !mounted_task.load(Ordering::Relaxed) {
                            return;
                        }

                        let keep_polling = matches!(
                            &loaded,
                            DashboardState::Loaded { build, .. }
                                if should_poll(build.as_ref())
                        );
                        state.set(loaded);
                        if !keep_polling {
                            return;
                        }

                        // Armed only after the cycle's render, so cycles
                        // never overlap.
                        sleep(POLL_INTERVAL).await;
                    }
                });
            }

            move || mounted.store(false, Ordering::Relaxed);
        });
    }

    let error_view = |message: &str| {
        let navigator = navigator.clone();
        let on_back = Callback::from(move |_: MouseEvent| {
            navigator.push(&Route::Login);
        });
        html! {
            <main class="min-h-screen flex items-center justify-center px-4 bg-gray-50 dark:bg-gray-900">
                <div class="bg-white dark:bg-gray-800 rounded-lg shadow-lg p-8 max-w-md w-full">
                    <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-2 text-center">
                        {"Error"}
                    </h2>
                    <p class="text-gray-600 dark:text-gray-400 text-center mb-6">
                        {message}
                    </p>
                    <button
                        onclick={on_back}
                        class="w-full py-3 bg-blue-600 text-white font-semibold rounded-lg hover:bg-blue-700 transition-colors"
                    >
                        {"Back to Login"}
                    </button>
                </div>
            </main>
        }
    };

    if client_id.is_none() {
        return error_view("Client ID is required to view dashboard");
    }

    match &*state {
        DashboardState::Loading => html! {
            <main class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
                <div class="text-center">
                    <svg class="animate-spin mx-auto h-12 w-12 text-blue-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                        <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                        <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path>
                    </svg>
                    <p class="mt-4 text-gray-600 dark:text-gray-400">{"Loading dashboard..."}</p>
                </div>
            </main>
        },
        DashboardState::Failed(message) => error_view(message),
        DashboardState::Loaded { client, build } => html! {
            <MainLayout>
                <div class="bg-white dark:bg-gray-800 rounded-2xl shadow-2xl p-8">
                    <div class="border-b border-gray-200 dark:border-gray-700 pb-6 mb-6">
                        <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-4">
                            {format!("Welcome, {}", client.display_name())}
                        </h2>
                        <div class="space-y-2 text-gray-600 dark:text-gray-400">
                            <div class="flex justify-between">
                                <span>{"Client ID:"}</span>
                                <span class="font-semibold text-gray-900 dark:text-white">
                                    {client.client_slug.clone()}
                                </span>
                            </div>
                            <div class="flex justify-between">
                                <span>{"Email:"}</span>
                                <span class="font-semibold text-gray-900 dark:text-white">
                                    {client.contact_email.clone()}
                                </span>
                            </div>
                        </div>
                    </div>

                    <div>
                        <h3 class="text-xl font-bold text-gray-900 dark:text-white mb-4">
                            {"Website Status"}
                        </h3>
                        <StatusCardView card={select_card(client, build.as_ref())} />
                    </div>
                </div>
            </MainLayout>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use payloads::{BuildStatus, SiteBuildId};
    use uuid::Uuid;

    fn build(status: BuildStatus) -> SiteBuild {
        SiteBuild {
            id: SiteBuildId(Uuid::nil()),
            status,
            github_repo_url: None,
            vercel_deployment_url: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            error_message: None,
        }
    }

    #[test]
    fn no_build_record_does_not_poll() {
        assert!(!should_poll(None));
    }

    #[test]
    fn terminal_statuses_do_not_poll() {
        assert!(!should_poll(Some(&build(BuildStatus::Completed))));
        assert!(!should_poll(Some(&build(BuildStatus::Failed))));
    }

    #[test]
    fn non_terminal_statuses_poll() {
        assert!(should_poll(Some(&build(BuildStatus::Pending))));
        assert!(should_poll(Some(&build(BuildStatus::Building))));
        assert!(should_poll(Some(&build(BuildStatus::Other(
            "provisioning".to_string()
        )))));
    }
}

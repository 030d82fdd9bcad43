use payloads::{APIClient, StoreClient};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod hooks;
pub mod identity;
pub mod logs;
pub mod pages;
mod query;
mod state;

pub use query::query_param;
pub use state::{SessionState, State};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    APIClient {
        address: backend_address(),
        inner_client: reqwest::Client::new(),
    }
}

/// Read-only data store client for the dashboard's client and build reads.
pub fn get_store_client() -> StoreClient {
    let address = option_env!("STORE_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(same_origin);

    StoreClient {
        address,
        anon_key: option_env!("STORE_ANON_KEY").unwrap_or_default().to_string(),
        inner_client: reqwest::Client::new(),
    }
}

fn backend_address() -> String {
    // Try environment variable first (set at build time)
    option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(same_origin)
}

fn same_origin() -> String {
    let window = web_sys::window().unwrap();
    window.location().origin().unwrap()
}

#[function_component]
pub fn App() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Login} /> },
        Route::Login => html! { <pages::Login /> },
        Route::Dashboard => html! { <pages::Dashboard /> },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}

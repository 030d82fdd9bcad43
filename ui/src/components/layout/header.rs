use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::hooks::use_sign_out;

#[function_component]
pub fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let on_sign_out = use_sign_out();

    html! {
        <header class="border-b border-gray-200 dark:border-gray-700">
            <div class="max-w-4xl mx-auto px-4 py-4 flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"SiteForge"}</h1>
                    <p class="text-sm text-gray-600 dark:text-gray-400">{"Your Website Dashboard"}</p>
                </div>
                // Sign-out controls only make sense with a session.
                if let Some(email) = state.session_email() {
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-gray-600 dark:text-gray-400">{email}</span>
                        <button
                            onclick={on_sign_out}
                            class="px-4 py-2 border border-gray-300 dark:border-gray-600 rounded-lg text-sm font-medium text-gray-700 dark:text-gray-300 hover:bg-gray-50 dark:hover:bg-gray-800 transition-colors"
                        >
                            {"Logout"}
                        </button>
                    </div>
                }
            </div>
        </header>
    }
}

use payloads::{BuildStatus, Client, SiteBuild};
use yew::prelude::*;

/// Which status card the dashboard shows. Selection is exhaustive over the
/// build status set: every status maps to a card, nothing falls through to
/// a blank section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCard {
    /// Onboarding form not finished; dominates any build record.
    OnboardingIncomplete,
    /// Onboarding done, no build record yet.
    NotStarted,
    /// A build exists and has not reached a terminal status.
    InProgress { status: BuildStatus },
    /// Build completed; the link renders iff a deployment URL is present.
    Live { deployment_url: Option<String> },
    /// Build failed, with the pipeline's error message when it left one.
    BuildFailed { error_message: Option<String> },
}

/// Pick the card for a client and their latest build record.
///
/// Checked in order: onboarding gate, then build existence, then status.
pub fn select_card(client: &Client, build: Option<&SiteBuild>) -> StatusCard {
    if !client.onboarding_complete {
        return StatusCard::OnboardingIncomplete;
    }
    let Some(build) = build else {
        return StatusCard::NotStarted;
    };
    match &build.status {
        BuildStatus::Completed => StatusCard::Live {
            deployment_url: build
                .vercel_deployment_url
                .clone()
                .filter(|url| !url.is_empty()),
        },
        BuildStatus::Failed => StatusCard::BuildFailed {
            error_message: build.error_message.clone(),
        },
        BuildStatus::Pending | BuildStatus::Building | BuildStatus::Other(_) => {
            StatusCard::InProgress {
                status: build.status.clone(),
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub card: StatusCard,
}

#[function_component]
pub fn StatusCardView(props: &Props) -> Html {
    match &props.card {
        StatusCard::OnboardingIncomplete => html! {
            <div class="bg-yellow-50 dark:bg-yellow-900/20 border-2 border-yellow-200 dark:border-yellow-800 rounded-xl p-6">
                <span class="px-4 py-2 bg-yellow-100 text-yellow-800 rounded-full font-semibold text-sm">
                    {"Onboarding Incomplete"}
                </span>
                <p class="text-gray-700 dark:text-gray-300 mt-4">
                    {"You need to complete the onboarding form before we can build your website."}
                </p>
            </div>
        },
        StatusCard::NotStarted => html! {
            <div class="bg-blue-50 dark:bg-blue-900/20 border-2 border-blue-200 dark:border-blue-800 rounded-xl p-6">
                <span class="px-4 py-2 bg-blue-100 text-blue-800 rounded-full font-semibold text-sm">
                    {"Build Not Started"}
                </span>
                <p class="text-gray-700 dark:text-gray-300 mt-4">
                    {"Your onboarding is complete! Your website build will start shortly."}
                </p>
            </div>
        },
        StatusCard::InProgress { status } => html! {
            <div class="bg-indigo-50 dark:bg-indigo-900/20 border-2 border-indigo-200 dark:border-indigo-800 rounded-xl p-6">
                <span class="px-4 py-2 bg-indigo-100 text-indigo-800 rounded-full font-semibold text-sm">
                    {"Build In Progress"}
                </span>
                <p class="text-gray-700 dark:text-gray-300 mt-4">
                    {format!("Your website is being built (status: {status}). This page refreshes automatically.")}
                </p>
            </div>
        },
        StatusCard::Live { deployment_url } => html! {
            <div class="bg-green-50 dark:bg-green-900/20 border-2 border-green-200 dark:border-green-800 rounded-xl p-6">
                <span class="px-4 py-2 bg-green-100 text-green-800 rounded-full font-semibold text-sm">
                    {"✓ Website Live"}
                </span>
                <p class="text-green-900 dark:text-green-200 font-semibold my-4">
                    {"Your website has been successfully built and deployed!"}
                </p>
                if let Some(url) = deployment_url {
                    <a
                        href={url.clone()}
                        target="_blank"
                        rel="noopener noreferrer"
                        class="px-6 py-3 bg-green-600 text-white font-semibold rounded-lg hover:bg-green-700 transition-colors"
                    >
                        {"Open Your Website →"}
                    </a>
                }
            </div>
        },
        StatusCard::BuildFailed { error_message } => html! {
            <div class="bg-red-50 dark:bg-red-900/20 border-2 border-red-200 dark:border-red-800 rounded-xl p-6">
                <span class="px-4 py-2 bg-red-100 text-red-800 rounded-full font-semibold text-sm">
                    {"Build Failed"}
                </span>
                <p class="text-gray-700 dark:text-gray-300 mt-4">
                    {"Something went wrong while building your website. Our team has been notified."}
                </p>
                if let Some(message) = error_message {
                    <p class="text-sm text-red-700 dark:text-red-400 mt-2 font-mono">
                        {message.clone()}
                    </p>
                }
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use payloads::{ClientId, SiteBuildId};
    use uuid::Uuid;

    fn client(onboarding_complete: bool) -> Client {
        Client {
            id: ClientId(Uuid::nil()),
            client_name: "Acme Co".to_string(),
            full_name: "Jane Smith".to_string(),
            contact_email: "jane@acme.test".to_string(),
            client_slug: "acme".to_string(),
            onboarding_complete,
        }
    }

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
    fn onboarding_incomplete_dominates_any_build() {
        let c = client(false);
        assert_eq!(select_card(&c, None), StatusCard::OnboardingIncomplete);
        assert_eq!(
            select_card(&c, Some(&build(BuildStatus::Completed))),
            StatusCard::OnboardingIncomplete
        );
        assert_eq!(
            select_card(&c, Some(&build(BuildStatus::Failed))),
            StatusCard::OnboardingIncomplete
        );
    }

    #[test]
    fn no_build_means_not_started() {
        assert_eq!(select_card(&client(true), None), StatusCard::NotStarted);
    }

    #[test]
    fn completed_build_is_live_with_link_iff_url_present() {
        let c = client(true);

        let mut b = build(BuildStatus::Completed);
        b.vercel_deployment_url = Some("https://acme.vercel.app".to_string());
        assert_eq!(
            select_card(&c, Some(&b)),
            StatusCard::Live {
                deployment_url: Some("https://acme.vercel.app".to_string())
            }
        );

        b.vercel_deployment_url = None;
        assert_eq!(
            select_card(&c, Some(&b)),
            StatusCard::Live {
                deployment_url: None
            }
        );

        // An empty string is not a usable link.
        b.vercel_deployment_url = Some(String::new());
        assert_eq!(
            select_card(&c, Some(&b)),
            StatusCard::Live {
                deployment_url: None
            }
        );
    }

    #[test]
    fn building_status_gets_an_explicit_in_progress_card() {
        let c = client(true);
        assert_eq!(
            select_card(&c, Some(&build(BuildStatus::Building))),
            StatusCard::InProgress {
                status: BuildStatus::Building
            }
        );
    }

    #[test]
    fn unknown_statuses_render_as_in_progress() {
        let c = client(true);
        let status = BuildStatus::Other("provisioning".to_string());
        assert_eq!(
            select_card(&c, Some(&build(status.clone()))),
            StatusCard::InProgress { status }
        );
    }

    #[test]
    fn failed_build_carries_the_error_message() {
        let c = client(true);
        let mut b = build(BuildStatus::Failed);
        b.error_message = Some("deploy quota exceeded".to_string());
        assert_eq!(
            select_card(&c, Some(&b)),
            StatusCard::BuildFailed {
                error_message: Some("deploy quota exceeded".to_string())
            }
        );
    }

    #[test]
    fn selection_is_idempotent_for_unchanged_data() {
        let c = client(true);
        let b = build(BuildStatus::Building);
        assert_eq!(select_card(&c, Some(&b)), select_card(&c, Some(&b)));
    }
}

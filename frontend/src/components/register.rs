use crate::api::use_api;
use crate::auth::{register, use_auth};
use crate::components::icons::UserPlus;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use taskflow_shared::protocol::RegisterRequest;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (gmail, set_gmail) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (team_name, set_team_name) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let fields = [
            username.get(),
            name.get(),
            gmail.get(),
            password.get(),
            team_name.get(),
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            set_error_msg.set(Some("All fields are required".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = RegisterRequest {
            username: username.get_untracked(),
            name: name.get_untracked(),
            gmail: gmail.get_untracked(),
            password: password.get_untracked(),
            team_name: team_name.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            match register(&api, &auth, request).await {
                Ok(_) => {
                    set_success_msg
                        .set(Some("Registration successful! Redirecting...".to_string()));
                    // 注册者自动成为团队管理员，落点固定为管理面板
                    set_timeout(
                        move || router.navigate("/dashboard"),
                        Duration::from_millis(1500),
                    );
                }
                Err(message) => {
                    set_error_msg.set(Some(message));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserPlus attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create a Team"</h1>
                        <p class="text-base-content/70">
                            "Register yourself and your team. You become its admin."
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg_username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="reg_username"
                                type="text"
                                placeholder="unique username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="reg_name"
                                type="text"
                                placeholder="your display name"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_gmail">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg_gmail"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_gmail.set(event_target_value(&ev))
                                prop:value=gmail
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg_password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_team">
                                <span class="label-text">"Team Name"</span>
                            </label>
                            <input
                                id="reg_team"
                                type="text"
                                placeholder="e.g. Syntax"
                                on:input=move |ev| set_team_name.set(event_target_value(&ev))
                                prop:value=team_name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Create Team".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Already registered? " <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

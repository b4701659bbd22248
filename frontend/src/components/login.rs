use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::icons::ClipboardList;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// 按角色决定登录后的落点：管理员进管理面板，普通成员进个人视图
fn destination(is_admin: bool) -> &'static str {
    if is_admin { "/dashboard" } else { "/view" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // 已登录用户直接送往各自的落点；提交流程有自己的延时跳转，不在此抢跑
    Effect::new(move |_| {
        let state = auth.state().get();
        if state.is_authenticated() && !state.loading && !is_submitting.get_untracked() {
            router.navigate(destination(state.is_admin));
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().trim().is_empty() {
            set_error_msg.set(Some("Username and password are required".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match login(&api, &auth, &username.get_untracked(), &password.get_untracked()).await {
                Ok(session) => {
                    let name = if session.member_name.is_empty() {
                        session.member_username.clone()
                    } else {
                        session.member_name.clone()
                    };
                    set_success_msg.set(Some(format!("Welcome, {}!", name)));
                    // 短暂展示欢迎语再跳转
                    set_timeout(
                        move || router.navigate(destination(session.is_admin)),
                        Duration::from_millis(500),
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
                            <ClipboardList attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"TaskFlow"</h1>
                        <p class="text-base-content/70">"Sign in to your team workspace"</p>
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
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="your username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "No team yet? " <Link to="/register" class="link link-primary">"Create one"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

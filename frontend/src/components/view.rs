use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::icons::{CheckCircle, ClipboardList, LogOut, RefreshCw};
use crate::tasks::{fetch_member_tasks, mark_task_complete, use_tasks};
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use taskflow_shared::STORAGE_KEY_NAME;

/// 成员个人视图：只列出本人名下的任务，唯一的写操作是标记完成
#[component]
pub fn ViewPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let task_ctx = use_tasks();

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // 初始加载
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                let _ = fetch_member_tasks(&api, &task_ctx).await;
            });
        });
    }

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                Duration::from_secs(3),
            );
        }
    });

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                let _ = fetch_member_tasks(&api, &task_ctx).await;
            });
        }
    };

    let handle_mark_done = {
        let api = api.clone();
        move |id: u32| {
            if !confirm("Mark this task as complete?") {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match mark_task_complete(&api, &task_ctx, id).await {
                    Ok(_) => set_notification
                        .set(Some(("Task marked as complete!".to_string(), false))),
                    Err(e) => set_notification.set(Some((e, true))),
                }
            });
        }
    };

    let on_logout = move |_| logout(&auth);

    let task_count = move || task_ctx.state().with(|s| s.tasks.len());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let (_, is_err) = notification.get().unwrap();
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().unwrap().0}</span>
                        </div>
                    </div>
                </Show>

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <ClipboardList attr:class="text-primary h-6 w-6" />
                        <a class="btn btn-ghost text-xl">"My Tasks"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {move || {
                                auth.state()
                                    .with(|s| s.user.clone())
                                    .map(|user| {
                                        let name = crate::web::LocalStorage::get(STORAGE_KEY_NAME)
                                            .filter(|name| !name.is_empty())
                                            .unwrap_or(user);
                                        format!("Signed in as {}", name)
                                    })
                                    .unwrap_or_default()
                            }}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <button
                            on:click={
                                let reload = reload.clone();
                                move |_| reload()
                            }
                            disabled=move || task_ctx.state().with(|s| s.loading)
                            class="btn btn-ghost btn-circle"
                        >
                            <RefreshCw attr:class=move || {
                                if task_ctx.state().with(|s| s.loading) {
                                    "h-5 w-5 animate-spin"
                                } else {
                                    "h-5 w-5"
                                }
                            } />
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Log Out"
                        </button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="p-6 pb-2">
                            <h3 class="card-title">"Assigned to You"</h3>
                            <p class="text-base-content/70 text-sm">
                                "Tasks your team admin has assigned to you."
                            </p>
                        </div>

                        <Show when=move || task_ctx.state().with(|s| s.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm mx-6 my-2">
                                <span>{move || task_ctx.state().with(|s| s.error.clone()).unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Task"</th>
                                        <th class="hidden md:table-cell">"Team"</th>
                                        <th class="hidden md:table-cell">"Start"</th>
                                        <th class="hidden md:table-cell">"End"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || task_count() == 0 && !task_ctx.state().with(|s| s.loading)>
                                        <tr>
                                            <td colspan="7" class="text-center py-8 text-base-content/50">
                                                "Nothing assigned to you yet."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || task_ctx.state().with(|s| s.loading) && task_count() == 0>
                                        <tr>
                                            <td colspan="7" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || {
                                            task_ctx
                                                .state()
                                                .get()
                                                .tasks
                                                .into_iter()
                                                .enumerate()
                                                .collect::<Vec<_>>()
                                        }
                                        key=|(_, task)| task.id
                                        children={
                                            let handle_mark_done = handle_mark_done.clone();
                                            move |(index, task)| {
                                                let id = task.id;
                                                let finished = task.is_finish;
                                                let handle_mark_done = handle_mark_done.clone();
                                                view! {
                                                    <tr>
                                                        <td class="opacity-50">{index + 1}</td>
                                                        <td class="font-bold">{task.task_name.clone()}</td>
                                                        <td class="hidden md:table-cell text-sm opacity-70">
                                                            {task.team_name.clone().unwrap_or_else(|| "—".to_string())}
                                                        </td>
                                                        <td class="hidden md:table-cell font-mono text-xs opacity-50">
                                                            {task.start_date.to_string()}
                                                        </td>
                                                        <td class="hidden md:table-cell font-mono text-xs opacity-50">
                                                            {task.end_date.to_string()}
                                                        </td>
                                                        <td>
                                                            {if finished {
                                                                view! { <div class="badge badge-success badge-outline">"Done"</div> }.into_any()
                                                            } else {
                                                                view! { <div class="badge badge-warning badge-outline">"In Progress"</div> }.into_any()
                                                            }}
                                                        </td>
                                                        <td>
                                                            <button
                                                                class="btn btn-success btn-sm gap-1"
                                                                disabled=finished
                                                                on:click=move |_| handle_mark_done(id)
                                                            >
                                                                <CheckCircle attr:class="h-4 w-4" />
                                                                {if finished { "Completed" } else { "Mark Done" }}
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::components::member_dialog::{MemberDialog, MemberForm};
use crate::components::task_dialog::{TaskDialog, TaskForm};
use crate::tasks::use_tasks;
use crate::team::use_team;
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use taskflow_shared::protocol::{AddMemberRequest, AddTaskRequest, EditMemberRequest, EditTaskRequest};
use taskflow_shared::{STORAGE_KEY_NAME, TeamMember, TeamTask};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let team_ctx = use_team();
    let task_ctx = use_tasks();

    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let member_dialog_open = RwSignal::new(false);
    let editing_member = RwSignal::new(Option::<TeamMember>::None);
    let task_dialog_open = RwSignal::new(false);
    let editing_task = RwSignal::new(Option::<TeamTask>::None);

    // 初始加载：成员与任务各拉一次
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                let _ = crate::team::fetch_members(&api, &team_ctx).await;
                let _ = crate::tasks::fetch_tasks(&api, &task_ctx).await;
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
                let _ = crate::team::fetch_members(&api, &team_ctx).await;
                let _ = crate::tasks::fetch_tasks(&api, &task_ctx).await;
            });
        }
    };

    let handle_member_submit = {
        let api = api.clone();
        move |form: MemberForm| {
            let api = api.clone();
            let editing = editing_member.get_untracked();
            spawn_local(async move {
                let result = match editing {
                    Some(member) => crate::team::edit_member(
                        &api,
                        &team_ctx,
                        EditMemberRequest {
                            id: member.id,
                            name: form.name,
                            username: form.username,
                            email: form.gmail,
                            password: form.password,
                        },
                    )
                    .await
                    .map(|_| "Member updated successfully!"),
                    None => crate::team::add_member(
                        &api,
                        &team_ctx,
                        AddMemberRequest {
                            username: form.username,
                            name: form.name,
                            gmail: form.gmail,
                            password: form.password,
                        },
                    )
                    .await
                    .map(|_| "Team member added successfully!"),
                };
                match result {
                    Ok(msg) => set_notification.set(Some((msg.to_string(), false))),
                    Err(e) => set_notification.set(Some((e, true))),
                }
            });
        }
    };

    let handle_delete_member = {
        let api = api.clone();
        move |id: u32| {
            if !confirm("Are you sure you want to remove this member?") {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match crate::team::delete_member(&api, &team_ctx, id).await {
                    Ok(_) => set_notification
                        .set(Some(("Member removed successfully!".to_string(), false))),
                    Err(e) => set_notification.set(Some((e, true))),
                }
            });
        }
    };

    let handle_task_submit = {
        let api = api.clone();
        move |form: TaskForm| {
            let api = api.clone();
            let editing = editing_task.get_untracked();
            spawn_local(async move {
                let result = match editing {
                    Some(task) => crate::tasks::edit_task(
                        &api,
                        &task_ctx,
                        EditTaskRequest {
                            id: task.id,
                            task_name: form.task_name,
                            team_member_id: form.team_member_id,
                            start_date: form.start_date,
                            end_date: form.end_date,
                        },
                    )
                    .await
                    .map(|_| "Task updated successfully!"),
                    None => crate::tasks::add_task(
                        &api,
                        &task_ctx,
                        AddTaskRequest {
                            task_name: form.task_name,
                            team_member_id: form.team_member_id,
                            start_date: form.start_date,
                            end_date: form.end_date,
                        },
                    )
                    .await
                    .map(|_| "Task added successfully!"),
                };
                match result {
                    Ok(msg) => set_notification.set(Some((msg.to_string(), false))),
                    Err(e) => set_notification.set(Some((e, true))),
                }
            });
        }
    };

    let handle_delete_task = {
        let api = api.clone();
        move |id: u32| {
            if !confirm("Are you sure you want to delete this task?") {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match crate::tasks::delete_task(&api, &task_ctx, id).await {
                    Ok(_) => set_notification
                        .set(Some(("Task deleted successfully!".to_string(), false))),
                    Err(e) => set_notification.set(Some((e, true))),
                }
            });
        }
    };

    let on_logout = move |_| logout(&auth);

    let members = Signal::derive(move || team_ctx.state().get().members.clone());
    let member_count = move || team_ctx.state().with(|s| s.members.len());
    let task_count = move || task_ctx.state().with(|s| s.tasks.len());
    let open_tasks = move || {
        task_ctx
            .state()
            .with(|s| s.tasks.iter().filter(|t| !t.is_finish).count())
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                // 通知提示框
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
                        <a class="btn btn-ghost text-xl">"TaskFlow Dashboard"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            // 问候语优先用显示名，存储里没有时退回登录标识
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
                            class="btn btn-ghost btn-circle"
                        >
                            <RefreshCw attr:class="h-5 w-5" />
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Log Out"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Users attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Team Members"</div>
                        <div class="stat-value text-primary">{member_count}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-secondary">
                            <ClipboardList attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Tasks"</div>
                        <div class="stat-value text-secondary">{task_count}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-success">
                            <CheckCircle attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Open"</div>
                        <div class="stat-value text-success">{open_tasks}</div>
                    </div>
                </div>

                // 成员卡片
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"Team Members"</h3>
                                <p class="text-base-content/70 text-sm">"Manage who is on your team."</p>
                            </div>
                            <button
                                class="btn btn-primary gap-2"
                                on:click=move |_| {
                                    editing_member.set(None);
                                    member_dialog_open.set(true);
                                }
                            >
                                <UserPlus attr:class="h-4 w-4" /> "Add Member"
                            </button>
                        </div>

                        <Show when=move || team_ctx.state().with(|s| s.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm mx-6 my-2">
                                <span>{move || team_ctx.state().with(|s| s.error.clone()).unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Username"</th>
                                        <th class="hidden md:table-cell">"Email"</th>
                                        <th>"Role"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || member_count() == 0 && !team_ctx.state().with(|s| s.loading)>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No members yet. Add one to get started."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || team_ctx.state().with(|s| s.loading) && member_count() == 0>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || team_ctx.state().get().members
                                        key=|member| member.id
                                        children={
                                            let handle_delete_member = handle_delete_member.clone();
                                            move |member| {
                                                let id = member.id;
                                                let edit_target = member.clone();
                                                let handle_delete_member = handle_delete_member.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-bold">{member.name.clone()}</td>
                                                        <td class="font-mono text-sm opacity-70">{member.username.clone()}</td>
                                                        <td class="hidden md:table-cell text-sm opacity-70">{member.gmail.clone()}</td>
                                                        <td>
                                                            {if member.is_admin {
                                                                view! { <div class="badge badge-primary badge-outline">"Admin"</div> }.into_any()
                                                            } else {
                                                                view! { <div class="badge badge-ghost">"Member"</div> }.into_any()
                                                            }}
                                                        </td>
                                                        <td>
                                                            <div class="flex gap-1 justify-end">
                                                                <button
                                                                    class="btn btn-ghost btn-sm btn-square"
                                                                    on:click=move |_| {
                                                                        editing_member.set(Some(edit_target.clone()));
                                                                        member_dialog_open.set(true);
                                                                    }
                                                                >
                                                                    <Pencil attr:class="h-4 w-4" />
                                                                </button>
                                                                <button
                                                                    class="btn btn-ghost btn-sm btn-square text-error"
                                                                    on:click=move |_| handle_delete_member(id)
                                                                >
                                                                    <Trash2 attr:class="h-4 w-4" />
                                                                </button>
                                                            </div>
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

                // 任务卡片
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"Team Tasks"</h3>
                                <p class="text-base-content/70 text-sm">"Assign work and track its status."</p>
                            </div>
                            <button
                                class="btn btn-primary gap-2"
                                on:click=move |_| {
                                    editing_task.set(None);
                                    task_dialog_open.set(true);
                                }
                            >
                                <Plus attr:class="h-4 w-4" /> "Add Task"
                            </button>
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
                                        <th>"Task"</th>
                                        <th>"Assigned To"</th>
                                        <th class="hidden md:table-cell">"Start"</th>
                                        <th class="hidden md:table-cell">"End"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || task_count() == 0 && !task_ctx.state().with(|s| s.loading)>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "No tasks yet. Add one to get started."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || task_ctx.state().with(|s| s.loading) && task_count() == 0>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || task_ctx.state().get().tasks
                                        key=|task| task.id
                                        children={
                                            let handle_delete_task = handle_delete_task.clone();
                                            move |task| {
                                                let id = task.id;
                                                let edit_target = task.clone();
                                                let handle_delete_task = handle_delete_task.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-bold">{task.task_name.clone()}</td>
                                                        <td class="text-sm opacity-70">
                                                            {task.assigned_to.clone().unwrap_or_else(|| "—".to_string())}
                                                        </td>
                                                        <td class="hidden md:table-cell font-mono text-xs opacity-50">
                                                            {task.start_date.to_string()}
                                                        </td>
                                                        <td class="hidden md:table-cell font-mono text-xs opacity-50">
                                                            {task.end_date.to_string()}
                                                        </td>
                                                        <td>
                                                            {if task.is_finish {
                                                                view! { <div class="badge badge-success badge-outline">"Done"</div> }.into_any()
                                                            } else {
                                                                view! { <div class="badge badge-warning badge-outline">"In Progress"</div> }.into_any()
                                                            }}
                                                        </td>
                                                        <td>
                                                            <div class="flex gap-1 justify-end">
                                                                <button
                                                                    class="btn btn-ghost btn-sm btn-square"
                                                                    on:click=move |_| {
                                                                        editing_task.set(Some(edit_target.clone()));
                                                                        task_dialog_open.set(true);
                                                                    }
                                                                >
                                                                    <Pencil attr:class="h-4 w-4" />
                                                                </button>
                                                                <button
                                                                    class="btn btn-ghost btn-sm btn-square text-error"
                                                                    on:click=move |_| handle_delete_task(id)
                                                                >
                                                                    <Trash2 attr:class="h-4 w-4" />
                                                                </button>
                                                            </div>
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

            <MemberDialog
                open=member_dialog_open
                editing=Signal::derive(move || editing_member.get())
                on_submit=handle_member_submit
            />
            <TaskDialog
                open=task_dialog_open
                editing=Signal::derive(move || editing_task.get())
                members=members
                on_submit=handle_task_submit
            />
        </div>
    }
}

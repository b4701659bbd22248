use leptos::prelude::*;
use taskflow_shared::{TeamMember, TeamTask};

/// 任务表单的提交载荷；日期保持 `YYYY-MM-DD` 字符串，校验交给后端
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub task_name: String,
    pub team_member_id: u32,
    pub start_date: String,
    pub end_date: String,
}

#[component]
pub fn TaskDialog(
    /// 打开/关闭状态，由父组件控制
    open: RwSignal<bool>,
    /// Some 表示编辑该任务，None 表示新增
    #[prop(into)] editing: Signal<Option<TeamTask>>,
    /// 指派下拉框的候选成员
    #[prop(into)] members: Signal<Vec<TeamMember>>,
    #[prop(into)] on_submit: Callback<TaskForm>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let (task_name, set_task_name) = signal(String::new());
    let (member_id, set_member_id) = signal(Option::<u32>::None);
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // 打开时按编辑对象预填。任务行只带被指派人的显示名，
    // 这里按名字在成员列表里反查出 id 供下拉框选中。
    Effect::new(move |_| {
        if open.get() {
            if let Some(task) = editing.get() {
                set_task_name.set(task.task_name);
                set_start_date.set(task.start_date.to_string());
                set_end_date.set(task.end_date.to_string());

                let resolved = task.assigned_to.as_ref().and_then(|assignee| {
                    members
                        .get_untracked()
                        .iter()
                        .find(|member| &member.name == assignee)
                        .map(|member| member.id)
                });
                set_member_id.set(resolved);
            } else {
                set_task_name.set(String::new());
                set_start_date.set(String::new());
                set_end_date.set(String::new());
                set_member_id.set(None);
            }
        }
    });

    let on_form_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(team_member_id) = member_id.get() else {
            return;
        };
        on_submit.run(TaskForm {
            task_name: task_name.get(),
            team_member_id,
            start_date: start_date.get(),
            end_date: end_date.get(),
        });
        open.set(false);
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if editing.get().is_some() { "Edit Task" } else { "Add Task" }}
                </h3>
                <p class="py-4 text-base-content/70">
                    "Describe the task, pick an assignee and set the schedule."
                </p>

                <form on:submit=on_form_submit class="space-y-4">
                    <div class="form-control">
                        <label for="task_name" class="label">
                            <span class="label-text">"Task"</span>
                        </label>
                        <input id="task_name" required
                            type="text"
                            placeholder="Write report"
                            on:input=move |ev| set_task_name.set(event_target_value(&ev))
                            prop:value=task_name
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Assign To"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            required
                            on:change=move |ev| set_member_id.set(event_target_value(&ev).parse::<u32>().ok())
                        >
                            <option value="" disabled selected=move || member_id.get().is_none()>
                                "Select a member"
                            </option>
                            <For
                                each=move || members.get()
                                key=|member| member.id
                                children=move |member| {
                                    let id = member.id;
                                    view! {
                                        <option value=id.to_string() selected=move || member_id.get() == Some(id)>
                                            {member.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="start_date" class="label">
                                <span class="label-text">"Start Date"</span>
                            </label>
                            <input id="start_date" required
                                type="date"
                                on:input=move |ev| set_start_date.set(event_target_value(&ev))
                                prop:value=start_date
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="end_date" class="label">
                                <span class="label-text">"End Date"</span>
                            </label>
                            <input id="end_date" required
                                type="date"
                                on:input=move |ev| set_end_date.set(event_target_value(&ev))
                                prop:value=end_date
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Save Changes" } else { "Add Task" }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

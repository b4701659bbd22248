use leptos::prelude::*;
use taskflow_shared::TeamMember;

/// 成员表单的提交载荷；新增与编辑共用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberForm {
    pub name: String,
    pub username: String,
    pub gmail: String,
    pub password: String,
}

#[component]
pub fn MemberDialog(
    /// 打开/关闭状态，由父组件控制
    open: RwSignal<bool>,
    /// Some 表示编辑该成员，None 表示新增
    #[prop(into)] editing: Signal<Option<TeamMember>>,
    #[prop(into)] on_submit: Callback<MemberForm>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let (name, set_name) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (gmail, set_gmail) = signal(String::new());
    let (password, set_password) = signal(String::new());

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

    // 打开时按编辑对象预填；密码不回传，编辑时总是重新输入
    Effect::new(move |_| {
        if open.get() {
            if let Some(member) = editing.get() {
                set_name.set(member.name);
                set_username.set(member.username);
                set_gmail.set(member.gmail);
            } else {
                set_name.set(String::new());
                set_username.set(String::new());
                set_gmail.set(String::new());
            }
            set_password.set(String::new());
        }
    });

    let on_form_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(MemberForm {
            name: name.get(),
            username: username.get(),
            gmail: gmail.get(),
            password: password.get(),
        });
        open.set(false);
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if editing.get().is_some() { "Edit Member" } else { "Add Member" }}
                </h3>
                <p class="py-4 text-base-content/70">
                    {move || if editing.get().is_some() {
                        "Update the member's profile. The password is set anew."
                    } else {
                        "Add a member to your team. They sign in with these credentials."
                    }}
                </p>

                <form on:submit=on_form_submit class="space-y-4">
                    <div class="form-control">
                        <label for="member_name" class="label">
                            <span class="label-text">"Full Name"</span>
                        </label>
                        <input id="member_name" required
                            type="text"
                            placeholder="Bob B"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="member_username" class="label">
                            <span class="label-text">"Username"</span>
                        </label>
                        <input id="member_username" required
                            type="text"
                            placeholder="bob"
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="member_gmail" class="label">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input id="member_gmail" required
                            type="email"
                            placeholder="bob@example.com"
                            on:input=move |ev| set_gmail.set(event_target_value(&ev))
                            prop:value=gmail
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="member_password" class="label">
                            <span class="label-text">"Password"</span>
                        </label>
                        <input id="member_password" required
                            type="password"
                            placeholder="••••••••"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Save Changes" } else { "Add Member" }}
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

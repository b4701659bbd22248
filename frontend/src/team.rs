//! 团队成员状态存储
//!
//! 与任务存储同构：成员列表的唯一事实来源，变更成功后以一次
//! 重新拉取与后端对齐，并发拉取用世代号裁决。

use leptos::prelude::*;
use taskflow_shared::TeamMember;
use taskflow_shared::protocol::{
    AddMemberRequest, DashboardRequest, DeleteMemberRequest, EditMemberRequest,
};

use crate::api::{Transport, error_message, send};

/// 团队成员状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamState {
    pub members: Vec<TeamMember>,
    pub loading: bool,
    pub error: Option<String>,
    epoch: u64,
}

impl TeamState {
    fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.epoch += 1;
        self.epoch
    }

    fn apply_fetched(&mut self, epoch: u64, members: Vec<TeamMember>) {
        if epoch != self.epoch {
            return;
        }
        self.members = members;
        self.loading = false;
    }

    fn apply_fetch_error(&mut self, epoch: u64, message: String) {
        if epoch != self.epoch {
            return;
        }
        self.loading = false;
        self.error = Some(message);
    }
}

/// 成员上下文（信号对）
#[derive(Clone, Copy)]
pub struct TeamContext {
    state: ReadSignal<TeamState>,
    set_state: WriteSignal<TeamState>,
}

impl TeamContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(TeamState::default());
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<TeamState> {
        self.state
    }
}

impl Default for TeamContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取成员上下文
pub fn use_team() -> TeamContext {
    use_context::<TeamContext>().expect("TeamContext should be provided at the app root")
}

/// 拉取团队成员列表（管理面板）
pub async fn fetch_members<T: Transport>(transport: &T, ctx: &TeamContext) -> Result<(), String> {
    let mut epoch = 0;
    ctx.set_state.update(|state| epoch = state.begin_fetch());

    match send(transport, &DashboardRequest).await {
        Ok(data) => {
            ctx.set_state
                .update(|state| state.apply_fetched(epoch, data.team_members));
            Ok(())
        }
        Err(err) => {
            let message = error_message(&err, "Failed to fetch members");
            ctx.set_state
                .update(|state| state.apply_fetch_error(epoch, message.clone()));
            Err(message)
        }
    }
}

/// 添加成员；成功后重新拉取一次与后端对齐
pub async fn add_member<T: Transport>(
    transport: &T,
    ctx: &TeamContext,
    request: AddMemberRequest,
) -> Result<(), String> {
    mutate(transport, ctx, &request, "Failed to add member").await
}

/// 编辑成员资料；成功后重新拉取一次与后端对齐
pub async fn edit_member<T: Transport>(
    transport: &T,
    ctx: &TeamContext,
    request: EditMemberRequest,
) -> Result<(), String> {
    mutate(transport, ctx, &request, "Failed to edit member").await
}

/// 将成员移出团队；成功后重新拉取一次与后端对齐
pub async fn delete_member<T: Transport>(
    transport: &T,
    ctx: &TeamContext,
    id: u32,
) -> Result<(), String> {
    mutate(
        transport,
        ctx,
        &DeleteMemberRequest { id },
        "Failed to delete member",
    )
    .await
}

async fn mutate<R, T>(
    transport: &T,
    ctx: &TeamContext,
    request: &R,
    fallback: &str,
) -> Result<(), String>
where
    R: taskflow_shared::protocol::ApiRequest,
    T: Transport,
{
    ctx.set_state.update(|state| state.error = None);

    match send(transport, request).await {
        Ok(_) => fetch_members(transport, ctx).await,
        Err(err) => {
            let message = error_message(&err, fallback);
            ctx.set_state
                .update(|state| state.error = Some(message.clone()));
            Err(message)
        }
    }
}

#[cfg(test)]
mod tests;

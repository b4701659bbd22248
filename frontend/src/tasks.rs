//! 任务状态存储
//!
//! 任务列表的唯一事实来源。变更操作（增、改、删）成功后以一次
//! 重新拉取与后端对齐；标记完成是唯一的例外，只打补丁改本地状态。
//!
//! 拉取带世代号（epoch）：每次开始拉取递增，响应到达时世代号
//! 不匹配则丢弃，保证并发拉取下总是最后发起的那次胜出。

use leptos::prelude::*;
use taskflow_shared::TeamTask;
use taskflow_shared::protocol::{
    AddTaskRequest, DashboardRequest, DeleteTaskRequest, EditTaskRequest, MarkTaskCompleteRequest,
    ViewRequest,
};

use crate::api::{Transport, error_message, send};

/// 任务状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskState {
    pub tasks: Vec<TeamTask>,
    pub loading: bool,
    pub error: Option<String>,
    /// 拉取世代号，过期响应据此丢弃
    epoch: u64,
}

impl TaskState {
    /// 开始一次拉取，返回本次的世代号
    fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.epoch += 1;
        self.epoch
    }

    /// 应用拉取结果；世代号已被更晚的拉取超越时丢弃
    fn apply_fetched(&mut self, epoch: u64, tasks: Vec<TeamTask>) {
        if epoch != self.epoch {
            return;
        }
        self.tasks = tasks;
        self.loading = false;
    }

    fn apply_fetch_error(&mut self, epoch: u64, message: String) {
        if epoch != self.epoch {
            return;
        }
        self.loading = false;
        self.error = Some(message);
    }

    /// 把指定任务标记为已完成（本地补丁，不触发重新拉取）
    fn mark_finished(&mut self, id: u32) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.is_finish = true;
        }
    }
}

/// 任务上下文（信号对）
#[derive(Clone, Copy)]
pub struct TaskContext {
    state: ReadSignal<TaskState>,
    set_state: WriteSignal<TaskState>,
}

impl TaskContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(TaskState::default());
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<TaskState> {
        self.state
    }
}

impl Default for TaskContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取任务上下文
pub fn use_tasks() -> TaskContext {
    use_context::<TaskContext>().expect("TaskContext should be provided at the app root")
}

/// 拉取团队全部任务（管理面板）
pub async fn fetch_tasks<T: Transport>(transport: &T, ctx: &TaskContext) -> Result<(), String> {
    let mut epoch = 0;
    ctx.set_state.update(|state| epoch = state.begin_fetch());

    match send(transport, &DashboardRequest).await {
        Ok(data) => {
            ctx.set_state
                .update(|state| state.apply_fetched(epoch, data.team_tasks));
            Ok(())
        }
        Err(err) => {
            let message = error_message(&err, "Failed to fetch tasks");
            ctx.set_state
                .update(|state| state.apply_fetch_error(epoch, message.clone()));
            Err(message)
        }
    }
}

/// 拉取本人名下任务（成员个人视图）
pub async fn fetch_member_tasks<T: Transport>(
    transport: &T,
    ctx: &TaskContext,
) -> Result<(), String> {
    let mut epoch = 0;
    ctx.set_state.update(|state| epoch = state.begin_fetch());

    match send(transport, &ViewRequest).await {
        Ok(data) => {
            ctx.set_state
                .update(|state| state.apply_fetched(epoch, data.team_tasks));
            Ok(())
        }
        Err(err) => {
            let message = error_message(&err, "Failed to fetch tasks");
            ctx.set_state
                .update(|state| state.apply_fetch_error(epoch, message.clone()));
            Err(message)
        }
    }
}

/// 创建任务；成功后重新拉取一次与后端对齐
pub async fn add_task<T: Transport>(
    transport: &T,
    ctx: &TaskContext,
    request: AddTaskRequest,
) -> Result<(), String> {
    mutate(transport, ctx, &request, "Failed to add task").await
}

/// 编辑任务；成功后重新拉取一次与后端对齐
pub async fn edit_task<T: Transport>(
    transport: &T,
    ctx: &TaskContext,
    request: EditTaskRequest,
) -> Result<(), String> {
    mutate(transport, ctx, &request, "Failed to edit task").await
}

/// 删除任务；成功后重新拉取一次与后端对齐
pub async fn delete_task<T: Transport>(
    transport: &T,
    ctx: &TaskContext,
    id: u32,
) -> Result<(), String> {
    mutate(transport, ctx, &DeleteTaskRequest { id }, "Failed to delete task").await
}

/// 标记任务完成（单向操作）
///
/// 与其他变更不同：成功后不重新拉取，只把本地对应行的
/// `is_finish` 置为 true。
pub async fn mark_task_complete<T: Transport>(
    transport: &T,
    ctx: &TaskContext,
    id: u32,
) -> Result<(), String> {
    ctx.set_state.update(|state| state.error = None);

    match send(transport, &MarkTaskCompleteRequest { id }).await {
        Ok(_) => {
            ctx.set_state.update(|state| state.mark_finished(id));
            Ok(())
        }
        Err(err) => {
            let message = error_message(&err, "Failed to mark task complete");
            ctx.set_state
                .update(|state| state.error = Some(message.clone()));
            Err(message)
        }
    }
}

/// 变更操作的共同骨架：POST，成功则以一次拉取对齐，失败则记录文案
async fn mutate<R, T>(
    transport: &T,
    ctx: &TaskContext,
    request: &R,
    fallback: &str,
) -> Result<(), String>
where
    R: taskflow_shared::protocol::ApiRequest,
    T: Transport,
{
    ctx.set_state.update(|state| state.error = None);

    match send(transport, request).await {
        Ok(_) => fetch_tasks(transport, ctx).await,
        Err(err) => {
            let message = error_message(&err, fallback);
            ctx.set_state
                .update(|state| state.error = Some(message.clone()));
            Err(message)
        }
    }
}

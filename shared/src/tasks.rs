use crate::config::{Config, TaskTransitions};
use crate::error::{CoreError, EntityKind};
use crate::policy;
use crate::principal::{Principal, Role};
use crate::store::Store;
use crate::types::{CreateTaskRequest, Task, TaskStatus, UpdateTaskStatusRequest};

/// Tasks visible to the caller.
pub fn list_tasks(store: &dyn Store, principal: &Principal) -> Vec<Task> {
    policy::visible_tasks(principal, store.list_tasks())
}

/// Create a task for a student. The caller is always recorded as the
/// assigner, whatever the request says.
pub fn create_task(
    store: &dyn Store,
    principal: &Principal,
    req: CreateTaskRequest,
) -> Result<Task, CoreError> {
    policy::require_staff(principal)?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    if req.due_date.trim().is_empty() {
        return Err(CoreError::Validation("Due date is required".to_string()));
    }

    let assignee = store
        .get_user(&req.assigned_to)
        .ok_or(CoreError::NotFound(EntityKind::User))?;
    if assignee.role != Role::Student {
        return Err(CoreError::Validation(
            "Tasks can only be assigned to students".to_string(),
        ));
    }
    if !policy::can_assign_to(principal, &assignee) {
        return Err(CoreError::Forbidden(
            "You can only assign tasks to your own students",
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let task = Task {
        task_id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: req.description.unwrap_or_default(),
        status: TaskStatus::Open,
        assigned_to: assignee.user_id,
        assigned_by: principal.id.clone(),
        due_date: req.due_date,
        category: req.category,
        created_at: now.clone(),
        updated_at: now,
    };
    store.insert_task(task.clone());

    tracing::info!(
        "Task created: {} (for: {}, by: {})",
        task.task_id,
        task.assigned_to,
        principal.id
    );
    Ok(task)
}

/// Move a task to a new status, checked against the configured transitions.
pub fn update_status(
    store: &dyn Store,
    principal: &Principal,
    config: &Config,
    task_id: &str,
    req: UpdateTaskStatusRequest,
) -> Result<Task, CoreError> {
    let mut task = store
        .get_task(task_id)
        .ok_or(CoreError::NotFound(EntityKind::Task))?;
    policy::can_update_task_status(principal, &task)?;
    validate_transition(config, task.status, req.status)?;

    let from = task.status;
    task.status = req.status;
    task.updated_at = chrono::Utc::now().to_rfc3339();
    store.update_task(task.clone())?;

    tracing::info!(
        "Task status changed: {} ({} -> {}, by: {})",
        task.task_id,
        from.as_str(),
        task.status.as_str(),
        principal.id
    );
    Ok(task)
}

fn validate_transition(config: &Config, from: TaskStatus, to: TaskStatus) -> Result<(), CoreError> {
    match config.task_transitions {
        TaskTransitions::Lenient => Ok(()),
        TaskTransitions::Strict => match (from, to) {
            (TaskStatus::Open, TaskStatus::InProgress)
            | (TaskStatus::InProgress, TaskStatus::Completed) => Ok(()),
            _ => Err(CoreError::InvalidState {
                from: from.as_str(),
                to: to.as_str(),
            }),
        },
    }
}

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::policy;
use crate::principal::{Principal, Role};
use crate::store::Store;
use crate::types::{CategoryBreakdown, PlatformSummary, StudentProgress, Task, TaskStatus, User};

/// Platform-wide totals for the admin dashboard.
pub fn platform_summary(
    store: &dyn Store,
    principal: &Principal,
) -> Result<PlatformSummary, CoreError> {
    policy::require_admin(principal)?;
    Ok(summarize(&store.list_users(), &store.list_tasks()))
}

/// Per-category completion, busiest categories first. Uncategorized tasks
/// are left out.
pub fn category_breakdown(
    store: &dyn Store,
    principal: &Principal,
) -> Result<Vec<CategoryBreakdown>, CoreError> {
    policy::require_admin(principal)?;
    Ok(breakdown(&store.list_tasks()))
}

/// Per-student completion over the records the caller may see.
pub fn student_progress(
    store: &dyn Store,
    principal: &Principal,
) -> Result<Vec<StudentProgress>, CoreError> {
    policy::require_staff(principal)?;
    let students: Vec<User> = policy::visible_users(principal, store.list_users())
        .into_iter()
        .filter(|user| user.role == Role::Student)
        .collect();
    let tasks = policy::visible_tasks(principal, store.list_tasks());
    Ok(progress(&students, &tasks))
}

fn summarize(users: &[User], tasks: &[Task]) -> PlatformSummary {
    let total_students = users.iter().filter(|u| u.role == Role::Student).count() as u32;
    let total_teachers = users.iter().filter(|u| u.role == Role::Teacher).count() as u32;
    let total_tasks = tasks.len() as u32;
    let completed_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count() as u32;
    let in_progress_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count() as u32;

    PlatformSummary {
        total_students,
        total_teachers,
        total_tasks,
        completed_tasks,
        in_progress_tasks,
        completion_rate: percent(completed_tasks, total_tasks),
    }
}

fn breakdown(tasks: &[Task]) -> Vec<CategoryBreakdown> {
    // BTreeMap keeps equal-volume categories in name order after the sort.
    let mut buckets: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for task in tasks {
        if let Some(category) = &task.category {
            let bucket = buckets.entry(category.as_str()).or_insert((0, 0));
            bucket.0 += 1;
            if task.status == TaskStatus::Completed {
                bucket.1 += 1;
            }
        }
    }

    let mut rows: Vec<CategoryBreakdown> = buckets
        .into_iter()
        .map(|(category, (total, completed))| CategoryBreakdown {
            category: category.to_string(),
            total,
            completed,
            completion_rate: percent(completed, total),
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

fn progress(students: &[User], tasks: &[Task]) -> Vec<StudentProgress> {
    let mut rows: Vec<StudentProgress> = students
        .iter()
        .map(|student| {
            let total_tasks = tasks
                .iter()
                .filter(|t| t.assigned_to == student.user_id)
                .count() as u32;
            let completed_tasks = tasks
                .iter()
                .filter(|t| {
                    t.assigned_to == student.user_id && t.status == TaskStatus::Completed
                })
                .count() as u32;
            StudentProgress {
                user_id: student.user_id.clone(),
                name: student.name.clone(),
                total_tasks,
                completed_tasks,
                completion_rate: percent(completed_tasks, total_tasks),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.completion_rate
            .cmp(&a.completion_rate)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (part * 100 + whole / 2) / whole
    }
}

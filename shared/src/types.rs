use serde::{Deserialize, Serialize};

use crate::principal::Role;

// ========== USER ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub assigned_to: Option<String>, // teacher id, students only
    pub avatar: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub assigned_to: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub assigned_to: Option<String>,
}

// ========== TASK ==========
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: String, // student id
    pub assigned_by: String, // creating teacher or admin
    pub due_date: String,
    pub category: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub due_date: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

// ========== POLL ==========
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Active,
    Closed,
}

impl PollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollStatus::Active => "active",
            PollStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    Students,
    StudentsAndStaff,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PollOption {
    pub option_id: String,
    pub text: String,
    pub votes: Vec<String>, // voter user ids, at most one option per user
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    pub poll_id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<PollOption>,
    pub created_by: String,
    pub created_by_role: Role,
    pub target_audience: Audience,
    pub status: PollStatus,
    pub created_at: String,
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub target_audience: Option<Audience>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct OptionTally {
    pub option_id: String,
    pub text: String,
    pub count: u32,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct PollTally {
    pub poll_id: String,
    pub status: PollStatus,
    pub total_votes: u32,
    pub options: Vec<OptionTally>,
}

// ========== SUPPORT TICKET ==========
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    File,
    Link,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupportTicket {
    pub ticket_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub submitted_by: String,
    pub attachments: Vec<Attachment>,
    pub admin_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Option<Priority>,
    pub attachments: Option<Vec<Attachment>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketRequest {
    pub status: Option<TicketStatus>,
    pub admin_notes: Option<String>,
}

// ========== REPORTS ==========
#[derive(Debug, Serialize)]
pub struct PlatformSummary {
    pub total_students: u32,
    pub total_teachers: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub in_progress_tasks: u32,
    pub completion_rate: u32, // rounded percent
}

#[derive(Debug, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: u32,
    pub completed: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct StudentProgress {
    pub user_id: String,
    pub name: String,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: u32,
}

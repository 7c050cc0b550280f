use serde::{Deserialize, Serialize};

/// Role of an authenticated caller.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller, resolved by the host before any call into the core.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub assigned_to: Option<String>, // teacher id, students only
}

impl Principal {
    pub fn admin(id: &str) -> Self {
        Self {
            id: id.to_string(),
            role: Role::Admin,
            assigned_to: None,
        }
    }

    pub fn teacher(id: &str) -> Self {
        Self {
            id: id.to_string(),
            role: Role::Teacher,
            assigned_to: None,
        }
    }

    pub fn student(id: &str, teacher_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            role: Role::Student,
            assigned_to: teacher_id.map(|t| t.to_string()),
        }
    }

    /// Principal acting as an existing user record.
    pub fn for_user(user: &crate::types::User) -> Self {
        Self {
            id: user.user_id.clone(),
            role: user.role,
            assigned_to: user.assigned_to.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    pub fn is_teacher(&self) -> bool {
        matches!(self.role, Role::Teacher)
    }

    pub fn is_student(&self) -> bool {
        matches!(self.role, Role::Student)
    }
}

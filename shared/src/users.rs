use crate::error::{CoreError, EntityKind};
use crate::policy;
use crate::principal::{Principal, Role};
use crate::store::Store;
use crate::types::{CreateUserRequest, UpdateUserRequest, User};

/// Users visible to the caller.
pub fn list_users(store: &dyn Store, principal: &Principal) -> Vec<User> {
    policy::visible_users(principal, store.list_users())
}

/// Admin-only registration. Emails are stored lowercased and must be unique.
pub fn create_user(
    store: &dyn Store,
    principal: &Principal,
    req: CreateUserRequest,
) -> Result<User, CoreError> {
    policy::require_admin(principal)?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name is required".to_string()));
    }
    let email = req.email.trim().to_lowercase();
    if !valid_email(&email) {
        return Err(CoreError::Validation("A valid email is required".to_string()));
    }
    if email_taken(store, &email, None) {
        return Err(CoreError::Validation("Email already in use".to_string()));
    }

    let assigned_to = match req.assigned_to {
        Some(teacher_id) => {
            if req.role != Role::Student {
                return Err(CoreError::Validation(
                    "Only students can have an assigned teacher".to_string(),
                ));
            }
            Some(resolve_teacher(store, &teacher_id)?)
        }
        None => None,
    };

    let user = User {
        user_id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        email,
        role: req.role,
        assigned_to,
        avatar: req.avatar,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    store.insert_user(user.clone());

    tracing::info!("User created: {} ({} {})", user.user_id, user.role, user.email);
    Ok(user)
}

/// Admin-only profile edit and student reassignment. Role never changes.
pub fn update_user(
    store: &dyn Store,
    principal: &Principal,
    user_id: &str,
    req: UpdateUserRequest,
) -> Result<User, CoreError> {
    policy::require_admin(principal)?;

    let mut user = store
        .get_user(user_id)
        .ok_or(CoreError::NotFound(EntityKind::User))?;

    if let Some(name) = req.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Validation("Name is required".to_string()));
        }
        user.name = name;
    }
    if let Some(email) = req.email {
        let email = email.trim().to_lowercase();
        if !valid_email(&email) {
            return Err(CoreError::Validation("A valid email is required".to_string()));
        }
        if email_taken(store, &email, Some(user_id)) {
            return Err(CoreError::Validation("Email already in use".to_string()));
        }
        user.email = email;
    }
    if let Some(teacher_id) = req.assigned_to {
        if user.role != Role::Student {
            return Err(CoreError::Validation(
                "Only students can have an assigned teacher".to_string(),
            ));
        }
        user.assigned_to = Some(resolve_teacher(store, &teacher_id)?);
    }

    store.update_user(user.clone())?;

    tracing::info!("User updated: {}", user.user_id);
    Ok(user)
}

/// Remove a user. No cascade; existing records keep their ids.
pub fn delete_user(store: &dyn Store, principal: &Principal, user_id: &str) -> Result<(), CoreError> {
    policy::require_admin(principal)?;
    store.delete_user(user_id)?;

    tracing::info!("User removed: {}", user_id);
    Ok(())
}

/// The caller's own teacher record, if any.
pub fn assigned_teacher(store: &dyn Store, principal: &Principal) -> Result<Option<User>, CoreError> {
    if !principal.is_student() {
        return Err(CoreError::Forbidden("Only students have an assigned teacher"));
    }
    Ok(principal
        .assigned_to
        .as_ref()
        .and_then(|teacher_id| store.get_user(teacher_id)))
}

fn resolve_teacher(store: &dyn Store, teacher_id: &str) -> Result<String, CoreError> {
    let teacher = store
        .get_user(teacher_id)
        .ok_or(CoreError::NotFound(EntityKind::User))?;
    if teacher.role != Role::Teacher {
        return Err(CoreError::Validation(
            "Students can only be assigned to a teacher".to_string(),
        ));
    }
    Ok(teacher.user_id)
}

fn email_taken(store: &dyn Store, email: &str, exclude_user: Option<&str>) -> bool {
    store.list_users().iter().any(|user| {
        user.email.eq_ignore_ascii_case(email) && Some(user.user_id.as_str()) != exclude_user
    })
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

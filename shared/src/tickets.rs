use crate::error::{CoreError, EntityKind};
use crate::policy;
use crate::principal::Principal;
use crate::store::Store;
use crate::types::{
    CreateTicketRequest, Priority, SupportTicket, TicketStatus, UpdateTicketRequest,
};

/// Tickets visible to the caller.
pub fn list_tickets(store: &dyn Store, principal: &Principal) -> Vec<SupportTicket> {
    policy::visible_tickets(principal, store.list_tickets())
}

/// Submit a ticket. Admins work the queue and cannot raise their own.
pub fn submit_ticket(
    store: &dyn Store,
    principal: &Principal,
    req: CreateTicketRequest,
) -> Result<SupportTicket, CoreError> {
    if principal.is_admin() {
        return Err(CoreError::Forbidden("Admins cannot submit support tickets"));
    }

    let title = req.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    let description = req.description.trim();
    if description.is_empty() {
        return Err(CoreError::Validation("Description is required".to_string()));
    }
    let category = req.category.trim();
    if category.is_empty() {
        return Err(CoreError::Validation("Category is required".to_string()));
    }

    let attachments = req.attachments.unwrap_or_default();
    for attachment in &attachments {
        if attachment.name.trim().is_empty() || attachment.url.trim().is_empty() {
            return Err(CoreError::Validation(
                "Attachments need a name and a url".to_string(),
            ));
        }
    }

    let now = chrono::Utc::now().to_rfc3339();
    let ticket = SupportTicket {
        ticket_id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        priority: req.priority.unwrap_or(Priority::Medium),
        status: TicketStatus::Open,
        submitted_by: principal.id.clone(),
        attachments,
        admin_notes: None,
        created_at: now.clone(),
        updated_at: now,
    };
    store.insert_ticket(ticket.clone());

    tracing::info!(
        "Ticket submitted: {} (by: {})",
        ticket.ticket_id,
        principal.id
    );
    Ok(ticket)
}

/// Admin-only status and notes update. Submitter and content never change.
pub fn update_ticket(
    store: &dyn Store,
    principal: &Principal,
    ticket_id: &str,
    req: UpdateTicketRequest,
) -> Result<SupportTicket, CoreError> {
    policy::require_admin(principal)?;

    let mut ticket = store
        .get_ticket(ticket_id)
        .ok_or(CoreError::NotFound(EntityKind::Ticket))?;
    if let Some(status) = req.status {
        ticket.status = status;
    }
    if let Some(notes) = req.admin_notes {
        ticket.admin_notes = Some(notes);
    }
    ticket.updated_at = chrono::Utc::now().to_rfc3339();
    store.update_ticket(ticket.clone())?;

    tracing::info!(
        "Ticket updated: {} (status: {}, by: {})",
        ticket.ticket_id,
        ticket.status.as_str(),
        principal.id
    );
    Ok(ticket)
}

pub mod seed;

use std::collections::HashMap;
use std::sync::RwLock;

use classtrack_shared::error::{CoreError, EntityKind};
use classtrack_shared::store::Store;
use classtrack_shared::types::{Poll, SupportTicket, Task, User};

/// In-memory reference implementation of the store boundary. One lock per
/// entity map; `update_poll_with` holds the poll write guard across the
/// caller's closure, so vote checks and appends cannot interleave.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    tasks: RwLock<HashMap<String, Task>>,
    polls: RwLock<HashMap<String, Poll>>,
    tickets: RwLock<HashMap<String, SupportTicket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn list_users(&self) -> Vec<User> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        all
    }

    fn get_user(&self, user_id: &str) -> Option<User> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(user_id).cloned()
    }

    fn insert_user(&self, user: User) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.user_id.clone(), user);
    }

    fn update_user(&self, user: User) -> Result<(), CoreError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.get_mut(&user.user_id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(CoreError::NotFound(EntityKind::User)),
        }
    }

    fn delete_user(&self, user_id: &str) -> Result<(), CoreError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.remove(user_id) {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound(EntityKind::User)),
        }
    }

    fn list_tasks(&self) -> Vec<Task> {
        let tasks = self.tasks.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });
        all
    }

    fn get_task(&self, task_id: &str) -> Option<Task> {
        let tasks = self.tasks.read().unwrap_or_else(|e| e.into_inner());
        tasks.get(task_id).cloned()
    }

    fn insert_task(&self, task: Task) {
        let mut tasks = self.tasks.write().unwrap_or_else(|e| e.into_inner());
        tasks.insert(task.task_id.clone(), task);
    }

    fn update_task(&self, task: Task) -> Result<(), CoreError> {
        let mut tasks = self.tasks.write().unwrap_or_else(|e| e.into_inner());
        match tasks.get_mut(&task.task_id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(CoreError::NotFound(EntityKind::Task)),
        }
    }

    fn list_polls(&self) -> Vec<Poll> {
        let polls = self.polls.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<Poll> = polls.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.poll_id.cmp(&b.poll_id))
        });
        all
    }

    fn get_poll(&self, poll_id: &str) -> Option<Poll> {
        let polls = self.polls.read().unwrap_or_else(|e| e.into_inner());
        polls.get(poll_id).cloned()
    }

    fn insert_poll(&self, poll: Poll) {
        let mut polls = self.polls.write().unwrap_or_else(|e| e.into_inner());
        polls.insert(poll.poll_id.clone(), poll);
    }

    fn update_poll_with(
        &self,
        poll_id: &str,
        f: &mut dyn FnMut(&mut Poll) -> Result<(), CoreError>,
    ) -> Result<Poll, CoreError> {
        let mut polls = self.polls.write().unwrap_or_else(|e| e.into_inner());
        match polls.get_mut(poll_id) {
            Some(poll) => {
                f(poll)?;
                Ok(poll.clone())
            }
            None => Err(CoreError::NotFound(EntityKind::Poll)),
        }
    }

    fn list_tickets(&self) -> Vec<SupportTicket> {
        let tickets = self.tickets.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<SupportTicket> = tickets.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.ticket_id.cmp(&b.ticket_id))
        });
        all
    }

    fn get_ticket(&self, ticket_id: &str) -> Option<SupportTicket> {
        let tickets = self.tickets.read().unwrap_or_else(|e| e.into_inner());
        tickets.get(ticket_id).cloned()
    }

    fn insert_ticket(&self, ticket: SupportTicket) {
        let mut tickets = self.tickets.write().unwrap_or_else(|e| e.into_inner());
        tickets.insert(ticket.ticket_id.clone(), ticket);
    }

    fn update_ticket(&self, ticket: SupportTicket) -> Result<(), CoreError> {
        let mut tickets = self.tickets.write().unwrap_or_else(|e| e.into_inner());
        match tickets.get_mut(&ticket.ticket_id) {
            Some(slot) => {
                *slot = ticket;
                Ok(())
            }
            None => Err(CoreError::NotFound(EntityKind::Ticket)),
        }
    }
}

use crate::error::CoreError;
use crate::types::{Poll, SupportTicket, Task, User};

/// Persistence boundary the core is written against. Listings come back in
/// creation order, `update_*`/`delete_*` fail with `NotFound` when the id is
/// unknown, and every method is synchronous.
pub trait Store: Send + Sync {
    fn list_users(&self) -> Vec<User>;
    fn get_user(&self, user_id: &str) -> Option<User>;
    fn insert_user(&self, user: User);
    fn update_user(&self, user: User) -> Result<(), CoreError>;
    fn delete_user(&self, user_id: &str) -> Result<(), CoreError>;

    fn list_tasks(&self) -> Vec<Task>;
    fn get_task(&self, task_id: &str) -> Option<Task>;
    fn insert_task(&self, task: Task);
    fn update_task(&self, task: Task) -> Result<(), CoreError>;

    fn list_polls(&self) -> Vec<Poll>;
    fn get_poll(&self, poll_id: &str) -> Option<Poll>;
    fn insert_poll(&self, poll: Poll);

    /// Runs `f` on the stored poll under the store's write guard and returns
    /// the updated copy. No other mutation of that poll may interleave with
    /// `f`. On `Err` the closure must leave the poll unchanged.
    fn update_poll_with(
        &self,
        poll_id: &str,
        f: &mut dyn FnMut(&mut Poll) -> Result<(), CoreError>,
    ) -> Result<Poll, CoreError>;

    fn list_tickets(&self) -> Vec<SupportTicket>;
    fn get_ticket(&self, ticket_id: &str) -> Option<SupportTicket>;
    fn insert_ticket(&self, ticket: SupportTicket);
    fn update_ticket(&self, ticket: SupportTicket) -> Result<(), CoreError>;
}

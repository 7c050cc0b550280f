use crate::config::{Config, StudentPollScope};
use crate::error::CoreError;
use crate::principal::{Principal, Role};
use crate::types::{Audience, Poll, SupportTicket, Task, User};

/// Admin-only gate.
pub fn require_admin(principal: &Principal) -> Result<(), CoreError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin access required"))
    }
}

/// Teacher-or-admin gate.
pub fn require_staff(principal: &Principal) -> Result<(), CoreError> {
    match principal.role {
        Role::Admin | Role::Teacher => Ok(()),
        Role::Student => Err(CoreError::Forbidden("Teacher or admin access required")),
    }
}

pub fn can_view_task(principal: &Principal, task: &Task) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Teacher => task.assigned_by == principal.id,
        Role::Student => task.assigned_to == principal.id,
    }
}

/// Tasks the caller may see, input order preserved.
pub fn visible_tasks(principal: &Principal, tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| can_view_task(principal, task))
        .collect()
}

/// Staff may update any task; a student only their own.
pub fn can_update_task_status(principal: &Principal, task: &Task) -> Result<(), CoreError> {
    match principal.role {
        Role::Admin | Role::Teacher => Ok(()),
        Role::Student => {
            if task.assigned_to == principal.id {
                Ok(())
            } else {
                Err(CoreError::Forbidden("Not authorized to update this task"))
            }
        }
    }
}

pub fn can_view_poll(principal: &Principal, poll: &Poll, config: &Config) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Teacher => {
            poll.created_by == principal.id
                || (poll.created_by_role == Role::Admin
                    && poll.target_audience == Audience::StudentsAndStaff)
        }
        // Both audience values include students; only the creator scope varies.
        Role::Student => match config.student_poll_scope {
            StudentPollScope::AllStudents => true,
            StudentPollScope::OwnTeacher => {
                poll.created_by_role == Role::Admin
                    || principal.assigned_to.as_deref() == Some(poll.created_by.as_str())
            }
        },
    }
}

/// Polls the caller may see, input order preserved.
pub fn visible_polls(principal: &Principal, polls: Vec<Poll>, config: &Config) -> Vec<Poll> {
    polls
        .into_iter()
        .filter(|poll| can_view_poll(principal, poll, config))
        .collect()
}

/// Admins see everyone, teachers themselves plus their students, students
/// only themselves.
pub fn visible_users(principal: &Principal, users: Vec<User>) -> Vec<User> {
    match principal.role {
        Role::Admin => users,
        Role::Teacher => users
            .into_iter()
            .filter(|user| {
                user.user_id == principal.id
                    || user.assigned_to.as_deref() == Some(principal.id.as_str())
            })
            .collect(),
        Role::Student => users
            .into_iter()
            .filter(|user| user.user_id == principal.id)
            .collect(),
    }
}

pub fn visible_tickets(principal: &Principal, tickets: Vec<SupportTicket>) -> Vec<SupportTicket> {
    match principal.role {
        Role::Admin => tickets,
        Role::Teacher | Role::Student => tickets
            .into_iter()
            .filter(|ticket| ticket.submitted_by == principal.id)
            .collect(),
    }
}

/// Whether the caller may assign a task to this student.
pub fn can_assign_to(principal: &Principal, student: &User) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Teacher => student.assigned_to.as_deref() == Some(principal.id.as_str()),
        Role::Student => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PollOption, PollStatus, Priority, TaskStatus, TicketStatus};

    fn user(id: &str, role: Role, assigned_to: Option<&str>) -> User {
        User {
            user_id: id.to_string(),
            name: format!("user {}", id),
            email: format!("{}@school.test", id),
            role,
            assigned_to: assigned_to.map(|t| t.to_string()),
            avatar: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn task(id: &str, assigned_to: &str, assigned_by: &str) -> Task {
        Task {
            task_id: id.to_string(),
            title: format!("task {}", id),
            description: String::new(),
            status: TaskStatus::Open,
            assigned_to: assigned_to.to_string(),
            assigned_by: assigned_by.to_string(),
            due_date: "2026-06-01".to_string(),
            category: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            updated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn poll(id: &str, created_by: &str, created_by_role: Role, audience: Audience) -> Poll {
        Poll {
            poll_id: id.to_string(),
            title: format!("poll {}", id),
            description: "pick one".to_string(),
            options: vec![
                PollOption {
                    option_id: "o1".to_string(),
                    text: "yes".to_string(),
                    votes: vec![],
                },
                PollOption {
                    option_id: "o2".to_string(),
                    text: "no".to_string(),
                    votes: vec![],
                },
            ],
            created_by: created_by.to_string(),
            created_by_role,
            target_audience: audience,
            status: PollStatus::Active,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            expires_at: None,
        }
    }

    fn ticket(id: &str, submitted_by: &str) -> SupportTicket {
        SupportTicket {
            ticket_id: id.to_string(),
            title: format!("ticket {}", id),
            description: "something broke".to_string(),
            category: "technical".to_string(),
            priority: Priority::Medium,
            status: TicketStatus::Open,
            submitted_by: submitted_by.to_string(),
            attachments: vec![],
            admin_notes: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            updated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.task_id.as_str()).collect()
    }

    #[test]
    fn task_visibility_per_role() {
        let tasks = vec![
            task("t1", "s1", "teach1"),
            task("t2", "s2", "teach1"),
            task("t3", "s1", "teach2"),
        ];

        let admin = Principal::admin("a1");
        assert_eq!(ids(&visible_tasks(&admin, tasks.clone())), ["t1", "t2", "t3"]);

        let teacher = Principal::teacher("teach1");
        assert_eq!(ids(&visible_tasks(&teacher, tasks.clone())), ["t1", "t2"]);

        let student = Principal::student("s1", Some("teach1"));
        assert_eq!(ids(&visible_tasks(&student, tasks)), ["t1", "t3"]);
    }

    #[test]
    fn filters_preserve_input_order() {
        let tasks = vec![
            task("t9", "s1", "teach1"),
            task("t2", "s1", "teach2"),
            task("t5", "s1", "teach1"),
        ];
        let student = Principal::student("s1", Some("teach1"));
        assert_eq!(ids(&visible_tasks(&student, tasks)), ["t9", "t2", "t5"]);
    }

    #[test]
    fn student_may_update_only_own_task() {
        let t = task("t1", "s1", "teach1");

        assert!(can_update_task_status(&Principal::student("s1", None), &t).is_ok());
        assert_eq!(
            can_update_task_status(&Principal::student("s2", None), &t),
            Err(CoreError::Forbidden("Not authorized to update this task"))
        );
        assert!(can_update_task_status(&Principal::teacher("teach2"), &t).is_ok());
        assert!(can_update_task_status(&Principal::admin("a1"), &t).is_ok());
    }

    #[test]
    fn teacher_sees_own_polls_and_admin_staff_polls() {
        let config = Config::default();
        let polls = vec![
            poll("p1", "teach1", Role::Teacher, Audience::Students),
            poll("p2", "teach2", Role::Teacher, Audience::Students),
            poll("p3", "a1", Role::Admin, Audience::StudentsAndStaff),
            poll("p4", "a1", Role::Admin, Audience::Students),
        ];

        let teacher = Principal::teacher("teach1");
        let seen: Vec<String> = visible_polls(&teacher, polls, &config)
            .into_iter()
            .map(|p| p.poll_id)
            .collect();
        assert_eq!(seen, ["p1", "p3"]);
    }

    #[test]
    fn student_poll_scope_strict_and_open() {
        let polls = vec![
            poll("p1", "teach1", Role::Teacher, Audience::Students),
            poll("p2", "teach2", Role::Teacher, Audience::Students),
            poll("p3", "a1", Role::Admin, Audience::Students),
        ];
        let student = Principal::student("s1", Some("teach1"));

        let strict = Config::default();
        let seen: Vec<String> = visible_polls(&student, polls.clone(), &strict)
            .into_iter()
            .map(|p| p.poll_id)
            .collect();
        assert_eq!(seen, ["p1", "p3"]);

        let open = Config {
            student_poll_scope: StudentPollScope::AllStudents,
            ..Config::default()
        };
        let seen: Vec<String> = visible_polls(&student, polls, &open)
            .into_iter()
            .map(|p| p.poll_id)
            .collect();
        assert_eq!(seen, ["p1", "p2", "p3"]);
    }

    #[test]
    fn unassigned_student_still_sees_admin_polls() {
        let config = Config::default();
        let student = Principal::student("s9", None);
        let admin_poll = poll("p1", "a1", Role::Admin, Audience::Students);
        let teacher_poll = poll("p2", "teach1", Role::Teacher, Audience::Students);

        assert!(can_view_poll(&student, &admin_poll, &config));
        assert!(!can_view_poll(&student, &teacher_poll, &config));
    }

    #[test]
    fn user_visibility_per_role() {
        let users = vec![
            user("a1", Role::Admin, None),
            user("teach1", Role::Teacher, None),
            user("s1", Role::Student, Some("teach1")),
            user("s2", Role::Student, Some("teach2")),
        ];

        let admin = Principal::admin("a1");
        assert_eq!(visible_users(&admin, users.clone()).len(), 4);

        let teacher = Principal::teacher("teach1");
        let seen: Vec<String> = visible_users(&teacher, users.clone())
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(seen, ["teach1", "s1"]);

        let student = Principal::student("s2", Some("teach2"));
        let seen: Vec<String> = visible_users(&student, users)
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(seen, ["s2"]);
    }

    #[test]
    fn ticket_visibility_per_role() {
        let tickets = vec![ticket("k1", "s1"), ticket("k2", "teach1"), ticket("k3", "s2")];

        assert_eq!(visible_tickets(&Principal::admin("a1"), tickets.clone()).len(), 3);

        let own: Vec<String> = visible_tickets(&Principal::student("s1", None), tickets.clone())
            .into_iter()
            .map(|t| t.ticket_id)
            .collect();
        assert_eq!(own, ["k1"]);

        let own: Vec<String> = visible_tickets(&Principal::teacher("teach1"), tickets)
            .into_iter()
            .map(|t| t.ticket_id)
            .collect();
        assert_eq!(own, ["k2"]);
    }

    #[test]
    fn assignment_eligibility() {
        let mine = user("s1", Role::Student, Some("teach1"));
        let other = user("s2", Role::Student, Some("teach2"));

        assert!(can_assign_to(&Principal::admin("a1"), &mine));
        assert!(can_assign_to(&Principal::admin("a1"), &other));
        assert!(can_assign_to(&Principal::teacher("teach1"), &mine));
        assert!(!can_assign_to(&Principal::teacher("teach1"), &other));
        assert!(!can_assign_to(&Principal::student("s1", Some("teach1")), &mine));
    }

    #[test]
    fn gates_reject_below_required_role() {
        assert!(require_admin(&Principal::admin("a1")).is_ok());
        assert_eq!(
            require_admin(&Principal::teacher("teach1")),
            Err(CoreError::Forbidden("Admin access required"))
        );

        assert!(require_staff(&Principal::teacher("teach1")).is_ok());
        assert_eq!(
            require_staff(&Principal::student("s1", None)),
            Err(CoreError::Forbidden("Teacher or admin access required"))
        );
    }
}

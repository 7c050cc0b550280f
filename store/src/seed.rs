//! Canonical demo roster and fixtures, built through the public flows.

use classtrack_shared::config::Config;
use classtrack_shared::error::CoreError;
use classtrack_shared::principal::{Principal, Role};
use classtrack_shared::store::Store;
use classtrack_shared::types::{
    Attachment, AttachmentKind, Audience, CreatePollRequest, CreateTaskRequest,
    CreateTicketRequest, CreateUserRequest, Poll, Priority, SupportTicket, Task, TaskStatus,
    TicketStatus, UpdateTaskStatusRequest, UpdateTicketRequest, User, VoteRequest,
};
use classtrack_shared::{polls, tasks, tickets, users};

/// Everything `seed` put in the store, in creation order.
pub struct SeedData {
    pub admin: User,
    pub teachers: Vec<User>,
    pub students: Vec<User>,
    pub tasks: Vec<Task>,
    pub polls: Vec<Poll>,
    pub tickets: Vec<SupportTicket>,
}

/// Populate an empty store with the demo roster: one admin, three teachers,
/// eight students split 3/2/3 across them, plus tasks, polls and tickets in
/// assorted states.
pub fn seed(store: &dyn Store) -> Result<SeedData, CoreError> {
    let config = Config::default();

    // The first admin cannot go through the admin-only flow.
    let admin = User {
        user_id: uuid::Uuid::new_v4().to_string(),
        name: "Priya Nair".to_string(),
        email: "priya.nair@brookdale.edu".to_string(),
        role: Role::Admin,
        assigned_to: None,
        avatar: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    store.insert_user(admin.clone());
    let as_admin = Principal::for_user(&admin);

    let mut teachers = Vec::new();
    for (name, email) in [
        ("Marcus Webb", "marcus.webb@brookdale.edu"),
        ("Elena Sosa", "elena.sosa@brookdale.edu"),
        ("Tomas Lindgren", "tomas.lindgren@brookdale.edu"),
    ] {
        teachers.push(users::create_user(
            store,
            &as_admin,
            CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                role: Role::Teacher,
                assigned_to: None,
                avatar: None,
            },
        )?);
    }

    let roster = [
        ("Ava Chen", "ava.chen@brookdale.edu", 0),
        ("Liam Ortiz", "liam.ortiz@brookdale.edu", 0),
        ("Noah Fields", "noah.fields@brookdale.edu", 0),
        ("Maya Singh", "maya.singh@brookdale.edu", 1),
        ("Omar Haddad", "omar.haddad@brookdale.edu", 1),
        ("Lucy Tran", "lucy.tran@brookdale.edu", 2),
        ("Jonas Berg", "jonas.berg@brookdale.edu", 2),
        ("Rin Tanaka", "rin.tanaka@brookdale.edu", 2),
    ];
    let mut students = Vec::new();
    for (name, email, teacher) in roster {
        students.push(users::create_user(
            store,
            &as_admin,
            CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                role: Role::Student,
                assigned_to: Some(teachers[teacher].user_id.clone()),
                avatar: None,
            },
        )?);
    }

    let marcus = Principal::for_user(&teachers[0]);
    let elena = Principal::for_user(&teachers[1]);
    let tomas = Principal::for_user(&teachers[2]);
    let ava = Principal::for_user(&students[0]);
    let liam = Principal::for_user(&students[1]);
    let maya = Principal::for_user(&students[3]);

    let mut tasks = Vec::new();
    tasks.push(tasks::create_task(
        store,
        &marcus,
        CreateTaskRequest {
            title: "Chapter 4 problem set".to_string(),
            description: Some("Problems 1 through 12, show your working".to_string()),
            assigned_to: students[0].user_id.clone(),
            due_date: "2026-09-12".to_string(),
            category: Some("assignment".to_string()),
        },
    )?);
    tasks.push(tasks::create_task(
        store,
        &marcus,
        CreateTaskRequest {
            title: "Lab write-up: pendulum period".to_string(),
            description: None,
            assigned_to: students[1].user_id.clone(),
            due_date: "2026-09-19".to_string(),
            category: Some("project".to_string()),
        },
    )?);
    tasks.push(tasks::create_task(
        store,
        &elena,
        CreateTaskRequest {
            title: "Reading response: chapter 7".to_string(),
            description: Some("One page, focus on the narrator".to_string()),
            assigned_to: students[3].user_id.clone(),
            due_date: "2026-09-15".to_string(),
            category: Some("reading".to_string()),
        },
    )?);
    tasks.push(tasks::create_task(
        store,
        &as_admin,
        CreateTaskRequest {
            title: "Library induction".to_string(),
            description: None,
            assigned_to: students[5].user_id.clone(),
            due_date: "2026-09-05".to_string(),
            category: None,
        },
    )?);
    tasks.push(tasks::create_task(
        store,
        &tomas,
        CreateTaskRequest {
            title: "Presentation outline".to_string(),
            description: Some("Five slides maximum".to_string()),
            assigned_to: students[7].user_id.clone(),
            due_date: "2026-09-22".to_string(),
            category: Some("project".to_string()),
        },
    )?);

    // Walk two tasks along their lifecycle as the assigned students.
    tasks::update_status(
        store,
        &ava,
        &config,
        &tasks[0].task_id,
        UpdateTaskStatusRequest {
            status: TaskStatus::InProgress,
        },
    )?;
    tasks[0] = tasks::update_status(
        store,
        &ava,
        &config,
        &tasks[0].task_id,
        UpdateTaskStatusRequest {
            status: TaskStatus::Completed,
        },
    )?;
    tasks[1] = tasks::update_status(
        store,
        &liam,
        &config,
        &tasks[1].task_id,
        UpdateTaskStatusRequest {
            status: TaskStatus::InProgress,
        },
    )?;

    let mut polls = Vec::new();
    let trip = polls::create_poll(
        store,
        &as_admin,
        CreatePollRequest {
            title: "Spring field trip destination".to_string(),
            description: "Vote for where the spring trip should go".to_string(),
            options: vec![
                "Science museum".to_string(),
                "Botanical gardens".to_string(),
                "History center".to_string(),
            ],
            target_audience: Some(Audience::StudentsAndStaff),
            expires_at: None,
        },
    )?;
    polls::vote(
        store,
        &ava,
        &trip.poll_id,
        VoteRequest {
            option_id: trip.options[0].option_id.clone(),
        },
    )?;
    polls::vote(
        store,
        &maya,
        &trip.poll_id,
        VoteRequest {
            option_id: trip.options[1].option_id.clone(),
        },
    )?;
    let trip = polls::vote(
        store,
        &marcus,
        &trip.poll_id,
        VoteRequest {
            option_id: trip.options[0].option_id.clone(),
        },
    )?;
    polls.push(trip);

    let book = polls::create_poll(
        store,
        &marcus,
        CreatePollRequest {
            title: "Next book club pick".to_string(),
            description: "Choose our October read".to_string(),
            options: vec!["The Martian".to_string(), "Frankenstein".to_string()],
            target_audience: None,
            expires_at: Some("2026-10-01T00:00:00+00:00".to_string()),
        },
    )?;
    let book = polls::vote(
        store,
        &liam,
        &book.poll_id,
        VoteRequest {
            option_id: book.options[1].option_id.clone(),
        },
    )?;
    polls.push(book);

    let mut tickets = Vec::new();
    let reading_link = tickets::submit_ticket(
        store,
        &maya,
        CreateTicketRequest {
            title: "Cannot open the chapter 2 reading".to_string(),
            description: "The download link times out on the library computers".to_string(),
            category: "technical".to_string(),
            priority: Some(Priority::High),
            attachments: Some(vec![Attachment {
                name: "error screenshot".to_string(),
                kind: AttachmentKind::File,
                url: "https://files.brookdale.edu/screens/err-2204.png".to_string(),
                mime_type: Some("image/png".to_string()),
            }]),
        },
    )?;
    let reading_link = tickets::update_ticket(
        store,
        &as_admin,
        &reading_link.ticket_id,
        UpdateTicketRequest {
            status: Some(TicketStatus::InProgress),
            admin_notes: Some("Asked IT to check the proxy rules".to_string()),
        },
    )?;
    tickets.push(reading_link);

    tickets.push(tickets::submit_ticket(
        store,
        &elena,
        CreateTicketRequest {
            title: "Roster shows a student twice".to_string(),
            description: "Omar Haddad appears twice in my class list".to_string(),
            category: "account".to_string(),
            priority: None,
            attachments: None,
        },
    )?);

    tracing::info!(
        "Seed complete: {} users, {} tasks, {} polls, {} tickets",
        1 + teachers.len() + students.len(),
        tasks.len(),
        polls.len(),
        tickets.len()
    );

    Ok(SeedData {
        admin,
        teachers,
        students,
        tasks,
        polls,
        tickets,
    })
}

//! Built-in records used to seed an empty workspace.

use crate::model::employee::{avatar_url, Employee};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use chrono::NaiveDate;

/// Login identity used when the caller supplies none.
pub const DEMO_LOGIN: &str = "demo@worksync.ai";

/// Default team seeded by `WorkspaceService::initialize`.
pub fn default_employees() -> Vec<Employee> {
    vec![
        seed_employee(
            1,
            "Sarah Chen",
            "sarah",
            &["React", "TypeScript", "Node.js", "UI/UX"],
            (65, 92),
            "Engineering",
        ),
        seed_employee(
            2,
            "Marcus Thorne",
            "marcus",
            &["Python", "Data Science", "SQL", "AWS"],
            (40, 88),
            "Data",
        ),
        seed_employee(
            3,
            "Elena Rodriguez",
            "elena",
            &["Marketing", "SEO", "Content Strategy"],
            (85, 95),
            "Marketing",
        ),
    ]
}

/// Default board seeded by `WorkspaceService::initialize`.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "task-1".to_string(),
            title: "Migrate Dashboard to Tailwind v4".to_string(),
            description: "Update all legacy components to the latest Tailwind specification."
                .to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assigned_to_id: "emp-1".to_string(),
            due_date: seed_date(2024, 6, 15),
            skills_required: strings(&["React", "Tailwind"]),
        },
        Task {
            id: "task-2".to_string(),
            title: "Q2 Content Audit".to_string(),
            description: "Analyze all blog posts from the last quarter for SEO performance."
                .to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assigned_to_id: "emp-3".to_string(),
            due_date: seed_date(2024, 6, 20),
            skills_required: strings(&["SEO", "Marketing"]),
        },
    ]
}

fn seed_employee(
    index: u32,
    name: &str,
    handle: &str,
    skills: &[&str],
    (workload, performance): (u8, u8),
    department: &str,
) -> Employee {
    Employee {
        id: format!("emp-{index}"),
        user_id: format!("user-{index}"),
        name: name.to_string(),
        email: format!("{handle}@worksync.ai"),
        skills: strings(skills),
        workload,
        performance,
        department: department.to_string(),
        avatar: avatar_url(handle),
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

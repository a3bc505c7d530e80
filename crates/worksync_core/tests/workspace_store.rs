use chrono::{NaiveDate, TimeZone, Utc};
use worksync_core::db::open_db;
use worksync_core::service::seed::{default_employees, default_tasks};
use worksync_core::{
    AiReport, Collection, Employee, MemorySlotStore, ModelValidationError, RepoError, SlotStore,
    SqliteSlotStore, Strategy, Task, TaskPriority, TaskStatus, UserRole, WorkspaceError,
    WorkspaceService,
};

fn employee(id: &str, skills: &[&str]) -> Employee {
    Employee {
        id: id.to_string(),
        user_id: format!("user-{id}"),
        name: format!("Name {id}"),
        email: format!("{id}@worksync.ai"),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        workload: 20,
        performance: 80,
        department: "Ops".to_string(),
        avatar: format!("https://picsum.photos/seed/{id}/100/100"),
    }
}

fn task(id: &str, assignee: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: "details".to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        assigned_to_id: assignee.to_string(),
        due_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        skills_required: vec!["SQL".to_string()],
    }
}

fn report(id: &str) -> AiReport {
    AiReport {
        id: id.to_string(),
        generated_at: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        summary: format!("summary {id}"),
        key_insights: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        recommendations: vec!["x".to_string(), "y".to_string(), "z".to_string()],
    }
}

fn strategy(id: &str) -> Strategy {
    Strategy {
        id: id.to_string(),
        title: format!("Strategy {id}"),
        content: "## Plan".to_string(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap(),
    }
}

#[test]
fn initialize_seeds_absent_collections_once() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);

    workspace.initialize().unwrap();
    let employees_once = workspace.employees().unwrap();
    let tasks_once = workspace.tasks().unwrap();
    assert_eq!(employees_once, default_employees());
    assert_eq!(tasks_once, default_tasks());

    workspace.initialize().unwrap();
    assert_eq!(workspace.employees().unwrap(), employees_once);
    assert_eq!(workspace.tasks().unwrap(), tasks_once);
    assert!(workspace.reports().unwrap().is_empty());
    assert!(workspace.strategies().unwrap().is_empty());
}

#[test]
fn initialize_never_overwrites_existing_slots() {
    let store = MemorySlotStore::new();
    store.write_slot("ws_tasks", "[]").unwrap();
    let workspace = WorkspaceService::new(&store);
    workspace.add_employee(employee("emp-x", &["Rust"])).unwrap();

    workspace.initialize().unwrap();

    let employees = workspace.employees().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, "emp-x");
    assert!(workspace.tasks().unwrap().is_empty());
}

#[test]
fn added_records_round_trip_exactly_once() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);
    workspace.initialize().unwrap();

    let new_employee = employee("emp-9", &["Go", "SQL"]);
    let persisted = workspace.add_employee(new_employee.clone()).unwrap();
    assert_eq!(persisted, new_employee);

    let employees = workspace.employees().unwrap();
    assert_eq!(employees.iter().filter(|e| e.id == "emp-9").count(), 1);
    assert_eq!(employees.last(), Some(&new_employee));

    let new_task = task("task-9", "emp-9");
    workspace.add_task(new_task.clone()).unwrap();
    let tasks = workspace.tasks().unwrap();
    assert_eq!(tasks.iter().filter(|t| **t == new_task).count(), 1);
    assert_eq!(tasks.last(), Some(&new_task));

    let new_strategy = strategy("strat-1");
    assert_eq!(workspace.add_strategy(new_strategy.clone()).unwrap(), new_strategy);
    assert_eq!(workspace.strategies().unwrap(), vec![new_strategy]);
}

#[test]
fn reports_and_strategies_are_newest_first() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);

    workspace.add_report(report("rep-1")).unwrap();
    workspace.add_report(report("rep-2")).unwrap();
    let ids: Vec<String> = workspace
        .reports()
        .unwrap()
        .into_iter()
        .map(|report| report.id)
        .collect();
    assert_eq!(ids, vec!["rep-2", "rep-1"]);

    workspace.add_strategy(strategy("strat-a")).unwrap();
    workspace.add_strategy(strategy("strat-b")).unwrap();
    let ids: Vec<String> = workspace
        .strategies()
        .unwrap()
        .into_iter()
        .map(|strategy| strategy.id)
        .collect();
    assert_eq!(ids, vec!["strat-b", "strat-a"]);
}

#[test]
fn duplicate_ids_are_rejected_without_writing() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);
    workspace.add_task(task("task-1", "emp-1")).unwrap();
    let before = store.raw("ws_tasks");

    let err = workspace.add_task(task("task-1", "emp-2")).unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::DuplicateId { collection: Collection::Tasks, ref id } if id == "task-1"
    ));
    assert_eq!(store.raw("ws_tasks"), before);
}

#[test]
fn task_assignee_is_not_checked_by_the_store() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);

    let dangling = task("task-7", "emp-missing");
    assert_eq!(workspace.add_task(dangling.clone()).unwrap(), dangling);
}

#[test]
fn out_of_range_percentages_are_rejected_on_write_and_read() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);

    let mut overloaded = employee("emp-1", &[]);
    overloaded.workload = 140;
    let err = workspace.add_employee(overloaded.clone()).unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::Repo(RepoError::Validation(ModelValidationError::PercentOutOfRange {
            field: "workload",
            value: 140
        }))
    ));
    assert_eq!(store.raw("ws_employees"), None);

    let text = serde_json::to_string(&vec![overloaded]).unwrap();
    store.write_slot("ws_employees", &text).unwrap();
    let err = workspace.employees().unwrap_err();
    assert!(
        matches!(err, WorkspaceError::Repo(RepoError::InvalidData { key: "ws_employees", .. })),
        "unexpected error: {err}"
    );
}

#[test]
fn malformed_encoding_propagates_to_caller() {
    let store = MemorySlotStore::new();
    store.write_slot("ws_reports", "[{\"id\":").unwrap();
    let workspace = WorkspaceService::new(&store);

    assert!(workspace.reports().is_err());
    assert!(workspace.add_report(report("rep-1")).is_err());
    assert_eq!(store.raw("ws_reports").as_deref(), Some("[{\"id\":"));
}

#[test]
fn login_session_and_logout() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);
    assert_eq!(workspace.session().unwrap(), None);

    let user = workspace.login("demo@worksync.ai").unwrap();
    assert_eq!(user.email, "demo@worksync.ai");
    assert_eq!(user.name, "demo");
    assert_eq!(user.role, UserRole::Admin);

    let session = workspace.session().unwrap().unwrap();
    assert_eq!(session, user);

    workspace.logout().unwrap();
    assert_eq!(workspace.session().unwrap(), None);
    assert_eq!(store.raw("ws_session"), None);
}

#[test]
fn persisted_layout_uses_camel_case_wire_names() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);
    workspace.initialize().unwrap();
    workspace.login("ops@worksync.ai").unwrap();

    let tasks: serde_json::Value =
        serde_json::from_str(&store.raw("ws_tasks").unwrap()).unwrap();
    assert_eq!(tasks[0]["assignedToId"], "emp-1");
    assert_eq!(tasks[0]["status"], "IN_PROGRESS");
    assert_eq!(tasks[0]["priority"], "HIGH");
    assert_eq!(tasks[0]["dueDate"], "2024-06-15");
    assert_eq!(tasks[1]["skillsRequired"][0], "SEO");

    let session: serde_json::Value =
        serde_json::from_str(&store.raw("ws_session").unwrap()).unwrap();
    assert_eq!(session["companyId"], "company-1");
    assert_eq!(session["role"], "ADMIN");
}

#[test]
fn replace_task_updates_in_place() {
    let store = MemorySlotStore::new();
    let workspace = WorkspaceService::new(&store);
    workspace.initialize().unwrap();

    let mut moved = workspace.tasks().unwrap()[1].clone();
    moved.status = TaskStatus::Review;
    let persisted = workspace.replace_task(moved.clone()).unwrap();
    assert_eq!(persisted, moved);

    let tasks = workspace.tasks().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1], moved);

    let err = workspace
        .replace_task(task("task-404", "emp-1"))
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::NotFound { collection: Collection::Tasks, .. }));
}

#[test]
fn sqlite_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.db");

    {
        let conn = open_db(&path).unwrap();
        let workspace = WorkspaceService::new(SqliteSlotStore::new(&conn));
        workspace.initialize().unwrap();
        workspace.add_report(report("rep-1")).unwrap();
        workspace.login("sarah@worksync.ai").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let workspace = WorkspaceService::new(SqliteSlotStore::new(&conn));
    workspace.initialize().unwrap();
    assert_eq!(workspace.employees().unwrap().len(), 3);
    assert_eq!(workspace.reports().unwrap(), vec![report("rep-1")]);
    assert_eq!(workspace.session().unwrap().unwrap().name, "sarah");
}

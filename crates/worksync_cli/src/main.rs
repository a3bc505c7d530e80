//! `worksync` command-line entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and the AI gateway together.
//! - Render workspace records as plain text for terminal use.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, EmployeeCommand, ReportCommand, StrategyCommand, TaskCommand};
use log::info;
use std::process::ExitCode;
use worksync_core::db::open_db;
use worksync_core::service::employee_service::parse_skills;
use worksync_core::service::seed::DEMO_LOGIN;
use worksync_core::{
    init_logging, AiReport, EmployeeService, GeminiClient, InsightService, ModelGateway,
    NewEmployee, NewTask, SqliteSlotStore, TaskService, WorkspaceConfig, WorkspaceService,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = WorkspaceConfig::from_env().context("failed to read configuration")?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if init_logging(&config).context("failed to initialize logging")? {
        info!("event=cli_start module=cli status=ok level={}", config.log_level);
    }

    let conn = open_db(&config.db_path)?;
    let workspace = WorkspaceService::new(SqliteSlotStore::new(&conn));
    workspace.initialize()?;

    match cli.command {
        Command::Login { email } => {
            let user = workspace.login(email.as_deref().unwrap_or(DEMO_LOGIN))?;
            println!("signed in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            workspace.logout()?;
            println!("signed out");
        }
        Command::Whoami => match workspace.session()? {
            Some(user) => println!("{} <{}> role={}", user.name, user.email, user.role),
            None => println!("not signed in"),
        },
        Command::Employees(command) => run_employees(&workspace, command)?,
        Command::Tasks(command) => run_tasks(&workspace, &config, command)?,
        Command::Reports(command) => run_reports(&workspace, &config, command)?,
        Command::Strategies(command) => run_strategies(&workspace, &config, command)?,
    }
    Ok(())
}

type Workspace<'conn> = WorkspaceService<SqliteSlotStore<'conn>>;

fn gateway(config: &WorkspaceConfig) -> Result<ModelGateway<GeminiClient>> {
    let client = GeminiClient::new(config.gemini()?)?;
    Ok(ModelGateway::new(client))
}

fn run_employees(workspace: &Workspace<'_>, command: EmployeeCommand) -> Result<()> {
    let employees = EmployeeService::new(workspace);
    match command {
        EmployeeCommand::List => {
            for employee in employees.list()? {
                println!(
                    "{:<24} {:<20} {:<12} load={:>3}% perf={:>3}% skills={}",
                    employee.id,
                    employee.name,
                    employee.department,
                    employee.workload,
                    employee.performance,
                    employee.skills.join(", ")
                );
            }
        }
        EmployeeCommand::Add {
            name,
            email,
            department,
            skills,
        } => {
            let created = employees.create(&NewEmployee {
                name,
                email,
                department,
                skills,
            })?;
            println!("added {} ({})", created.name, created.id);
        }
    }
    Ok(())
}

fn run_tasks(
    workspace: &Workspace<'_>,
    config: &WorkspaceConfig,
    command: TaskCommand,
) -> Result<()> {
    match command {
        TaskCommand::List => {
            let employees = workspace.employees()?;
            let board = TaskService::new(workspace).board()?;
            for (status, column) in board {
                println!("[{status}]");
                for task in column {
                    let owner = employees
                        .iter()
                        .find(|employee| employee.id == task.assigned_to_id)
                        .map_or(task.assigned_to_id.as_str(), |employee| {
                            employee.name.as_str()
                        });
                    println!(
                        "  {:<24} {:<6} due {} {} ({})",
                        task.id, task.priority, task.due_date, task.title, owner
                    );
                }
            }
        }
        TaskCommand::Add {
            title,
            assignee,
            description,
            priority,
            due,
            skills,
        } => {
            let assignee = match assignee {
                Some(id) => id,
                None => workspace
                    .employees()?
                    .first()
                    .map(|employee| employee.id.clone())
                    .unwrap_or_default(),
            };
            let input = NewTask {
                title,
                description,
                priority,
                assigned_to_id: assignee,
                due_date: due.unwrap_or_else(|| chrono::Local::now().date_naive()),
                skills_required: parse_skills(&skills),
            };
            let created = TaskService::new(workspace).create(&input)?;
            println!("added {} ({})", created.title, created.id);
        }
        TaskCommand::Move { id, status } => {
            let moved = TaskService::new(workspace).move_task(&id, status)?;
            println!("{} -> {}", moved.id, moved.status);
        }
        TaskCommand::Suggest { id } => {
            let gateway = gateway(config)?;
            match TaskService::new(workspace).suggest_assignee(&id, &gateway)? {
                Some(suggestion) => println!(
                    "assign to {} ({})\nreason: {}\nmatching skills: {}",
                    suggestion.employee.name,
                    suggestion.employee.id,
                    suggestion.reasoning,
                    suggestion.matched_skills.join(", ")
                ),
                None => println!("no matching employee suggested"),
            }
        }
    }
    Ok(())
}

fn run_reports(
    workspace: &Workspace<'_>,
    config: &WorkspaceConfig,
    command: ReportCommand,
) -> Result<()> {
    match command {
        ReportCommand::List => {
            for report in workspace.reports()? {
                print_report(&report);
            }
        }
        ReportCommand::Generate => {
            let gateway = gateway(config)?;
            let report = InsightService::new(workspace, &gateway).generate_report()?;
            print_report(&report);
        }
    }
    Ok(())
}

fn print_report(report: &AiReport) {
    println!("{} ({})\n{}", report.generated_at, report.id, report.summary);
    println!("insights:");
    for insight in &report.key_insights {
        println!("  - {insight}");
    }
    println!("recommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
}

fn run_strategies(
    workspace: &Workspace<'_>,
    config: &WorkspaceConfig,
    command: StrategyCommand,
) -> Result<()> {
    match command {
        StrategyCommand::List => {
            for strategy in workspace.strategies()? {
                println!("{} {} ({})", strategy.updated_at, strategy.title, strategy.id);
            }
        }
        StrategyCommand::Generate { goal } => {
            let gateway = gateway(config)?;
            let strategy =
                InsightService::new(workspace, &gateway).generate_strategy(&goal.join(" "))?;
            println!("# {}\n\n{}", strategy.title, strategy.content);
        }
    }
    Ok(())
}

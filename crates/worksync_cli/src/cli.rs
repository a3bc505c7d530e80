use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use worksync_core::{TaskPriority, TaskStatus};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "worksync")]
#[command(about = "Team workload, tasks and AI insights from the terminal")]
#[command(version)]
pub struct Cli {
    /// Workspace database file (overrides WORKSYNC_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in; defaults to the demo account
    Login { email: Option<String> },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Team directory
    #[command(subcommand)]
    Employees(EmployeeCommand),
    /// Task board
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Weekly AI reports
    #[command(subcommand)]
    Reports(ReportCommand),
    /// Strategy documents
    #[command(subcommand)]
    Strategies(StrategyCommand),
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    List,
    /// Add a team member
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        department: String,
        /// Comma-separated skill list
        #[arg(long, default_value = "")]
        skills: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Print the board grouped by status
    List,
    Add {
        title: String,
        /// Employee id; defaults to the first team member
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "medium")]
        priority: TaskPriority,
        /// Due date as YYYY-MM-DD; defaults to today
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Comma-separated skill list
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// Move a task to another column
    Move { id: String, status: TaskStatus },
    /// Ask the model who should own a task
    Suggest { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    List,
    /// Generate and store a new weekly report
    Generate,
}

#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    List,
    /// Draft and store a strategy for a goal
    Generate {
        #[arg(required = true, num_args = 1..)]
        goal: Vec<String>,
    },
}

//! Prompt builders for the three AI operations.
//!
//! Entity context is embedded as compact JSON using the persisted wire
//! layout, so the model sees the same field names it must answer with.

use super::{GatewayError, GatewayResult};
use crate::model::employee::Employee;
use crate::model::task::Task;
use serde::Serialize;

pub fn weekly_report_prompt(employees: &[Employee], tasks: &[Task]) -> GatewayResult<String> {
    Ok(format!(
        "Act as a senior business analyst. Based on this team data:\n\
         Employees: {}\n\
         Recent Tasks: {}\n\
         Generate a concise weekly performance report in JSON format with summary, \
         3 key insights, and 3 recommendations.",
        to_json(employees)?,
        to_json(tasks)?
    ))
}

pub fn task_assignment_prompt(task: &Task, employees: &[Employee]) -> GatewayResult<String> {
    Ok(format!(
        "Assign this task: \"{} - {}\" requiring skills {} to the best employee from this list: {}. \
         Consider skills match and current workload. \
         Respond with the employee ID and a short reason.",
        task.title,
        task.description,
        task.skills_required.join(", "),
        to_json(employees)?
    ))
}

pub fn strategy_prompt(goal: &str) -> String {
    format!(
        "Generate a high-level business strategy for this goal: \"{}\". \
         Focus on competitive advantage, resource allocation, and market positioning. \
         Return a JSON with title and content in Markdown.",
        goal.trim()
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> GatewayResult<String> {
    serde_json::to_string(value).map_err(GatewayError::Encode)
}

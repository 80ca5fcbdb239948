//! Task lookup by name for callers that take a name from user input.
//!
//! Three passes, strongest claim first: exact match, case-insensitive match,
//! then a substring match that only succeeds when unambiguous. An ambiguous
//! substring reports the candidates instead of guessing.

use crate::model::Task;

/// Outcome of resolving a user-supplied name against a task list.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one task matched.
    Found(&'a str),
    /// Nothing matched at any level.
    NotFound,
    /// A substring matched several tasks; their names, in input order.
    Ambiguous(Vec<&'a str>),
}

/// Resolve `name` against `tasks` and return the matching task.
pub fn resolve_task<'a>(tasks: &'a [Task], name: &str) -> Option<&'a Task> {
    match resolve_name(tasks, name) {
        Resolution::Found(resolved) => tasks.iter().find(|t| t.name == resolved),
        _ => None,
    }
}

/// Name-level resolution, exposed so callers can distinguish "unknown" from
/// "ambiguous" when reporting back to the user.
pub fn resolve_name<'a>(tasks: &'a [Task], name: &str) -> Resolution<'a> {
    // Exact hit; duplicates within one file are the parser's problem.
    if let Some(task) = tasks.iter().find(|t| t.name == name) {
        return Resolution::Found(task.name.as_str());
    }

    let lowered = name.to_lowercase();
    let ci: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.name.to_lowercase() == lowered)
        .collect();
    match ci.as_slice() {
        [one] => return Resolution::Found(one.name.as_str()),
        [_, ..] => {
            return Resolution::Ambiguous(ci.iter().map(|t| t.name.as_str()).collect());
        }
        [] => {}
    }

    let sub: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&lowered))
        .collect();
    match sub.as_slice() {
        [] => Resolution::NotFound,
        [one] => Resolution::Found(one.name.as_str()),
        _ => Resolution::Ambiguous(sub.iter().map(|t| t.name.as_str()).collect()),
    }
}

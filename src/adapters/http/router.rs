use hyper::Method;

use crate::domain::TaskId;

pub const MONTH_PATH: &str = "/api/calendar/month";
pub const TASK_PATH: &str = "/api/calendar/task";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListMonth,
    AddTask,
    /// `None` when the id is too large to ever have been assigned.
    UpdateTask(Option<TaskId>),
    DeleteTask(Option<TaskId>),
    Preflight,
    NotFound,
}

/// Classifies a request. OPTIONS wins over everything, the rest must match
/// the whole path exactly.
pub fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (&Method::OPTIONS, _) => Route::Preflight,
        (&Method::GET, MONTH_PATH) => Route::ListMonth,
        (&Method::POST, TASK_PATH) => Route::AddTask,
        (&Method::PUT, _) => task_id(path).map_or(Route::NotFound, Route::UpdateTask),
        (&Method::DELETE, _) => task_id(path).map_or(Route::NotFound, Route::DeleteTask),
        _ => Route::NotFound,
    }
}

/// Parses `/api/calendar/task/<digits>`. The outer `None` is no match; an
/// all-digit segment that overflows a u64 matches with an inner `None`.
fn task_id(path: &str) -> Option<Option<TaskId>> {
    let digits = path.strip_prefix(TASK_PATH)?.strip_prefix('/')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().ok().map(TaskId))
}

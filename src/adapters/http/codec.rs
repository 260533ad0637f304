use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Day, Task, TaskId};

/// Body sent back by an add whose request body could not be decoded.
pub const EMPTY_OBJECT: &str = "{}";

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// `{"date": ..., "text": ...}` as accepted by both add and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskBody {
    pub date: String,
    pub text: String,
}

// DTOs for the month listing
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthDto {
    pub days: Vec<DayDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DayDto {
    pub date: String,
    pub tasks: Vec<TaskDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: u64,
    pub text: String,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.0,
            text: task.text,
        }
    }
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Task::new(TaskId(dto.id), dto.text)
    }
}

impl From<Day> for DayDto {
    fn from(day: Day) -> Self {
        Self {
            date: day.date,
            tasks: day.tasks.into_iter().map(TaskDto::from).collect(),
        }
    }
}

impl From<DayDto> for Day {
    fn from(dto: DayDto) -> Self {
        Day::new(dto.date, dto.tasks.into_iter().map(Task::from).collect())
    }
}

/// Bare status literal returned by update and delete instead of JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    Ok,
    Failed,
}

impl StatusToken {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusToken::Ok => "OK",
            StatusToken::Failed => "Failed",
        }
    }
}

impl From<bool> for StatusToken {
    fn from(success: bool) -> Self {
        if success {
            StatusToken::Ok
        } else {
            StatusToken::Failed
        }
    }
}

pub fn decode_task_body(body: &[u8]) -> CodecResult<TaskBody> {
    serde_json::from_slice(body).map_err(CodecError::MalformedBody)
}

pub fn encode_month(days: Vec<Day>) -> CodecResult<String> {
    let month = MonthDto {
        days: days.into_iter().map(DayDto::from).collect(),
    };
    serde_json::to_string(&month).map_err(CodecError::Encode)
}

pub fn encode_task(task: Task) -> CodecResult<String> {
    serde_json::to_string(&TaskDto::from(task)).map_err(CodecError::Encode)
}

//! The session state tree.
//!
//! One state value per session, owned by the [`super::SessionStore`] and
//! mutated only through dispatched actions. Slices mirror the concerns of
//! the exam-taking UI: contents, snapshot status, lockdown status,
//! pagination, and proctor messages.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exam::content::TimeInfo;
use crate::exam::{AnswersState, ExamVersion};

/// Outcome of the most recent snapshot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotStatus {
    /// A save is in flight.
    Loading,
    /// The last save landed (or nothing has needed saving yet).
    #[default]
    Success,
    /// The last save failed; `message` says why.
    Failure,
    /// The exam was submitted. Terminal: the session is read-only now.
    Finished,
}

/// Snapshot slice: autosave status plus a user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotState {
    pub status: SnapshotStatus,
    pub message: String,
}

/// Where lockdown stands for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockdownStatus {
    /// Lockdown hasn't been attempted yet.
    #[default]
    Before,
    /// Policy says to skip lockdown entirely.
    Ignored,
    /// Preconditions held and monitoring is active.
    Locked,
    /// Preconditions could not be satisfied; `message` says why.
    Failed,
}

/// Lockdown slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockdownState {
    pub status: LockdownStatus,
    /// User-facing failure text.
    pub message: String,
    /// Whether exam contents have been loaded from the server.
    pub loaded: bool,
}

/// A question/part coordinate used by pagination and scrollspy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCoord {
    pub question: usize,
    pub part: Option<usize>,
}

impl PageCoord {
    pub fn question(question: usize) -> Self {
        PageCoord {
            question,
            part: None,
        }
    }

    pub fn part(question: usize, part: usize) -> Self {
        PageCoord {
            question,
            part: Some(part),
        }
    }
}

/// Pagination slice: paged vs. continuous-scroll navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Whether the exam renders one page at a time.
    pub paginated: bool,
    /// Whether scroll-triggered navigation tracking is active.
    pub waypoints_active: bool,
    /// Coordinates the scrollspy can select, in document order.
    pub spy_coords: Vec<PageCoord>,
    /// Coordinates that form pages when paginated, in document order.
    pub page_coords: Vec<PageCoord>,
    /// Index into `page_coords`.
    pub page: usize,
    /// Index into `spy_coords`.
    pub spy: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState {
            paginated: false,
            waypoints_active: true,
            spy_coords: Vec::new(),
            page_coords: Vec::new(),
            page: 0,
            spy: 0,
        }
    }
}

/// A proctor announcement or direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMessage {
    pub id: u64,
    pub body: String,
    pub time: DateTime<Utc>,
    /// Whether the message was sent directly to this student.
    pub personal: bool,
}

/// Messages slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagesState {
    /// Whether there are messages the student hasn't opened yet.
    pub unread: bool,
    pub messages: Vec<ExamMessage>,
}

/// Contents slice: the exam and the student's answers.
///
/// Empty until `LoadExam`; the exam and its matching answers are installed
/// together in that one transition, so `exam.is_some() != answers.is_some()`
/// is unrepresentable in practice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentsState {
    pub exam: Option<Arc<ExamVersion>>,
    pub time: Option<TimeInfo>,
    pub answers: Option<AnswersState>,
}

/// The whole session state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub lockdown: LockdownState,
    pub contents: ContentsState,
    pub pagination: PaginationState,
    pub messages: MessagesState,
    pub snapshot: SnapshotState,
}

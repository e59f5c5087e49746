//! The closed set of state transitions.

use crate::exam::content::TimeInfo;
use crate::exam::{AnswerPath, AnswerState, AnswersState, ExamVersion};
use crate::store::state::{ExamMessage, PageCoord};

/// Every way session state can change.
///
/// Reducers are total over this set: dispatching any action always yields a
/// next state, never an error.
#[derive(Debug, Clone)]
pub enum Action {
    /// Install exam contents, answers, and timing atomically.
    LoadExam {
        exam: Box<ExamVersion>,
        time: TimeInfo,
        answers: AnswersState,
        messages: Vec<ExamMessage>,
    },
    /// Replace the answer at one validated position.
    UpdateAnswer {
        path: AnswerPath,
        value: AnswerState,
    },
    /// Replace the scratch-work text.
    UpdateScratch { value: String },

    // Snapshot lifecycle, dispatched by the autosave coordinator.
    SnapshotSaving,
    SnapshotSuccess,
    SnapshotFailure { message: String },
    /// Terminal: the exam was submitted.
    SnapshotFinished { message: String },

    // Lockdown lifecycle, dispatched once around exam start.
    LockdownIgnored,
    LockedDown,
    LockdownFailed { message: String },

    // Pagination and navigation.
    TogglePagination,
    ViewQuestion { coords: PageCoord },
    SpyQuestion { coords: PageCoord },
    PrevQuestion,
    NextQuestion,
    ActivateWaypoints { enabled: bool },

    // Proctor messages.
    MessageReceived { message: ExamMessage },
    MessagesOpened,
}

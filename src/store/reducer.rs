//! Pure state transitions.
//!
//! `reduce` consumes the current state and an action and returns the next
//! state. No I/O, no suspension: the coordinators observe the result and do
//! their side effects outside. Slices an action doesn't touch move through
//! unchanged.

use std::sync::Arc;

use crate::exam::ExamVersion;
use crate::store::action::Action;
use crate::store::state::{
    LockdownStatus, PageCoord, PaginationState, SessionState, SnapshotStatus,
};

/// Compute the next state.
///
/// Total over the action set. Once the snapshot slice reaches
/// `Finished`, the session is read-only and every further action is a
/// no-op.
pub fn reduce(state: SessionState, action: Action) -> SessionState {
    if state.snapshot.status == SnapshotStatus::Finished {
        tracing::debug!(?action, "action ignored after submission");
        return state;
    }

    match action {
        Action::LoadExam {
            exam,
            time,
            answers,
            messages,
        } => load_exam(state, *exam, time, answers, messages),

        Action::UpdateAnswer { path, value } => {
            let mut state = state;
            match state
                .contents
                .answers
                .as_mut()
                .and_then(|a| a.slot_mut(&path))
            {
                Some(slot) => *slot = value,
                // Unreachable when the path came from the loaded exam;
                // a stale path from a previous exam version lands here.
                None => tracing::warn!(%path, "update for unknown answer position dropped"),
            }
            state
        }

        Action::UpdateScratch { value } => {
            let mut state = state;
            if let Some(answers) = state.contents.answers.as_mut() {
                answers.scratch = value;
            }
            state
        }

        Action::SnapshotSaving => {
            let mut state = state;
            state.snapshot.status = SnapshotStatus::Loading;
            state
        }
        Action::SnapshotSuccess => {
            let mut state = state;
            state.snapshot.status = SnapshotStatus::Success;
            state.snapshot.message.clear();
            state
        }
        Action::SnapshotFailure { message } => {
            let mut state = state;
            state.snapshot.status = SnapshotStatus::Failure;
            state.snapshot.message = message;
            state
        }
        Action::SnapshotFinished { message } => {
            let mut state = state;
            state.snapshot.status = SnapshotStatus::Finished;
            state.snapshot.message = message;
            state
        }

        Action::LockdownIgnored => {
            let mut state = state;
            state.lockdown.status = LockdownStatus::Ignored;
            state.lockdown.message.clear();
            state
        }
        Action::LockedDown => {
            let mut state = state;
            state.lockdown.status = LockdownStatus::Locked;
            state.lockdown.message.clear();
            state
        }
        Action::LockdownFailed { message } => {
            let mut state = state;
            state.lockdown.status = LockdownStatus::Failed;
            state.lockdown.message = message;
            state
        }

        Action::TogglePagination
        | Action::ViewQuestion { .. }
        | Action::SpyQuestion { .. }
        | Action::PrevQuestion
        | Action::NextQuestion
        | Action::ActivateWaypoints { .. } => {
            let mut state = state;
            state.pagination = reduce_pagination(state.pagination, action);
            state
        }

        Action::MessageReceived { message } => {
            let mut state = state;
            // Snapshot responses can re-deliver messages; keep one copy.
            if !state.messages.messages.iter().any(|m| m.id == message.id) {
                state.messages.messages.push(message);
                state.messages.unread = true;
            }
            state
        }
        Action::MessagesOpened => {
            let mut state = state;
            state.messages.unread = false;
            state
        }
    }
}

/// The atomic load transition: contents, answers, timing, pagination
/// coordinates, and initial messages land together.
fn load_exam(
    mut state: SessionState,
    exam: ExamVersion,
    time: crate::exam::content::TimeInfo,
    answers: crate::exam::AnswersState,
    messages: Vec<crate::store::state::ExamMessage>,
) -> SessionState {
    let answers = if answers.mirrors(&exam) {
        answers
    } else {
        // A malformed server snapshot must not break the mirror invariant.
        tracing::warn!("server answers do not mirror exam structure; starting blank");
        crate::exam::AnswersState::blank(&exam)
    };

    let (spy_coords, page_coords) = derive_coords(&exam);
    state.pagination.spy_coords = spy_coords;
    state.pagination.page_coords = page_coords;

    state.contents.exam = Some(Arc::new(exam));
    state.contents.time = Some(time);
    state.contents.answers = Some(answers);

    state.snapshot.status = SnapshotStatus::Success;
    state.snapshot.message.clear();
    state.lockdown.loaded = true;

    state.messages.messages = messages;
    state.messages.unread = state.messages.messages.iter().any(|m| m.personal);

    state
}

/// Build scrollspy and page coordinates from the exam structure.
///
/// Every question gets a spy coord; per-part coords appear when a question
/// has multiple parts or a named solo part. Page coords are per question,
/// or per part for `separate_subparts` questions.
fn derive_coords(exam: &ExamVersion) -> (Vec<PageCoord>, Vec<PageCoord>) {
    let mut spy_coords = Vec::new();
    let mut page_coords = Vec::new();

    for (qnum, question) in exam.questions.iter().enumerate() {
        let whole = PageCoord::question(qnum);
        spy_coords.push(whole);
        if !question.separate_subparts {
            page_coords.push(whole);
        }

        let named_solo = question
            .parts
            .first()
            .is_some_and(|p| p.name.is_some());
        if question.parts.len() > 1 || named_solo {
            for pnum in 0..question.parts.len() {
                let part = PageCoord::part(qnum, pnum);
                spy_coords.push(part);
                if question.separate_subparts {
                    page_coords.push(part);
                }
            }
        }
    }

    (spy_coords, page_coords)
}

/// Most specific index for `target` in `coords`: an exact match, or any
/// coord for the same question.
fn find_best_coord_idx(coords: &[PageCoord], target: PageCoord) -> Option<usize> {
    coords
        .iter()
        .position(|c| *c == target)
        .or_else(|| coords.iter().position(|c| c.question == target.question))
}

fn reduce_pagination(mut pagination: PaginationState, action: Action) -> PaginationState {
    match action {
        Action::TogglePagination => {
            pagination.paginated = !pagination.paginated;
            if let Some(current) = pagination.spy_coords.get(pagination.spy).copied()
                && let Some(page) = find_best_coord_idx(&pagination.page_coords, current)
            {
                pagination.page = page;
            }
            pagination
        }
        Action::ViewQuestion { coords } => {
            if pagination.paginated
                && let Some(page) = find_best_coord_idx(&pagination.page_coords, coords)
            {
                pagination.page = page;
            }
            pagination
        }
        Action::SpyQuestion { coords } => {
            if let Some(spy) = find_best_coord_idx(&pagination.spy_coords, coords) {
                pagination.spy = spy;
            }
            pagination
        }
        Action::PrevQuestion => {
            pagination.page = pagination.page.saturating_sub(1);
            sync_spy_to_page(pagination)
        }
        Action::NextQuestion => {
            let last = pagination.page_coords.len().saturating_sub(1);
            pagination.page = (pagination.page + 1).min(last);
            sync_spy_to_page(pagination)
        }
        Action::ActivateWaypoints { enabled } => {
            pagination.waypoints_active = enabled;
            pagination
        }
        _ => pagination,
    }
}

fn sync_spy_to_page(mut pagination: PaginationState) -> PaginationState {
    if let Some(coord) = pagination.page_coords.get(pagination.page).copied()
        && let Some(spy) = find_best_coord_idx(&pagination.spy_coords, coord)
    {
        pagination.spy = spy;
    }
    pagination
}

//! Exam content and answer state.
//!
//! [`content`] holds the immutable exam structure loaded once at session
//! start. [`answers`] holds the student's in-progress work, shaped as a
//! mirror of the content. [`path`] provides validated coordinates into both.

pub mod answers;
pub mod content;
pub mod path;

pub use answers::{AnswerState, AnswersState, CodeMark, CodePos};
pub use content::{BodyItem, ExamFile, ExamVersion, FileRef, HtmlVal, Part, Question, TimeInfo};
pub use path::AnswerPath;

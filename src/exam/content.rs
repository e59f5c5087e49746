//! Static exam content: questions, parts, and body items.
//!
//! An [`ExamVersion`] is supplied by the server once at session start and
//! never mutated afterwards. Everything the student produces lives in
//! [`super::answers`], shaped as a mirror of this structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A block of sanitized HTML authored server-side.
///
/// The engine treats it as opaque text; rendering is the host UI's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlVal(pub String);

impl HtmlVal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HtmlVal {
    fn from(value: &str) -> Self {
        HtmlVal(value.to_string())
    }
}

/// Reference to supporting material shown alongside a question or part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileRef {
    /// A single file, by full path.
    File { path: String },
    /// A whole directory, by full path.
    Dir { path: String },
}

/// One node of the exam's reference-file tree.
///
/// `FileRef`s in questions and parts point into this tree by path. The
/// engine carries it as data; file viewers live in the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filedir", rename_all = "lowercase")]
pub enum ExamFile {
    File {
        path: String,
        #[serde(rename = "relPath")]
        rel_path: String,
        text: String,
    },
    Dir {
        path: String,
        #[serde(rename = "relPath")]
        rel_path: String,
        nodes: Vec<ExamFile>,
    },
}

/// One gradable (or purely informational) unit within a part.
///
/// Closed set: every consumption site matches exhaustively, so adding a
/// variant is a compile-time event, not a runtime surprise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyItem {
    /// Informational prose with no answer slot.
    #[serde(rename = "HTML")]
    Html { value: HtmlVal },
    /// Select all options that apply.
    AllThatApply { prompt: HtmlVal, options: Vec<HtmlVal> },
    /// Free-form code editor with an optional starting skeleton.
    Code {
        prompt: HtmlVal,
        lang: String,
        initial: String,
    },
    /// Yes/no (or true/false) with optional custom labels.
    YesNo {
        prompt: HtmlVal,
        #[serde(rename = "yesLabel", default, skip_serializing_if = "Option::is_none")]
        yes_label: Option<HtmlVal>,
        #[serde(rename = "noLabel", default, skip_serializing_if = "Option::is_none")]
        no_label: Option<HtmlVal>,
    },
    /// Point at a line in one of the reference files.
    CodeTag { prompt: HtmlVal, choices: CodeTagScope },
    /// Pick exactly one option.
    MultipleChoice { prompt: HtmlVal, options: Vec<HtmlVal> },
    /// Free-form prose.
    Text { prompt: HtmlVal },
    /// Match each prompt with one of the values.
    Matching {
        #[serde(rename = "promptLabel", default, skip_serializing_if = "Option::is_none")]
        prompt_label: Option<HtmlVal>,
        prompts: Vec<HtmlVal>,
        #[serde(rename = "valuesLabel", default, skip_serializing_if = "Option::is_none")]
        values_label: Option<HtmlVal>,
        values: Vec<HtmlVal>,
    },
}

/// Which reference files a `CodeTag` item may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeTagScope {
    Exam,
    Question,
    Part,
}

/// One part of a question: prose plus an ordered sequence of body items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<HtmlVal>,
    pub description: HtmlVal,
    pub points: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<FileRef>,
    pub body: Vec<BodyItem>,
}

/// One question: an ordered sequence of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<HtmlVal>,
    pub description: HtmlVal,
    /// Paginate each part of this question on its own page.
    pub separate_subparts: bool,
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<FileRef>,
}

/// The full, immutable content of one exam version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamVersion {
    pub questions: Vec<Question>,
    pub instructions: HtmlVal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<FileRef>,
    /// The reference-file tree exam-wide `FileRef`s resolve against.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ExamFile>,
}

/// Exam timing, already corrected for clock skew at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// When this student's attempt began, in local-clock terms.
    pub began: DateTime<Utc>,
    /// When this student's attempt ends, in local-clock terms.
    pub ends: DateTime<Utc>,
}

impl TimeInfo {
    /// Time remaining at `now`; zero once the exam has ended.
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::TimeDelta {
        (self.ends - now).max(chrono::TimeDelta::zero())
    }
}

//! The student's in-progress answers.
//!
//! [`AnswersState`] mirrors the loaded exam's question/part/body structure:
//! every body item has a slot, holding either a concrete answer or the
//! explicit [`AnswerState::NoAnswer`] sentinel. The mirror shape is
//! established at load and never broken afterwards.

use serde::{Deserialize, Serialize};

use crate::exam::content::ExamVersion;
use crate::exam::path::AnswerPath;

/// A position inside a code answer, CodeMirror style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePos {
    pub line: usize,
    pub ch: usize,
}

/// A highlighted span inside a code answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMark {
    pub from: CodePos,
    pub to: CodePos,
}

/// The answer to one body item.
///
/// One variant per gradable body-item kind, plus the `NoAnswer` sentinel
/// which is distinct from an empty answer (an empty `Text` answer means the
/// student cleared the field; `NoAnswer` means they never touched it).
///
/// Serialized untagged so the wire shape stays the raw value the server
/// stores (`true`, `2`, `"text"`, `{"NO_ANS":true}`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerState {
    /// The student has not answered this item.
    NoAnswer(NoAnswerMarker),
    /// Yes/no or true/false.
    YesNo(bool),
    /// Index of the selected option.
    MultipleChoice(usize),
    /// Free-form prose.
    Text(String),
    /// A file/line selection for a code-tag item.
    CodeTag {
        #[serde(
            rename = "selectedFile",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        selected_file: Option<String>,
        #[serde(rename = "lineNumber")]
        line_number: usize,
    },
    /// Code text plus highlighted spans.
    Code { text: String, marks: Vec<CodeMark> },
    /// One flag per option.
    AllThatApply(Vec<bool>),
    /// For each prompt, the index of the matched value (if any).
    Matching(Vec<Option<usize>>),
}

/// Wire shape of the "no answer given" sentinel: `{"NO_ANS": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoAnswerMarker {
    #[serde(rename = "NO_ANS")]
    pub no_ans: bool,
}

impl AnswerState {
    /// The canonical "no answer given" value.
    pub fn no_answer() -> Self {
        AnswerState::NoAnswer(NoAnswerMarker { no_ans: true })
    }

    /// Whether this slot holds an actual answer.
    pub fn is_answered(&self) -> bool {
        !matches!(self, AnswerState::NoAnswer(_))
    }
}

/// All of the student's current work: one slot per body item, plus scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswersState {
    /// Indexed `[qnum][pnum][bnum]`, mirroring the exam structure.
    pub answers: Vec<Vec<Vec<AnswerState>>>,
    /// Free-form scratch work, not attached to any question.
    pub scratch: String,
}

impl AnswersState {
    /// A blank answer set mirroring `exam`: `NoAnswer` in every slot.
    pub fn blank(exam: &ExamVersion) -> Self {
        let answers = exam
            .questions
            .iter()
            .map(|q| {
                q.parts
                    .iter()
                    .map(|p| vec![AnswerState::no_answer(); p.body.len()])
                    .collect()
            })
            .collect();
        AnswersState {
            answers,
            scratch: String::new(),
        }
    }

    /// Whether this answer set has exactly the shape of `exam`.
    pub fn mirrors(&self, exam: &ExamVersion) -> bool {
        self.answers.len() == exam.questions.len()
            && self.answers.iter().zip(&exam.questions).all(|(qa, q)| {
                qa.len() == q.parts.len()
                    && qa
                        .iter()
                        .zip(&q.parts)
                        .all(|(pa, p)| pa.len() == p.body.len())
            })
    }

    /// The answer at `path`, if the path belongs to this answer set's exam.
    pub fn answer(&self, path: &AnswerPath) -> Option<&AnswerState> {
        self.answers
            .get(path.qnum())?
            .get(path.pnum())?
            .get(path.bnum())
    }

    /// Mutable slot at `path`, if the path belongs to this answer set's exam.
    pub fn slot_mut(&mut self, path: &AnswerPath) -> Option<&mut AnswerState> {
        self.answers
            .get_mut(path.qnum())?
            .get_mut(path.pnum())?
            .get_mut(path.bnum())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::exam::content::{BodyItem, HtmlVal, Part, Question};

    fn exam() -> ExamVersion {
        ExamVersion {
            questions: vec![
                Question {
                    name: None,
                    description: "q0".into(),
                    separate_subparts: false,
                    parts: vec![Part {
                        name: None,
                        description: "p0".into(),
                        points: 1.0,
                        reference: Vec::new(),
                        body: vec![
                            BodyItem::Html {
                                value: HtmlVal::from("intro"),
                            },
                            BodyItem::AllThatApply {
                                prompt: "pick".into(),
                                options: vec!["x".into(), "y".into()],
                            },
                        ],
                    }],
                    reference: Vec::new(),
                },
                Question {
                    name: None,
                    description: "q1".into(),
                    separate_subparts: false,
                    parts: vec![Part {
                        name: None,
                        description: "p0".into(),
                        points: 1.0,
                        reference: Vec::new(),
                        body: vec![BodyItem::Text { prompt: "t".into() }],
                    }],
                    reference: Vec::new(),
                },
            ],
            instructions: "".into(),
            reference: Vec::new(),
            files: Vec::new(),
        }
    }

    #[test]
    fn blank_mirrors_exam_shape() {
        let exam = exam();
        let answers = AnswersState::blank(&exam);
        assert!(answers.mirrors(&exam));
        for path in exam.answer_paths() {
            assert_eq!(answers.answer(&path), Some(&AnswerState::no_answer()));
        }
    }

    #[test]
    fn mirrors_rejects_wrong_shape() {
        let exam = exam();
        let mut answers = AnswersState::blank(&exam);
        answers.answers[0][0].pop();
        assert!(!answers.mirrors(&exam));
    }

    #[test]
    fn no_answer_sentinel_wire_shape() {
        let json = serde_json::to_value(AnswerState::no_answer()).unwrap();
        assert_eq!(json, serde_json::json!({ "NO_ANS": true }));
    }

    #[test]
    fn answer_variants_round_trip_untagged() {
        let cases = vec![
            AnswerState::no_answer(),
            AnswerState::YesNo(true),
            AnswerState::MultipleChoice(2),
            AnswerState::Text("an essay".to_string()),
            AnswerState::CodeTag {
                selected_file: Some("main.rs".to_string()),
                line_number: 12,
            },
            AnswerState::Code {
                text: "fn main() {}".to_string(),
                marks: vec![CodeMark {
                    from: CodePos { line: 0, ch: 0 },
                    to: CodePos { line: 0, ch: 2 },
                }],
            },
            AnswerState::AllThatApply(vec![true, false]),
            AnswerState::Matching(vec![Some(1), None]),
        ];
        for answer in cases {
            let json = serde_json::to_value(&answer).unwrap();
            let back: AnswerState = serde_json::from_value(json).unwrap();
            assert_eq!(back, answer);
        }
    }

    #[test]
    fn answers_state_round_trips() {
        let exam = exam();
        let mut answers = AnswersState::blank(&exam);
        let path = exam.path(0, 0, 1).unwrap();
        *answers.slot_mut(&path).unwrap() = AnswerState::AllThatApply(vec![true, true]);
        answers.scratch = "notes".to_string();

        let json = serde_json::to_string(&answers).unwrap();
        let back: AnswersState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}

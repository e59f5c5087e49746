//! Validated coordinates into an exam's question/part/body structure.
//!
//! An [`AnswerPath`] can only be produced from a loaded [`ExamVersion`], so
//! any path a caller holds is known in-bounds for the exam that minted it.
//! This replaces raw `(qnum, pnum, bnum)` indexing, where an out-of-range
//! triple would be a silent lookup miss.

use crate::exam::content::{BodyItem, ExamVersion};

/// In-bounds coordinates of one body item.
///
/// Fields are private: construction goes through [`ExamVersion::path`] or
/// [`ExamVersion::answer_paths`]. A path is only meaningful for the exam
/// version that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerPath {
    qnum: usize,
    pnum: usize,
    bnum: usize,
}

impl AnswerPath {
    pub fn qnum(&self) -> usize {
        self.qnum
    }

    pub fn pnum(&self) -> usize {
        self.pnum
    }

    pub fn bnum(&self) -> usize {
        self.bnum
    }
}

impl std::fmt::Display for AnswerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}p{}b{}", self.qnum, self.pnum, self.bnum)
    }
}

impl ExamVersion {
    /// Validate `(qnum, pnum, bnum)` against this exam's structure.
    ///
    /// Returns `None` when any index is out of range.
    pub fn path(&self, qnum: usize, pnum: usize, bnum: usize) -> Option<AnswerPath> {
        self.questions
            .get(qnum)?
            .parts
            .get(pnum)?
            .body
            .get(bnum)?;
        Some(AnswerPath { qnum, pnum, bnum })
    }

    /// Every body-item coordinate of this exam, in document order.
    pub fn answer_paths(&self) -> impl Iterator<Item = AnswerPath> + '_ {
        self.questions.iter().enumerate().flat_map(|(qnum, q)| {
            q.parts.iter().enumerate().flat_map(move |(pnum, p)| {
                (0..p.body.len()).map(move |bnum| AnswerPath { qnum, pnum, bnum })
            })
        })
    }

    /// The body item a path points at.
    pub fn body_item(&self, path: &AnswerPath) -> Option<&BodyItem> {
        self.questions
            .get(path.qnum)?
            .parts
            .get(path.pnum)?
            .body
            .get(path.bnum)
    }
}

//! Wire shapes of the exam-take endpoint's responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exam::content::TimeInfo;
use crate::exam::{AnswersState, ExamVersion};
use crate::store::state::ExamMessage;

/// Server-side exam timing, in the server's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTimeInfo {
    pub began: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    /// The server's clock at response time, used for skew correction.
    pub server_now: DateTime<Utc>,
}

impl WireTimeInfo {
    /// Translate server times into local-clock terms.
    ///
    /// Skew is `local_now - server_now`; adding it to a server timestamp
    /// yields the local-clock instant at which that event occurs.
    pub fn corrected(&self, local_now: DateTime<Utc>) -> TimeInfo {
        let skew = local_now - self.server_now;
        TimeInfo {
            began: self.began + skew,
            ends: self.ends + skew,
        }
    }
}

/// Payload of a successful `start` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartContents {
    pub time: WireTimeInfo,
    pub exam: ExamVersion,
    pub answers: AnswersState,
    #[serde(default)]
    pub messages: Vec<ExamMessage>,
}

/// Response to the `start` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StartResponse {
    /// The registration is already flagged anomalous; the student is locked
    /// out before the exam even loads.
    #[serde(rename = "ANOMALOUS")]
    Anomalous,
    #[serde(rename = "CONTENTS")]
    Contents(StartContents),
}

/// Response to the `snapshot` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaveResult {
    /// The attempt is still live. `lockout: true` means the server revoked
    /// it mid-exam.
    Active {
        lockout: bool,
        #[serde(default)]
        messages: Vec<ExamMessage>,
    },
    /// The attempt was already submitted; the server reports when it last
    /// accepted answers.
    Finished {
        finished: bool,
        message: String,
        #[serde(rename = "lastSaved", default)]
        last_saved: Option<DateTime<Utc>>,
    },
}

/// Response to the `submit` task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub lockout: bool,
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn skew_correction_translates_server_times() {
        let server_now: DateTime<Utc> = "2026-03-01T10:00:00Z".parse().unwrap();
        // Local clock runs 90 seconds ahead of the server.
        let local_now = server_now + TimeDelta::seconds(90);
        let wire = WireTimeInfo {
            began: server_now - TimeDelta::minutes(5),
            ends: server_now + TimeDelta::minutes(55),
            server_now,
        };

        let time = wire.corrected(local_now);
        assert_eq!(time.began, local_now - TimeDelta::minutes(5));
        assert_eq!(time.ends, local_now + TimeDelta::minutes(55));
    }

    #[test]
    fn start_response_distinguishes_anomalous_from_contents() {
        let anomalous: StartResponse =
            serde_json::from_value(serde_json::json!({ "type": "ANOMALOUS" })).unwrap();
        assert_eq!(anomalous, StartResponse::Anomalous);

        let contents: StartResponse = serde_json::from_value(serde_json::json!({
            "type": "CONTENTS",
            "time": {
                "began": "2026-03-01T10:00:00Z",
                "ends": "2026-03-01T11:00:00Z",
                "serverNow": "2026-03-01T10:00:00Z",
            },
            "exam": { "questions": [], "instructions": "welcome" },
            "answers": { "answers": [], "scratch": "" },
        }))
        .unwrap();
        let StartResponse::Contents(contents) = contents else {
            panic!("expected contents");
        };
        assert_eq!(contents.exam.instructions.as_str(), "welcome");
        assert!(contents.messages.is_empty());
    }

    #[test]
    fn save_result_parses_both_shapes() {
        let active: SaveResult =
            serde_json::from_value(serde_json::json!({ "lockout": false })).unwrap();
        assert_eq!(
            active,
            SaveResult::Active {
                lockout: false,
                messages: Vec::new()
            }
        );

        let finished: SaveResult = serde_json::from_value(serde_json::json!({
            "finished": true,
            "message": "Exam already submitted.",
            "lastSaved": "2026-03-01T10:30:00Z",
        }))
        .unwrap();
        assert!(matches!(finished, SaveResult::Finished { finished: true, .. }));
    }
}

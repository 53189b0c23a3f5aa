use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attendance::{AttendanceRecord, Standing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Attendance,
    Performance,
    Behavior,
    General,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Attendance => "attendance",
            NotificationKind::Performance => "performance",
            NotificationKind::Behavior => "behavior",
            NotificationKind::General => "general",
        }
    }
}

/// Who to tell about a student: the student's identity plus the guardian
/// reachable when something slips.
#[derive(Debug, Clone)]
pub struct StudentContact {
    pub id: Uuid,
    pub full_name: String,
    pub guardian_name: String,
    pub guardian_email: String,
    pub guardian_phone: Option<String>,
}

/// One student as ingested from a roster.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub contact: StudentContact,
    pub grade: String,
    pub attendance: AttendanceRecord,
}

/// Alert handed to a delivery sink when a student crosses a policy line.
/// Immutable once constructed; whether it gets sent is the sink's call.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub student_name: String,
    pub student_id: Uuid,
    pub guardian_name: String,
    pub guardian_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    pub kind: NotificationKind,
    pub measured_value: f64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A student after threshold evaluation.
#[derive(Debug, Clone)]
pub struct EvaluatedStudent {
    pub student: StudentRecord,
    pub percentage: f64,
    pub standing: Standing,
    pub notification: Option<NotificationPayload>,
}

#[derive(Debug, Clone)]
pub struct StandingSummary {
    pub standing: Standing,
    pub count: usize,
    pub avg_percentage: f64,
}

use chrono::Utc;

use crate::attendance::Standing;
use crate::error::{AttendanceError, Result};
use crate::models::{
    EvaluatedStudent, NotificationKind, NotificationPayload, StudentContact, StudentRecord,
};

/// Checks a percentage against the policy threshold and builds the guardian
/// alert when it falls short. Purely a data constructor; delivery is the
/// sink's job.
///
/// The boundary is inclusive on the passing side: exactly `threshold` raises
/// no alert.
pub fn check_attendance_threshold(
    percent: f64,
    contact: &StudentContact,
    threshold: f64,
) -> Result<Option<NotificationPayload>> {
    if !percent.is_finite() {
        return Err(AttendanceError::invalid_input(
            "attendance",
            format!("{percent} is not a finite percentage"),
        ));
    }
    if percent >= threshold {
        return Ok(None);
    }

    Ok(Some(NotificationPayload {
        student_name: contact.full_name.clone(),
        student_id: contact.id,
        guardian_name: contact.guardian_name.clone(),
        guardian_email: contact.guardian_email.clone(),
        guardian_phone: contact.guardian_phone.clone(),
        kind: NotificationKind::Attendance,
        measured_value: percent,
        message: format!(
            "URGENT: Your child {} (student {})'s attendance has dropped to {:.1}%, \
             which is below the required {:.0}% threshold. Regular attendance is \
             crucial for academic success. Please contact the school administration \
             if there are any concerns.",
            contact.full_name, contact.id, percent, threshold
        ),
        created_at: Utc::now(),
    }))
}

/// One-line rendering used for console delivery.
pub fn format_notification(notification: &NotificationPayload) -> String {
    format!(
        "[{}] {}",
        notification.created_at.format("%Y-%m-%d %H:%M"),
        notification.message
    )
}

/// Delivery seam for raised alerts. Real email/SMS dispatch lives outside
/// this crate; implementations decide what "send" means.
pub trait NotificationSink {
    fn deliver(&mut self, notification: &NotificationPayload) -> anyhow::Result<()>;
}

/// Logs the would-be guardian email instead of sending it.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn deliver(&mut self, notification: &NotificationPayload) -> anyhow::Result<()> {
        log::info!(
            "sending {} alert for {} to {} <{}>",
            notification.kind.as_str(),
            notification.student_name,
            notification.guardian_name,
            notification.guardian_email
        );
        println!("{}", format_notification(notification));
        Ok(())
    }
}

/// Records every payload it is handed; stands in for real delivery in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Vec<NotificationPayload>,
}

impl NotificationSink for MemorySink {
    fn deliver(&mut self, notification: &NotificationPayload) -> anyhow::Result<()> {
        self.delivered.push(notification.clone());
        Ok(())
    }
}

/// Evaluates every student on a roster and hands raised alerts to the sink.
pub fn evaluate_roster(
    students: &[StudentRecord],
    threshold: f64,
    sink: &mut dyn NotificationSink,
) -> anyhow::Result<Vec<EvaluatedStudent>> {
    let mut evaluated = Vec::with_capacity(students.len());

    for student in students {
        let percentage = student.attendance.percentage();
        let notification = check_attendance_threshold(percentage, &student.contact, threshold)?;
        if let Some(payload) = notification.as_ref() {
            sink.deliver(payload)?;
        }
        evaluated.push(EvaluatedStudent {
            student: student.clone(),
            percentage,
            standing: Standing::for_percentage(percentage),
            notification,
        });
    }

    Ok(evaluated)
}

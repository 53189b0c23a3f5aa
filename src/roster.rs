use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attendance::AttendanceRecord;
use crate::models::{StudentContact, StudentRecord};

/// Wire format of one roster CSV row. Attendance counts stay as raw text
/// here so the core parser is the single place they get validated.
#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    student_id: Option<Uuid>,
    full_name: String,
    grade: String,
    guardian_name: String,
    guardian_email: String,
    guardian_phone: Option<String>,
    attended: String,
    total: String,
}

/// Loads a roster CSV, validating every numeric field. Rows without a
/// student id get a generated one.
pub fn load_roster(path: &Path) -> anyhow::Result<Vec<StudentRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    let mut students = Vec::new();

    for (index, result) in reader.deserialize::<RosterRow>().enumerate() {
        let row = result.with_context(|| format!("malformed roster row {}", index + 1))?;
        let attendance = AttendanceRecord::parse(&row.attended, &row.total).with_context(|| {
            format!("invalid attendance for {} (row {})", row.full_name, index + 1)
        })?;
        let id = row.student_id.unwrap_or_else(|| {
            let generated = Uuid::new_v4();
            log::debug!("generated id {generated} for {}", row.full_name);
            generated
        });

        students.push(StudentRecord {
            contact: StudentContact {
                id,
                full_name: row.full_name,
                guardian_name: row.guardian_name,
                guardian_email: row.guardian_email,
                guardian_phone: row.guardian_phone,
            },
            grade: row.grade,
            attendance,
        });
    }

    Ok(students)
}

/// Demo roster with a mix of standings, one student per badge band.
pub fn sample_roster() -> anyhow::Result<Vec<StudentRecord>> {
    let rows = vec![
        (
            "3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2",
            "Emma Thompson",
            "Grade 10",
            "Linda Thompson",
            "linda.thompson@email.com",
            Some("(555) 123-4567"),
            96,
            100,
        ),
        (
            "0c22f1f1-9184-4fd4-9b21-28c68a6a89dc",
            "James Wilson",
            "Grade 11",
            "Robert Wilson",
            "robert.wilson@email.com",
            None,
            88,
            100,
        ),
        (
            "d5a0a1a2-2a3c-44c2-8f73-60b7897a9dd2",
            "Sofia Chen",
            "Grade 10",
            "Ming Chen",
            "ming.chen@email.com",
            Some("(555) 234-5678"),
            82,
            100,
        ),
        (
            "7a6b1c64-5f02-4a38-9a37-2b1f12f3c9e4",
            "Marcus Johnson",
            "Grade 12",
            "Karen Johnson",
            "karen.johnson@email.com",
            None,
            74,
            100,
        ),
        (
            "c1f9e8d2-6f41-4f0b-8d3a-97a54c2d1b33",
            "Lisa Anderson",
            "Grade 9",
            "David Anderson",
            "david.anderson@email.com",
            Some("(555) 345-6789"),
            91,
            100,
        ),
    ];

    let mut students = Vec::new();
    for (id, name, grade, guardian, email, phone, attended, total) in rows {
        students.push(StudentRecord {
            contact: StudentContact {
                id: Uuid::parse_str(id)?,
                full_name: name.to_string(),
                guardian_name: guardian.to_string(),
                guardian_email: email.to_string(),
                guardian_phone: phone.map(str::to_string),
            },
            grade: grade.to_string(),
            attendance: AttendanceRecord::new(attended, total)?,
        });
    }

    Ok(students)
}

/// Writes the demo roster to a CSV file and returns how many students it
/// holds.
pub fn write_sample_roster(path: &Path) -> anyhow::Result<usize> {
    let students = sample_roster()?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for student in &students {
        writer.serialize(RosterRow {
            student_id: Some(student.contact.id),
            full_name: student.contact.full_name.clone(),
            grade: student.grade.clone(),
            guardian_name: student.contact.guardian_name.clone(),
            guardian_email: student.contact.guardian_email.clone(),
            guardian_phone: student.contact.guardian_phone.clone(),
            attended: student.attendance.attended().to_string(),
            total: student.attendance.total().to_string(),
        })?;
    }

    writer.flush()?;
    Ok(students.len())
}

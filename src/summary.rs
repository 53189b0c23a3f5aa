use std::collections::HashMap;

use crate::attendance::Standing;
use crate::models::{EvaluatedStudent, StandingSummary};

/// Groups evaluated students by standing band, most common band first.
pub fn summarize_standings(students: &[EvaluatedStudent]) -> Vec<StandingSummary> {
    let mut map: HashMap<Standing, (usize, f64)> = HashMap::new();

    for student in students {
        let entry = map.entry(student.standing).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += student.percentage;
    }

    let mut summaries: Vec<StandingSummary> = map
        .into_iter()
        .map(|(standing, (count, total_percentage))| StandingSummary {
            standing,
            count,
            avg_percentage: if count == 0 {
                0.0
            } else {
                total_percentage / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

/// Students ordered lowest attendance first, the follow-up order.
pub fn lowest_attendance_first(students: &[EvaluatedStudent]) -> Vec<EvaluatedStudent> {
    let mut ordered = students.to_vec();
    ordered.sort_by(|a, b| {
        a.percentage
            .partial_cmp(&b.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered
}

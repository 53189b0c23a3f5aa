use serde::Serialize;

use crate::error::{AttendanceError, Result};

/// Minimum acceptable attendance percentage before a guardian alert is raised.
pub const ATTENDANCE_THRESHOLD: f64 = 85.0;

/// Band below which standing drops from good to warning.
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Default number of rows in a projection table.
pub const DEFAULT_SAMPLE_POINTS: u32 = 6;

/// Parses a non-negative whole class count from untrusted text.
pub fn parse_count(field: &'static str, raw: &str) -> Result<u32> {
    let raw = raw.trim();
    raw.parse::<u32>().map_err(|_| {
        AttendanceError::invalid_input(
            field,
            format!("{raw:?} is not a non-negative whole number"),
        )
    })
}

/// Parses an attendance percentage from untrusted text. Must be a finite
/// number; range checks are the caller's contract.
pub fn parse_percent(field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| AttendanceError::invalid_input(field, format!("{raw:?} is not a number")))?;
    if !value.is_finite() {
        return Err(AttendanceError::invalid_input(
            field,
            format!("{raw:?} is not a finite number"),
        ));
    }
    Ok(value)
}

/// A validated attended/total class count pair.
///
/// Construction enforces `attended <= total`; the percentage is derived on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRecord {
    attended: u32,
    total: u32,
}

impl AttendanceRecord {
    pub fn new(attended: u32, total: u32) -> Result<Self> {
        if attended > total {
            return Err(AttendanceError::invalid_input(
                "attended",
                format!("{attended} classes attended exceeds {total} classes held"),
            ));
        }
        Ok(Self { attended, total })
    }

    /// Builds a record from untrusted numeric strings, e.g. raw form fields.
    pub fn parse(attended: &str, total: &str) -> Result<Self> {
        let attended = parse_count("attended", attended)?;
        let total = parse_count("total", total)?;
        Self::new(attended, total)
    }

    pub fn attended(&self) -> u32 {
        self.attended
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Current attendance percentage. Zero classes held is defined as 0%,
    /// not a division error.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.attended) / f64::from(self.total) * 100.0
        }
    }

    /// Smallest number of consecutive future classes that lifts the
    /// percentage to `target`.
    ///
    /// Solves `(attended + x) / (total + x) >= target / 100` in closed form,
    /// then re-checks the rounded result: the ceiling of a floating-point
    /// quotient can land one off the true integer bound in either direction.
    pub fn classes_needed(&self, target: f64) -> Result<u32> {
        if !target.is_finite() || target >= 100.0 {
            return Err(AttendanceError::InvalidTarget { target });
        }
        let ratio = target / 100.0;
        let meets = |x: u32| -> bool {
            let attended = f64::from(self.attended) + f64::from(x);
            let total = f64::from(self.total) + f64::from(x);
            if total == 0.0 {
                ratio <= 0.0
            } else {
                attended / total >= ratio
            }
        };

        let raw = (ratio * f64::from(self.total) - f64::from(self.attended)) / (1.0 - ratio);
        let mut needed = raw.max(0.0).ceil() as u32;
        while !meets(needed) {
            needed += 1;
        }
        while needed > 0 && meets(needed - 1) {
            needed -= 1;
        }
        Ok(needed)
    }

    /// Projection table over `future_classes` upcoming classes: evenly
    /// spaced what-if attendance counts from zero up to all of them.
    ///
    /// Every scenario assumes all future classes are held. The final point
    /// is always exactly `future_classes`, even when the spacing would
    /// overshoot it.
    pub fn project_scenarios(&self, future_classes: u32, sample_points: u32) -> Result<Projection> {
        if sample_points < 2 {
            return Err(AttendanceError::invalid_input(
                "sample_points",
                format!("{sample_points} is too few points for a projection"),
            ));
        }
        let step = if future_classes == 0 {
            1
        } else {
            future_classes.div_ceil(sample_points - 1)
        };
        Ok(Projection {
            record: *self,
            future_classes,
            step,
            next: Some(0),
        })
    }
}

/// One hypothetical future attendance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionScenario {
    pub additional_attended: u32,
    pub projected_percentage: f64,
}

/// Lazy, restartable sequence of projection scenarios. Cloning restarts the
/// walk from the first point.
#[derive(Debug, Clone)]
pub struct Projection {
    record: AttendanceRecord,
    future_classes: u32,
    step: u32,
    next: Option<u32>,
}

impl Projection {
    fn scenario(&self, additional_attended: u32) -> ProjectionScenario {
        let attended = self.record.attended() + additional_attended;
        let total = self.record.total() + self.future_classes;
        let projected_percentage = if total == 0 {
            0.0
        } else {
            f64::from(attended) / f64::from(total) * 100.0
        };
        ProjectionScenario {
            additional_attended,
            projected_percentage,
        }
    }
}

impl Iterator for Projection {
    type Item = ProjectionScenario;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.future_classes {
            None
        } else {
            Some((current + self.step).min(self.future_classes))
        };
        Some(self.scenario(current))
    }
}

/// Display band for a percentage, mirroring the dashboard badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Good,
    Warning,
    BelowThreshold,
}

impl Standing {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= ATTENDANCE_THRESHOLD {
            Standing::Good
        } else if percentage >= WARNING_THRESHOLD {
            Standing::Warning
        } else {
            Standing::BelowThreshold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::Good => "good standing",
            Standing::Warning => "warning",
            Standing::BelowThreshold => "below threshold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_zero_percent() {
        let record = AttendanceRecord::new(0, 0).unwrap();
        assert_eq!(record.percentage(), 0.0);
    }

    #[test]
    fn percentage_matches_simple_ratio() {
        let record = AttendanceRecord::new(85, 100).unwrap();
        assert_eq!(record.percentage(), 85.0);
    }

    #[test]
    fn rejects_attended_above_total() {
        assert!(AttendanceRecord::new(11, 10).is_err());
    }

    #[test]
    fn parse_rejects_malformed_counts() {
        assert!(AttendanceRecord::parse("eighty", "100").is_err());
        assert!(AttendanceRecord::parse("-3", "100").is_err());
        assert!(AttendanceRecord::parse("82.5", "100").is_err());
        assert!(AttendanceRecord::parse(" 82 ", "100").is_ok());
    }

    #[test]
    fn parse_percent_rejects_non_finite() {
        assert!(parse_percent("attendance", "NaN").is_err());
        assert!(parse_percent("attendance", "inf").is_err());
        assert_eq!(parse_percent("attendance", "84.5").unwrap(), 84.5);
    }

    #[test]
    fn no_classes_needed_when_target_already_met() {
        let record = AttendanceRecord::new(90, 100).unwrap();
        assert_eq!(record.classes_needed(85.0).unwrap(), 0);
    }

    #[test]
    fn classes_needed_is_minimal() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        let needed = record.classes_needed(85.0).unwrap();
        assert_eq!(needed, 20);
        assert!((82.0 + needed as f64) / (100.0 + needed as f64) >= 0.85);
        assert!((82.0 + needed as f64 - 1.0) / (100.0 + needed as f64 - 1.0) < 0.85);
    }

    #[test]
    fn classes_needed_from_empty_record_counts_first_class() {
        let record = AttendanceRecord::new(0, 0).unwrap();
        assert_eq!(record.classes_needed(85.0).unwrap(), 1);
    }

    #[test]
    fn classes_needed_rejects_unreachable_targets() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        assert!(matches!(
            record.classes_needed(100.0),
            Err(AttendanceError::InvalidTarget { .. })
        ));
        assert!(record.classes_needed(f64::NAN).is_err());
    }

    #[test]
    fn projection_ends_exactly_at_future_classes() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        let scenarios: Vec<_> = record.project_scenarios(20, 6).unwrap().collect();

        let counts: Vec<u32> = scenarios.iter().map(|s| s.additional_attended).collect();
        assert_eq!(counts, vec![0, 4, 8, 12, 16, 20]);

        let last = scenarios.last().unwrap();
        let all_attended = AttendanceRecord::new(102, 120).unwrap();
        assert_eq!(last.projected_percentage, all_attended.percentage());
    }

    #[test]
    fn projection_clamps_the_overshooting_last_step() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        let counts: Vec<u32> = record
            .project_scenarios(21, 6)
            .unwrap()
            .map(|s| s.additional_attended)
            .collect();
        assert_eq!(counts, vec![0, 5, 10, 15, 20, 21]);
    }

    #[test]
    fn projection_with_no_future_classes_is_the_current_state() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        let scenarios: Vec<_> = record.project_scenarios(0, 6).unwrap().collect();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].additional_attended, 0);
        assert_eq!(scenarios[0].projected_percentage, record.percentage());
    }

    #[test]
    fn projection_restarts_from_a_clone() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        let projection = record.project_scenarios(20, 6).unwrap();
        let first: Vec<_> = projection.clone().collect();
        let second: Vec<_> = projection.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn projection_rejects_degenerate_sampling() {
        let record = AttendanceRecord::new(82, 100).unwrap();
        assert!(record.project_scenarios(20, 1).is_err());
    }

    #[test]
    fn standing_bands_follow_the_badge_colors() {
        assert_eq!(Standing::for_percentage(92.0), Standing::Good);
        assert_eq!(Standing::for_percentage(85.0), Standing::Good);
        assert_eq!(Standing::for_percentage(80.0), Standing::Warning);
        assert_eq!(Standing::for_percentage(75.0), Standing::Warning);
        assert_eq!(Standing::for_percentage(60.0), Standing::BelowThreshold);
    }
}

//! Password evaluation types.

use std::fmt;

/// Highest achievable score: one point per criterion.
pub const MAX_SCORE: u8 = 5;

/// Minimum score required to submit a registration form.
pub const SUBMIT_MIN_SCORE: u8 = 3;

/// The individual checks a password is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Length,
    Upper,
    Lower,
    Digit,
    Special,
}

/// Which criteria a password satisfies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Criteria {
    pub length: bool,
    pub upper: bool,
    pub lower: bool,
    pub digit: bool,
    pub special: bool,
}

impl Criteria {
    pub fn set(&mut self, criterion: Criterion, met: bool) {
        match criterion {
            Criterion::Length => self.length = met,
            Criterion::Upper => self.upper = met,
            Criterion::Lower => self.lower = met,
            Criterion::Digit => self.digit = met,
            Criterion::Special => self.special = met,
        }
    }

    pub fn get(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::Length => self.length,
            Criterion::Upper => self.upper,
            Criterion::Lower => self.lower,
            Criterion::Digit => self.digit,
            Criterion::Special => self.special,
        }
    }

    /// Number of satisfied criteria.
    pub fn count(&self) -> u8 {
        [self.length, self.upper, self.lower, self.digit, self.special]
            .iter()
            .filter(|&&met| met)
            .count() as u8
    }
}

/// Password score in the range `0..=5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordScore(u8);

impl PasswordScore {
    /// Creates a score, clamping to [`MAX_SCORE`].
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_SCORE))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> StrengthLabel {
        match self.0 {
            0 => StrengthLabel::None,
            1..=2 => StrengthLabel::Weak,
            3 => StrengthLabel::Fair,
            4 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

/// Ordinal strength label derived from the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLabel {
    /// Nothing typed yet; rendered blank.
    #[default]
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    /// Text shown next to the strength meter.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::None => "",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a password strength evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordEvaluation {
    pub score: PasswordScore,
    pub criteria: Criteria,
    /// One hint per missed criterion, in evaluation order.
    pub reasons: Vec<String>,
}

impl PasswordEvaluation {
    pub fn label(&self) -> StrengthLabel {
        self.score.label()
    }

    /// Meter fill, `0..=100`.
    pub fn meter_percent(&self) -> u8 {
        self.score.value() * (100 / MAX_SCORE)
    }

    /// Gate for registration: long enough and at least [`SUBMIT_MIN_SCORE`].
    pub fn meets_submission_gate(&self) -> bool {
        self.criteria.length && self.score.value() >= SUBMIT_MIN_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label_thresholds() {
        let labels: Vec<_> = (0..=5).map(|s| PasswordScore::new(s).label()).collect();
        assert_eq!(
            labels,
            vec![
                StrengthLabel::None,
                StrengthLabel::Weak,
                StrengthLabel::Weak,
                StrengthLabel::Fair,
                StrengthLabel::Good,
                StrengthLabel::Strong,
            ]
        );
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(PasswordScore::new(42).value(), MAX_SCORE);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(StrengthLabel::None.to_string(), "");
        assert_eq!(StrengthLabel::Strong.to_string(), "Strong");
    }

    #[test]
    fn test_criteria_count() {
        let mut criteria = Criteria::default();
        assert_eq!(criteria.count(), 0);
        criteria.set(Criterion::Upper, true);
        criteria.set(Criterion::Special, true);
        assert_eq!(criteria.count(), 2);
        assert!(criteria.get(Criterion::Special));
        assert!(!criteria.get(Criterion::Length));
    }

    #[test]
    fn test_submission_gate_requires_length() {
        let evaluation = PasswordEvaluation {
            score: PasswordScore::new(4),
            criteria: Criteria {
                length: false,
                upper: true,
                lower: true,
                digit: true,
                special: true,
            },
            reasons: vec![],
        };
        assert!(!evaluation.meets_submission_gate());
    }

    #[test]
    fn test_meter_percent() {
        let evaluation = PasswordEvaluation {
            score: PasswordScore::new(3),
            ..Default::default()
        };
        assert_eq!(evaluation.meter_percent(), 60);
    }
}

//! Password strength evaluator - main evaluation logic.

use secrecy::SecretString;

#[cfg(feature = "async")]
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::{
    digit_section, length_section, lowercase_section, special_section, uppercase_section,
    SectionResult,
};
use crate::types::{Criteria, Criterion, PasswordEvaluation, PasswordScore};

type Section = fn(&SecretString) -> SectionResult;

/// Sections in evaluation order; hints are reported in this order.
const SECTIONS: [(Criterion, Section); 5] = [
    (Criterion::Length, length_section),
    (Criterion::Upper, uppercase_section),
    (Criterion::Lower, lowercase_section),
    (Criterion::Digit, digit_section),
    (Criterion::Special, special_section),
];

/// Evaluates password strength.
///
/// One point per satisfied criterion. Deterministic and side-effect free,
/// so it can run on every keystroke.
///
/// # Arguments
/// * `password` - The password to evaluate
///
/// # Returns
/// A `PasswordEvaluation` with score, criteria and a hint per missed criterion.
pub fn evaluate_password_strength(password: &SecretString) -> PasswordEvaluation {
    let mut criteria = Criteria::default();
    let mut reasons = Vec::new();

    for (criterion, section_fn) in SECTIONS {
        match section_fn(password) {
            Some(hint) => reasons.push(hint),
            None => criteria.set(criterion, true),
        }
    }

    PasswordEvaluation {
        score: PasswordScore::new(criteria.count()),
        criteria,
        reasons,
    }
}

/// Async version that sends the evaluation via channel after `delay`.
///
/// Nothing is sent when `token` is cancelled before the delay elapses,
/// which lets a newer keystroke supersede a pending evaluation.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    delay: Duration,
    tx: mpsc::Sender<PasswordEvaluation>,
) {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("password evaluation superseded");
            return;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    let evaluation = evaluate_password_strength(password);

    if let Err(e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

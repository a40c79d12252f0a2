//! Approval threshold: an absolute approval count or a percentage.

use std::fmt;
use std::str::FromStr;

use crate::error::RunError;

/// How many approvals a pull request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalThreshold {
    /// At least this many reviewers must currently approve.
    Count(u32),
    /// At least this share of all involved reviewers, pending requests
    /// included, must currently approve. Stored in hundredths of a percent,
    /// so `66.67%` is `6667`.
    Percent {
        /// Required share in hundredths of a percent (0-10000).
        hundredths: u32,
    },
}

const HUNDREDTHS_PER_WHOLE: u32 = 100;
const MAX_HUNDREDTHS: u32 = 100 * HUNDREDTHS_PER_WHOLE;

impl Default for ApprovalThreshold {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl ApprovalThreshold {
    /// Returns true when `approvals` out of `total_reviewers` satisfies the
    /// threshold. A percentage threshold is never met without reviewers.
    #[must_use]
    pub fn is_met(self, approvals: usize, total_reviewers: usize) -> bool {
        match self {
            Self::Count(required) => {
                usize::try_from(required).is_ok_and(|required_count| approvals >= required_count)
            }
            Self::Percent { hundredths } => {
                if total_reviewers == 0 {
                    return false;
                }
                let achieved = u128::try_from(approvals)
                    .unwrap_or(u128::MAX)
                    .saturating_mul(u128::from(MAX_HUNDREDTHS));
                let needed = u128::from(hundredths)
                    .saturating_mul(u128::try_from(total_reviewers).unwrap_or(u128::MAX));
                achieved >= needed
            }
        }
    }
}

impl FromStr for ApprovalThreshold {
    type Err = RunError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(percent) = trimmed.strip_suffix('%') {
            let hundredths = parse_hundredths(percent.trim()).ok_or_else(|| {
                RunError::configuration(format!(
                    "approval threshold {trimmed:?} is not a percentage with at most two decimals"
                ))
            })?;
            if hundredths > MAX_HUNDREDTHS {
                return Err(RunError::configuration(format!(
                    "approval threshold {trimmed:?} exceeds 100%"
                )));
            }
            return Ok(Self::Percent { hundredths });
        }

        trimmed.parse::<u32>().map(Self::Count).map_err(|error| {
            RunError::configuration(format!(
                "approval threshold {trimmed:?} must be a count or a percentage: {error}"
            ))
        })
    }
}

/// Parses `66`, `66.6` or `66.67` into hundredths of a percent.
fn parse_hundredths(raw: &str) -> Option<u32> {
    let (whole_digits, fraction_digits) = raw.split_once('.').unwrap_or((raw, ""));
    if whole_digits.is_empty() || raw.ends_with('.') || fraction_digits.len() > 2 {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if !all_digits(whole_digits) || !all_digits(fraction_digits) {
        return None;
    }
    let whole = whole_digits.parse::<u32>().ok()?;
    let fraction = format!("{fraction_digits:0<2}").parse::<u32>().ok()?;
    whole
        .checked_mul(HUNDREDTHS_PER_WHOLE)?
        .checked_add(fraction)
}

impl fmt::Display for ApprovalThreshold {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(formatter, "{count}"),
            Self::Percent { hundredths } => {
                let digits = format!("{hundredths:03}");
                let (whole, fraction) = digits
                    .split_at_checked(digits.len().saturating_sub(2))
                    .unwrap_or((digits.as_str(), ""));
                match fraction.trim_end_matches('0') {
                    "" => write!(formatter, "{whole}%"),
                    trimmed => write!(formatter, "{whole}.{trimmed}%"),
                }
            }
        }
    }
}

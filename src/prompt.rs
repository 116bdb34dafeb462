//! Terminal dialogue that gathers filter criteria once, field by field.

use std::io::{self, BufRead, Write};

use crate::data::criteria::{FilterCriteria, InvalidInput, MILLIS_PER_DAY};

/// How a field's bounds are asked for and applied.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    MagnitudeRange,
    AgeDays,
    LatitudeRange,
    LongitudeRange,
}

struct FieldPrompt {
    label: &'static str,
    kind: FieldKind,
}

const FIELDS: &[FieldPrompt] = &[
    FieldPrompt {
        label: "mag range",
        kind: FieldKind::MagnitudeRange,
    },
    FieldPrompt {
        label: "date",
        kind: FieldKind::AgeDays,
    },
    FieldPrompt {
        label: "lat range",
        kind: FieldKind::LatitudeRange,
    },
    FieldPrompt {
        label: "lon range",
        kind: FieldKind::LongitudeRange,
    },
];

/// Why a single field fell back to its default.
enum FieldError {
    Parse,
    Rejected(InvalidInput),
}

impl From<InvalidInput> for FieldError {
    fn from(e: InvalidInput) -> Self {
        FieldError::Rejected(e)
    }
}

/// Ask about every filter field in turn and build criteria from the answers.
///
/// Declined, blank, or invalid answers keep that field's default; other
/// fields are unaffected.  End of input counts as "n".
pub fn gather_criteria<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<FilterCriteria> {
    let defaults = FilterCriteria::default();
    let mut criteria = defaults.clone();

    for field in FIELDS {
        let answer = ask(input, output, &format!("Restrict by {} (y/n): ", field.label))?;
        if !answer.eq_ignore_ascii_case("y") {
            continue;
        }

        let mut candidate = criteria.clone();
        match elicit(input, output, field, &defaults, &mut candidate)? {
            Ok(()) => criteria = candidate,
            Err(e) => {
                if let FieldError::Rejected(e) = &e {
                    log::warn!("Prompted value rejected: {e}");
                }
                writeln!(output, "Invalid input for {}. Using default value.", field.label)?;
            }
        }
    }

    log::info!("Prompted criteria: {criteria}");
    Ok(criteria)
}

fn elicit<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &FieldPrompt,
    defaults: &FilterCriteria,
    criteria: &mut FilterCriteria,
) -> io::Result<Result<(), FieldError>> {
    let result = match field.kind {
        FieldKind::AgeDays => {
            let text = ask(
                input,
                output,
                &format!(
                    "View earthquakes within the last specified number of days (default is {:.1} days): ",
                    defaults.max_age_millis() / MILLIS_PER_DAY
                ),
            )?;
            parse_number(&text, None).and_then(|days| Ok(criteria.set_max_age_days(days).map(drop)?))
        }
        FieldKind::MagnitudeRange | FieldKind::LatitudeRange | FieldKind::LongitudeRange => {
            let default = match field.kind {
                FieldKind::MagnitudeRange => defaults.magnitude(),
                FieldKind::LatitudeRange => defaults.latitude(),
                _ => defaults.longitude(),
            };
            let lo_text = ask(
                input,
                output,
                &format!(
                    "Specify the lower end of the {} (default is {}): ",
                    field.label, default.min
                ),
            )?;
            let hi_text = ask(
                input,
                output,
                &format!(
                    "Specify the upper end of the {} (default is {}): ",
                    field.label, default.max
                ),
            )?;
            parse_number(&lo_text, Some(default.min))
                .and_then(|lo| Ok((lo, parse_number(&hi_text, Some(default.max))?)))
                .and_then(|(lo, hi)| Ok(apply_range(criteria, field.kind, lo, hi)?))
        }
    };
    Ok(result)
}

fn apply_range(criteria: &mut FilterCriteria, kind: FieldKind, lo: f64, hi: f64) -> Result<(), InvalidInput> {
    let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
    match kind {
        FieldKind::MagnitudeRange => {
            // Widen first so neither setter pushes the other bound.
            criteria.set_magnitude_max(hi.max(criteria.magnitude().max))?;
            criteria.set_magnitude_min(lo)?;
            criteria.set_magnitude_max(hi)?;
        }
        FieldKind::LatitudeRange => {
            criteria.set_latitude_range(lo, hi)?;
        }
        FieldKind::LongitudeRange => {
            criteria.set_longitude_range(lo, hi)?;
        }
        FieldKind::AgeDays => {}
    }
    Ok(())
}

/// Parse a numeric answer; blank input yields `default` when there is one.
fn parse_number(text: &str, default: Option<f64>) -> Result<f64, FieldError> {
    match (text.is_empty(), default) {
        (true, Some(d)) => Ok(d),
        _ => text.parse::<f64>().map_err(|_| FieldError::Parse),
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

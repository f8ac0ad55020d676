//! Booking-link templating.
//!
//! Hotel booking URLs are stored as templates with named placeholders such as
//! `{checkin}` or `{adults}`. Rendering substitutes each placeholder with the
//! matching representation of the search criteria.
//!
//! | Placeholder | Example for 2025-08-25 |
//! |---|---|
//! | `{checkin}` / `{checkout}` | `2025-08-25` |
//! | `{checkin_dash}` / `{checkout_dash}` | `08-25-2025` |
//! | `{checkin_slash}` / `{checkout_slash}` | `08/25/2025` |
//! | `{datein_mmddyyyy}` / `{dateout_mmddyyyy}` | `08/25/2025` |
//! | `{adults}` / `{children}` | `2` / `0` |

use chrono::NaiveDate;
use thiserror::Error;

use crate::search::SearchCriteria;

/// Every placeholder a booking template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    CheckIn,
    CheckOut,
    CheckInDash,
    CheckOutDash,
    CheckInSlash,
    CheckOutSlash,
    DateInMmDdYyyy,
    DateOutMmDdYyyy,
    Adults,
    Children,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Placeholder::CheckIn,
        Placeholder::CheckOut,
        Placeholder::CheckInDash,
        Placeholder::CheckOutDash,
        Placeholder::CheckInSlash,
        Placeholder::CheckOutSlash,
        Placeholder::DateInMmDdYyyy,
        Placeholder::DateOutMmDdYyyy,
        Placeholder::Adults,
        Placeholder::Children,
    ];

    /// Name as written between the braces.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::CheckIn => "checkin",
            Placeholder::CheckOut => "checkout",
            Placeholder::CheckInDash => "checkin_dash",
            Placeholder::CheckOutDash => "checkout_dash",
            Placeholder::CheckInSlash => "checkin_slash",
            Placeholder::CheckOutSlash => "checkout_slash",
            Placeholder::DateInMmDdYyyy => "datein_mmddyyyy",
            Placeholder::DateOutMmDdYyyy => "dateout_mmddyyyy",
            Placeholder::Adults => "adults",
            Placeholder::Children => "children",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn value(self, criteria: &SearchCriteria) -> String {
        match self {
            Placeholder::CheckIn => iso(criteria.check_in),
            Placeholder::CheckOut => iso(criteria.check_out),
            Placeholder::CheckInDash => us_date(criteria.check_in, '-'),
            Placeholder::CheckOutDash => us_date(criteria.check_out, '-'),
            Placeholder::CheckInSlash | Placeholder::DateInMmDdYyyy => {
                us_date(criteria.check_in, '/')
            }
            Placeholder::CheckOutSlash | Placeholder::DateOutMmDdYyyy => {
                us_date(criteria.check_out, '/')
            }
            Placeholder::Adults => criteria.adults.to_string(),
            Placeholder::Children => criteria.children.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unrecognized placeholder {{{name}}} in booking template")]
    UnknownPlaceholder { name: String },

    #[error("unterminated placeholder starting at byte {offset} in booking template")]
    Unterminated { offset: usize },
}

/// Renders `template` strictly: any unrecognized or unterminated placeholder
/// is an error.
///
/// # Errors
///
/// Returns the first [`TemplateError`] encountered, scanning left to right.
pub fn try_render_url(template: &str, criteria: &SearchCriteria) -> Result<String, TemplateError> {
    let (rendered, problems) = render_collecting(template, criteria);
    match problems.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(rendered),
    }
}

/// Renders `template`, leaving unrecognized placeholders verbatim.
///
/// Booking links must always render, so problems are logged rather than
/// returned. Registry templates are checked with [`try_render_url`] at load
/// time, so this only warns for templates that bypassed validation.
#[must_use]
pub fn render_url(template: &str, criteria: &SearchCriteria) -> String {
    let (rendered, problems) = render_collecting(template, criteria);
    for problem in &problems {
        tracing::warn!(template, error = %problem, "booking template left partially rendered");
    }
    rendered
}

fn render_collecting(template: &str, criteria: &SearchCriteria) -> (String, Vec<TemplateError>) {
    let mut out = String::with_capacity(template.len() + 16);
    let mut problems = Vec::new();
    let mut rest = template;
    let mut consumed = 0usize;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            problems.push(TemplateError::Unterminated {
                offset: consumed + open,
            });
            out.push_str(&rest[open..]);
            return (out, problems);
        };

        let name = &after_open[..close];
        match Placeholder::from_name(name) {
            Some(placeholder) => out.push_str(&placeholder.value(criteria)),
            None => {
                problems.push(TemplateError::UnknownPlaceholder {
                    name: name.to_owned(),
                });
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }

        let advance = open + 1 + close + 1;
        consumed += advance;
        rest = &rest[advance..];
    }

    out.push_str(rest);
    (out, problems)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn us_date(date: NaiveDate, sep: char) -> String {
    date.format(&format!("%m{sep}%d{sep}%Y")).to_string()
}

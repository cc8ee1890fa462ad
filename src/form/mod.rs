//! Student questionnaire.
//!
//! Describes the 32 questions shown to an operator: label, help text and
//! widget (a fixed choice list, a slider, or a bounded number field),
//! grouped into sections. Each answer becomes one `RawInput` attribute.

mod session;

use rand::Rng;

use crate::encoding::NUM_FEATURES;
use crate::student::{RawInput, RawValue};
use Section::*;

pub use session::{run_form, RESULT_LABEL, TITLE};

/// Errors raised while collecting answers.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("'{answer}' is not one of {options}")]
    NotAnOption { answer: String, options: String },

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("input ended before the form was complete")]
    Incomplete,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Form sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Demographic,
    Occupation,
    ReasonsAndSupport,
    SupportAndActivities,
    AspirationsAndLifestyle,
    Grading,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Demographic,
        Section::Occupation,
        Section::ReasonsAndSupport,
        Section::SupportAndActivities,
        Section::AspirationsAndLifestyle,
        Section::Grading,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Demographic => "Demographic Information",
            Section::Occupation => "Occupation Information",
            Section::ReasonsAndSupport => "Reasons and Support",
            Section::SupportAndActivities => "Support and Activities",
            Section::AspirationsAndLifestyle => "Aspirations and Lifestyle",
            Section::Grading => "Grading Information",
        }
    }
}

/// Input widget for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// One of a fixed list; the first entry is preselected.
    Select(&'static [&'static str]),
    /// Small integer scale.
    Slider { min: i64, max: i64 },
    /// Bounded integer entry.
    Number { min: i64, max: i64 },
}

/// One question on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub section: Section,
    pub label: &'static str,
    pub help: &'static str,
    pub widget: Widget,
}

impl FormField {
    /// Prompt text, e.g. `School: [GP/MS]` or `Age: (15-22)`.
    pub fn prompt(&self) -> String {
        match self.widget {
            Widget::Select(options) => format!("{} [{}]", self.label, options.join("/")),
            Widget::Slider { min, max } | Widget::Number { min, max } => {
                format!("{} ({}-{})", self.label, min, max)
            }
        }
    }

    /// Value the widget holds before the operator touches it.
    pub fn default_value(&self) -> RawValue {
        match self.widget {
            Widget::Select(options) => RawValue::from(options[0]),
            Widget::Slider { min, .. } | Widget::Number { min, .. } => RawValue::from(min),
        }
    }

    /// Parses a typed answer. A blank answer keeps the widget default.
    pub fn parse_answer(&self, answer: &str) -> Result<RawValue, FormError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(self.default_value());
        }
        match self.widget {
            Widget::Select(options) => options
                .iter()
                .find(|&&o| o == answer)
                .map(|&o| RawValue::from(o))
                .ok_or_else(|| FormError::NotAnOption {
                    answer: answer.to_string(),
                    options: options.join(", "),
                }),
            Widget::Slider { min, max } | Widget::Number { min, max } => {
                let value: i64 = answer
                    .parse()
                    .map_err(|_| FormError::NotANumber(answer.to_string()))?;
                if value < min || value > max {
                    return Err(FormError::OutOfRange { value, min, max });
                }
                Ok(RawValue::from(value))
            }
        }
    }

    /// Draws a random valid answer.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RawValue {
        match self.widget {
            Widget::Select(options) => RawValue::from(options[rng.gen_range(0..options.len())]),
            Widget::Slider { min, max } | Widget::Number { min, max } => {
                RawValue::from(rng.gen_range(min..=max))
            }
        }
    }
}

const SCHOOLS: &[&str] = &["GP", "MS"];
const SEXES: &[&str] = &["F", "M"];
const ADDRESSES: &[&str] = &["U", "R"];
const FAMSIZES: &[&str] = &["LE3", "GT3"];
const PSTATUSES: &[&str] = &["T", "A"];
const JOBS: &[&str] = &["teacher", "health", "services", "at_home", "other"];
const REASONS: &[&str] = &["home", "reputation", "course", "other"];
const GUARDIANS: &[&str] = &["mother", "father", "other"];
const YES_NO: &[&str] = &["yes", "no"];

const fn select(
    name: &'static str,
    section: Section,
    label: &'static str,
    help: &'static str,
    options: &'static [&'static str],
) -> FormField {
    FormField {
        name,
        section,
        label,
        help,
        widget: Widget::Select(options),
    }
}

const fn slider(
    name: &'static str,
    section: Section,
    label: &'static str,
    help: &'static str,
    min: i64,
    max: i64,
) -> FormField {
    FormField {
        name,
        section,
        label,
        help,
        widget: Widget::Slider { min, max },
    }
}

const fn number(
    name: &'static str,
    section: Section,
    label: &'static str,
    help: &'static str,
    min: i64,
    max: i64,
) -> FormField {
    FormField {
        name,
        section,
        label,
        help,
        widget: Widget::Number { min, max },
    }
}

/// Every question, in display order. The order matches the model columns.
pub static FORM: [FormField; NUM_FEATURES] = [
    select("school", Demographic, "School:", "Student's school", SCHOOLS),
    select("sex", Demographic, "Gender:", "Student's gender", SEXES),
    number("age", Demographic, "Age:", "Student's age", 15, 22),
    select("address", Demographic, "Address Type:", "Student's home address type", ADDRESSES),
    select("famsize", Demographic, "Family Size:", "Family size", FAMSIZES),
    select(
        "Pstatus",
        Demographic,
        "Parent Cohabitation Status:",
        "Parent's cohabitation status",
        PSTATUSES,
    ),
    slider("Medu", Demographic, "Mother's Education Level:", "Mother's education level", 0, 4),
    slider("Fedu", Demographic, "Father's Education Level:", "Father's education level", 0, 4),
    select("Mjob", Occupation, "Mother's Occupation:", "Mother's job", JOBS),
    select("Fjob", Occupation, "Father's Occupation:", "Father's job", JOBS),
    select(
        "reason",
        ReasonsAndSupport,
        "Reason for Choosing School:",
        "Reason to choose this school",
        REASONS,
    ),
    select("guardian", ReasonsAndSupport, "Guardian:", "Student's guardian", GUARDIANS),
    slider(
        "traveltime",
        ReasonsAndSupport,
        "Travel Time to School:",
        "Home to school travel time",
        1,
        4,
    ),
    slider("studytime", ReasonsAndSupport, "Weekly Study Time:", "Weekly study time", 1, 4),
    slider(
        "failures",
        ReasonsAndSupport,
        "Past Class Failures:",
        "Number of past class failures",
        0,
        3,
    ),
    select(
        "schoolsup",
        SupportAndActivities,
        "Extra Educational Support:",
        "Extra educational support",
        YES_NO,
    ),
    select(
        "famsup",
        SupportAndActivities,
        "Family Educational Support:",
        "Family educational support",
        YES_NO,
    ),
    select(
        "paid",
        SupportAndActivities,
        "Extra Paid Classes:",
        "Extra paid classes within the course subject",
        YES_NO,
    ),
    select(
        "activities",
        SupportAndActivities,
        "Extra-curricular Activities:",
        "Extra-curricular activities",
        YES_NO,
    ),
    select(
        "nursery",
        SupportAndActivities,
        "Attended Nursery School:",
        "Attended nursery school",
        YES_NO,
    ),
    select(
        "higher",
        AspirationsAndLifestyle,
        "Wants to Take Higher Education:",
        "Wants to take higher education",
        YES_NO,
    ),
    select(
        "internet",
        AspirationsAndLifestyle,
        "Internet Access at Home:",
        "Internet access at home",
        YES_NO,
    ),
    select(
        "romantic",
        AspirationsAndLifestyle,
        "In a Romantic Relationship:",
        "In a romantic relationship",
        YES_NO,
    ),
    slider(
        "famrel",
        AspirationsAndLifestyle,
        "Quality of Family Relationships:",
        "Quality of family relationships",
        1,
        5,
    ),
    slider(
        "freetime",
        AspirationsAndLifestyle,
        "Free Time After School:",
        "Free time after school",
        1,
        5,
    ),
    slider(
        "goout",
        AspirationsAndLifestyle,
        "Going Out with Friends:",
        "Going out with friends",
        1,
        5,
    ),
    slider(
        "Dalc",
        AspirationsAndLifestyle,
        "Workday Alcohol Consumption:",
        "Workday alcohol consumption",
        1,
        5,
    ),
    slider(
        "Walc",
        AspirationsAndLifestyle,
        "Weekend Alcohol Consumption:",
        "Weekend alcohol consumption",
        1,
        5,
    ),
    slider(
        "health",
        AspirationsAndLifestyle,
        "Current Health Status:",
        "Current health status",
        1,
        5,
    ),
    number(
        "absences",
        AspirationsAndLifestyle,
        "Number of School Absences:",
        "Number of school absences",
        0,
        93,
    ),
    number("G1", Grading, "First Period Grade:", "First period grade", 0, 20),
    number("G2", Grading, "Second Period Grade:", "Second period grade", 0, 20),
];

/// Looks up a question by attribute name.
pub fn field(name: &str) -> Option<&'static FormField> {
    FORM.iter().find(|f| f.name == name)
}

/// Questions belonging to one section, in display order.
pub fn section_fields(section: Section) -> impl Iterator<Item = &'static FormField> {
    FORM.iter().filter(move |f| f.section == section)
}

/// A complete record of widget defaults, as if submitted untouched.
pub fn default_input() -> RawInput {
    FORM.iter().map(|f| (f.name, f.default_value())).collect()
}

/// A complete record of random valid answers.
pub fn random_input<R: Rng + ?Sized>(rng: &mut R) -> RawInput {
    FORM.iter().map(|f| (f.name, f.sample(rng))).collect()
}

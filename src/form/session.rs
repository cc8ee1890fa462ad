//! Line-oriented terminal session for filling in the form.

use std::io::{BufRead, Write};

use super::{FormError, Section, FORM};
use crate::student::RawInput;

/// Heading printed before the first section.
pub const TITLE: &str = "Student Performance Prediction";

/// Prefix of the line that reports a prediction.
pub const RESULT_LABEL: &str = "Predicted Final Grade (G3):";

/// Asks every question in order and assembles the answers.
///
/// A blank answer keeps the widget default and `?` prints the help text.
/// Invalid answers are explained and asked again. Running out of input
/// before the last question is `FormError::Incomplete`.
pub fn run_form<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<RawInput, FormError> {
    let mut raw = RawInput::new();
    let mut section: Option<Section> = None;
    let mut line = String::new();

    writeln!(out, "{}", TITLE)?;

    for field in FORM.iter() {
        if section != Some(field.section) {
            writeln!(out)?;
            writeln!(out, "== {} ==", field.section.title())?;
            section = Some(field.section);
        }

        loop {
            write!(out, "{} ", field.prompt())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(FormError::Incomplete);
            }

            if line.trim() == "?" {
                writeln!(out, "  {}", field.help)?;
                continue;
            }

            match field.parse_answer(&line) {
                Ok(value) => {
                    raw.insert(field.name, value);
                    break;
                }
                Err(e) => writeln!(out, "  {}", e)?,
            }
        }
    }

    writeln!(out)?;
    out.flush()?;
    Ok(raw)
}

use tracing::debug;

use super::extract::extract_x_value;
use crate::models::{default_threshold, Line, ModificationRecord, ProcessingState};

/// Result of processing a single line
#[derive(Debug, Clone, PartialEq)]
pub struct LineStep {
    pub line: Line,
    pub state: ProcessingState,
    pub modification: Option<ModificationRecord>,
}

/// Result of processing a sequence of lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedLines {
    pub lines: Vec<Line>,
    pub state: ProcessingState,
    pub modifications: Vec<ModificationRecord>,
}

/// Folds X extraction over lines in order, inserting `G0` where the X value
/// drops from a non-negative value to a negative one by at least `threshold`.
///
/// The difference is compared with a plain `>=` on `f64`, with no epsilon.
/// A nominal drop equal to the threshold can therefore land on either side of
/// it: with the default 0.2, `X1.0 -> X-0.8` gives 0.19999999999999996 and is
/// left alone, while `X1.1 -> X-0.9` gives 0.20000000000000007 and triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialLineProcessor {
    threshold: f64,
}

impl Default for SequentialLineProcessor {
    fn default() -> Self {
        Self::new(default_threshold())
    }
}

impl SequentialLineProcessor {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Process one line given the state left by the lines before it
    pub fn step(&self, state: ProcessingState, line: &Line) -> LineStep {
        let current_x = extract_x_value(&line.text);

        let modification = match (current_x, state.previous_x) {
            (Some(current), Some(previous)) if current < 0.0 && previous >= 0.0 => {
                let difference = previous - current.abs();
                if difference >= self.threshold && !starts_with_g0(&line.text) {
                    Some(ModificationRecord {
                        line_number: line.number,
                        difference,
                        new_line: format!("G0 {}", line.text.trim_start()),
                    })
                } else {
                    None
                }
            }
            _ => None,
        };

        let next_state = match current_x {
            Some(x) => ProcessingState {
                previous_x: Some(x),
            },
            None => state,
        };

        let line = match &modification {
            Some(record) => {
                debug!("{}", record);
                line.with_text(record.new_line.clone())
            }
            None => line.clone(),
        };

        LineStep {
            line,
            state: next_state,
            modification,
        }
    }

    /// Process all lines in order, starting from `initial`
    pub fn run<'a, I>(&self, lines: I, initial: ProcessingState) -> ProcessedLines
    where
        I: IntoIterator<Item = &'a Line>,
    {
        lines.into_iter().fold(
            ProcessedLines {
                state: initial,
                ..ProcessedLines::default()
            },
            |mut acc, line| {
                let step = self.step(acc.state, line);
                acc.state = step.state;
                acc.modifications.extend(step.modification);
                acc.lines.push(step.line);
                acc
            },
        )
    }
}

/// Leading-whitespace-trimmed, case-insensitive `G0` prefix check.
///
/// `G00` and `G01` lines also match.
fn starts_with_g0(text: &str) -> bool {
    text.trim_start()
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("g0"))
}

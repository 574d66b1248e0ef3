use serde::{Deserialize, Serialize};

/// Terminator that ended a line in the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Last line of a file that does not end with a newline
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }
}

/// One line of an NC file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based position in the file
    pub number: usize,
    /// Line content without its terminator
    pub text: String,
    pub ending: LineEnding,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            number,
            text: text.into(),
            ending,
        }
    }

    /// Same line with different content, keeping number and terminator
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            number: self.number,
            text: text.into(),
            ending: self.ending,
        }
    }

    /// Split file content into lines, keeping each line's terminator.
    ///
    /// Only `\n` ends a line; a `\r` directly before it is folded into a
    /// `CrLf` terminator. Empty content yields no lines.
    pub fn split_all(content: &str) -> Vec<Line> {
        content
            .split_inclusive('\n')
            .enumerate()
            .map(|(idx, raw)| {
                let (text, ending) = if let Some(body) = raw.strip_suffix("\r\n") {
                    (body, LineEnding::CrLf)
                } else if let Some(body) = raw.strip_suffix('\n') {
                    (body, LineEnding::Lf)
                } else {
                    (raw, LineEnding::None)
                };
                Line::new(idx + 1, text, ending)
            })
            .collect()
    }

    /// Join lines back into file content
    pub fn join_all(lines: &[Line]) -> String {
        let capacity = lines.iter().map(|l| l.text.len() + 2).sum();
        let mut out = String::with_capacity(capacity);
        for line in lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
        out
    }
}

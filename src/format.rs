//! Reading and writing lists of ellipses and dumping rasterization results
//!
//! Text format is one ellipse per line `center_x, center_y, radius_x, radius_y, angle`,
//! numbers can be separated by commas and/or whitespace. Empty lines and lines
//! starting with `#` are ignored.
use crate::{Ellipse, PixelRun, Scalar};
use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
};

/// Error while reading list of ellipses
#[derive(Debug)]
pub enum EllipseParseError {
    /// Failed to parse scalar value
    InvalidScalar { line: usize, token: String },
    /// Wrong number of values on the line (five expected)
    FieldCount { line: usize, found: usize },
    /// Buffer can not be viewed as a list of ellipses
    Cast(bytemuck::PodCastError),
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// IO error propagated while reading input stream
    IoError(std::io::Error),
}

impl fmt::Display for EllipseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScalar { line, token } => {
                write!(f, "EllipseParse::InvalidScalar line={} token={:?}", line, token)
            }
            Self::FieldCount { line, found } => {
                write!(f, "EllipseParse::FieldCount line={} found={}", line, found)
            }
            _ => write!(f, "EllipseParse::{:?}", self),
        }
    }
}

impl From<std::io::Error> for EllipseParseError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for EllipseParseError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<bytemuck::PodCastError> for EllipseParseError {
    fn from(error: bytemuck::PodCastError) -> Self {
        Self::Cast(error)
    }
}

impl From<EllipseParseError> for std::io::Error {
    fn from(error: EllipseParseError) -> Self {
        match error {
            EllipseParseError::IoError(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

impl std::error::Error for EllipseParseError {}

/// Parse single line, `line` is only used for error reporting
fn parse_line(line: usize, text: &str) -> Result<Ellipse, EllipseParseError> {
    let mut values: [Scalar; 5] = [0.0; 5];
    let mut found = 0;
    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let value = token
            .parse::<Scalar>()
            .map_err(|_| EllipseParseError::InvalidScalar {
                line,
                token: token.to_owned(),
            })?;
        if let Some(slot) = values.get_mut(found) {
            *slot = value;
        }
        found += 1;
    }
    if found != values.len() {
        return Err(EllipseParseError::FieldCount { line, found });
    }
    Ok(bytemuck::cast(values))
}

impl FromStr for Ellipse {
    type Err = EllipseParseError;

    /// Parse `center_x, center_y, radius_x, radius_y, angle`, reported line is `0`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_line(0, text)
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.center_x, self.center_y, self.radius_x, self.radius_y, self.angle
        )
    }
}

/// Read ellipses in the text format, line numbers in errors start from `1`
pub fn read_ellipses(input: impl BufRead) -> Result<Vec<Ellipse>, EllipseParseError> {
    let mut ellipses = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        ellipses.push(parse_line(index + 1, text)?);
    }
    Ok(ellipses)
}

/// Write ellipses in the text format, one per line
pub fn write_ellipses(mut out: impl Write, ellipses: &[Ellipse]) -> std::io::Result<()> {
    for ellipse in ellipses {
        writeln!(out, "{}", ellipse)?;
    }
    Ok(())
}

/// Read JSON array of ellipse objects
#[cfg(feature = "serde")]
pub fn read_ellipses_json(input: impl std::io::Read) -> Result<Vec<Ellipse>, EllipseParseError> {
    Ok(serde_json::from_reader(input)?)
}

/// Write ellipses as JSON array
#[cfg(feature = "serde")]
pub fn write_ellipses_json(out: impl Write, ellipses: &[Ellipse]) -> Result<(), EllipseParseError> {
    Ok(serde_json::to_writer_pretty(out, ellipses)?)
}

/// View packed buffer of floats (five per ellipse) as a list of ellipses
pub fn ellipses_from_floats(floats: &[Scalar]) -> Result<&[Ellipse], EllipseParseError> {
    Ok(bytemuck::try_cast_slice(floats)?)
}

/// Display adapter printing runs grouped by row
///
/// ```text
/// 3: [4-7 (1.00)] [7-8 (0.42)]
/// ```
pub struct RunsDump<'a>(pub &'a [PixelRun]);

impl fmt::Display for RunsDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut row = None;
        for run in self.0 {
            if row != Some(run.row) {
                if row.is_some() {
                    writeln!(f)?;
                }
                write!(f, "{}:", run.row)?;
                row = Some(run.row);
            }
            write!(f, " [{}-{} ({:.2})]", run.start, run.end, run.coverage)?;
        }
        if row.is_some() {
            writeln!(f)?;
        }
        Ok(())
    }
}

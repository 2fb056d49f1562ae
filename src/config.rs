use std::fmt;

/// Grid size selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u16,
    pub cols: u16,
}

/// Grid used when the command line names no size.
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions {
    rows: 60,
    cols: 100,
};

/// How the command line failed to describe a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// Anything other than zero or exactly two positional arguments.
    WrongCount(usize),
    /// An argument that does not parse as a positive grid dimension.
    BadDimension(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::WrongCount(count) => write!(
                f,
                "expected no arguments for the default {}x{} maze, or exactly two (rows and columns); got {}",
                DEFAULT_DIMENSIONS.rows, DEFAULT_DIMENSIONS.cols, count
            ),
            ArgsError::BadDimension(raw) => write!(
                f,
                "'{}' is not a valid grid dimension (expected a positive integer up to {})",
                raw,
                u16::MAX
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Interprets the positional arguments (executable name excluded): none
/// selects the default size, exactly two set rows and columns.
pub fn parse_dimensions<I>(args: I) -> Result<Dimensions, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    match args.len() {
        0 => Ok(DEFAULT_DIMENSIONS),
        2 => {
            let rows = parse_dimension(&args[0])?;
            let cols = parse_dimension(&args[1])?;
            Ok(Dimensions { rows, cols })
        }
        count => Err(ArgsError::WrongCount(count)),
    }
}

fn parse_dimension(raw: &str) -> Result<u16, ArgsError> {
    match raw.trim().parse::<u16>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ArgsError::BadDimension(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_select_the_default_maze() {
        assert_eq!(parse_dimensions(args(&[])), Ok(DEFAULT_DIMENSIONS));
        assert_eq!(DEFAULT_DIMENSIONS.rows, 60);
        assert_eq!(DEFAULT_DIMENSIONS.cols, 100);
    }

    #[test]
    fn test_two_arguments_set_rows_and_columns() {
        assert_eq!(
            parse_dimensions(args(&["12", "34"])),
            Ok(Dimensions { rows: 12, cols: 34 })
        );
    }

    #[test]
    fn test_wrong_argument_counts_are_rejected() {
        assert_eq!(parse_dimensions(args(&["12"])), Err(ArgsError::WrongCount(1)));
        assert_eq!(
            parse_dimensions(args(&["1", "2", "3"])),
            Err(ArgsError::WrongCount(3))
        );
    }

    #[test]
    fn test_malformed_dimensions_are_rejected() {
        for raw in ["abc", "0", "-4", "3.5", "70000", ""] {
            assert_eq!(
                parse_dimensions(args(&[raw, "10"])),
                Err(ArgsError::BadDimension(raw.to_string())),
                "'{raw}' should not parse"
            );
        }
    }
}

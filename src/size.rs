use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest board, in cells, a size descriptor may ask for
pub const MAX_CELLS: i64 = 1 << 24;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

/// Why a size descriptor could not be read
#[derive(Debug)]
pub enum SizeError {
    /// The source does not exist or could not be read
    Unavailable(String),
    /// Not exactly two comma-separated fields
    FieldCount(usize),
    /// A field is not an integer
    NotANumber(String),
    /// A dimension is zero or negative
    NotPositive(i64),
    /// Width times height exceeds `MAX_CELLS`
    TooLarge(i64),
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeError::Unavailable(reason) => write!(f, "size source unavailable: {}", reason),
            SizeError::FieldCount(n) => write!(
                f,
                "expected two numbers separated by a comma, found {} field(s)",
                n
            ),
            SizeError::NotANumber(field) => write!(f, "'{}' is not an integer", field),
            SizeError::NotPositive(value) => write!(f, "dimension {} is not positive", value),
            SizeError::TooLarge(cells) => {
                write!(f, "{} cells exceeds the limit of {}", cells, MAX_CELLS)
            }
        }
    }
}

impl std::error::Error for SizeError {}

/// Something that knows how big the board should be
pub trait SizeProvider {
    fn grid_size(&self) -> Result<GridSize, SizeError>;

    /// Human readable source name for log messages
    fn describe(&self) -> String;
}

/// Parse a `"width,height"` descriptor
pub fn parse_size(contents: &str) -> Result<GridSize, SizeError> {
    let fields: Vec<&str> = contents.split(',').collect();
    if fields.len() != 2 {
        return Err(SizeError::FieldCount(fields.len()));
    }

    let width = parse_dimension(fields[0])?;
    let height = parse_dimension(fields[1])?;
    let cells = width as i64 * height as i64;
    if cells > MAX_CELLS {
        return Err(SizeError::TooLarge(cells));
    }
    Ok(GridSize { width, height })
}

fn parse_dimension(field: &str) -> Result<i32, SizeError> {
    let trimmed = field.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| SizeError::NotANumber(trimmed.to_string()))?;
    if value <= 0 {
        return Err(SizeError::NotPositive(value));
    }
    i32::try_from(value).map_err(|_| SizeError::NotANumber(trimmed.to_string()))
}

/// Size descriptor stored in a text file
#[derive(Debug, Clone)]
pub struct SizeFile {
    path: PathBuf,
}

impl SizeFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SizeFile {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SizeProvider for SizeFile {
    fn grid_size(&self) -> Result<GridSize, SizeError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| SizeError::Unavailable(e.to_string()))?;
        parse_size(&contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Size known up front
#[derive(Debug, Clone, Copy)]
pub struct FixedSize(pub GridSize);

impl SizeProvider for FixedSize {
    fn grid_size(&self) -> Result<GridSize, SizeError> {
        parse_size(&format!("{},{}", self.0.width, self.0.height))
    }

    fn describe(&self) -> String {
        format!("fixed size {}x{}", self.0.width, self.0.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_size("20,12").unwrap(), GridSize { width: 20, height: 12 });
        assert_eq!(parse_size(" 7 , 3\n").unwrap(), GridSize { width: 7, height: 3 });
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert!(matches!(parse_size("20"), Err(SizeError::FieldCount(1))));
        assert!(matches!(parse_size("1,2,3"), Err(SizeError::FieldCount(3))));
        assert!(matches!(parse_size(""), Err(SizeError::FieldCount(1))));
    }

    #[test]
    fn test_parse_bad_numbers() {
        assert!(matches!(parse_size("a,4"), Err(SizeError::NotANumber(_))));
        assert!(matches!(parse_size("4,"), Err(SizeError::NotANumber(_))));
        assert!(matches!(parse_size("0,4"), Err(SizeError::NotPositive(0))));
        assert!(matches!(parse_size("4,-2"), Err(SizeError::NotPositive(-2))));
        assert!(matches!(parse_size("99999999999,4"), Err(SizeError::NotANumber(_))));
    }

    #[test]
    fn test_parse_rejects_oversized_boards() {
        assert!(matches!(
            parse_size("100000,100000"),
            Err(SizeError::TooLarge(10_000_000_000))
        ));
        assert!(matches!(parse_size("4096,4096"), Ok(_)));
        assert!(matches!(parse_size("4097,4096"), Err(SizeError::TooLarge(_))));
    }

    #[test]
    fn test_fixed_size_rejects_non_positive() {
        assert!(FixedSize(GridSize { width: 0, height: 3 }).grid_size().is_err());
        assert!(FixedSize(GridSize { width: 3, height: 3 }).grid_size().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let provider = SizeFile::new("definitely/not/here/gridSize.txt");
        assert!(matches!(provider.grid_size(), Err(SizeError::Unavailable(_))));
    }
}

use std::io::{self, BufRead};

/// Field separator of input and output rows
pub const INPUT_DELIMITER: char = '\t';

/// Byte-order mark some editors put at the start of UTF-8 files
const BOM: char = '\u{feff}';

/// Iterate over the lines of a reader, replacing invalid UTF-8 with U+FFFD
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .split(b'\n')
        .map(|bytes| bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
}

/// Split a tab-separated line into fields after trimming trailing whitespace
#[must_use]
pub fn split_row(line: &str) -> Vec<String> {
    line.trim_start_matches(BOM)
        .trim_end()
        .split(INPUT_DELIMITER)
        .map(str::to_string)
        .collect()
}

/// Where the corrected name and the algorithm label go in an output row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Zero-indexed column holding the scientific name
    pub column: usize,

    /// Keep the original name and insert the corrected one after it
    pub keep_original: bool,

    /// Insert a column describing how the name was resolved
    pub verbose: bool,
}

impl ColumnLayout {
    /// The name to resolve, if the row has the column
    pub fn name<'r>(&self, fields: &'r [String]) -> Option<&'r str> {
        fields.get(self.column).map(String::as_str)
    }

    /// Rewrite the header row. Returns `false` if it lacks the name column.
    pub fn apply_header(&self, fields: &mut Vec<String>) -> bool {
        let Some(original) = self.name(fields) else {
            return false;
        };
        let corrected = format!("corrected {original}");
        self.apply(fields, corrected, "algorithm".to_string());
        true
    }

    /// Put the corrected name and the algorithm label into a row.
    ///
    /// The row must contain the name column.
    pub fn apply(&self, fields: &mut Vec<String>, corrected: String, algorithm: String) {
        let mut offset = 1;
        if self.keep_original {
            fields.insert(self.column + 1, corrected);
            offset = 2;
        } else {
            fields[self.column] = corrected;
        }
        if self.verbose {
            fields.insert(self.column + offset, algorithm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("a\tRosa canina\tc \r\n"), row(&["a", "Rosa canina", "c"]));
        assert_eq!(split_row("\u{feff}name\tcount"), row(&["name", "count"]));
        assert_eq!(split_row(""), row(&[""]));
    }

    #[test]
    fn test_lossy_lines() {
        let input: &[u8] = b"one\ntw\xffo\nthree";
        let lines: Vec<String> = lossy_lines(input).map(Result::unwrap).collect();
        assert_eq!(lines, vec!["one", "tw\u{fffd}o", "three"]);
    }

    #[test]
    fn test_replace_name_column() {
        let layout = ColumnLayout {
            column: 1,
            ..Default::default()
        };
        let mut fields = row(&["1", "Rosa lutetiana", "x"]);
        layout.apply(&mut fields, "Rosa canina L.".into(), "exact".into());
        assert_eq!(fields, row(&["1", "Rosa canina L.", "x"]));
    }

    #[test]
    fn test_keep_original_and_verbose() {
        let layout = ColumnLayout {
            column: 0,
            keep_original: true,
            verbose: true,
        };
        let mut fields = row(&["Rosa lutetiana", "x"]);
        layout.apply(&mut fields, "Rosa canina L.".into(), "exact token match (100%)".into());
        assert_eq!(
            fields,
            row(&["Rosa lutetiana", "Rosa canina L.", "exact token match (100%)", "x"])
        );
    }

    #[test]
    fn test_verbose_only() {
        let layout = ColumnLayout {
            column: 0,
            keep_original: false,
            verbose: true,
        };
        let mut fields = row(&["Rosa lutetiana"]);
        layout.apply(&mut fields, "Rosa canina L.".into(), "algo".into());
        assert_eq!(fields, row(&["Rosa canina L.", "algo"]));
    }

    #[test]
    fn test_apply_header() {
        let layout = ColumnLayout {
            column: 1,
            keep_original: true,
            verbose: true,
        };
        let mut fields = row(&["id", "scientificName"]);
        assert!(layout.apply_header(&mut fields));
        assert_eq!(
            fields,
            row(&["id", "scientificName", "corrected scientificName", "algorithm"])
        );

        let mut short = row(&["id"]);
        assert!(!layout.apply_header(&mut short));
    }
}

//! Output formatting utilities for CLI operations

use crate::error::DescribeError;
use crate::extractor::Allele;
use crate::frameshift::{Frame, FrameShiftMatch};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_describe::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

#[derive(Serialize)]
struct DescriptionRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    reference_length: usize,
    observed_length: usize,
    description: String,
    length: usize,
    variants: &'a Allele,
}

/// Write the description of one sequence pair.
///
/// Text output is the allele and its standardized length separated by a tab,
/// preceded by the label when there is one.
///
/// ```
/// use ferro_describe::cli::{output_description, OutputFormat};
/// use ferro_describe::extractor::describe;
/// use std::io::Cursor;
///
/// let allele = describe("ATGC", "ATAC", true).unwrap();
/// let mut buffer = Cursor::new(Vec::new());
/// output_description(&mut buffer, None, "ATGC", "ATAC", &allele, OutputFormat::Text).unwrap();
/// assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "3G>A\t4\n");
/// ```
pub fn output_description<W: Write>(
    writer: &mut W,
    label: Option<&str>,
    reference: &str,
    observed: &str,
    allele: &Allele,
    format: OutputFormat,
) -> Result<(), DescribeError> {
    match format {
        OutputFormat::Json => {
            let record = DescriptionRecord {
                label,
                reference_length: reference.len(),
                observed_length: observed.len(),
                description: allele.render(),
                length: allele.standardized_length(),
                variants: allele,
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            if let Some(label) = label {
                write!(writer, "{}\t", label)?;
            }
            writeln!(writer, "{}\t{}", allele, allele.standardized_length())?;
        }
    }
    Ok(())
}

/// Write an error to the output with optional line number context
///
/// # Examples
///
/// ```
/// use ferro_describe::cli::{output_error_with_context, OutputFormat};
/// use ferro_describe::DescribeError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = DescribeError::invalid_input("expected two columns");
/// output_error_with_context(&mut buffer, "ACGT", &error, OutputFormat::Text, Some(42)).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("line 42"));
/// ```
pub fn output_error_with_context<W: Write>(
    writer: &mut W,
    input: &str,
    error: &DescribeError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut record = json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            if let Some(line) = line_number {
                record["line"] = json!(line);
            }
            writeln!(writer, "{}", record)
        }
        OutputFormat::Text => {
            if let Some(line) = line_number {
                writeln!(
                    writer,
                    "ERROR (line {}): {} - {}",
                    line,
                    input,
                    error.detailed_message()
                )
            } else {
                writeln!(writer, "ERROR: {} - {}", input, error.detailed_message())
            }
        }
    }
}

/// Write an error to the output
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &DescribeError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, None)
}

/// Default cap on the number of frame-shift candidates written.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 1000;

/// Stream frame-shift candidates, one per line in text mode or as one JSON
/// object holding a `candidates` array.
///
/// Candidates are written as they are produced; returns how many were
/// written.
pub fn output_candidates<W, I>(
    writer: &mut W,
    peptide: &str,
    frame: Frame,
    candidates: I,
    format: OutputFormat,
) -> Result<usize, DescribeError>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut count = 0;
    match format {
        OutputFormat::Json => {
            write!(writer, "{{\"peptide\":")?;
            serde_json::to_writer(&mut *writer, peptide)?;
            write!(writer, ",\"frame\":{},\"candidates\":[", frame.offset())?;
            for candidate in candidates {
                if count > 0 {
                    write!(writer, ",")?;
                }
                serde_json::to_writer(&mut *writer, candidate.as_ref())?;
                count += 1;
            }
            writeln!(writer, "]}}")?;
        }
        OutputFormat::Text => {
            for candidate in candidates {
                writeln!(writer, "{}", candidate.as_ref())?;
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Write the result of a frame-shift search in one frame.
pub fn output_frameshift_match<W: Write>(
    writer: &mut W,
    frame: Frame,
    found: FrameShiftMatch,
    format: OutputFormat,
) -> Result<(), DescribeError> {
    match format {
        OutputFormat::Json => {
            let record = json!({
                "frame": frame.offset(),
                "length": found.length,
                "start": found.start,
            });
            writeln!(writer, "{}", record)?;
        }
        OutputFormat::Text => {
            writeln!(
                writer,
                "+{}\tlength={}\tstart={}",
                frame.offset(),
                found.length,
                found.start
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::describe;
    use std::io::Cursor;

    fn written(buffer: Cursor<Vec<u8>>) -> String {
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("other").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_description_text_with_label() {
        let allele = describe("ATGCATGCAT", "CTGCATGCAG", true).unwrap();
        let mut buffer = Cursor::new(Vec::new());
        output_description(
            &mut buffer,
            Some("pair1"),
            "ATGCATGCAT",
            "CTGCATGCAG",
            &allele,
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(written(buffer), "pair1\t[1A>C;10T>G]\t8\n");
    }

    #[test]
    fn test_output_description_json() {
        let allele = describe("ATGC", "ATAC", true).unwrap();
        let mut buffer = Cursor::new(Vec::new());
        output_description(&mut buffer, None, "ATGC", "ATAC", &allele, OutputFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(written(buffer).trim()).unwrap();
        assert_eq!(value["description"], "3G>A");
        assert_eq!(value["length"], 4);
        assert_eq!(value["reference_length"], 4);
        assert!(value.get("label").is_none());
        assert_eq!(value["variants"][0]["change"]["kind"], "substitution");
    }

    #[test]
    fn test_output_error_text() {
        let error = DescribeError::UnknownGeneticCode { id: 7 };
        let mut buffer = Cursor::new(Vec::new());
        output_error(&mut buffer, "MKV", &error, OutputFormat::Text).unwrap();
        assert_eq!(
            written(buffer),
            "ERROR: MKV - [E2001] Unknown genetic code table: 7\n"
        );
    }

    #[test]
    fn test_output_error_json_escaping() {
        let error = DescribeError::invalid_input("bad \"quote\"");
        let mut buffer = Cursor::new(Vec::new());
        output_error_with_context(&mut buffer, "a\tb", &error, OutputFormat::Json, Some(3))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(written(buffer).trim()).unwrap();
        assert_eq!(value["input"], "a\tb");
        assert_eq!(value["line"], 3);
        assert_eq!(value["code"], "E1001");
        assert_eq!(value["status"], "error");
    }

    #[test]
    fn test_output_candidates() {
        let candidates = vec!["CG".to_string(), "CA".to_string()];
        let mut buffer = Cursor::new(Vec::new());
        let count =
            output_candidates(&mut buffer, "MWM", Frame::PlusOne, &candidates, OutputFormat::Text)
                .unwrap();
        assert_eq!(count, 2);
        assert_eq!(written(buffer), "CG\nCA\n");

        let mut buffer = Cursor::new(Vec::new());
        output_candidates(&mut buffer, "MWM", Frame::PlusTwo, &candidates, OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(written(buffer).trim()).unwrap();
        assert_eq!(value["peptide"], "MWM");
        assert_eq!(value["frame"], 2);
        assert_eq!(value["candidates"][1], "CA");
    }

    #[test]
    fn test_output_candidates_streams_bounded_enumeration() {
        use crate::frameshift::{enumerate, frame_shift_tables};

        // Far more candidates than could ever be collected
        let peptide = "ACDEFGHIKLMNPQRSTVWYACDEFGHIKL";
        let tables = frame_shift_tables(1).unwrap();
        let candidates = enumerate(peptide, tables.plus_one()).take(DEFAULT_CANDIDATE_LIMIT);

        let mut buffer = Cursor::new(Vec::new());
        let count = output_candidates(
            &mut buffer,
            peptide,
            Frame::PlusOne,
            candidates,
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(count, DEFAULT_CANDIDATE_LIMIT);

        let value: serde_json::Value = serde_json::from_str(written(buffer).trim()).unwrap();
        assert_eq!(
            value["candidates"].as_array().map(Vec::len),
            Some(DEFAULT_CANDIDATE_LIMIT)
        );
    }

    #[test]
    fn test_output_candidates_empty() {
        let mut buffer = Cursor::new(Vec::new());
        let count = output_candidates(
            &mut buffer,
            "MXM",
            Frame::PlusOne,
            Vec::<String>::new(),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(count, 0);
        let value: serde_json::Value = serde_json::from_str(written(buffer).trim()).unwrap();
        assert_eq!(value["candidates"], serde_json::json!([]));
    }

    #[test]
    fn test_output_frameshift_match() {
        let found = FrameShiftMatch { length: 0, start: 2 };
        let mut buffer = Cursor::new(Vec::new());
        output_frameshift_match(&mut buffer, Frame::PlusOne, found, OutputFormat::Text).unwrap();
        assert_eq!(written(buffer), "+1\tlength=0\tstart=2\n");
    }
}

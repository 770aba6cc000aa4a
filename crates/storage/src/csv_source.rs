//! Decoding of the tabular source's CSV export into a [`Dataset`].

use csv::{ReaderBuilder, StringRecord, Trim};
use quiz_core::model::{Dataset, VocabRow};

use crate::provider::DatasetError;

pub const TERM_COLUMN: &str = "english";
pub const TRANSLATION_COLUMN: &str = "chinese";
pub const PHONETIC_COLUMN: &str = "phonetic";
pub const EXAMPLE_COLUMN: &str = "example";

#[derive(Debug, Clone, Copy)]
struct Columns {
    term: usize,
    translation: usize,
    phonetic: Option<usize>,
    example: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };

        let term = find(TERM_COLUMN);
        let translation = find(TRANSLATION_COLUMN);
        match (term, translation) {
            (Some(term), Some(translation)) => Ok(Self {
                term,
                translation,
                phonetic: find(PHONETIC_COLUMN),
                example: find(EXAMPLE_COLUMN),
            }),
            _ => {
                let missing = [(TERM_COLUMN, term), (TRANSLATION_COLUMN, translation)]
                    .into_iter()
                    .filter(|(_, index)| index.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(DatasetError::MissingColumns(missing))
            }
        }
    }
}

fn field(record: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).unwrap_or_default()
}

/// Decode UTF-8 CSV text with a header row.
///
/// Headers are matched case-insensitively. Fully blank lines are skipped and
/// missing optional cells become empty strings.
///
/// # Errors
///
/// Returns `DatasetError::MissingColumns` if `english` or `chinese` is absent,
/// `DatasetError::InvalidRow` if a row has a blank term or translation, and
/// `DatasetError::Unavailable` if the text is not valid CSV.
pub fn decode_csv(text: &str) -> Result<Dataset, DatasetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Unavailable(format!("malformed csv header: {e}")))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| DatasetError::Unavailable(format!("malformed csv: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record
            .position()
            .and_then(|position| usize::try_from(position.line()).ok())
            .unwrap_or_default();
        let row = VocabRow::new(
            field(&record, Some(columns.term)),
            field(&record, Some(columns.translation)),
        )
        .map_err(|source| DatasetError::InvalidRow { line, source })?
        .with_phonetic(field(&record, columns.phonetic))
        .with_example(field(&record, columns.example));
        rows.push(row);
    }

    Ok(Dataset::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{RowId, VocabRowError};

    #[test]
    fn decodes_quoted_export_with_bom() {
        let text = "\u{feff}\"english\",\"chinese\",\"phonetic\",\"example\"\n\
                    \"ubiquitous\",\"無所不在\",\"/juːˈbɪkwɪtəs/\",\"Phones, everywhere.\"\n\
                    \"ephemeral\",\"短暫的\",\"\",\"\"\n";
        let dataset = decode_csv(text).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = dataset.get(RowId::new(0)).unwrap();
        assert_eq!(first.term(), "ubiquitous");
        assert_eq!(first.translation(), "無所不在");
        assert_eq!(first.example(), "Phones, everywhere.");

        let second = dataset.get(RowId::new(1)).unwrap();
        assert_eq!(second.phonetic(), "");
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let dataset = decode_csv("Chinese,English\n短暫的,ephemeral\n").unwrap();
        let row = dataset.get(RowId::new(0)).unwrap();
        assert_eq!(row.term(), "ephemeral");
        assert_eq!(row.translation(), "短暫的");
        assert_eq!(row.example(), "");
    }

    #[test]
    fn reports_all_missing_required_columns() {
        let err = decode_csv("word,meaning\na,b\n").unwrap_err();
        assert_eq!(
            err,
            DatasetError::MissingColumns(vec!["english".into(), "chinese".into()])
        );

        let err = decode_csv("english,phonetic\na,b\n").unwrap_err();
        assert_eq!(err, DatasetError::MissingColumns(vec!["chinese".into()]));
    }

    #[test]
    fn skips_blank_lines_and_short_rows() {
        let text = "english,chinese,example\nserene,寧靜的\n,,\nlucid,清晰的,A lucid dream.\n";
        let dataset = decode_csv(text).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(RowId::new(0)).unwrap().example(), "");
        assert_eq!(
            dataset.get(RowId::new(1)).unwrap().example(),
            "A lucid dream."
        );
    }

    #[test]
    fn blank_translation_is_a_schema_error() {
        let err = decode_csv("english,chinese\nserene,\n").unwrap_err();
        assert_eq!(
            err,
            DatasetError::InvalidRow {
                line: 2,
                source: VocabRowError::EmptyTranslation,
            }
        );
    }

    #[test]
    fn header_only_export_is_an_empty_dataset() {
        let dataset = decode_csv("english,chinese\n").unwrap();
        assert!(dataset.is_empty());
    }
}

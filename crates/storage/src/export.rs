//! Export CSV des enregistrements

use adnseq_core::SequenceRecord;
use chrono::{DateTime, Local};
use std::io::Write;
use tracing::info;

/// En-tête : noms des colonnes persistées, dans l'ordre de la table
pub const CSV_HEADER: [&str; 14] = [
    "id",
    "name",
    "sequence",
    "length",
    "gc_content",
    "a_count",
    "t_count",
    "g_count",
    "c_count",
    "at_content",
    "melting_temp",
    "ambiguous_count",
    "date_added",
    "description",
];

/// Écrit l'en-tête puis une ligne par enregistrement.
///
/// L'en-tête est écrit même sans enregistrement.
pub fn write_csv<W: Write>(records: &[SequenceRecord], writer: W) -> crate::Result<usize> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;

    info!("{} enregistrements exportés", records.len());
    Ok(records.len())
}

/// Export en mémoire, pour un téléchargement
pub fn to_csv_string(records: &[SequenceRecord]) -> crate::Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| crate::StorageError::ExportError(e.to_string()))
}

/// `dna_sequences_YYYYmmdd_HHMMSS.csv`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("dna_sequences_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, description: Option<&str>) -> SequenceRecord {
        SequenceRecord {
            id,
            name: "gene, 1".to_string(),
            sequence: "ACGT".to_string(),
            length: 4,
            gc_content: 50.0,
            a_count: 1,
            t_count: 1,
            g_count: 1,
            c_count: 1,
            at_content: Some(50.0),
            melting_temp: Some(12.0),
            ambiguous_count: None,
            date_added: "2024-05-01 12:00:00".to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_header_matches_record_fields() {
        let json = serde_json::to_value(record(1, None)).unwrap();
        let fields: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = CSV_HEADER.to_vec();
        let mut actual = fields.clone();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv_string(&[record(1, Some("note")), record(2, None)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "1,\"gene, 1\",ACGT,4,50.0,1,1,1,1,50.0,12.0,,2024-05-01 12:00:00,note"
        );
        assert!(lines[2].ends_with("2024-05-01 12:00:00,"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv.trim_end(), CSV_HEADER.join(","));
    }

    #[test]
    fn test_export_file_name() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 5).unwrap();
        assert_eq!(export_file_name(now), "dna_sequences_20240501_083005.csv");
    }
}

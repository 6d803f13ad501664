use std::path::Path;

use crate::config::LottoConfig;
use crate::error::{LottoError, Result};
use crate::models::{validate_draw, DrawRecord};

/// Colonnes minimales : période, date, 5 numéros avant, 2 numéros arrière.
const MIN_FIELDS: usize = 9;
const FRONT_COLUMNS: std::ops::Range<usize> = 2..7;

fn parse_number(record: &csv::StringRecord, idx: usize) -> std::result::Result<u8, String> {
    let raw = record
        .get(idx)
        .map(|s| s.trim().trim_matches('"'))
        .ok_or_else(|| format!("champ manquant à l'index {}", idx))?;
    raw.parse::<u8>()
        .map_err(|_| format!("impossible de parser '{}' (index {})", raw, idx))
}

fn parse_record(record: &csv::StringRecord, config: &LottoConfig) -> std::result::Result<DrawRecord, String> {
    if record.len() < MIN_FIELDS {
        return Err(format!("{} champs au lieu d'au moins {}", record.len(), MIN_FIELDS));
    }

    let period = record[0].trim().trim_matches('"').to_string();
    let date = record[1].trim().to_string();

    let mut front = [0u8; 5];
    for (slot, idx) in front.iter_mut().zip(FRONT_COLUMNS) {
        *slot = parse_number(record, idx)?;
    }
    let last = record.len();
    let back = [parse_number(record, last - 2)?, parse_number(record, last - 1)?];

    validate_draw(&front, &back, config.front_size, config.back_size).map_err(|e| e.to_string())?;

    Ok(DrawRecord { period, date, front, back })
}

/// Charge l'historique complet, du plus ancien au plus récent.
///
/// Le chargement est tout-ou-rien : une ligne illisible, un nombre de champs
/// différent des autres lignes ou un fichier vide font échouer l'ensemble.
pub fn load_history(path: &Path, config: &LottoConfig) -> Result<Vec<DrawRecord>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(false)
        .from_path(path)
        .map_err(|e| LottoError::data_load(path, e))?;

    let records = read_records(reader, config).map_err(|reason| LottoError::data_load(path, reason))?;

    log::info!("{} tirages chargés depuis {:?}", records.len(), path);
    Ok(records)
}

/// Même contrat que [`load_history`], depuis n'importe quelle source texte.
pub fn parse_history<R: std::io::Read>(input: R, config: &LottoConfig) -> Result<Vec<DrawRecord>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(false)
        .from_reader(input);
    read_records(reader, config).map_err(|reason| LottoError::data_load("<flux>", reason))
}

fn read_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    config: &LottoConfig,
) -> std::result::Result<Vec<DrawRecord>, String> {
    let mut records = Vec::new();

    for (i, record_result) in reader.records().enumerate() {
        let record = record_result.map_err(|e| format!("ligne {} : {}", i + 1, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);
        let draw = parse_record(&record, config).map_err(|e| format!("ligne {} : {}", line, e))?;
        records.push(draw);
    }

    if records.is_empty() {
        return Err("aucun tirage".to_string());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "23001,2023-01-02,1,12,22,26,33,3,7\n\
                          \n\
                          23002,2023-01-04,2,13,23,27,34,4,8\r\n";

    #[test]
    fn test_parse_history_ok() {
        let config = LottoConfig::default();
        let records = parse_history(SAMPLE.as_bytes(), &config).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].period, "23001");
        assert_eq!(records[0].front, [1, 12, 22, 26, 33]);
        assert_eq!(records[0].back, [3, 7]);
        assert_eq!(records[1].front, [2, 13, 23, 27, 34]);
        assert_eq!(records[1].back, [4, 8]);
    }

    #[test]
    fn test_back_taken_from_last_two_columns() {
        let config = LottoConfig::default();
        let input = "23001,2023-01-02,1,12,22,26,33,99,3,7\n";
        let records = parse_history(input.as_bytes(), &config).unwrap();
        assert_eq!(records[0].back, [3, 7]);
    }

    #[test]
    fn test_wrong_field_count_fails_whole_load() {
        let config = LottoConfig::default();
        let input = "23001,2023-01-02,1,12,22,26,33,3,7\n\
                     23002,2023-01-04,2,13,23,27,34,4\n\
                     23003,2023-01-06,5,6,7,8,9,1,2\n";
        let err = parse_history(input.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, LottoError::DataLoad { .. }));
    }

    #[test]
    fn test_too_few_fields_fails() {
        let config = LottoConfig::default();
        let input = "23001,2023-01-02,1,12,22\n";
        assert!(matches!(
            parse_history(input.as_bytes(), &config),
            Err(LottoError::DataLoad { .. })
        ));
    }

    #[test]
    fn test_invalid_number_fails() {
        let config = LottoConfig::default();
        assert!(parse_history("23001,2023-01-02,1,12,22,26,36,3,7\n".as_bytes(), &config).is_err());
        assert!(parse_history("23001,2023-01-02,1,12,22,26,26,3,7\n".as_bytes(), &config).is_err());
        assert!(parse_history("23001,2023-01-02,1,x,22,26,33,3,7\n".as_bytes(), &config).is_err());
    }

    #[test]
    fn test_empty_source_fails() {
        let config = LottoConfig::default();
        assert!(matches!(
            parse_history("\n\n".as_bytes(), &config),
            Err(LottoError::DataLoad { .. })
        ));
    }

    #[test]
    fn test_load_history_from_file() {
        let config = LottoConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let records = load_history(file.path(), &config).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_file_fails() {
        let config = LottoConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let err = load_history(&dir.path().join("absent.csv"), &config).unwrap_err();
        assert!(matches!(err, LottoError::DataLoad { .. }));
    }
}

use std::io::Read;
use std::path::Path;

use super::domain::{TeamHeadcountLog, TrainingHoursLog};

#[derive(Debug)]
pub enum TrainingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for TrainingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingImportError::Io(err) => write!(f, "failed to read training export: {}", err),
            TrainingImportError::Csv(err) => write!(f, "invalid training CSV data: {}", err),
            TrainingImportError::MissingColumn(column) => {
                write!(f, "training CSV is missing the '{}' column", column)
            }
        }
    }
}

impl std::error::Error for TrainingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainingImportError::Io(err) => Some(err),
            TrainingImportError::Csv(err) => Some(err),
            TrainingImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for TrainingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TrainingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Strip a UTF-8 BOM and normalize a header cell for matching.
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn column_index(
    headers: &csv::StringRecord,
    names: &[&str],
    label: &'static str,
) -> Result<usize, TrainingImportError> {
    headers
        .iter()
        .position(|header| names.contains(&normalize_header(header).as_str()))
        .ok_or(TrainingImportError::MissingColumn(label))
}

/// Reads dashboard CSV exports of aggregate training facts. Rows with
/// unparsable or negative numbers are skipped rather than failing the whole
/// import, matching how the dashboard treats dirty export data.
pub struct TrainingLogImporter;

impl TrainingLogImporter {
    pub fn hours_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<TrainingHoursLog>, TrainingImportError> {
        let file = std::fs::File::open(path)?;
        Self::hours_from_reader(file)
    }

    pub fn hours_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<TrainingHoursLog>, TrainingImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let year_idx = column_index(&headers, &["year"], "Year")?;
        let type_idx = column_index(
            &headers,
            &["training type", "training_type", "type"],
            "Training Type",
        )?;
        let hours_idx = column_index(&headers, &["hours"], "Hours")?;

        let mut logs = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let Some(year) = record.get(year_idx).and_then(parse_year) else {
                continue;
            };
            let Some(hours) = record.get(hours_idx).and_then(parse_hours) else {
                continue;
            };
            let training_type = record.get(type_idx).map(str::trim).unwrap_or_default();
            if training_type.is_empty() {
                continue;
            }

            logs.push(TrainingHoursLog {
                year,
                training_type: training_type.to_string(),
                hours,
            });
        }

        Ok(logs)
    }

    pub fn headcounts_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<TeamHeadcountLog>, TrainingImportError> {
        let file = std::fs::File::open(path)?;
        Self::headcounts_from_reader(file)
    }

    pub fn headcounts_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<TeamHeadcountLog>, TrainingImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let year_idx = column_index(&headers, &["year"], "Year")?;
        let team_idx = column_index(&headers, &["team"], "Team")?;
        let headcount_idx = column_index(
            &headers,
            &["headcount", "employees", "employee count"],
            "Headcount",
        )?;

        let mut logs = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let Some(year) = record.get(year_idx).and_then(parse_year) else {
                continue;
            };
            let Some(headcount) = record
                .get(headcount_idx)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
            else {
                continue;
            };
            let team = record.get(team_idx).map(str::trim).unwrap_or_default();
            if team.is_empty() {
                continue;
            }

            logs.push(TeamHeadcountLog {
                year,
                team: team.to_string(),
                headcount,
            });
        }

        Ok(logs)
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn parse_hours(raw: &str) -> Option<f64> {
    let hours = raw.trim().parse::<f64>().ok()?;
    (hours >= 0.0 && hours.is_finite()).then_some(hours)
}

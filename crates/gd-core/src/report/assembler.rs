//! Dataset assembly from fetched backend pages

use super::filter::RecordFilter;
use super::model::{ReportDataset, ReportRecord};
use super::validator::RecordValidator;
use crate::error::{GigDeskError, Result};
use crate::types::ReportPeriod;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Keys under which list endpoints nest their rows
const ROW_KEYS: [&str; 4] = ["data", "users", "items", "records"];

/// Gathers report rows in the order they were fetched
pub struct DatasetAssembler {
    period: ReportPeriod,
    records: Vec<ReportRecord>,
    filter: RecordFilter,
    validator: RecordValidator,
}

impl DatasetAssembler {
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            records: Vec::new(),
            filter: RecordFilter::default(),
            validator: RecordValidator::new(),
        }
    }

    /// Narrow the final dataset
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn push(&mut self, record: ReportRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ReportRecord>) {
        self.records.extend(records);
    }

    /// Number of rows gathered so far (before filtering)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append the rows of one backend response body
    pub fn add_page(&mut self, payload: Value) -> Result<usize> {
        let rows = extract_rows(payload)?;
        let count = rows.len();

        // A page is added whole or not at all
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value::<ReportRecord>(row).map_err(|e| {
                    GigDeskError::Serde(e).with_context(format!("Invalid record at row {}", index))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.records.extend(records);

        debug!("Assembled page with {} rows ({} total)", count, self.records.len());
        Ok(count)
    }

    /// Append the rows of a JSON response body given as text
    pub fn add_page_str(&mut self, body: &str) -> Result<usize> {
        let payload: Value = serde_json::from_str(body)?;
        self.add_page(payload)
    }

    /// Append the rows of a saved response body
    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(GigDeskError::FileNotFound(path.to_path_buf()));
        }
        let body = fs::read_to_string(path)?;
        self.add_page_str(&body)
            .map_err(|e| e.with_context(format!("Failed to read {}", path.display())))
    }

    /// Finish assembly: apply the filter and report suspicious rows
    pub fn finish(self) -> ReportDataset {
        let gathered = self.records.len();
        let records = self.filter.apply(self.records);

        for record in &records {
            for issue in self.validator.issues(record) {
                warn!("{}", issue);
            }
        }

        debug!(
            "Dataset ready: {} of {} rows for period {}",
            records.len(),
            gathered,
            self.period
        );
        ReportDataset::new(self.period, records)
    }
}

/// Find the row array inside a response body
///
/// Accepts a bare array, or an object nesting it one or two levels deep
/// (`{ "data": [...] }`, `{ "data": { "users": [...] } }`).
fn extract_rows(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => {
            for key in ROW_KEYS {
                match map.remove(key) {
                    Some(Value::Array(rows)) => return Ok(rows),
                    Some(Value::Object(inner)) => {
                        if let Some(rows) = nested_rows(inner) {
                            return Ok(rows);
                        }
                    }
                    _ => {}
                }
            }
            Err(GigDeskError::Validation(
                "Response contains no record list".to_string(),
            ))
        }
        _ => Err(GigDeskError::Validation(
            "Response must be a JSON array or object".to_string(),
        )),
    }
}

fn nested_rows(mut inner: serde_json::Map<String, Value>) -> Option<Vec<Value>> {
    ROW_KEYS.iter().find_map(|key| match inner.remove(*key) {
        Some(Value::Array(rows)) => Some(rows),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;

    fn row(id: u64, name: &str, status: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": format!("{}@x.com", name.to_lowercase()),
            "role": "freelancer",
            "status": status,
            "joined": "2024-12-20",
            "projects": id,
            "rating": 4.0
        })
    }

    #[test]
    fn test_bare_array() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        let added = assembler
            .add_page(json!([row(1, "A", "active"), row(2, "B", "active")]))
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(assembler.finish().len(), 2);
    }

    #[test]
    fn test_failed_page_adds_nothing() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        assembler.add_page(json!([row(1, "A", "active")])).unwrap();

        let err = assembler
            .add_page(json!([row(2, "B", "active"), { "id": 3 }]))
            .unwrap_err();
        assert!(err.to_string().contains("row 1"));
        assert_eq!(assembler.len(), 1);
    }

    #[test]
    fn test_nested_shapes() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Week);
        assembler
            .add_page(json!({ "success": true, "data": { "users": [row(1, "A", "active")], "total": 1 } }))
            .unwrap();
        assembler
            .add_page(json!({ "items": [row(2, "B", "active")] }))
            .unwrap();
        let dataset = assembler.finish();
        assert_eq!(dataset.period, ReportPeriod::Week);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_pages_keep_insertion_order() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        assembler.add_page(json!([row(9, "Z", "active")])).unwrap();
        assembler.add_page(json!([row(1, "A", "active")])).unwrap();
        let names: Vec<_> = assembler.finish().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }

    #[test]
    fn test_filter_applied_on_finish() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month)
            .with_filter(RecordFilter::new().status("inactive"));
        assembler
            .add_page(json!([row(1, "A", "active"), row(2, "B", "inactive")]))
            .unwrap();
        assert_eq!(assembler.len(), 2);
        let dataset = assembler.finish();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].role, Role::Freelancer);
    }

    #[test]
    fn test_invalid_rows_are_kept() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        let mut bad = row(1, "A", "active");
        bad["rating"] = json!(9.5);
        assembler.add_page(json!([bad])).unwrap();
        assert_eq!(assembler.finish().len(), 1);
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        assert!(assembler.add_page(json!({ "message": "ok" })).is_err());
        assert!(assembler.add_page(json!("text")).is_err());
    }

    #[test]
    fn test_bad_row_reports_index() {
        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        let err = assembler
            .add_page(json!([row(1, "A", "active"), { "id": 2 }]))
            .unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_add_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, json!({ "data": [row(1, "A", "active")] }).to_string()).unwrap();

        let mut assembler = DatasetAssembler::new(ReportPeriod::Month);
        assert_eq!(assembler.add_file(&path).unwrap(), 1);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            assembler.add_file(&missing),
            Err(GigDeskError::FileNotFound(_))
        ));
    }
}

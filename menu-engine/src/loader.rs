//! Dish data loaders.
//!
//! JSON input is an array of dish records with embedded sales entries, in the
//! same camelCase shape the engine serializes.
//!
//! CSV input has one row per sales entry. Expected CSV columns:
//!   dish_id, name, selling_price, profit_margin, updated_at, date,
//!   number_sold, popularity_percentage
//! A row with an empty `date` describes a dish without adding a sale; an
//! empty `profit_margin` means the margin is unknown.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::types::{DishRecord, SalesEntry};

/// One CSV row: dish columns repeated on every sales row.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRow {
    pub dish_id: String,
    pub name: String,
    pub selling_price: f64,
    pub profit_margin: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
    pub number_sold: Option<u64>,
    pub popularity_percentage: Option<f64>,
}

impl SalesRow {
    fn to_dish(&self) -> DishRecord {
        DishRecord {
            id: self.dish_id.clone(),
            name: self.name.clone(),
            selling_price: self.selling_price,
            profit_margin: self.profit_margin,
            updated_at: self.updated_at,
            sales_entries: None,
        }
    }

    fn to_sales_entry(&self) -> Option<SalesEntry> {
        self.date.map(|date| SalesEntry {
            date,
            number_sold: self.number_sold.unwrap_or(0),
            popularity_percentage: self.popularity_percentage.unwrap_or(0.0),
        })
    }
}

/// Load dishes from a JSON array.
pub fn load_dishes_json<R: Read>(reader: R) -> EngineResult<Vec<DishRecord>> {
    serde_json::from_reader(reader)
        .map_err(|e| EngineError::Load(format!("JSON parse error: {}", e)))
}

/// Load dishes from sales-row CSV.
pub fn load_dishes_csv<R: Read>(reader: R) -> EngineResult<Vec<DishRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: SalesRow = result.map_err(|e| {
            EngineError::Load(format!("CSV parse error at line {}: {}", line_num + 2, e))
        })?;
        rows.push(row);
    }

    Ok(group_by_dish(&rows))
}

/// Load dishes from a `.json` or `.csv` file.
pub fn load_dishes_file<P: AsRef<Path>>(path: P) -> EngineResult<Vec<DishRecord>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let open = || {
        std::fs::File::open(path).map_err(|e| {
            EngineError::Load(format!("Failed to open '{}': {}", path.display(), e))
        })
    };

    match extension.as_deref() {
        Some("json") => load_dishes_json(open()?),
        Some("csv") => load_dishes_csv(open()?),
        _ => Err(EngineError::Load(format!(
            "Unsupported file type '{}' (expected .json or .csv)",
            path.display()
        ))),
    }
}

/// Group rows by dish_id in first-seen order. Dish fields come from the
/// first row of each dish.
pub fn group_by_dish(rows: &[SalesRow]) -> Vec<DishRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut dishes: Vec<DishRecord> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.dish_id.as_str()).or_insert_with(|| {
            dishes.push(row.to_dish());
            dishes.len() - 1
        });
        if let Some(entry) = row.to_sales_entry() {
            dishes[slot]
                .sales_entries
                .get_or_insert_with(Vec::new)
                .push(entry);
        }
    }

    dishes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
dish_id,name,selling_price,profit_margin,updated_at,date,number_sold,popularity_percentage
d1,Eggs Benedict,24.00,72.5,2025-01-10T08:00:00Z,2025-01-01,30,12.5
d1,Eggs Benedict,24.00,72.5,2025-01-10T08:00:00Z,2025-01-02,18,9.0
d2,Smashed Avo,22.00,,,2025-01-01,41,17.0
d3,Seasonal Tart,14.50,65,,,,
";

    #[test]
    fn load_sample_csv() {
        let dishes = load_dishes_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dishes.len(), 3);

        assert_eq!(dishes[0].id, "d1");
        assert_eq!(dishes[0].name, "Eggs Benedict");
        assert_eq!(dishes[0].profit_margin, Some(72.5));
        assert!(dishes[0].updated_at.is_some());
        let entries = dishes[0].sales_entries.as_ref().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].number_sold, 18);

        assert_eq!(dishes[1].profit_margin, None);
        assert_eq!(dishes[1].updated_at, None);
    }

    #[test]
    fn dish_row_without_date_has_no_sales() {
        let dishes = load_dishes_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dishes[2].name, "Seasonal Tart");
        assert!(dishes[2].sales_entries.is_none());
    }

    #[test]
    fn csv_error_reports_line_number() {
        let csv_data = "\
dish_id,name,selling_price,profit_margin,updated_at,date,number_sold,popularity_percentage
d1,Soup,9.5,60,,2025-01-01,4,3.0
d2,Salad,cheap,60,,2025-01-01,4,3.0
";
        let err = load_dishes_csv(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Load(_)));
        assert!(err.to_string().contains("line 3"), "got: {}", err);
    }

    #[test]
    fn load_json_array() {
        let json = r#"[
            {"id": "d1", "name": "Latte", "sellingPrice": 5.0, "profitMargin": 80.0,
             "salesEntries": [{"date": "2025-01-01", "numberSold": 100, "popularityPercentage": 25.0}]},
            {"id": "d2", "name": "Tea", "sellingPrice": 4.0}
        ]"#;
        let dishes = load_dishes_json(json.as_bytes()).unwrap();
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].sales_entries.as_ref().unwrap()[0].number_sold, 100);
        assert_eq!(dishes[1].profit_margin, None);
        assert!(dishes[1].sales_entries.is_none());
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let dishes = load_dishes_file(file.path()).unwrap();
        assert_eq!(dishes.len(), 3);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = load_dishes_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}

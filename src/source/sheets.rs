//! Sheets API spreadsheet JSON.
//!
//! Accepts the grid-data shape (`sheets[].data[].rowData[].values[]`) and, per
//! sheet, a plain `values` matrix as returned by the values endpoint.

use crate::model::{Sheet, Spreadsheet};
use serde::Deserialize;

const UNTITLED_SPREADSHEET: &str = "Untitled Spreadsheet";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetWire {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub properties: PropertiesWire,
    #[serde(default)]
    pub sheets: Vec<SheetWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertiesWire {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetWire {
    #[serde(default)]
    pub properties: PropertiesWire,
    #[serde(default)]
    pub data: Vec<GridDataWire>,
    #[serde(default)]
    pub values: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDataWire {
    #[serde(default)]
    pub row_data: Vec<RowDataWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowDataWire {
    #[serde(default)]
    pub values: Vec<CellDataWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDataWire {
    #[serde(default)]
    pub formatted_value: Option<String>,
}

impl SpreadsheetWire {
    /// Converts the response into the spreadsheet model.
    ///
    /// Trailing empty rows are dropped and the remaining rows are padded to a
    /// rectangle.
    pub fn into_spreadsheet(self) -> Spreadsheet {
        let title = self
            .properties
            .title
            .unwrap_or_else(|| UNTITLED_SPREADSHEET.to_string());

        let mut spreadsheet = Spreadsheet::new(title);
        spreadsheet.spreadsheet_id = self.spreadsheet_id;

        for (idx, sheet) in self.sheets.into_iter().enumerate() {
            spreadsheet.push_sheet(sheet.into_sheet(idx));
        }

        spreadsheet
    }
}

impl SheetWire {
    fn into_sheet(self, index: usize) -> Sheet {
        let name = self
            .properties
            .title
            .unwrap_or_else(|| format!("Sheet{}", index + 1));

        let mut rows: Vec<Vec<String>> = match self.values {
            Some(values) => values
                .into_iter()
                .map(|row| row.into_iter().map(value_to_string).collect())
                .collect(),
            None => self
                .data
                .into_iter()
                .flat_map(|grid| grid.row_data)
                .map(|row| {
                    row.values
                        .into_iter()
                        .map(|cell| cell.formatted_value.unwrap_or_default())
                        .collect()
                })
                .collect(),
        };

        while rows
            .last()
            .is_some_and(|row| row.iter().all(String::is_empty))
        {
            rows.pop();
        }

        let mut sheet = Sheet { name, rows };
        sheet.pad_rows();
        sheet
    }
}

fn value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

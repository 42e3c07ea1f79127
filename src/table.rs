use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::{Alignment, Style};

use crate::error::FareError;
use crate::ranker::{ItineraryOption, FIELDS_PER_OPTION};
use crate::weekend::WeekendWindow;

/// Columns repeated for every kept option of a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionField {
    SaleTotal,
    OutboundFlightNumber,
    OutboundOrigin,
    OutboundDestination,
    OutboundDepartureTime,
    OutboundArrivalTime,
    InboundFlightNumber,
    InboundOrigin,
    InboundDestination,
    InboundDepartureTime,
    InboundArrivalTime,
}

impl OptionField {
    pub const ALL: [OptionField; FIELDS_PER_OPTION] = [
        OptionField::SaleTotal,
        OptionField::OutboundFlightNumber,
        OptionField::OutboundOrigin,
        OptionField::OutboundDestination,
        OptionField::OutboundDepartureTime,
        OptionField::OutboundArrivalTime,
        OptionField::InboundFlightNumber,
        OptionField::InboundOrigin,
        OptionField::InboundDestination,
        OptionField::InboundDepartureTime,
        OptionField::InboundArrivalTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptionField::SaleTotal => "Sale Total",
            OptionField::OutboundFlightNumber | OptionField::InboundFlightNumber => {
                "Flight Number"
            }
            OptionField::OutboundOrigin | OptionField::InboundOrigin => "Origin",
            OptionField::OutboundDestination | OptionField::InboundDestination => "Destination",
            OptionField::OutboundDepartureTime | OptionField::InboundDepartureTime => {
                "Departure Time"
            }
            OptionField::OutboundArrivalTime | OptionField::InboundArrivalTime => "Arrival Time",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

/// Two-level column label: option ordinal (from 1) and field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    pub option: usize,
    pub field: OptionField,
}

impl ColumnKey {
    pub fn option_label(&self) -> String {
        format!("Option {}", self.option)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub window: WeekendWindow,
    pub cells: Vec<Option<String>>,
}

/// Cheapest options per weekend, one row per weekend in the order pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    options_per_weekend: usize,
    columns: Vec<ColumnKey>,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(options_per_weekend: usize) -> Self {
        let columns = (1..=options_per_weekend)
            .flat_map(|option| {
                OptionField::ALL
                    .iter()
                    .map(move |&field| ColumnKey { option, field })
            })
            .collect();

        Self {
            options_per_weekend,
            columns,
            rows: Vec::new(),
        }
    }

    /// Adds a weekend row, keeping at most `options_per_weekend` options and
    /// padding the remaining cells with `None`.
    pub fn push(&mut self, window: WeekendWindow, options: &[ItineraryOption]) {
        let mut cells: Vec<Option<String>> = options
            .iter()
            .take(self.options_per_weekend)
            .flat_map(|option| option.fields().into_iter().map(Some))
            .collect();
        cells.resize(self.columns.len(), None);

        self.rows.push(ResultRow { window, cells });
    }

    pub fn options_per_weekend(&self) -> usize {
        self.options_per_weekend
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field count of a flattened row: the two dates plus every option column.
    pub fn row_width(&self) -> usize {
        2 + self.columns.len()
    }

    pub fn get(&self, window: &WeekendWindow, column: ColumnKey) -> Option<&str> {
        if column.option == 0 || column.option > self.options_per_weekend {
            return None;
        }
        let index = (column.option - 1) * FIELDS_PER_OPTION + column.field.position();
        self.rows
            .iter()
            .find(|row| &row.window == window)
            .and_then(|row| row.cells.get(index))
            .and_then(|cell| cell.as_deref())
    }

    pub fn save(&self, path: &Path) -> Result<(), FareError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, FareError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Terminal rendering with a two-row header: option, then field.
    pub fn render(&self) -> String {
        let mut builder = Builder::default();

        let mut options_header = vec!["Start Date".to_string(), "End Date".to_string()];
        options_header.extend(self.columns.iter().map(|c| c.option_label()));
        builder.push_record(options_header);

        let mut fields_header = vec![String::new(), String::new()];
        fields_header.extend(self.columns.iter().map(|c| c.field.label().to_string()));
        builder.push_record(fields_header);

        for row in &self.rows {
            let mut record = vec![
                row.window.departure.format("%Y-%m-%d %H:%M").to_string(),
                row.window.return_at.format("%Y-%m-%d %H:%M").to_string(),
            ];
            record.extend(row.cells.iter().map(|c| c.clone().unwrap_or_default()));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.with(Alignment::left());
        table.to_string()
    }
}

/// `flights.<DEST>.json` in the working directory.
///
/// The destination must stay a single file name component.
pub fn output_path(destination: &str) -> Result<PathBuf, FareError> {
    if destination.is_empty()
        || destination == ".."
        || destination.contains(['/', '\\'])
        || destination.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(FareError::InvalidDestination(destination.to_string()));
    }
    Ok(PathBuf::from(format!("flights.{}.json", destination)))
}

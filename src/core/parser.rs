use crate::models::{GeoPoint, Provider};
use std::collections::HashMap;
use thiserror::Error;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Literal value marking a provider as accepting new patients
pub const ACCEPTING_TRUE: &str = "True";

/// Source column names
pub mod columns {
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const DEGREE: &str = "Degree";
    pub const SPECIALTY: &str = "Specialty";
    pub const GENDER: &str = "Gender";
    pub const PRACTICE: &str = "Practice";
    pub const ADDRESS: &str = "Practice:Address";
    pub const ADDRESS_2: &str = "Practice:Address 2";
    pub const CITY: &str = "Practice:City";
    pub const ZIP: &str = "Practice:Zip";
    pub const MAIN_LINE: &str = "Practice:Main Line";
    pub const LATITUDE: &str = "Practice:Latitude";
    pub const LONGITUDE: &str = "Practice:Longitude";
    pub const ACCEPTING: &str = "Accepting New Patients";
    pub const ID: &str = "ID";
}

/// Errors that can occur while loading tabular provider data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input has no header row")]
    MissingHeader,
}

/// One data row keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Value for a column, or an empty string if the row or header lacks it
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Split a single line on unquoted delimiters
///
/// A doubled quote inside a quoted field yields one literal quote.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Parse header-plus-rows text into field-keyed rows
///
/// A leading byte-order mark is dropped and the input trimmed, so trailing
/// blank lines never produce rows.
/// Rows shorter than the header get empty strings for the missing fields;
/// fields beyond the header are dropped.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, ParseError> {
    let trimmed = text.trim_start_matches(BYTE_ORDER_MARK).trim();
    if trimmed.is_empty() {
        return Err(ParseError::MissingHeader);
    }

    let mut lines = trimmed.lines();
    let header_line = lines.next().ok_or(ParseError::MissingHeader)?;
    let headers = parse_line(header_line);

    let rows = lines
        .map(|line| {
            let mut values = parse_line(line).into_iter();
            let fields = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            Row { fields }
        })
        .collect();

    Ok(rows)
}

impl From<&Row> for Provider {
    fn from(row: &Row) -> Self {
        let address_line2 = row.get(columns::ADDRESS_2);

        Provider {
            id: row.get(columns::ID).to_string(),
            first_name: row.get(columns::FIRST_NAME).to_string(),
            last_name: row.get(columns::LAST_NAME).to_string(),
            degree: row.get(columns::DEGREE).to_string(),
            specialty: row.get(columns::SPECIALTY).to_string(),
            gender: row.get(columns::GENDER).to_string(),
            practice_name: row.get(columns::PRACTICE).to_string(),
            address_line1: row.get(columns::ADDRESS).to_string(),
            address_line2: (!address_line2.is_empty()).then(|| address_line2.to_string()),
            city: row.get(columns::CITY).to_string(),
            zip: row.get(columns::ZIP).to_string(),
            phone: row.get(columns::MAIN_LINE).to_string(),
            coordinates: GeoPoint::parse(row.get(columns::LATITUDE), row.get(columns::LONGITUDE)),
            accepting_new_patients: row.get(columns::ACCEPTING) == ACCEPTING_TRUE,
        }
    }
}

/// Parse provider text straight into records
pub fn parse_providers(text: &str) -> Result<Vec<Provider>, ParseError> {
    let rows = parse_rows(text)?;
    let providers: Vec<Provider> = rows.iter().map(Provider::from).collect();

    let without_coordinates = providers.iter().filter(|p| !p.has_coordinates()).count();
    if without_coordinates > 0 {
        tracing::debug!(
            "{} of {} providers have no usable coordinates",
            without_coordinates,
            providers.len()
        );
    }

    Ok(providers)
}

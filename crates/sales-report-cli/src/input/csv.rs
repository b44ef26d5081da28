use sales_report_core::record::RawRow;

/// Read delimited text with a header row into raw rows.
///
/// Columns are matched by header name; extra columns are ignored and a
/// missing one fails the whole read.
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<Vec<RawRow>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.map_err(|e| format!("Failed to read data row {}: {}", i + 1, e))?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), delimiter = %(delimiter as char), "read delimited input");
    Ok(rows)
}

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use sales_report_core::record::{self, RawRow, TransactionRecord};
use sales_report_core::report::ReportConfig;

use crate::input::{self, Encoding};

/// Where the sales rows come from and how to read them
#[derive(Args)]
pub struct InputArgs {
    /// Path to the sales file: `.json` is read as an array of rows, anything
    /// else as delimited text. Reads piped stdin when omitted.
    #[arg(long)]
    pub input: Option<String>,

    /// Field delimiter for delimited input
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    /// Text encoding of delimited input
    #[arg(long, value_enum, default_value_t = Encoding::Latin1)]
    pub encoding: Encoding,
}

/// Report policy: config file, reporting date and highlight threshold
#[derive(Args)]
pub struct PolicyArgs {
    /// Path to JSON report config file
    #[arg(long)]
    pub config: Option<String>,

    /// Reporting date (YYYY-MM-DD) for overdue days; defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Major-debtor threshold (overrides the config file)
    #[arg(long)]
    pub threshold: Option<Decimal>,
}

fn delimiter_byte(delimiter: char) -> Result<u8, Box<dyn std::error::Error>> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(format!("Delimiter must be a single ASCII character, got '{}'", delimiter).into())
    }
}

/// Read and validate every input row. Any invalid row aborts the run.
pub fn load_records(args: &InputArgs) -> Result<Vec<TransactionRecord>, Box<dyn std::error::Error>> {
    let rows: Vec<RawRow> = if let Some(ref path) = args.input {
        if input::file::is_json(path) {
            input::file::read_json(path)?
        } else {
            let text = input::file::read_text(path, args.encoding)?;
            input::csv::parse_delimited(&text, delimiter_byte(args.delimiter)?)?
        }
    } else if let Some(text) = input::stdin::read_stdin(args.encoding)? {
        input::csv::parse_delimited(&text, delimiter_byte(args.delimiter)?)?
    } else {
        return Err("--input <file> or piped stdin required".into());
    };

    let records = record::parse_rows(&rows)?;
    tracing::info!(records = records.len(), "loaded sales records");
    Ok(records)
}

impl PolicyArgs {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<(ReportConfig, NaiveDate), Box<dyn std::error::Error>> {
        let mut config = match self.config {
            Some(ref path) => input::file::read_json::<ReportConfig>(path)?,
            None => ReportConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.major_debtor_threshold = threshold;
        }

        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        tracing::debug!(%today, threshold = %config.major_debtor_threshold, "resolved report policy");
        Ok((config, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn temp_file(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    fn input_args(path: &tempfile::NamedTempFile) -> InputArgs {
        InputArgs {
            input: Some(path.path().to_str().unwrap().to_string()),
            delimiter: ';',
            encoding: Encoding::Latin1,
        }
    }

    #[test]
    fn test_load_latin1_csv() {
        let mut bytes = b"QTD;TOTAL DA COMPRA;DATA_VENDA;DATA_PG;STATUS_PEDIDO;NOME\n".to_vec();
        bytes.extend_from_slice(b"2;100,50;05/01/2024;10/01/2024;PAGO;Jo\xe3o\n");
        let file = temp_file(".csv", &bytes);

        let records = load_records(&input_args(&file)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, dec!(100.50));
        assert_eq!(records[0].customer_name, "João");
    }

    #[test]
    fn test_load_json_rows() {
        let json = r#"[{"QTD":"3","TOTAL DA COMPRA":"50,00","DATA_VENDA":"05/01/2024",
            "DATA_PG":"01/02/2024","STATUS_PEDIDO":"PENDENTE DE PAGAMENTO","NOME":"Bruno"}]"#;
        let file = temp_file(".json", json.as_bytes());

        let records = load_records(&input_args(&file)).unwrap();
        assert_eq!(records[0].quantity, 3);
        assert!(records[0].status.is_pending());
    }

    #[test]
    fn test_invalid_row_is_an_error() {
        let bytes = b"QTD;TOTAL DA COMPRA;DATA_VENDA;DATA_PG;STATUS_PEDIDO;NOME\n\
                      x;1,00;05/01/2024;10/01/2024;PAGO;Ana\n";
        let file = temp_file(".csv", bytes);

        let err = load_records(&input_args(&file)).unwrap_err();
        assert!(err.to_string().contains("QTD"));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        assert!(delimiter_byte('§').is_err());
        assert_eq!(delimiter_byte(',').unwrap(), b',');
    }

    #[test]
    fn test_policy_flags_override_config_file() {
        let file = temp_file(".json", br#"{"major_debtor_threshold": "2500"}"#);
        let policy = PolicyArgs {
            config: Some(file.path().to_str().unwrap().to_string()),
            today: NaiveDate::from_ymd_opt(2024, 3, 15),
            threshold: None,
        };
        let (config, today) = policy.resolve().unwrap();
        assert_eq!(config.major_debtor_threshold, dec!(2500));
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let policy = PolicyArgs {
            threshold: Some(dec!(100)),
            ..policy
        };
        assert_eq!(policy.resolve().unwrap().0.major_debtor_threshold, dec!(100));
    }
}

pub mod csv;
pub mod file;
pub mod stdin;

use clap::ValueEnum;

/// Text encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// ISO-8859-1, the encoding the sales sheet is exported in
    Latin1,
    Utf8,
}

/// Decode raw bytes into text, dropping a leading UTF-8 byte order mark.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String, Box<dyn std::error::Error>> {
    match encoding {
        Encoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        Encoding::Utf8 => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                return Err("Input is not valid UTF-8; try --encoding latin1".into());
            }
            Ok(text.into_owned())
        }
    }
}

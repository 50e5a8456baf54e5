use roxmltree::{Document, ParsingOptions};

use crate::error::IngestError;
use crate::telemetry;
use crate::types::Format;

/// Velger format fra filnavnet (suffiks, case-insensitivt). Ingen parsing skjer her.
pub fn sniff_format(file_name: &str) -> Result<Format, IngestError> {
    let lc = file_name.to_ascii_lowercase();
    if lc.ends_with(".gpx") {
        Ok(Format::Gpx)
    } else if lc.ends_with(".tcx") {
        Ok(Format::Tcx)
    } else {
        Err(IngestError::UnsupportedFormat(file_name.to_string()))
    }
}

/// Bytes → UTF-8 tekst. BOM fjernes.
pub fn decode_text(bytes: &[u8]) -> Result<&str, IngestError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| IngestError::MalformedDocument(format!("not valid UTF-8: {e}")))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Parser markup. Ugyldig XML er en feil, aldri et tomt resultat.
pub fn parse_document(text: &str) -> Result<Document<'_>, IngestError> {
    telemetry::document_parse_attempted();
    let opts = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    Document::parse_with_options(text, opts).map_err(|e| IngestError::MalformedDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_match_is_case_insensitive() {
        assert_eq!(sniff_format("ride.gpx").unwrap(), Format::Gpx);
        assert_eq!(sniff_format("RIDE.GPX").unwrap(), Format::Gpx);
        assert_eq!(sniff_format("Morning_Ride.Tcx").unwrap(), Format::Tcx);
    }

    #[test]
    fn other_extensions_are_rejected() {
        for name in ["ride.fit", "ride.gpx.zip", "gpx", "ride", "ride.gpx ", " ride.tcx\n"] {
            assert!(matches!(sniff_format(name), Err(IngestError::UnsupportedFormat(_))), "{name}");
        }
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(decode_text("\u{feff}<a/>".as_bytes()).unwrap(), "<a/>");
        assert!(matches!(decode_text(&[0xff, 0xfe, 0x00]), Err(IngestError::MalformedDocument(_))));
    }
}

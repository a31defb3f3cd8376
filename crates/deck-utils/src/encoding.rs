//! Character decoding for tool output.

use encoding_rs::Encoding;

/// Decode tool output to UTF-8.
/// Tries BOM detection first, then UTF-8, then falls back to Windows-1252.
pub fn decode_to_utf8(bytes: &[u8]) -> (String, &'static str) {
    // Check BOM
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return (String::from_utf8_lossy(&bytes[3..]).to_string(), "UTF-8");
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (result, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return (result.to_string(), "UTF-16LE");
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (result, _, _) = encoding_rs::UTF_16BE.decode(bytes);
        return (result.to_string(), "UTF-16BE");
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), "UTF-8"),
        Err(_) => {
            let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            (result.to_string(), "Windows-1252")
        }
    }
}

/// Decode bytes using a specific encoding name.
pub fn decode_with_encoding(bytes: &[u8], encoding_name: &str) -> Option<String> {
    let encoding = Encoding::for_label(encoding_name.as_bytes())?;
    let (result, _) = encoding.decode_without_bom_handling(bytes);
    Some(result.to_string())
}

/// Decode a raw PDF content dump. Uncompressed streams are arbitrary bytes,
/// so every byte must map to some character.
pub fn decode_latin1(bytes: &[u8]) -> String {
    decode_with_encoding(bytes, "iso-8859-1")
        .unwrap_or_else(|| bytes.iter().map(|&b| b as char).collect())
}

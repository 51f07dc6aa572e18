use serde_json::Value;

pub const STATUSES: [&str; 4] = ["present", "excused", "sick", "absent"];

pub fn is_valid_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

/// Extracts the check-in code from raw scanner input.
///
/// Camera scans hand back the QR payload ({"token": "ABC123"}), manual
/// entry hands back the bare code. Both land here: if the input parses
/// as JSON and carries a usable "token" field, that field wins;
/// otherwise the trimmed input itself is treated as the code. Codes are
/// stored uppercase, so the result is uppercased too.
pub fn decode_scan_input(input: &str) -> Option<String> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }

    let code = match serde_json::from_str::<Value>(raw) {
        Ok(value) => match value.get("token").and_then(Value::as_str) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    };

    Some(code.to_uppercase())
}

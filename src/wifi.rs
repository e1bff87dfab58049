//! Wi-Fi network configuration carried as a QR payload
//!
//! ```text
//! WIFI:S:<ssid>;T:<WPA|WEP|>;P:<password>;H:<true|false|>;;
//! ```
//!
//! Inside the SSID and password the characters `\ ; , " :` are escaped with a
//! backslash. Fields may come in any order; only `S:` is required.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::WifiError;

const PREFIX: &str = "WIFI:";

/// Characters escaped inside SSID and password values.
pub const SPECIAL_CHARACTERS: &str = "\\;,\":";

fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}

/// Security type from the `T:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WifiEncryption {
    /// WPA/WPA2 personal
    Wpa,
    /// WEP
    Wep,
}

impl WifiEncryption {
    /// Value written after `T:`.
    pub fn as_str(self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
        }
    }
}

/// Parsed network configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiConfig {
    /// Network name, never empty
    pub ssid: String,
    /// Pre-shared key; empty for open networks
    pub password: String,
    /// `None` for open networks
    pub encryption: Option<WifiEncryption>,
    /// The network does not broadcast its SSID
    pub hidden: bool,
}

impl WifiConfig {
    /// WPA network, or an open one when `password` is empty.
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        let encryption = (!password.is_empty()).then_some(WifiEncryption::Wpa);
        Self {
            ssid: ssid.into(),
            password,
            encryption,
            hidden: false,
        }
    }

    /// Parse a `WIFI:` payload, e.g. the data string of a decoded symbol.
    pub fn parse(payload: &str) -> Result<Self, WifiError> {
        let result = parse_fields(payload);
        if let Err(err) = &result {
            debug!("Rejected Wi-Fi payload: {}", err);
        }
        result
    }

    /// Payload text with the SSID and password escaped.
    pub fn to_payload(&self) -> String {
        let mut payload = format!("{PREFIX}S:{};", escape_special_characters(&self.ssid));
        if let Some(encryption) = self.encryption {
            payload.push_str(&format!("T:{};", encryption.as_str()));
        }
        if !self.password.is_empty() {
            payload.push_str(&format!("P:{};", escape_special_characters(&self.password)));
        }
        if self.hidden {
            payload.push_str("H:true;");
        }
        payload.push(';');
        payload
    }
}

impl FromStr for WifiConfig {
    type Err = WifiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WifiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_payload())
    }
}

fn parse_fields(payload: &str) -> Result<WifiConfig, WifiError> {
    let fields = payload
        .strip_prefix(PREFIX)
        .filter(|rest| !rest.is_empty())
        .ok_or(WifiError::InvalidPrefix)?;
    let bytes = fields.as_bytes();

    let mut ssid: Option<String> = None;
    let mut password: Option<String> = None;
    let mut encryption: Option<Option<WifiEncryption>> = None;
    let mut hidden: Option<bool> = None;

    let mut start = 0;
    while start + 1 < bytes.len() {
        let end = field_end(bytes, start).ok_or(WifiError::InvalidFieldFormat)?;
        if end - start < 2 {
            return Err(WifiError::InvalidFieldFormat);
        }
        let (tag, value) = fields[start..end]
            .split_at_checked(2)
            .ok_or(WifiError::InvalidFieldType)?;

        match tag {
            "S:" => {
                if ssid.is_some() {
                    return Err(WifiError::DuplicateFieldType);
                }
                let value = unescape_special_characters(value)
                    .filter(|value| !value.is_empty())
                    .ok_or(WifiError::InvalidFieldData)?;
                ssid = Some(value);
            }
            "T:" => {
                if encryption.is_some() {
                    return Err(WifiError::DuplicateFieldType);
                }
                encryption = Some(match value {
                    "" => None,
                    "WPA" => Some(WifiEncryption::Wpa),
                    "WEP" => Some(WifiEncryption::Wep),
                    _ => return Err(WifiError::InvalidFieldData),
                });
            }
            "P:" => {
                if password.is_some() {
                    return Err(WifiError::DuplicateFieldType);
                }
                password = Some(unescape_special_characters(value).ok_or(WifiError::InvalidFieldData)?);
            }
            "H:" => {
                if hidden.is_some() {
                    return Err(WifiError::DuplicateFieldType);
                }
                hidden = Some(match value {
                    "" | "false" => false,
                    "true" => true,
                    _ => return Err(WifiError::InvalidFieldData),
                });
            }
            _ => return Err(WifiError::InvalidFieldType),
        }

        start = end + 1;
    }

    let ssid = ssid.ok_or(WifiError::InvalidFieldData)?;
    let password = password.unwrap_or_default();
    let encryption = encryption.flatten();
    if password.is_empty() && encryption.is_some() {
        return Err(WifiError::InvalidFieldData);
    }

    // Exactly one `;` must follow the last field
    if start + 1 != bytes.len() || bytes[start] != b';' {
        return Err(WifiError::InvalidTermination);
    }

    Ok(WifiConfig {
        ssid,
        password,
        encryption,
        hidden: hidden.unwrap_or(false),
    })
}

/// Index of the first `;` at or after `start` not escaped by an odd run of backslashes.
fn field_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'\\' => escaped = !escaped,
            b';' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Prefix every character of [`SPECIAL_CHARACTERS`] with a backslash.
pub fn escape_special_characters(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if is_special(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Undo [`escape_special_characters`].
///
/// A backslash before any other character is kept as is. A value made of a
/// single unescaped special character is rejected.
pub fn unescape_special_characters(escaped: &str) -> Option<String> {
    if escaped.len() == 1 && escaped.chars().all(is_special) {
        return None;
    }

    let mut raw = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        let c = match c {
            '\\' => chars.next_if(|&next| is_special(next)).unwrap_or('\\'),
            c => c,
        };
        raw.push(c);
    }
    Some(raw)
}

use std::fmt::Write;

/// Characters stripped from both ends of a telemetry line
const TRIMMED: &[char] = &[';', '\r', '\n', '\t'];

pub const SEPARATOR: char = ';';

/// The single-letter keys used on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Current,
    Voltage,
    Thrust,
    Kv,
    Rpm,
    Throttle,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Rpm,
        Self::Voltage,
        Self::Current,
        Self::Thrust,
        Self::Kv,
        Self::Throttle,
    ];

    pub fn key(self) -> char {
        match self {
            Self::Current => 'A',
            Self::Voltage => 'V',
            Self::Thrust => 'T',
            Self::Kv => 'K',
            Self::Rpm => 'R',
            Self::Throttle => 'G', // "gaz"
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Current => "Current",
            Self::Voltage => "Voltage",
            Self::Thrust => "Thrust",
            Self::Kv => "KV",
            Self::Rpm => "RPM",
            Self::Throttle => "Throttle",
        })
    }
}

/// Splits a line into `(key, value)` pairs. Empty segments are skipped.
pub fn split_fields(line: &str) -> impl Iterator<Item = (char, &str)> {
    line.trim_matches(TRIMMED)
        .split(SEPARATOR)
        .filter_map(|part| {
            let key = part.chars().next()?;
            Some((key, part[key.len_utf8()..].trim()))
        })
}

/// Parse a plain decimal number: optional sign, digits, at most one point.
/// Exponents, `inf` and `NaN` are not numbers the stand sends.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let unsigned = value.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(value);

    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }

    if digits == 0 || points > 1 {
        return None;
    }

    value.parse().ok()
}

pub fn encode_field(buffer: &mut String, field: Field, value: impl std::fmt::Display) {
    // Writing into a String cannot fail
    let _ = write!(buffer, "{}{}{}", field.key(), value, SEPARATOR);
}

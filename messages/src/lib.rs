mod encoding;

pub use encoding::Field;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Column order of [`Reading::to_csv`]
pub const CSV_HEADER: &str = "Throttle,Rpm,Voltage,Current,Thrust,KV";

/// The byte the stand answers with when it is ready, and after accepting settings
pub const ACK: u8 = 101;

/// The stand is ready, or has accepted a command, when it has sent exactly one [`ACK`]
pub fn is_ack(response: &[u8]) -> bool {
    response == [ACK]
}

/// Commands to the stand. Throttle and emergency stop are left to the stand's own controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Magnet poles of the motor under test, which the stand divides electrical RPM by
    SetSettings { poles: u8 },
}

impl Command {
    /// The wire form, one line per command
    pub fn encode(&self) -> String {
        match self {
            Self::SetSettings { poles } => format!("{},{},1;\n", ACK, poles),
        }
    }
}

/// Serial speeds the stand firmware can be built with
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum BaudRate {
    Slow = 9600,
    Normal = 19200,
    Fast = 38400,
}

impl BaudRate {
    pub fn bits_per_second(self) -> u32 {
        self as u32
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self::Fast
    }
}

impl std::fmt::Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits_per_second())
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown telemetry field {0:?}")]
    UnknownField(char),
    #[error("Invalid {field} value {value:?}")]
    InvalidValue { field: Field, value: String },
}

/// One line of telemetry from the stand
///
/// Thrust is in grams, current in amps and voltage in volts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub throttle: i32,
    pub rpm: i32,
    pub kv: i32,
    pub current: f64,
    pub thrust: f64,
    pub voltage: f64,
}

impl Reading {
    /// Parse a telemetry line, skipping unknown keys and values which don't parse.
    ///
    /// The stand sends partial lines while it is starting up, so this never fails.
    pub fn parse(line: &str) -> Self {
        let mut reading = Self::default();
        for (key, value) in encoding::split_fields(line) {
            if let Some(field) = Field::from_key(key) {
                // Keep the previous value if this one is garbled
                let _ = reading.set(field, value);
            }
        }
        reading
    }

    /// Parse a telemetry line, rejecting unknown keys and malformed values
    pub fn try_parse(line: &str) -> Result<Self, ParseError> {
        let mut reading = Self::default();
        for (key, value) in encoding::split_fields(line) {
            let field = Field::from_key(key).ok_or(ParseError::UnknownField(key))?;
            reading.set(field, value)?;
        }
        Ok(reading)
    }

    fn set(&mut self, field: Field, value: &str) -> Result<(), ParseError> {
        let invalid = || ParseError::InvalidValue {
            field,
            value: value.into(),
        };
        let decimal = || encoding::parse_decimal(value).ok_or_else(|| invalid());

        match field {
            Field::Current => self.current = decimal()?,
            Field::Voltage => self.voltage = decimal()?,
            Field::Thrust => self.thrust = decimal()?,
            Field::Kv => self.kv = value.parse().map_err(|_| invalid())?,
            Field::Rpm => self.rpm = value.parse().map_err(|_| invalid())?,
            Field::Throttle => self.throttle = value.parse().map_err(|_| invalid())?,
        }

        Ok(())
    }

    /// The motor is being driven and at least one sensor reports something
    pub fn is_populated(&self) -> bool {
        self.throttle > 0
            && (self.rpm > 0 || self.thrust > 0.0 || self.kv > 0 || self.current > 0.0)
    }

    /// The wire form, as sent by the stand
    pub fn encode(&self) -> String {
        let mut line = String::new();
        encoding::encode_field(&mut line, Field::Rpm, self.rpm);
        encoding::encode_field(&mut line, Field::Voltage, self.voltage);
        encoding::encode_field(&mut line, Field::Current, self.current);
        encoding::encode_field(&mut line, Field::Thrust, self.thrust);
        encoding::encode_field(&mut line, Field::Kv, self.kv);
        encoding::encode_field(&mut line, Field::Throttle, self.throttle);
        line
    }

    /// A row matching [`CSV_HEADER`]
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.throttle, self.rpm, self.voltage, self.current, self.thrust, self.kv
        )
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Throttle: {}\t RPM: {}\t THRUST: {} Gramms\t Current: {} Amps\t Voltage: {} Volts\t KV: {}",
            self.throttle, self.rpm, self.thrust, self.current, self.voltage, self.kv
        )
    }
}

impl std::str::FromStr for Reading {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

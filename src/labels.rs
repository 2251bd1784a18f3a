//! The text shown on the stand's LCD

/// Every label compiled into the firmware image, in storage order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelId {
    MotorType,
    Motor12S14P,
    Motor9S12P,
    BladesCount,
    Edit,
    ThrustSensor,
    ThrustSensorEnabled,
    ThrustSensorDisabled,
    Rpm,
    SelectMode,
    ModeConnected,
    ModeHandheld,
    Header1,
    Header2,
    Header3,
}

impl LabelId {
    pub const ALL: [Self; 15] = [
        Self::MotorType,
        Self::Motor12S14P,
        Self::Motor9S12P,
        Self::BladesCount,
        Self::Edit,
        Self::ThrustSensor,
        Self::ThrustSensorEnabled,
        Self::ThrustSensorDisabled,
        Self::Rpm,
        Self::SelectMode,
        Self::ModeConnected,
        Self::ModeHandheld,
        Self::Header1,
        Self::Header2,
        Self::Header3,
    ];

    pub const fn text(self) -> &'static str {
        match self {
            Self::MotorType => "MOTOR TYPE",
            Self::Motor12S14P => "12S14P",
            Self::Motor9S12P => "9S12P",
            Self::BladesCount => "BLADES COUNT",
            Self::Edit => " <           >  ", // option value goes between the arrows
            Self::ThrustSensor => "THRUST SENSOR",
            Self::ThrustSensorEnabled => "ENABLED",
            Self::ThrustSensorDisabled => "DISABLED",
            Self::Rpm => "RPM:",
            Self::SelectMode => "SELECT MODE",
            Self::ModeConnected => "CONNECTED",
            Self::ModeHandheld => "HANDHELD",
            Self::Header1 => "RPM:  VOLT: KV:",
            Self::Header2 => "THRUST:  A:",
            Self::Header3 => "THROTTLE:",
        }
    }
}

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.text())
    }
}

/// An ordered list of labels for one screen or menu. Position is the on-screen index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelTable {
    pub name: &'static str,
    labels: &'static [LabelId],
}

impl LabelTable {
    pub const fn new(name: &'static str, labels: &'static [LabelId]) -> Self {
        Self { name, labels }
    }

    pub fn get(&self, index: usize) -> Option<LabelId> {
        self.labels.get(index).copied()
    }

    pub fn position(&self, label: LabelId) -> Option<usize> {
        self.labels.iter().position(|&id| id == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LabelId> + 'static {
        self.labels.iter().copied()
    }
}

/// Main screen, one label per LCD line
pub const HEADERS: LabelTable = LabelTable::new(
    "headers",
    &[LabelId::Header1, LabelId::Header2, LabelId::Header3],
);

/// Settings panel fields while connected to the stand
pub const SETTINGS_CONNECTED: LabelTable = LabelTable::new(
    "settings_connected",
    &[
        LabelId::SelectMode,
        LabelId::MotorType,
        LabelId::ThrustSensor,
    ],
);

/// Settings panel fields in handheld mode
pub const SETTINGS_HANDHELD: LabelTable = LabelTable::new(
    "settings_handheld",
    &[
        LabelId::SelectMode,
        LabelId::BladesCount,
        LabelId::ThrustSensor,
    ],
);

pub const MOTOR_TYPES: LabelTable =
    LabelTable::new("motor_types", &[LabelId::Motor12S14P, LabelId::Motor9S12P]);

pub const MODES: LabelTable =
    LabelTable::new("modes", &[LabelId::ModeHandheld, LabelId::ModeConnected]);

pub const THRUST_SENSOR_OPTIONS: LabelTable = LabelTable::new(
    "thrust_sensor_options",
    &[LabelId::ThrustSensorDisabled, LabelId::ThrustSensorEnabled],
);

pub const ALL_TABLES: [LabelTable; 6] = [
    HEADERS,
    SETTINGS_CONNECTED,
    SETTINGS_HANDHELD,
    MOTOR_TYPES,
    MODES,
    THRUST_SENSOR_OPTIONS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd_screen::NUM_CHARACTERS_PER_LINE;

    #[test]
    fn every_label_fits_on_a_line() {
        for id in LabelId::ALL.iter() {
            assert!(
                id.text().len() <= NUM_CHARACTERS_PER_LINE,
                "{:?} is too long",
                id
            );
            assert!(id.text().is_ascii());
        }
    }

    #[test]
    fn edit_template_fills_the_line() {
        assert_eq!(LabelId::Edit.text().len(), NUM_CHARACTERS_PER_LINE);
    }

    #[test]
    fn table_order_is_preserved() {
        assert_eq!(MODES.get(0), Some(LabelId::ModeHandheld));
        assert_eq!(MODES.get(1), Some(LabelId::ModeConnected));
        assert_eq!(MODES.get(2), None);

        assert_eq!(
            HEADERS.iter().map(LabelId::text).collect::<Vec<_>>(),
            vec!["RPM:  VOLT: KV:", "THRUST:  A:", "THROTTLE:"]
        );
    }

    #[test]
    fn settings_panels_differ_only_in_second_field() {
        assert_eq!(SETTINGS_CONNECTED.len(), SETTINGS_HANDHELD.len());
        assert_eq!(SETTINGS_CONNECTED.get(1), Some(LabelId::MotorType));
        assert_eq!(SETTINGS_HANDHELD.get(1), Some(LabelId::BladesCount));
        assert_eq!(SETTINGS_CONNECTED.get(0), SETTINGS_HANDHELD.get(0));
        assert_eq!(SETTINGS_CONNECTED.get(2), SETTINGS_HANDHELD.get(2));
    }

    #[test]
    fn position_finds_label() {
        assert_eq!(
            THRUST_SENSOR_OPTIONS.position(LabelId::ThrustSensorEnabled),
            Some(1)
        );
        assert_eq!(THRUST_SENSOR_OPTIONS.position(LabelId::Rpm), None);
    }
}

//! The options on the stand's settings panel, and how each one is shown

use std::convert::TryFrom;

use propstand_messages::Command;

use crate::{
    labels::{self, LabelId, LabelTable},
    lcd_screen::{self, character_pattern::PropellerIcon, CharacterDisplay, LCDLineNumbers},
    string_table::{DecodeError, LabelStore},
};

/// Where the value of a setting is written, between the arrows of the edit line
pub const EDIT_VALUE_COLUMN: u8 = 3;

/// Where the propeller is drawn when editing the blade count
pub const ICON_COLUMN: u8 = 7;

/// A setting whose options are listed in a label table
pub trait LabelledOption: Copy + Sized + 'static {
    const TABLE: LabelTable;
    const ALL: &'static [Self];

    fn label(self) -> LabelId;

    /// Position in the option menu
    fn index(self) -> usize {
        Self::TABLE.position(self.label()).unwrap_or_default()
    }

    fn from_index(index: usize) -> Option<Self> {
        let label = Self::TABLE.get(index)?;
        Self::ALL.iter().copied().find(|option| option.label() == label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum Mode {
    Handheld,
    Connected,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Connected
    }
}

impl LabelledOption for Mode {
    const TABLE: LabelTable = labels::MODES;
    const ALL: &'static [Self] = &[Self::Handheld, Self::Connected];

    fn label(self) -> LabelId {
        match self {
            Self::Handheld => LabelId::ModeHandheld,
            Self::Connected => LabelId::ModeConnected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum MotorType {
    #[serde(rename = "12S14P")]
    TwelveS14P,
    #[serde(rename = "9S12P")]
    NineS12P,
}

impl MotorType {
    /// Magnet poles, which the stand divides electrical RPM by
    pub fn poles(self) -> u8 {
        match self {
            Self::TwelveS14P => 14,
            Self::NineS12P => 12,
        }
    }

    /// Tell the stand which motor it is measuring
    pub fn settings_command(self) -> Command {
        Command::SetSettings {
            poles: self.poles(),
        }
    }
}

impl Default for MotorType {
    fn default() -> Self {
        Self::TwelveS14P
    }
}

impl LabelledOption for MotorType {
    const TABLE: LabelTable = labels::MOTOR_TYPES;
    const ALL: &'static [Self] = &[Self::TwelveS14P, Self::NineS12P];

    fn label(self) -> LabelId {
        match self {
            Self::TwelveS14P => LabelId::Motor12S14P,
            Self::NineS12P => LabelId::Motor9S12P,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum ThrustSensor {
    Disabled,
    Enabled,
}

impl Default for ThrustSensor {
    fn default() -> Self {
        Self::Disabled
    }
}

impl LabelledOption for ThrustSensor {
    const TABLE: LabelTable = labels::THRUST_SENSOR_OPTIONS;
    const ALL: &'static [Self] = &[Self::Disabled, Self::Enabled];

    fn label(self) -> LabelId {
        match self {
            Self::Disabled => LabelId::ThrustSensorDisabled,
            Self::Enabled => LabelId::ThrustSensorEnabled,
        }
    }
}

/// Blades on the propeller. Shown as a digit and an icon rather than a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "u8")]
pub enum BladeCount {
    Two,
    Three,
    Four,
}

impl BladeCount {
    pub const ALL: [Self; 3] = [Self::Two, Self::Three, Self::Four];

    pub fn count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl Default for BladeCount {
    fn default() -> Self {
        Self::Two
    }
}

impl TryFrom<u8> for BladeCount {
    type Error = String;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|blades| blades.count() == count)
            .ok_or_else(|| format!("Propellers with {} blades are not supported", count))
    }
}

/// One line of a settings panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Mode,
    MotorType,
    BladeCount,
    ThrustSensor,
}

impl Field {
    pub fn title(self) -> LabelId {
        match self {
            Self::Mode => LabelId::SelectMode,
            Self::MotorType => LabelId::MotorType,
            Self::BladeCount => LabelId::BladesCount,
            Self::ThrustSensor => LabelId::ThrustSensor,
        }
    }

    pub fn from_title(title: LabelId) -> Option<Self> {
        [
            Self::Mode,
            Self::MotorType,
            Self::BladeCount,
            Self::ThrustSensor,
        ]
        .iter()
        .copied()
        .find(|field| field.title() == title)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub motor_type: MotorType,
    pub blades: BladeCount,
    pub thrust_sensor: ThrustSensor,
}

impl Settings {
    /// The settings panel depends on the mode, a handheld stand has no motor to choose
    pub fn panel(&self) -> LabelTable {
        match self.mode {
            Mode::Connected => labels::SETTINGS_CONNECTED,
            Mode::Handheld => labels::SETTINGS_HANDHELD,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> {
        self.panel().iter().filter_map(Field::from_title)
    }

    /// The label for the current value of a field. Blade count has none.
    pub fn option_label(&self, field: Field) -> Option<LabelId> {
        match field {
            Field::Mode => Some(self.mode.label()),
            Field::MotorType => Some(self.motor_type.label()),
            Field::BladeCount => None,
            Field::ThrustSensor => Some(self.thrust_sensor.label()),
        }
    }

    /// Show the editor for one field: its title, then the current value between the arrows.
    /// The blade count is drawn as a propeller below.
    pub fn show_field(
        &self,
        lcd: &mut impl CharacterDisplay,
        store: &LabelStore,
        field: Field,
    ) -> Result<(), DecodeError> {
        lcd.clear();

        lcd.seek(LCDLineNumbers::Line1.offset());
        lcd.write_text(store.decode_label(field.title())?.as_bytes());

        lcd.seek(LCDLineNumbers::Line2.offset());
        lcd.write_text(store.decode_label(LabelId::Edit)?.as_bytes());

        lcd.seek(LCDLineNumbers::Line2.offset() + EDIT_VALUE_COLUMN);
        match self.option_label(field) {
            Some(option) => lcd.write_text(store.decode_label(option)?.as_bytes()),
            None => {
                lcd.write(b'0' + self.blades.count());
                lcd_screen::show_icon(
                    lcd,
                    &PropellerIcon::for_blades(self.blades),
                    LCDLineNumbers::Line3,
                    ICON_COLUMN,
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd_screen::FrameBuffer;

    fn check_alignment<T: LabelledOption + PartialEq + std::fmt::Debug>() {
        assert_eq!(T::ALL.len(), T::TABLE.len());
        for (index, &option) in T::ALL.iter().enumerate() {
            assert_eq!(option.index(), index);
            assert_eq!(T::TABLE.get(index), Some(option.label()));
            assert_eq!(T::from_index(index), Some(option));
        }
        assert_eq!(T::from_index(T::ALL.len()), None);
    }

    #[test]
    fn option_tables_align_with_options() {
        check_alignment::<Mode>();
        check_alignment::<MotorType>();
        check_alignment::<ThrustSensor>();
    }

    #[test]
    fn handheld_panel_asks_for_blades() {
        let settings = Settings {
            mode: Mode::Handheld,
            ..Settings::default()
        };
        assert_eq!(
            settings.fields().collect::<Vec<_>>(),
            vec![Field::Mode, Field::BladeCount, Field::ThrustSensor]
        );
    }

    #[test]
    fn connected_panel_asks_for_motor() {
        assert_eq!(
            Settings::default().fields().collect::<Vec<_>>(),
            vec![Field::Mode, Field::MotorType, Field::ThrustSensor]
        );
    }

    #[test]
    fn blade_count_from_number() {
        assert_eq!(BladeCount::try_from(3), Ok(BladeCount::Three));
        assert!(BladeCount::try_from(5).is_err());
    }

    #[test]
    fn motor_poles() {
        assert_eq!(MotorType::TwelveS14P.poles(), 14);
        assert_eq!(MotorType::NineS12P.poles(), 12);
    }

    #[test]
    fn settings_command_carries_poles() {
        assert_eq!(
            MotorType::default().settings_command().encode(),
            "101,14,1;\n"
        );
        assert_eq!(
            MotorType::NineS12P.settings_command(),
            Command::SetSettings { poles: 12 }
        );
    }

    #[test]
    fn option_is_written_between_the_arrows() {
        let mut lcd = FrameBuffer::new();
        let settings = Settings {
            thrust_sensor: ThrustSensor::Enabled,
            ..Settings::default()
        };
        settings
            .show_field(&mut lcd, &LabelStore::builtin(), Field::ThrustSensor)
            .unwrap();

        assert_eq!(
            lcd.render(),
            vec![
                "THRUST SENSOR   ",
                " < ENABLED   >  ",
                "                ",
                "                ",
            ]
        );
    }

    #[test]
    fn longest_option_fits_between_the_arrows() {
        let mut lcd = FrameBuffer::new();
        Settings::default()
            .show_field(&mut lcd, &LabelStore::builtin(), Field::Mode)
            .unwrap();
        assert_eq!(
            lcd.render_line(LCDLineNumbers::Line2),
            " < CONNECTED >  "
        );
    }

    #[test]
    fn blade_count_shows_digit_and_propeller() {
        let mut lcd = FrameBuffer::new();
        lcd_screen::upload_glyphs(&mut lcd);
        let settings = Settings {
            mode: Mode::Handheld,
            blades: BladeCount::Four,
            ..Settings::default()
        };
        settings
            .show_field(&mut lcd, &LabelStore::builtin(), Field::BladeCount)
            .unwrap();

        assert_eq!(
            lcd.render(),
            vec![
                "BLADES COUNT    ",
                " < 4         >  ",
                "       **       ",
                "       **       ",
            ]
        );
        assert_eq!(&lcd.line(LCDLineNumbers::Line3)[7..9], &[5, 4]);
        assert_eq!(&lcd.line(LCDLineNumbers::Line4)[7..9], &[4, 5]);
    }

    #[test]
    fn settings_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            mode = "Handheld"
            motor_type = "9S12P"
            blades = 3
            thrust_sensor = "Enabled"
            "#,
        )
        .unwrap();

        assert_eq!(
            settings,
            Settings {
                mode: Mode::Handheld,
                motor_type: MotorType::NineS12P,
                blades: BladeCount::Three,
                thrust_sensor: ThrustSensor::Enabled,
            }
        );
    }

    #[test]
    fn unsupported_blade_count_is_rejected() {
        assert!(toml::from_str::<Settings>("blades = 6").is_err());
    }
}

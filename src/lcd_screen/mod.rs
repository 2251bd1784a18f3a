use crate::{
    labels::LabelTable,
    string_table::{DecodeError, LabelStore},
};

pub mod character_pattern;

use character_pattern::{Bitmap, PropellerIcon, BITMAPS, ROWS};

/// The display is visually 16 * 4 characters
pub const NUM_CHARACTERS_PER_LINE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LCDLineNumbers {
    Line1,
    Line2,
    Line3,
    Line4,
}

impl LCDLineNumbers {
    pub const ALL: [Self; 4] = [Self::Line1, Self::Line2, Self::Line3, Self::Line4];

    const ROW_OFFSET: u8 = 0x40; //specified by the chip

    pub fn offset(self) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let line_length = NUM_CHARACTERS_PER_LINE as u8;
        match self {
            LCDLineNumbers::Line1 => 0,
            LCDLineNumbers::Line2 => Self::ROW_OFFSET,
            LCDLineNumbers::Line3 => line_length,
            LCDLineNumbers::Line4 => Self::ROW_OFFSET + line_length,
        }
    }

    pub fn below(self) -> Option<Self> {
        match self {
            LCDLineNumbers::Line1 => Some(LCDLineNumbers::Line2),
            LCDLineNumbers::Line2 => Some(LCDLineNumbers::Line3),
            LCDLineNumbers::Line3 => Some(LCDLineNumbers::Line4),
            LCDLineNumbers::Line4 => None,
        }
    }
}

/// The commands of an HD44780-style character display which this crate needs.
///
/// After `seek_cgram`, writes go to the character generator (one byte per glyph row). After
/// `seek`, writes go to the screen. Both auto-increment.
pub trait CharacterDisplay {
    fn seek_cgram(&mut self, address: u8);
    fn seek(&mut self, address: u8);
    fn write(&mut self, octet: u8);
    fn clear(&mut self);

    fn write_text(&mut self, text: &[u8]) {
        for &octet in text {
            self.write(octet);
        }
    }
}

/// Program the glyphs into slots 0 to 7, then return the cursor to the top left
pub fn upload_glyphs(lcd: &mut impl CharacterDisplay) {
    lcd.seek_cgram(0); // must be a multiple of 8 to start at the start of a character

    for character_bitmap in BITMAPS.iter() {
        for &row in character_bitmap {
            lcd.write(row);
        }
    }

    lcd.seek(LCDLineNumbers::Line1.offset());
}

/// Write each label of a table onto its own line, starting at `first_line`.
/// Labels which don't fit below the last line are dropped.
pub fn show_table(
    lcd: &mut impl CharacterDisplay,
    store: &LabelStore,
    table: &LabelTable,
    first_line: LCDLineNumbers,
) -> Result<(), DecodeError> {
    let lines = std::iter::successors(Some(first_line), |line| line.below());
    for (line, id) in lines.zip(table.iter()) {
        let label = store.decode_label(id)?;
        lcd.seek(line.offset());
        lcd.write_text(label.as_bytes());
    }
    Ok(())
}

/// Draw a propeller with its top left cell at `column` of `top_line`
pub fn show_icon(
    lcd: &mut impl CharacterDisplay,
    icon: &PropellerIcon,
    top_line: LCDLineNumbers,
    column: u8,
) {
    let lines = std::iter::successors(Some(top_line), |line| line.below());
    for (line, cells) in lines.zip(icon.cells.iter()) {
        lcd.seek(line.offset().wrapping_add(column));
        for cell in cells {
            lcd.write(cell.character_code());
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Screen,
    CharacterGenerator,
}

/// A display held in memory, for showing the screen contents on a terminal
#[derive(Clone)]
pub struct FrameBuffer {
    ddram: [u8; 0x80],
    cgram: [u8; 64],
    target: Target,
    address: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            ddram: [b' '; 0x80],
            cgram: [0; 64],
            target: Target::Screen,
            address: 0,
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bitmap currently held in a CGRAM slot
    pub fn glyph(&self, slot: u8) -> Bitmap {
        let start = usize::from(slot % 8) * ROWS;
        let mut bitmap = [0; ROWS];
        bitmap.copy_from_slice(&self.cgram[start..start + ROWS]);
        bitmap
    }

    /// The raw character codes on a line
    pub fn line(&self, line: LCDLineNumbers) -> &[u8] {
        let start = usize::from(line.offset());
        &self.ddram[start..start + NUM_CHARACTERS_PER_LINE]
    }

    /// Printable ASCII as itself, bespoke characters as `*`, anything else as `?`
    pub fn render_line(&self, line: LCDLineNumbers) -> String {
        self.line(line)
            .iter()
            .map(|&octet| match octet {
                0..=7 => '*',
                b' '..=b'~' => char::from(octet),
                _ => '?',
            })
            .collect()
    }

    pub fn render(&self) -> Vec<String> {
        LCDLineNumbers::ALL
            .iter()
            .map(|&line| self.render_line(line))
            .collect()
    }
}

impl CharacterDisplay for FrameBuffer {
    fn seek_cgram(&mut self, address: u8) {
        self.target = Target::CharacterGenerator;
        self.address = usize::from(address) % self.cgram.len();
    }

    fn seek(&mut self, address: u8) {
        self.target = Target::Screen;
        self.address = usize::from(address) % self.ddram.len();
    }

    fn write(&mut self, octet: u8) {
        match self.target {
            Target::Screen => {
                self.ddram[self.address] = octet;
                self.address = (self.address + 1) % self.ddram.len();
            }
            Target::CharacterGenerator => {
                self.cgram[self.address] = octet & 0b11111;
                self.address = (self.address + 1) % self.cgram.len();
            }
        }
    }

    fn clear(&mut self) {
        self.ddram = [b' '; 0x80];
        self.target = Target::Screen;
        self.address = 0;
    }
}

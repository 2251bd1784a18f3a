use crate::settings::BladeCount;

pub const ROWS: usize = 8;
pub const COLUMNS: usize = 5; // only the low five bits of each row are shown

pub type Bitmap = [u8; ROWS];

/// The bespoke characters, in CGRAM slot order. Each propeller icon is built from four cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    ThreeBladesTopRight,
    ThreeBladesTopLeft,
    ThreeBladesBottomLeft,
    ThreeBladesBottomRight,
    FourBladesTopRight,
    FourBladesTopLeft,
    TwoBladesTopLeft,
    TwoBladesBottomRight,
}

impl Glyph {
    pub const ALL: [Self; 8] = [
        Self::ThreeBladesTopRight,
        Self::ThreeBladesTopLeft,
        Self::ThreeBladesBottomLeft,
        Self::ThreeBladesBottomRight,
        Self::FourBladesTopRight,
        Self::FourBladesTopLeft,
        Self::TwoBladesTopLeft,
        Self::TwoBladesBottomRight,
    ];

    /// The character code which displays this glyph once uploaded
    pub fn slot(self) -> u8 {
        self as u8
    }

    pub fn bitmap(self) -> &'static Bitmap {
        &BITMAPS[self as usize]
    }
}

pub const BITMAPS: [Bitmap; 8] = [
    [
        0b10000, // 3 blades, top right. The vertical blade runs down the left edge
        0b10000, //
        0b10000, //
        0b10000, //
        0b10000, //
        0b10000, //
        0b00000, // gap where the blade meets the hub
        0b10000,
    ],
    [
        0b00001, // 3 blades, top left. Mirror of the top right
        0b00001, //
        0b00001, //
        0b00001, //
        0b00001, //
        0b00001, //
        0b00000, //
        0b00001,
    ],
    [
        0b00001, // 3 blades, bottom left. Hub, then a blade towards the bottom left corner
        0b00000, //
        0b00110, //
        0b00100, //
        0b01100, //
        0b01000, //
        0b11000, //
        0b10000,
    ],
    [
        0b10000, // 3 blades, bottom right
        0b00000, //
        0b01100, //
        0b00100, //
        0b00110, //
        0b00010, //
        0b00011, //
        0b00001,
    ],
    [
        0b00001, // 4 blades, top right. Also used bottom left
        0b00011, //
        0b00010, //
        0b00110, //
        0b00100, //
        0b01100, //
        0b00000, //
        0b10000,
    ],
    [
        0b10000, // 4 blades, top left. Also used bottom right
        0b11000, //
        0b01000, //
        0b01100, //
        0b00100, //
        0b00110, //
        0b00000, //
        0b00001,
    ],
    [
        0b00000, // 2 blades, top left. Only the hub pixel
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00001,
    ],
    [
        0b10000, // 2 blades, bottom right
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000, //
        0b00000,
    ],
];

/// Draw one row of a bitmap, `#` for a lit pixel
pub fn render_row(row: u8) -> String {
    (0..COLUMNS)
        .map(|column| {
            if row & (1 << (COLUMNS - 1 - column)) == 0 {
                '.'
            } else {
                '#'
            }
        })
        .collect()
}

pub fn render_bitmap(bitmap: &Bitmap) -> Vec<String> {
    bitmap.iter().copied().map(render_row).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Glyph(Glyph),
    Blank,
}

impl Cell {
    /// The byte to write to the display for this cell
    pub fn character_code(self) -> u8 {
        match self {
            Cell::Glyph(glyph) => glyph.slot(),
            Cell::Blank => b' ',
        }
    }

    fn bitmap(self) -> Bitmap {
        match self {
            Cell::Glyph(glyph) => *glyph.bitmap(),
            Cell::Blank => [0; ROWS],
        }
    }
}

/// A propeller drawn with 2 × 2 character cells, hub at the centre
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropellerIcon {
    pub cells: [[Cell; 2]; 2],
}

impl PropellerIcon {
    pub fn for_blades(blades: BladeCount) -> Self {
        use Cell::Blank;
        use Glyph::*;

        let g = Cell::Glyph;

        let cells = match blades {
            BladeCount::Two => [
                [g(TwoBladesTopLeft), Blank],
                [Blank, g(TwoBladesBottomRight)],
            ],
            BladeCount::Three => [
                [g(ThreeBladesTopLeft), g(ThreeBladesTopRight)],
                [g(ThreeBladesBottomLeft), g(ThreeBladesBottomRight)],
            ],
            BladeCount::Four => [
                [g(FourBladesTopLeft), g(FourBladesTopRight)],
                [g(FourBladesTopRight), g(FourBladesTopLeft)],
            ],
        };

        Self { cells }
    }

    /// Draw the whole icon, 16 rows of 10 pixels
    pub fn render(&self) -> Vec<String> {
        self.cells
            .iter()
            .flat_map(|&[left, right]| {
                let (left, right) = (left.bitmap(), right.bitmap());
                (0..ROWS).map(move |row| render_row(left[row]) + &render_row(right[row]))
            })
            .collect()
    }
}

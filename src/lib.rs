//! Labels, glyphs and telemetry of a propeller thrust test stand with a 16 × 4 character LCD

pub mod config;
pub mod labels;
pub mod lcd_screen;
pub mod monitor;
pub mod settings;
pub mod string_table;

use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 210, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const GROUP: Color = Color::BrightGreen;
pub const HOST: Color = Color::Cyan;
pub const LOCATION: Color = Color::Magenta;
pub const ADDRESS: Color = Color::TrueColor { r: 160, g: 160, b: 160 };

//! Advance widths of the standard Helvetica face and WinAnsi encoding.
//!
//! Helvetica is one of the PDF base-14 fonts, so viewers supply the glyphs and
//! nothing is embedded. Centering text still needs its width, which comes
//! from the Adobe font metrics for the printable ASCII range.

/// Width used for characters outside the table, in 1/1000 em.
const DEFAULT_WIDTH: u16 = 556;

/// Widths for code points 32 (space) through 126 (`~`), in 1/1000 em.
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

/// Advance width of one character, in 1/1000 em.
fn char_width(c: char) -> u16 {
    match c as u32 {
        code @ 32..=126 => ASCII_WIDTHS[(code - 32) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` set at `font_size` points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 * font_size / 1000.0
}

/// Encodes `text` as WinAnsi bytes, replacing unmappable characters with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        'Š' => 0x8A,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

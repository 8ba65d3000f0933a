//! Advance widths for the standard Helvetica face, in 1/1000 em, taken from
//! the Adobe core-14 AFM. Only the WinAnsi range the writer can encode is
//! covered; everything else measures as the fallback width.

/// Widths for U+0020..=U+007E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Metrics for one of the standard PDF fonts.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    ascii: &'static [u16; 95],
    fallback: u16,
}

impl StandardFontMetrics {
    pub const HELVETICA: StandardFontMetrics = StandardFontMetrics {
        ascii: &HELVETICA_ASCII,
        fallback: 556,
    };

    /// Advance width in 1/1000 em.
    fn units(&self, ch: char) -> u16 {
        match ch {
            ' '..='~' => self.ascii[ch as usize - 0x20],
            '\u{2022}' => 350, // bullet
            '\u{2013}' => 556, // en dash
            '\u{2014}' => 1000, // em dash
            '\u{2018}' | '\u{2019}' => 222,
            '\u{201C}' | '\u{201D}' => 333,
            '\u{00A0}' => 278,
            _ => self.fallback,
        }
    }

    /// Width of a single character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, font_size) + letter_spacing)
            .sum()
    }
}

//! Number literal recognition with multiple base support

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Hexadecimal, // $FF
    Octal,       // C377
    Binary,      // B11111111
    Decimal,     // 255
}

impl NumberFormat {
    /// Detect the format of a literal and split off its prefix.
    /// Returns `None` when the first character selects no base.
    pub fn detect(tok: &str) -> Option<(NumberFormat, &str)> {
        let first = tok.chars().next()?;
        match first {
            '$' => Some((NumberFormat::Hexadecimal, &tok[1..])),
            'C' => Some((NumberFormat::Octal, &tok[1..])),
            'B' => Some((NumberFormat::Binary, &tok[1..])),
            '0'..='9' => Some((NumberFormat::Decimal, tok)),
            _ => None,
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            NumberFormat::Hexadecimal => 16,
            NumberFormat::Octal => 8,
            NumberFormat::Binary => 2,
            NumberFormat::Decimal => 10,
        }
    }
}

/// Parse a literal token in any supported base.
///
/// Every character after the prefix must be a digit of the selected base.
/// A bare prefix (`$`, `C`, `B`) reads as zero.
pub fn is_number(tok: &str) -> Option<u32> {
    let (format, digits) = NumberFormat::detect(tok)?;
    let radix = format.radix();
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    if digits.is_empty() {
        return Some(0);
    }
    u32::from_str_radix(digits, radix).ok()
}

pub fn is_8bit_number(tok: &str) -> Option<u8> {
    is_number(tok).and_then(|n| u8::try_from(n).ok())
}

pub fn is_16bit_number(tok: &str) -> Option<u16> {
    is_number(tok).and_then(|n| u16::try_from(n).ok())
}

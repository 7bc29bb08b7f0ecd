//! 6502 opcode table: mnemonic -> addressing mode -> opcode byte

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::EnumCount;

use crate::addressing::AddrMode;

pub type OpcodeRow = [Option<u8>; AddrMode::COUNT];

static STANDARD: Lazy<OpcodeTable> = Lazy::new(|| {
    use AddrMode::*;

    OpcodeTable::from_entries([
        ("ADC", &[(Immediate, 0x69), (ZeroPage, 0x65), (ZeroPageX, 0x75), (IndexedIndirectX, 0x61),
                  (IndirectIndexedY, 0x71), (AbsoluteX, 0x7D), (AbsoluteY, 0x79), (Absolute, 0x6D)][..]),
        ("AND", &[(Immediate, 0x29), (ZeroPage, 0x25), (ZeroPageX, 0x35), (IndexedIndirectX, 0x21),
                  (IndirectIndexedY, 0x31), (AbsoluteX, 0x3D), (AbsoluteY, 0x39), (Absolute, 0x2D)][..]),
        ("ASL", &[(Accumulator, 0x0A), (ZeroPage, 0x06), (ZeroPageX, 0x16), (AbsoluteX, 0x1E),
                  (Absolute, 0x0E)][..]),
        ("BCC", &[(Relative, 0x90)][..]),
        ("BCS", &[(Relative, 0xB0)][..]),
        ("BEQ", &[(Relative, 0xF0)][..]),
        ("BIT", &[(ZeroPage, 0x24), (Absolute, 0x2C)][..]),
        ("BMI", &[(Relative, 0x30)][..]),
        ("BNE", &[(Relative, 0xD0)][..]),
        ("BPL", &[(Relative, 0x10)][..]),
        ("BRK", &[(Implied, 0x00)][..]),
        ("BVC", &[(Relative, 0x50)][..]),
        ("BVS", &[(Relative, 0x70)][..]),
        ("CLC", &[(Implied, 0x18)][..]),
        ("CLD", &[(Implied, 0xD8)][..]),
        ("CLI", &[(Implied, 0x58)][..]),
        ("CLV", &[(Implied, 0xB8)][..]),
        ("CMP", &[(Immediate, 0xC9), (ZeroPage, 0xC5), (ZeroPageX, 0xD5), (IndexedIndirectX, 0xC1),
                  (IndirectIndexedY, 0xD1), (AbsoluteX, 0xDD), (AbsoluteY, 0xD9), (Absolute, 0xCD)][..]),
        ("CPX", &[(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)][..]),
        ("CPY", &[(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)][..]),
        ("DEC", &[(ZeroPage, 0xC6), (ZeroPageX, 0xD6), (AbsoluteX, 0xDE), (Absolute, 0xCE)][..]),
        ("DEX", &[(Implied, 0xCA)][..]),
        ("DEY", &[(Implied, 0x88)][..]),
        ("EOR", &[(Immediate, 0x49), (ZeroPage, 0x45), (ZeroPageX, 0x55), (IndexedIndirectX, 0x41),
                  (IndirectIndexedY, 0x51), (AbsoluteX, 0x5D), (AbsoluteY, 0x59), (Absolute, 0x4D)][..]),
        ("INC", &[(ZeroPage, 0xE6), (ZeroPageX, 0xF6), (AbsoluteX, 0xFE), (Absolute, 0xEE)][..]),
        ("INX", &[(Implied, 0xE8)][..]),
        ("INY", &[(Implied, 0xC8)][..]),
        ("JMP", &[(Absolute, 0x4C), (Indirect, 0x6C)][..]),
        ("JSR", &[(Absolute, 0x20)][..]),
        ("LDA", &[(Immediate, 0xA9), (ZeroPage, 0xA5), (ZeroPageX, 0xB5), (IndexedIndirectX, 0xA1),
                  (IndirectIndexedY, 0xB1), (AbsoluteX, 0xBD), (AbsoluteY, 0xB9), (Absolute, 0xAD)][..]),
        ("LDX", &[(Immediate, 0xA2), (ZeroPage, 0xA6), (ZeroPageY, 0xB6), (AbsoluteY, 0xBE),
                  (Absolute, 0xAE)][..]),
        ("LDY", &[(Immediate, 0xA0), (ZeroPage, 0xA4), (ZeroPageX, 0xB4), (AbsoluteX, 0xBC),
                  (Absolute, 0xAC)][..]),
        ("LSR", &[(Accumulator, 0x4A), (ZeroPage, 0x46), (ZeroPageX, 0x56), (AbsoluteX, 0x5E),
                  (Absolute, 0x4E)][..]),
        ("NOP", &[(Implied, 0xEA)][..]),
        ("ORA", &[(Immediate, 0x09), (ZeroPage, 0x05), (ZeroPageX, 0x15), (IndexedIndirectX, 0x01),
                  (IndirectIndexedY, 0x11), (AbsoluteX, 0x1D), (AbsoluteY, 0x19), (Absolute, 0x0D)][..]),
        ("PHA", &[(Implied, 0x48)][..]),
        ("PHP", &[(Implied, 0x08)][..]),
        ("PLA", &[(Implied, 0x68)][..]),
        ("PLP", &[(Implied, 0x28)][..]),
        ("ROL", &[(Accumulator, 0x2A), (ZeroPage, 0x26), (ZeroPageX, 0x36), (AbsoluteX, 0x3E),
                  (Absolute, 0x2E)][..]),
        ("ROR", &[(Accumulator, 0x6A), (ZeroPage, 0x66), (ZeroPageX, 0x76), (AbsoluteX, 0x7E),
                  (Absolute, 0x6E)][..]),
        ("RTI", &[(Implied, 0x40)][..]),
        ("RTS", &[(Implied, 0x60)][..]),
        ("SBC", &[(Immediate, 0xE9), (ZeroPage, 0xE5), (ZeroPageX, 0xF5), (IndexedIndirectX, 0xE1),
                  (IndirectIndexedY, 0xF1), (AbsoluteX, 0xFD), (AbsoluteY, 0xF9), (Absolute, 0xED)][..]),
        ("SEC", &[(Implied, 0x38)][..]),
        ("SED", &[(Implied, 0xF8)][..]),
        ("SEI", &[(Implied, 0x78)][..]),
        ("STA", &[(ZeroPage, 0x85), (ZeroPageX, 0x95), (IndexedIndirectX, 0x81), (IndirectIndexedY, 0x91),
                  (AbsoluteX, 0x9D), (AbsoluteY, 0x99), (Absolute, 0x8D)][..]),
        ("STX", &[(ZeroPage, 0x86), (ZeroPageY, 0x96), (Absolute, 0x8E)][..]),
        ("STY", &[(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)][..]),
        ("TAX", &[(Implied, 0xAA)][..]),
        ("TAY", &[(Implied, 0xA8)][..]),
        ("TSX", &[(Implied, 0xBA)][..]),
        ("TXA", &[(Implied, 0x8A)][..]),
        ("TXS", &[(Implied, 0x9A)][..]),
        ("TYA", &[(Implied, 0x98)][..]),
    ])
});

/// Read-only mnemonic table. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct OpcodeTable {
    rows: HashMap<String, OpcodeRow>,
}

impl OpcodeTable {
    /// The documented NMOS 6502 instruction set.
    pub fn standard() -> &'static OpcodeTable {
        &STANDARD
    }

    pub fn from_entries<'a, I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, &'a [(AddrMode, u8)])>,
        S: AsRef<str>,
    {
        let rows = entries
            .into_iter()
            .map(|(mnemonic, modes)| {
                let mut row: OpcodeRow = [None; AddrMode::COUNT];
                for &(mode, opcode) in modes {
                    row[mode.slot()] = Some(opcode);
                }
                (mnemonic.as_ref().to_ascii_uppercase(), row)
            })
            .collect();
        Self { rows }
    }

    pub fn row(&self, mnemonic: &str) -> Option<&OpcodeRow> {
        self.rows.get(&mnemonic.to_ascii_uppercase())
    }

    pub fn is_mnemonic(&self, tok: &str) -> bool {
        self.row(tok).is_some()
    }

    pub fn opcode(&self, mnemonic: &str, mode: AddrMode) -> Option<u8> {
        self.row(mnemonic).and_then(|row| row[mode.slot()])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_standard_table() {
        let table = OpcodeTable::standard();
        assert_eq!(table.len(), 56);
        assert_eq!(table.opcode("LDA", AddrMode::Immediate), Some(0xA9));
        assert_eq!(table.opcode("lda", AddrMode::IndirectIndexedY), Some(0xB1));
        assert_eq!(table.opcode("JMP", AddrMode::Indirect), Some(0x6C));
        assert_eq!(table.opcode("LDX", AddrMode::ZeroPageY), Some(0xB6));
        assert_eq!(table.opcode("STA", AddrMode::Immediate), None);
        assert_eq!(table.opcode("BNE", AddrMode::Relative), Some(0xD0));
        assert_eq!(table.opcode("ASL", AddrMode::Accumulator), Some(0x0A));
        assert_eq!(table.opcode("ASL", AddrMode::Implied), None);
        assert!(table.is_mnemonic("tax"));
        assert!(!table.is_mnemonic("DCB"));
    }

    #[test]
    fn test_opcodes_are_unique() {
        let table = OpcodeTable::standard();
        let mut seen = std::collections::HashSet::new();
        for row in table.rows.values() {
            for mode in AddrMode::iter() {
                if let Some(op) = row[mode.slot()] {
                    assert!(seen.insert(op), "opcode ${:02X} listed twice", op);
                }
            }
        }
        assert_eq!(seen.len(), 151);
    }

    #[test]
    fn test_custom_table() {
        let table = OpcodeTable::from_entries([("nop", &[(AddrMode::Implied, 0xEA)][..])]);
        assert_eq!(table.opcode("NOP", AddrMode::Implied), Some(0xEA));
        assert!(!table.is_mnemonic("LDA"));
    }
}

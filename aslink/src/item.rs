//! Instruction records produced by the parser and patched by the linker

use std::fmt;

use crate::addressing::AddrMode;

pub const DCB: &str = "dcb";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Immediate(u16),
    /// Label whose address is patched in at link time.
    PendingLabel(String),
    /// Numeric target of a branch, turned into a displacement at link time.
    BranchTarget(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Comment {
        text: String,
    },
    LabelDefinition {
        name: String,
        address: Option<u16>,
    },
    Opcode {
        mnemonic: String,
        opcode: u8,
        mode: AddrMode,
        operand: Operand,
        operand_len: u8,
        line: usize,
        address: Option<u16>,
    },
    ByteMacro {
        name: String,
        values: Vec<u8>,
        line: usize,
        address: Option<u16>,
    },
}

impl Record {
    /// Bytes the record occupies in the image.
    pub fn size(&self) -> u32 {
        match self {
            Record::Comment { .. } | Record::LabelDefinition { .. } => 0,
            Record::Opcode { operand_len, .. } => 1 + u32::from(*operand_len),
            Record::ByteMacro { values, .. } => u32::try_from(values.len()).unwrap_or(u32::MAX),
        }
    }

    pub fn address(&self) -> Option<u16> {
        match self {
            Record::Comment { .. } => None,
            Record::LabelDefinition { address, .. }
            | Record::Opcode { address, .. }
            | Record::ByteMacro { address, .. } => *address,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Record::Opcode { line, .. } | Record::ByteMacro { line, .. } => Some(*line),
            Record::Comment { .. } | Record::LabelDefinition { .. } => None,
        }
    }
}

fn fmt_addr(address: Option<u16>) -> String {
    address.map_or_else(|| "????".to_string(), |a| format!("{:04X}", a))
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Comment { text } => write!(f, "               {}", text),
            Record::LabelDefinition { name, address } => {
                write!(f, "${}          {}:", fmt_addr(*address), name)
            }
            Record::Opcode {
                mnemonic,
                opcode,
                mode,
                operand,
                operand_len,
                address,
                ..
            } => {
                write!(f, "${}: ${:02X}  {} ", fmt_addr(*address), opcode, mnemonic)?;
                match operand {
                    Operand::None => write!(f, "({})", mode),
                    Operand::Immediate(v) if *mode == AddrMode::Relative => {
                        write!(f, "{:+} ({})", *v as u8 as i8, mode)
                    }
                    Operand::Immediate(v) if *operand_len == 1 => write!(f, "${:02X} ({})", v, mode),
                    Operand::Immediate(v) => write!(f, "${:04X} ({})", v, mode),
                    Operand::PendingLabel(name) => write!(f, "{} ({}, unresolved)", name, mode),
                    Operand::BranchTarget(t) => write!(f, "${:04X} ({}, unresolved)", t, mode),
                }
            }
            Record::ByteMacro {
                name,
                values,
                address,
                ..
            } => {
                let bytes = values
                    .iter()
                    .map(|b| format!("${:02X}", b))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "${}: {} {}", fmt_addr(*address), name, bytes)
            }
        }
    }
}

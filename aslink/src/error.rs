//! Error types for the assembler

use thiserror::Error;

use crate::addressing::AddrMode;

#[derive(Debug, Error)]
pub enum AsmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: label `{name}` already defined at line {first_line}")]
    DuplicateLabel {
        name: String,
        first_line: usize,
        line: usize,
    },

    #[error("line {line}: unknown token `{token}`")]
    UnknownToken { token: String, line: usize },

    #[error("line {line}: no addressing mode of {mnemonic} matches operand `{token}`")]
    UnknownOperand {
        mnemonic: String,
        token: String,
        line: usize,
    },

    #[error("line {line}: {mnemonic} requires an operand")]
    MissingOperand { mnemonic: String, line: usize },

    #[error("line {line}: {mnemonic} does not support {mode} addressing")]
    UnsupportedAddressingMode {
        mnemonic: String,
        mode: AddrMode,
        line: usize,
    },

    #[error("line {line}: invalid dcb operand `{token}`")]
    InvalidMacroOperand { token: String, line: usize },

    #[error("line {line}: undefined label `{name}`")]
    UndefinedLabel { name: String, line: usize },

    #[error("line {line}: branch to `{name}` out of range (displacement {displacement})")]
    RelativeDisplacementOverflow {
        name: String,
        displacement: i32,
        line: usize,
    },

    #[error("line {line}: program runs past $FFFF")]
    AddressOverflow { line: usize },

    #[error("cannot emit {0}")]
    InvalidEmission(String),
}

impl AsmError {
    /// Source line the error points at, when one is known.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::DuplicateLabel { line, .. }
            | AsmError::UnknownToken { line, .. }
            | AsmError::UnknownOperand { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::UnsupportedAddressingMode { line, .. }
            | AsmError::InvalidMacroOperand { line, .. }
            | AsmError::UndefinedLabel { line, .. }
            | AsmError::RelativeDisplacementOverflow { line, .. }
            | AsmError::AddressOverflow { line } => Some(*line),
            AsmError::Io(_) | AsmError::InvalidEmission(_) => None,
        }
    }
}

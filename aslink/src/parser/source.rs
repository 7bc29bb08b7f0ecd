//! First pass: token stream -> instruction records and label table

use crate::addressing::{classify, is_label, AddrMode, OperandValue};
use crate::error::AsmError;
use crate::item::{Operand, Record, DCB};
use crate::opcodes::OpcodeTable;
use crate::parser::{is_8bit_number, TokenStream};
use crate::symbol::LabelTable;

/// Parse a whole source into records and the labels it defines.
///
/// Record sizes are final after this pass; label operands stay pending
/// until [`crate::layout_and_link`].
pub fn parse(source: &str, table: &OpcodeTable) -> Result<(Vec<Record>, LabelTable), AsmError> {
    parse_tokens(TokenStream::new(source), table)
}

pub fn parse_tokens(
    tokens: TokenStream,
    table: &OpcodeTable,
) -> Result<(Vec<Record>, LabelTable), AsmError> {
    tracing::trace!("starting pass 1");
    let mut parser = SourceParser {
        tokens,
        table,
        records: Vec::new(),
        labels: LabelTable::new(),
    };
    parser.run()?;
    tracing::debug!(
        records = parser.records.len(),
        labels = parser.labels.len(),
        "pass 1 done"
    );
    Ok((parser.records, parser.labels))
}

struct SourceParser<'a> {
    tokens: TokenStream,
    table: &'a OpcodeTable,
    records: Vec<Record>,
    labels: LabelTable,
}

impl SourceParser<'_> {
    fn run(&mut self) -> Result<(), AsmError> {
        while let Some(tok) = self.tokens.advance() {
            let line = self.tokens.line();
            if tok.starts_with(';') {
                let rest = self.tokens.rest_of_line();
                let text = if rest.is_empty() { tok } else { format!("{} {}", tok, rest) };
                self.records.push(Record::Comment { text });
            } else if let Some(name) = is_label(&tok) {
                self.labels.define(name, line)?;
                self.records.push(Record::LabelDefinition {
                    name: name.to_string(),
                    address: None,
                });
            } else if tok.eq_ignore_ascii_case(DCB) {
                self.byte_macro(line)?;
            } else if self.table.is_mnemonic(&tok) {
                self.instruction(&tok.to_ascii_uppercase(), line)?;
            } else {
                return Err(AsmError::UnknownToken { token: tok, line });
            }
        }
        Ok(())
    }

    /// Tokens that start a statement of their own and never act as operands
    /// of an accumulator instruction.
    fn is_keyword(&self, tok: &str) -> bool {
        self.table.is_mnemonic(tok) || tok.eq_ignore_ascii_case(DCB)
    }

    fn byte_macro(&mut self, line: usize) -> Result<(), AsmError> {
        let arg = self.tokens.advance().ok_or_else(|| AsmError::InvalidMacroOperand {
            token: String::new(),
            line,
        })?;
        let values = arg
            .split(',')
            .map(|part| {
                is_8bit_number(part).ok_or_else(|| AsmError::InvalidMacroOperand {
                    token: part.to_string(),
                    line,
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        self.records.push(Record::ByteMacro {
            name: DCB.to_string(),
            values,
            line,
            address: None,
        });
        Ok(())
    }

    fn push_opcode(
        &mut self,
        mnemonic: &str,
        opcode: u8,
        mode: AddrMode,
        operand: Operand,
        operand_len: u8,
        line: usize,
    ) {
        self.records.push(Record::Opcode {
            mnemonic: mnemonic.to_string(),
            opcode,
            mode,
            operand,
            operand_len,
            line,
            address: None,
        });
    }

    fn instruction(&mut self, mnemonic: &str, line: usize) -> Result<(), AsmError> {
        if let Some(opcode) = self.table.opcode(mnemonic, AddrMode::Implied) {
            self.push_opcode(mnemonic, opcode, AddrMode::Implied, Operand::None, 0, line);
            return Ok(());
        }
        let accumulator = self.table.opcode(mnemonic, AddrMode::Accumulator);

        let Some(next) = self.tokens.peek().map(str::to_string) else {
            let opcode = accumulator.ok_or_else(|| AsmError::MissingOperand {
                mnemonic: mnemonic.to_string(),
                line,
            })?;
            self.push_opcode(mnemonic, opcode, AddrMode::Accumulator, Operand::None, 0, line);
            return Ok(());
        };

        // ASL followed by TAX on the next line is two instructions, not
        // ASL with a label operand.
        if let Some(opcode) = accumulator {
            if self.is_keyword(&next) {
                self.push_opcode(mnemonic, opcode, AddrMode::Accumulator, Operand::None, 0, line);
                return Ok(());
            }
        }

        let Some(found) = classify(&next) else {
            let opcode = accumulator.ok_or_else(|| AsmError::UnknownOperand {
                mnemonic: mnemonic.to_string(),
                token: next.clone(),
                line,
            })?;
            self.push_opcode(mnemonic, opcode, AddrMode::Accumulator, Operand::None, 0, line);
            return Ok(());
        };

        let unsupported = || AsmError::UnsupportedAddressingMode {
            mnemonic: mnemonic.to_string(),
            mode: found.mode,
            line,
        };
        let (mode, opcode, operand_len) = match self.table.opcode(mnemonic, found.mode) {
            Some(opcode) => (found.mode, opcode, found.len),
            // branches are written with an absolute target
            None if found.mode == AddrMode::Absolute => {
                let opcode = self
                    .table
                    .opcode(mnemonic, AddrMode::Relative)
                    .ok_or_else(unsupported)?;
                (AddrMode::Relative, opcode, AddrMode::Relative.operand_len())
            }
            None => return Err(unsupported()),
        };

        let operand = match found.value {
            OperandValue::Number(n) if mode == AddrMode::Relative => Operand::BranchTarget(n),
            OperandValue::Number(n) => Operand::Immediate(n),
            OperandValue::Label(name) => Operand::PendingLabel(name),
        };
        self.tokens.advance();
        self.push_opcode(mnemonic, opcode, mode, operand, operand_len, line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_std(src: &str) -> Result<(Vec<Record>, LabelTable), AsmError> {
        parse(src, OpcodeTable::standard())
    }

    fn opcode(rec: &Record) -> (&str, AddrMode, &Operand, u8) {
        match rec {
            Record::Opcode {
                mnemonic,
                mode,
                operand,
                operand_len,
                ..
            } => (mnemonic.as_str(), *mode, operand, *operand_len),
            other => panic!("expected opcode, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_and_labels() {
        let (records, labels) = parse_std("; header comment\nstart: ;\nloop:\n").unwrap();
        assert_eq!(
            records,
            vec![
                Record::Comment { text: "; header comment".into() },
                Record::LabelDefinition { name: "start".into(), address: None },
                Record::Comment { text: ";".into() },
                Record::LabelDefinition { name: "loop".into(), address: None },
            ]
        );
        assert_eq!(labels.definition_line("start"), Some(2));
        assert_eq!(labels.definition_line("loop"), Some(3));
    }

    #[test]
    fn test_implied_and_immediate() {
        let (records, _) = parse_std("lda #$05\nsta $10\nnop").unwrap();
        assert_eq!(opcode(&records[0]), ("LDA", AddrMode::Immediate, &Operand::Immediate(5), 1));
        assert_eq!(opcode(&records[1]), ("STA", AddrMode::ZeroPage, &Operand::Immediate(0x10), 1));
        assert_eq!(opcode(&records[2]), ("NOP", AddrMode::Implied, &Operand::None, 0));
    }

    #[test]
    fn test_operand_fragments_rejoined() {
        let (records, _) = parse_std("LDA $40 , X\nLDX $40, Y\nSTA ($20),Y").unwrap();
        assert_eq!(opcode(&records[0]).1, AddrMode::ZeroPageX);
        assert_eq!(opcode(&records[1]).1, AddrMode::ZeroPageY);
        assert_eq!(opcode(&records[2]).1, AddrMode::IndirectIndexedY);
    }

    #[test]
    fn test_accumulator_disambiguation() {
        let (records, _) = parse_std("ASL\nTAX").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(opcode(&records[0]), ("ASL", AddrMode::Accumulator, &Operand::None, 0));
        assert_eq!(opcode(&records[1]).0, "TAX");

        let (records, _) = parse_std("lsr\ndcb 1").unwrap();
        assert_eq!(opcode(&records[0]).1, AddrMode::Accumulator);

        let (records, _) = parse_std("ROL ; rotate\nloop:\nROR").unwrap();
        assert_eq!(opcode(&records[0]).1, AddrMode::Accumulator);
        assert!(matches!(records[1], Record::Comment { .. }));
        assert_eq!(opcode(&records[3]).1, AddrMode::Accumulator);

        let (records, _) = parse_std("ASL $10").unwrap();
        assert_eq!(opcode(&records[0]).1, AddrMode::ZeroPage);
    }

    #[test]
    fn test_branch_substitution() {
        let (records, _) = parse_std("loop:\nBNE loop\nBEQ $0600").unwrap();
        assert_eq!(
            opcode(&records[1]),
            ("BNE", AddrMode::Relative, &Operand::PendingLabel("loop".into()), 1)
        );
        assert_eq!(
            opcode(&records[2]),
            ("BEQ", AddrMode::Relative, &Operand::BranchTarget(0x0600), 1)
        );
    }

    #[test]
    fn test_forward_label_operand() {
        let (records, labels) = parse_std("JMP target\ntarget:").unwrap();
        assert_eq!(
            opcode(&records[0]),
            ("JMP", AddrMode::Absolute, &Operand::PendingLabel("target".into()), 2)
        );
        assert!(labels.contains("target"));
    }

    #[test]
    fn test_dcb() {
        let (records, _) = parse_std("DCB 1, 2,$FF").unwrap();
        assert_eq!(
            records[0],
            Record::ByteMacro { name: DCB.into(), values: vec![1, 2, 255], line: 1, address: None }
        );

        let err = parse_std("dcb 1,$100").unwrap_err();
        assert!(matches!(err, AsmError::InvalidMacroOperand { ref token, line: 1 } if token == "$100"));

        let err = parse_std("dcb").unwrap_err();
        assert!(matches!(err, AsmError::InvalidMacroOperand { .. }));
    }

    #[test]
    fn test_errors() {
        let err = parse_std("L:\nNOP\nL:").unwrap_err();
        assert!(matches!(err, AsmError::DuplicateLabel { first_line: 1, line: 3, .. }));

        let err = parse_std("NOP\nFOO").unwrap_err();
        assert!(matches!(err, AsmError::UnknownToken { ref token, line: 2 } if token == "FOO"));

        let err = parse_std("LDA ;").unwrap_err();
        assert!(matches!(err, AsmError::UnknownOperand { ref token, .. } if token == ";"));

        let err = parse_std("LDA").unwrap_err();
        assert!(matches!(err, AsmError::MissingOperand { .. }));

        let err = parse_std("STA #$05").unwrap_err();
        assert!(matches!(
            err,
            AsmError::UnsupportedAddressingMode { mode: AddrMode::Immediate, .. }
        ));

        // zero page operands never fall back to relative
        let err = parse_std("BNE $10").unwrap_err();
        assert!(matches!(
            err,
            AsmError::UnsupportedAddressingMode { mode: AddrMode::ZeroPage, .. }
        ));
    }
}

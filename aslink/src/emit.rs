//! Byte image and trace output for linked records

#[cfg(feature = "listing")]
use std::fs::File;
#[cfg(feature = "listing")]
use std::io::{self, Write};

use crate::error::AsmError;
use crate::item::{Operand, Record, DCB};

/// Serialize linked records into a flat byte image.
pub fn emit_binary(records: &[Record]) -> Result<Vec<u8>, AsmError> {
    let mut machine = Vec::new();
    for record in records {
        match record {
            Record::Comment { .. } | Record::LabelDefinition { .. } => {}
            Record::ByteMacro { name, values, .. } => {
                if name != DCB {
                    return Err(AsmError::InvalidEmission(record.to_string()));
                }
                machine.extend_from_slice(values);
            }
            Record::Opcode {
                opcode,
                operand,
                operand_len,
                ..
            } => {
                machine.push(*opcode);
                match (operand_len, operand) {
                    (0, Operand::None) => {}
                    (1, Operand::Immediate(v)) if *v <= 0xFF => machine.push(*v as u8),
                    // Little-endian: low byte first, then high byte
                    (2, Operand::Immediate(v)) => machine.extend_from_slice(&v.to_le_bytes()),
                    _ => return Err(AsmError::InvalidEmission(record.to_string())),
                }
            }
        }
    }
    tracing::debug!(bytes = machine.len(), "emitted image");
    Ok(machine)
}

/// Human-readable rendering of the records, one per line.
pub fn emit_trace(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

#[cfg(feature = "listing")]
pub fn print_listing(records: &[Record]) {
    println!("\nAssembly Listing:");
    println!("{}", "-".repeat(50));
    print!("{}", emit_trace(records));
}

#[cfg(feature = "listing")]
pub fn save_listing(records: &[Record], filename: &str) -> io::Result<()> {
    let mut f = File::create(filename)?;
    writeln!(f, "Assembly Listing:")?;
    writeln!(f, "{}", "-".repeat(50))?;
    f.write_all(emit_trace(records).as_bytes())
}

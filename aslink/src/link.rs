//! Second pass: address layout and label resolution

use crate::error::AsmError;
use crate::item::{Operand, Record};
use crate::symbol::LabelTable;

/// Conventional load address, just above the stack page.
pub const DEFAULT_ORIGIN: u16 = 0x0600;

/// Check that every label operand names a defined label.
pub fn validate_labels(records: &[Record], labels: &LabelTable) -> Result<(), AsmError> {
    for record in records {
        if let Record::Opcode {
            operand: Operand::PendingLabel(name),
            line,
            ..
        } = record
        {
            if !labels.contains(name) {
                return Err(AsmError::UndefinedLabel {
                    name: name.clone(),
                    line: *line,
                });
            }
        }
    }
    Ok(())
}

/// Assign addresses from `base` and resolve label definitions.
/// Returns the address one past the last byte.
pub fn layout(records: &mut [Record], labels: &mut LabelTable, base: u16) -> Result<u32, AsmError> {
    labels.clear_addresses();
    let mut pc = u32::from(base);
    for record in records.iter_mut() {
        let size = record.size();
        let line = record_line(record, labels);
        let overflow = || AsmError::AddressOverflow { line };
        match record {
            Record::Comment { .. } => continue,
            Record::LabelDefinition { name, address } => {
                // a label after a byte at $FFFF would point past memory
                let addr = u16::try_from(pc).map_err(|_| overflow())?;
                *address = Some(addr);
                labels.resolve(name, addr);
            }
            Record::Opcode { address, .. } | Record::ByteMacro { address, .. } => {
                if size > 0x1_0000 - pc {
                    return Err(overflow());
                }
                *address = Some(pc as u16);
            }
        }
        pc += size;
    }
    tracing::debug!("layout ends at ${:04X}", pc);
    Ok(pc)
}

fn record_line(record: &Record, labels: &LabelTable) -> usize {
    match record {
        Record::LabelDefinition { name, .. } => labels.definition_line(name).unwrap_or(0),
        other => other.line().unwrap_or(0),
    }
}

/// Replace label and branch operands with their final values.
pub fn link(records: &mut [Record], labels: &LabelTable) -> Result<(), AsmError> {
    for record in records.iter_mut() {
        let Record::Opcode {
            operand,
            operand_len,
            address,
            line,
            ..
        } = record
        else {
            continue;
        };
        let (name, target) = match operand {
            Operand::PendingLabel(name) => {
                let target = labels
                    .get(name)
                    .ok_or_else(|| AsmError::UndefinedLabel {
                        name: name.clone(),
                        line: *line,
                    })?;
                (name.clone(), target)
            }
            Operand::BranchTarget(target) => (format!("${:04X}", target), *target),
            Operand::None | Operand::Immediate(_) => continue,
        };
        let resolved = if *operand_len == 1 {
            let from = (*address).ok_or_else(|| {
                AsmError::InvalidEmission(format!("branch to `{}` before layout", name))
            })?;
            let displacement = i32::from(target) - (i32::from(from) + 2);
            let disp = i8::try_from(displacement).map_err(|_| {
                AsmError::RelativeDisplacementOverflow {
                    name,
                    displacement,
                    line: *line,
                }
            })?;
            u16::from(disp as u8)
        } else {
            target
        };
        *operand = Operand::Immediate(resolved);
    }
    Ok(())
}

/// Lay out `records` from `base` and patch every pending operand.
pub fn layout_and_link(
    records: &mut [Record],
    labels: &mut LabelTable,
    base: u16,
) -> Result<(), AsmError> {
    tracing::trace!("starting pass 2");
    layout(records, labels, base)?;
    link(records, labels)
}

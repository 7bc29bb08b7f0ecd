//! Two-pass 6502 assembler producing flat binary images.
//!
//! - Numbers: `$` hex, `C` octal, `B` binary, plain decimal.
//! - Labels: `name:` (letter or `_`, up to eleven characters), usable before
//!   their definition.
//! - Directive: `dcb v,v,...` emits raw bytes.
//! - Comments start with a `;` token and run to the end of the line.
//! - Branches take a label or absolute target and are encoded as relative
//!   displacements; out of range targets are an error.
//!
//! ## Optional Features
//! - `listing`: enables functions to print and save human-readable assembly listings.
//!
//! ## Basic Usage
//! ```rust
//! use aslink::Assembler6502;
//!
//! fn main() -> Result<(), aslink::AsmError> {
//!     let mut assembler = Assembler6502::new();
//!     let src = "
//!         loop:
//!         LDA #$42
//!         STA $0200
//!         BNE loop
//!     ";
//!
//!     let bytes = assembler.assemble_bytes(src)?;
//!     assert_eq!(bytes, vec![0xA9, 0x42, 0x8D, 0x00, 0x02, 0xD0, 0xF9]);
//!     Ok(())
//! }
//! ```
//!
//! The phases can also be driven one at a time, in this order:
//! [`parse`], [`validate_labels`], [`layout_and_link`], then
//! [`emit_binary`] or [`emit_trace`].

mod addressing;
mod assembler;
mod emit;
mod error;
mod item;
mod link;
mod opcodes;
mod parser;
mod symbol;

// Public exports
pub use addressing::{classify, is_label, AddrMode, Classified, Index, OperandValue};
pub use assembler::Assembler6502;
#[cfg(feature = "listing")]
pub use emit::{print_listing, save_listing};
pub use emit::{emit_binary, emit_trace};
pub use error::AsmError;
pub use item::{Operand, Record, DCB};
pub use link::{layout, layout_and_link, link, validate_labels, DEFAULT_ORIGIN};
pub use opcodes::{OpcodeRow, OpcodeTable};
pub use parser::{
    combine_tokens, is_16bit_number, is_8bit_number, is_number, parse, parse_tokens, NumberFormat,
    TokenStream,
};
pub use symbol::LabelTable;

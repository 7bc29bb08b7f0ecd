//! Main assembler implementation

use std::io::Read;

use crate::emit::emit_binary;
#[cfg(feature = "listing")]
use crate::emit::{print_listing, save_listing};
use crate::error::AsmError;
use crate::item::Record;
use crate::link::{layout_and_link, validate_labels, DEFAULT_ORIGIN};
use crate::opcodes::OpcodeTable;
use crate::parser::{parse_tokens, TokenStream};
use crate::symbol::LabelTable;

/// Runs the whole pipeline at a fixed origin.
///
/// Labels from the most recent successful run stay available through
/// [`Assembler6502::symbols`] and [`Assembler6502::lookup`]; every run
/// starts from a fresh table.
pub struct Assembler6502<'t> {
    table: &'t OpcodeTable,
    start_address: u16,
    labels: LabelTable,
}

impl Default for Assembler6502<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler6502<'static> {
    pub fn new() -> Self {
        Self::with_table(OpcodeTable::standard())
    }
}

impl<'t> Assembler6502<'t> {
    pub fn with_table(table: &'t OpcodeTable) -> Self {
        Self {
            table,
            start_address: DEFAULT_ORIGIN,
            labels: LabelTable::new(),
        }
    }

    // ===== Public API =====

    pub fn assemble_bytes(&mut self, src: &str) -> Result<Vec<u8>, AsmError> {
        let (bytes, _records) = self.assemble_full(src)?;
        Ok(bytes)
    }

    pub fn assemble_into(&mut self, src: &str, out: &mut Vec<u8>) -> Result<(), AsmError> {
        out.clear();
        let bytes = self.assemble_bytes(src)?;
        out.extend_from_slice(&bytes);
        Ok(())
    }

    pub fn assemble_reader<R: Read>(
        &mut self,
        reader: R,
    ) -> Result<(Vec<u8>, Vec<Record>), AsmError> {
        self.assemble_tokens(TokenStream::from_reader(reader)?)
    }

    /// Assemble and keep the linked records alongside the image.
    pub fn assemble_full(&mut self, src: &str) -> Result<(Vec<u8>, Vec<Record>), AsmError> {
        self.assemble_tokens(TokenStream::new(src))
    }

    pub fn set_origin(&mut self, addr: u16) {
        self.start_address = addr;
    }

    pub fn origin(&self) -> u16 {
        self.start_address
    }

    pub fn symbols(&self) -> &LabelTable {
        &self.labels
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.labels.get(name)
    }

    pub fn write_bin<W: std::io::Write>(bytes: &[u8], mut w: W) -> std::io::Result<()> {
        w.write_all(bytes)
    }

    pub fn reset(&mut self) {
        self.labels = LabelTable::new();
        self.start_address = DEFAULT_ORIGIN;
    }

    // ===== Assembly core =====

    fn assemble_tokens(&mut self, tokens: TokenStream) -> Result<(Vec<u8>, Vec<Record>), AsmError> {
        self.labels = LabelTable::new();
        let (mut records, mut labels) = parse_tokens(tokens, self.table)?;
        validate_labels(&records, &labels)?;
        layout_and_link(&mut records, &mut labels, self.start_address)?;
        let bytes = emit_binary(&records)?;
        self.labels = labels;
        Ok((bytes, records))
    }

    // ===== Listing (feature-gated) =====

    #[cfg(feature = "listing")]
    pub fn print_assembly_listing(&self, records: &[Record]) {
        print_listing(records);
    }

    #[cfg(feature = "listing")]
    pub fn save_listing(&self, records: &[Record], filename: &str) -> std::io::Result<()> {
        save_listing(records, filename)
    }
}

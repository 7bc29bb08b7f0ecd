//! Addressing mode detection and handling

use strum::{Display, EnumCount, EnumIter};

use crate::parser::{is_16bit_number, is_8bit_number};

/// The thirteen 6502 addressing modes, in opcode-table slot order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[repr(u8)]
pub enum AddrMode {
    #[strum(serialize = "implied")]
    Implied,
    #[strum(serialize = "accumulator")]
    Accumulator,
    #[strum(serialize = "immediate")]
    Immediate,
    #[strum(serialize = "zeropage")]
    ZeroPage,
    #[strum(serialize = "zeropage,X")]
    ZeroPageX,
    #[strum(serialize = "zeropage,Y")]
    ZeroPageY,
    #[strum(serialize = "indirect,X")]
    IndexedIndirectX,
    #[strum(serialize = "indirect,Y")]
    IndirectIndexedY,
    #[strum(serialize = "absolute,X")]
    AbsoluteX,
    #[strum(serialize = "absolute,Y")]
    AbsoluteY,
    #[strum(serialize = "absolute")]
    Absolute,
    #[strum(serialize = "indirect")]
    Indirect,
    #[strum(serialize = "relative")]
    Relative,
}

impl AddrMode {
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_len(self) -> u8 {
        match self {
            AddrMode::Implied | AddrMode::Accumulator => 0,
            AddrMode::Immediate
            | AddrMode::ZeroPage
            | AddrMode::ZeroPageX
            | AddrMode::ZeroPageY
            | AddrMode::IndexedIndirectX
            | AddrMode::IndirectIndexedY
            | AddrMode::Relative => 1,
            AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::Absolute | AddrMode::Indirect => 2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Index {
    X,
    Y,
}

impl Index {
    fn parse(s: &str) -> Option<Index> {
        if s.eq_ignore_ascii_case("X") {
            Some(Index::X)
        } else if s.eq_ignore_ascii_case("Y") {
            Some(Index::Y)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandValue {
    Number(u16),
    Label(String),
}

/// Result of matching an operand token against one addressing syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub mode: AddrMode,
    pub len: u8,
    pub index: Option<Index>,
    pub value: OperandValue,
}

impl Classified {
    fn new(mode: AddrMode, index: Option<Index>, value: OperandValue) -> Self {
        Self {
            mode,
            len: mode.operand_len(),
            index,
            value,
        }
    }
}

/// Label names: a letter or `_`, then up to ten letters, digits or `_`.
pub fn is_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && name.len() <= 11
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A label definition token (`name:`), returning the bare name.
pub fn is_label(tok: &str) -> Option<&str> {
    tok.strip_suffix(':').filter(|name| is_label_name(name))
}

/// Classify an operand token. Syntaxes are tried in a fixed order and the
/// first match wins.
pub fn classify(tok: &str) -> Option<Classified> {
    immediate(tok)
        .or_else(|| direct(tok))
        .or_else(|| indexed(tok))
        .or_else(|| pre_indexed_indirect(tok))
        .or_else(|| post_indexed_indirect(tok))
        .or_else(|| indirect(tok))
}

/// `#n`
fn immediate(tok: &str) -> Option<Classified> {
    let value = is_8bit_number(tok.strip_prefix('#')?)?;
    Some(Classified::new(AddrMode::Immediate, None, OperandValue::Number(value.into())))
}

/// `n` or `label`
fn direct(tok: &str) -> Option<Classified> {
    if let Some(value) = is_8bit_number(tok) {
        return Some(Classified::new(AddrMode::ZeroPage, None, OperandValue::Number(value.into())));
    }
    if let Some(value) = is_16bit_number(tok) {
        return Some(Classified::new(AddrMode::Absolute, None, OperandValue::Number(value)));
    }
    is_label_name(tok)
        .then(|| Classified::new(AddrMode::Absolute, None, OperandValue::Label(tok.to_string())))
}

/// `n,X` / `n,Y` / `label,X` / `label,Y`
fn indexed(tok: &str) -> Option<Classified> {
    let (base, reg) = tok.split_once(',')?;
    let index = Index::parse(reg)?;
    let (zp, abs) = match index {
        Index::X => (AddrMode::ZeroPageX, AddrMode::AbsoluteX),
        Index::Y => (AddrMode::ZeroPageY, AddrMode::AbsoluteY),
    };
    if let Some(value) = is_8bit_number(base) {
        return Some(Classified::new(zp, Some(index), OperandValue::Number(value.into())));
    }
    if let Some(value) = is_16bit_number(base) {
        return Some(Classified::new(abs, Some(index), OperandValue::Number(value)));
    }
    is_label_name(base)
        .then(|| Classified::new(abs, Some(index), OperandValue::Label(base.to_string())))
}

/// `(n,X)`, zero page only
fn pre_indexed_indirect(tok: &str) -> Option<Classified> {
    let inner = tok.strip_prefix('(')?.strip_suffix(')')?;
    let (base, reg) = inner.split_once(',')?;
    if Index::parse(reg)? != Index::X {
        return None;
    }
    let value = is_8bit_number(base)?;
    Some(Classified::new(
        AddrMode::IndexedIndirectX,
        Some(Index::X),
        OperandValue::Number(value.into()),
    ))
}

/// `(n),Y`, zero page only
fn post_indexed_indirect(tok: &str) -> Option<Classified> {
    let (inner, tail) = tok.strip_prefix('(')?.split_once(')')?;
    let reg = tail.strip_prefix(',')?;
    if Index::parse(reg)? != Index::Y {
        return None;
    }
    let value = is_8bit_number(inner)?;
    Some(Classified::new(
        AddrMode::IndirectIndexedY,
        Some(Index::Y),
        OperandValue::Number(value.into()),
    ))
}

/// `(n)` or `(label)`
fn indirect(tok: &str) -> Option<Classified> {
    let inner = tok.strip_prefix('(')?.strip_suffix(')')?;
    if let Some(value) = is_16bit_number(inner) {
        return Some(Classified::new(AddrMode::Indirect, None, OperandValue::Number(value)));
    }
    is_label_name(inner)
        .then(|| Classified::new(AddrMode::Indirect, None, OperandValue::Label(inner.to_string())))
}

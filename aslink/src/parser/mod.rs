//! Scanner, literal recognition and the first assembler pass

pub mod lexer;
pub mod number;
pub mod source;

pub use lexer::{combine_tokens, TokenStream};
pub use number::{is_16bit_number, is_8bit_number, is_number, NumberFormat};
pub use source::{parse, parse_tokens};

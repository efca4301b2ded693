pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ParseError;
pub use lexer::{tokenize, Token, Tokens};
pub use parser::{parse, Parser};

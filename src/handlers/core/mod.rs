//! Core handler infrastructure: context, dispatch table and parser.

mod context;
mod parser;
mod registry;

pub use context::{Context, Handler, HandlerError, HandlerResult};
pub use parser::{CommandParser, ParserParams};
pub use registry::Registry;

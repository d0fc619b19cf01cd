//! Input handling: dialect sniffing, row reading, and source metadata.

mod reader;
mod sniffer;
mod source;

pub use reader::{RawRow, read_rows};
pub use sniffer::{Dialect, SnifferConfig, sniff};
pub use source::SourceMetadata;

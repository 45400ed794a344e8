//! # kasir-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Diacritic stripping for single-byte printers
//! - Chunked, paced transmission over any [`ByteChannel`]
//! - Network printing (TCP port 9100)
//!
//! Receipt layout (WHAT to print) stays in `kasir-pos`.
//!
//! ## Example
//!
//! ```ignore
//! use kasir_printer::{ChunkConfig, EscPosBuilder, TcpChannel, send_chunked};
//!
//! let mut builder = EscPosBuilder::new(32);
//! builder.center().bold().line("Toko Saya").bold_off();
//! builder.left().line_lr("TOTAL", "Rp 9.000");
//! builder.feed(3);
//!
//! let mut channel = TcpChannel::new("192.168.1.100", 9100)?;
//! channel.connect().await?;
//! send_chunked(&mut channel, &builder.build(), &ChunkConfig::default()).await?;
//! ```

mod channel;
mod chunked;
mod error;
mod escpos;
mod text;

// Re-exports
pub use channel::{ByteChannel, TcpChannel};
pub use chunked::{ChunkConfig, DEFAULT_CHUNK_DELAY, DEFAULT_CHUNK_SIZE, SendReport, send_chunked};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use text::{fit_columns, normalize_text};

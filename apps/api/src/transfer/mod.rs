// Moving a draft in and out of the service: the JSON transfer file, a copy
// with fresh ids, and a plain-text rendering for the clipboard.

pub mod codec;
pub mod duplicate;
pub mod handlers;
pub mod plain_text;

pub use codec::{
    decode, decode_bytes, export_as_json, export_filename, import_from_json, ImportMode,
    TransferError,
};
pub use duplicate::duplicate;
pub use plain_text::render_plain_text;

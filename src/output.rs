// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Terraform external data source output
//!
//! The `external` data source only accepts a flat object of string values, so
//! each structured value is serialized to a JSON string first.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

/// Final output: key to JSON-encoded value
pub type ExternalData = BTreeMap<String, String>;

/// Encode every value of `data` as a JSON string
///
/// # Errors
/// Returns an error if a value fails to serialize
pub fn encode<T: Serialize>(data: &BTreeMap<String, T>) -> serde_json::Result<ExternalData> {
    data.iter()
        .map(|(key, value)| Ok((key.clone(), serde_json::to_string(value)?)))
        .collect()
}

/// Write `data` as a single JSON line
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn emit<W: Write>(mut out: W, data: &ExternalData) -> std::io::Result<()> {
    serde_json::to_writer(&mut out, data)?;
    out.write_all(b"\n")?;
    out.flush()
}

//! Output key derivation

use crate::config::ReshapeConfig;

/// Derive the converted object key from a raw object key
///
/// Takes the last `/` segment of `source_key`, swaps the raw suffix token
/// for the converted one and places the result under the destination layer.
/// A filename without the raw token is reused unchanged.
pub fn derive_output_key(source_key: &str, config: &ReshapeConfig) -> String {
    let file_name = source_key.rsplit('/').next().unwrap_or(source_key);
    let converted = file_name.replace(
        &config.source_raw_suffix_token,
        &config.destination_converted_suffix_token,
    );

    let layer = config.destination_layer_prefix.trim_end_matches('/');
    if layer.is_empty() {
        converted
    } else {
        format!("{layer}/{converted}")
    }
}

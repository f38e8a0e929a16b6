use std::collections::HashMap;

use regex::Regex;

use crate::types::CONTENT_SHA256_METADATA_KEY;

const METADATA_PATTERN: &str =
    r"^[a-zA-Z0-9_\-.]+=[a-zA-Z0-9_\-.]*(,[a-zA-Z0-9_\-.]+=[a-zA-Z0-9_\-.]*)*$";

const INVALID_METADATA: &str = "invalid metadata.";
const RESERVED_METADATA_KEY: &str =
    "metadata key x-amz-content-sha256 is reserved for the content digest.";

pub fn check_metadata(metadata: &str) -> Result<String, String> {
    parse_metadata(metadata)?;

    Ok(metadata.to_string())
}

/// Parses `key1=value1,key2=value2`. Keys are lowercased, as S3 stores them.
pub fn parse_metadata(value: &str) -> Result<HashMap<String, String>, String> {
    let pattern = Regex::new(METADATA_PATTERN).map_err(|e| e.to_string())?;
    if !pattern.is_match(value) {
        return Err(INVALID_METADATA.to_string());
    }

    let mut metadata = HashMap::new();
    for (key, value) in value.split(',').filter_map(|entry| entry.split_once('=')) {
        let key = key.to_lowercase();
        if key == CONTENT_SHA256_METADATA_KEY {
            return Err(RESERVED_METADATA_KEY.to_string());
        }

        metadata.insert(key, value.to_string());
    }

    Ok(metadata)
}

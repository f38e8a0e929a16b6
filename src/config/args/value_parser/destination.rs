use std::collections::HashSet;
use std::path::Path;

use crate::types::error::S3deployError;
use crate::types::{Destination, S3_SCHEME};

const PATH_SEPARATOR: char = '/';

pub fn check_destination(destination: &str) -> Result<String, String> {
    split_bucket_and_key(destination).map_err(|e| e.to_string())?;

    Ok(destination.to_string())
}

/// Turns raw `s3://bucket[/key-or-prefix]` strings into destinations.
///
/// A missing key, or a key ending in `/`, gets the source file name appended.
/// Duplicates are merged, keeping the position of the first occurrence.
pub fn parse_destinations<S: AsRef<str>>(
    source: &Path,
    destinations: &[S],
) -> Result<Vec<Destination>, S3deployError> {
    let file_name = source_file_name(source)?;

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(destinations.len());
    for raw in destinations {
        let destination = parse_destination(&file_name, raw.as_ref())?;
        if seen.insert(destination.clone()) {
            parsed.push(destination);
        }
    }

    Ok(parsed)
}

pub fn parse_destination(file_name: &str, destination: &str) -> Result<Destination, S3deployError> {
    let (bucket, key) = split_bucket_and_key(destination)?;

    let key = match key {
        None => file_name.to_string(),
        Some(key) if key.is_empty() || key.ends_with(PATH_SEPARATOR) => {
            format!("{key}{file_name}")
        }
        Some(key) => key.to_string(),
    };

    Ok(Destination::new(bucket, &key))
}

pub fn source_file_name(source: &Path) -> Result<String, S3deployError> {
    source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| S3deployError::InvalidSource(source.to_path_buf()))
}

fn split_bucket_and_key(destination: &str) -> Result<(&str, Option<&str>), S3deployError> {
    let remainder = destination
        .strip_prefix(S3_SCHEME)
        .ok_or_else(|| S3deployError::InvalidDestinationScheme(destination.to_string()))?;

    let (bucket, key) = match remainder.split_once(PATH_SEPARATOR) {
        Some((bucket, key)) => (bucket, Some(key)),
        None => (remainder, None),
    };

    if bucket.is_empty() {
        return Err(S3deployError::NoBucketName(destination.to_string()));
    }

    Ok((bucket, key))
}

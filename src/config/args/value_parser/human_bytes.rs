use byte_unit::Byte;
use std::str::FromStr;

const UNDER_MIN_BLOCK_SIZE: &str = "must be greater than or equal to 1KiB";
const OVER_MAX_BLOCK_SIZE: &str = "must be smaller than or equal to 16MiB";

const MIN_BLOCK_SIZE: u128 = 1024;
const MAX_BLOCK_SIZE: u128 = 16 * 1024 * 1024;

pub fn check_block_size(value: &str) -> Result<String, String> {
    let result = Byte::from_str(value).map_err(|e| e.to_string())?;

    if result.as_u128() < MIN_BLOCK_SIZE {
        return Err(UNDER_MIN_BLOCK_SIZE.to_string());
    }
    if result.as_u128() > MAX_BLOCK_SIZE {
        return Err(OVER_MAX_BLOCK_SIZE.to_string());
    }

    Ok(value.to_string())
}

pub fn parse_block_size(value: &str) -> Result<usize, String> {
    check_block_size(value)?;

    let result = Byte::from_str(value).map_err(|e| e.to_string())?;
    usize::try_from(result.as_u128()).map_err(|e| e.to_string())
}

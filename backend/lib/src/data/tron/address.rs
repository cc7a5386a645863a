//! Tron account address parsing
//!
//! Accepted forms:
//! - base58check, `T...` (34 characters)
//! - hex with the `41` version byte (42 characters)
//! - `0x` followed by the 20 byte account id, or by the version byte and the id

use crate::{
    constants::tron::ADDRESS_PREFIX,
    data::tron::connection::error::{TronConnectionError, TronResult},
};

/// Version byte followed by the 20 byte account id
const RAW_LEN: usize = 21;
const BASE58_LEN: usize = 34;

/// Parse `address` in any accepted form and return its base58check form.
///
/// Surrounding whitespace is not stripped and makes the address invalid.
pub fn to_base58check(address: &str) -> TronResult<String> {
    let bad = || TronConnectionError::BadAddress(address.to_string());

    if address.len() == BASE58_LEN && address.starts_with('T') {
        let raw = bs58::decode(address)
            .with_check(Some(ADDRESS_PREFIX))
            .into_vec()
            .map_err(|_| bad())?;
        if raw.len() != RAW_LEN {
            return Err(bad());
        }

        return Ok(address.to_string());
    }

    let raw = match address.strip_prefix("0x") {
        Some(id) if id.len() == 2 * (RAW_LEN - 1) => {
            let mut raw = vec![ADDRESS_PREFIX];
            raw.extend(hex::decode(id).map_err(|_| bad())?);
            raw
        }
        Some(raw) if raw.len() == 2 * RAW_LEN => hex::decode(raw).map_err(|_| bad())?,
        Some(_) => return Err(bad()),
        None if address.len() == 2 * RAW_LEN => hex::decode(address).map_err(|_| bad())?,
        None => return Err(bad()),
    };

    if raw[0] != ADDRESS_PREFIX {
        return Err(bad());
    }

    Ok(bs58::encode(raw).with_check().into_string())
}

//! Update request builder
//!
//! Combines an [`UpdateSelection`] with the discovered [`AddressSet`]. Pure:
//! no network, no file, no logging.

use crate::error::BuildError;
use crate::types::{AddressFamily, AddressSet, UpdateRequest, UpdateSelection};

/// Build the provider request for `selection` from `addrs`
///
/// Every wanted family must be present in `addrs`, IPv4 checked first.
/// Families the selection does not want are never copied, even when
/// discovered.
pub fn build(selection: &UpdateSelection, addrs: &AddressSet) -> Result<UpdateRequest, BuildError> {
    let ipv4 = pick(selection, addrs, AddressFamily::V4)?;
    let ipv6 = pick(selection, addrs, AddressFamily::V6)?;

    Ok(UpdateRequest::new(
        selection.hostname().to_string(),
        selection.token().to_string(),
        ipv4,
        ipv6,
    ))
}

fn pick(
    selection: &UpdateSelection,
    addrs: &AddressSet,
    family: AddressFamily,
) -> Result<Option<String>, BuildError> {
    if !selection.wants(family) {
        return Ok(None);
    }
    addrs
        .get(family)
        .map(|addr| Some(addr.to_string()))
        .ok_or(BuildError::MissingFamily(family))
}

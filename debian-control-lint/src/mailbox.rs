//! Syntax validation of email addresses.

use once_cell::sync::Lazy;
use regex::Regex;

/// Validates the syntax of a single mailbox address such as `user@example.org`.
pub trait MailboxValidator {
    /// Whether `address` is a syntactically valid mailbox.
    fn is_valid(&self, address: &str) -> bool;
}

// dot-atom local part, hostname-style domain
static ADDR_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$"
    ))
    .unwrap()
});

/// Validates the RFC 5322 `addr-spec` form with a dot-atom local part.
///
/// Quoted local parts and domain literals are not accepted; they have no
/// place in Debian maintainer fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc5322Validator;

impl MailboxValidator for Rfc5322Validator {
    fn is_valid(&self, address: &str) -> bool {
        address.len() <= 254 && ADDR_SPEC.is_match(address)
    }
}

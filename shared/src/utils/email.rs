//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately loose: one `@`, a non-empty local part and a dotted domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// Canonical form used for storage and comparison: trimmed and lower-cased
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Check if an address looks like an email address
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_REGEX.is_match(address.trim())
}

/// Domain part of an address, lower-cased
pub fn email_domain(address: &str) -> Option<String> {
    let (_, domain) = address.trim().rsplit_once('@')?;
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_lowercase())
    }
}

/// Apply an allow list and a block list to the address domain.
///
/// An empty allow list admits every domain that is not blocked. Entries match the
/// domain exactly or as a parent domain (`edu.mx` admits `itcelaya.edu.mx`).
pub fn domain_permitted(address: &str, allowed: &[String], blocked: &[String]) -> bool {
    if allowed.is_empty() && blocked.is_empty() {
        return true;
    }

    let domain = match email_domain(address) {
        Some(domain) => domain,
        None => return false,
    };

    let matches = |entry: &String| {
        let entry = entry.trim().trim_start_matches('@').to_lowercase();
        !entry.is_empty() && (domain == entry || domain.ends_with(&format!(".{}", entry)))
    };

    if blocked.iter().any(matches) {
        return false;
    }

    allowed.is_empty() || allowed.iter().any(matches)
}

/// Mask an address for logs (e.g., al***@itcelaya.edu.mx)
pub fn mask_address(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => String::from("***"),
    }
}

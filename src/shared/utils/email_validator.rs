/// Checks an address the way registration and profile updates expect it:
/// a syntactically valid address whose domain carries a TLD.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();

    if !email_address::EmailAddress::is_valid(trimmed) {
        return false;
    }

    // Require a dot after the @ (user@localhost is valid RFC 5322 but not accepted here)
    match trimmed.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

/// Trims and lowercases an address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

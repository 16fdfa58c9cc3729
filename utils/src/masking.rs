//! Masking of secrets and contact values before they reach logs or the
//! audit trail.
//!
//! Invariant: a one-time code never appears in cleartext anywhere outside
//! the channel message itself.

/// Replace every character of a one-time code with `*`.
pub fn mask_code(code: &str) -> String {
    "*".repeat(code.chars().count())
}

/// Replace a code inside an already-rendered message with its mask.
pub fn mask_message(message: &str, code: &str) -> String {
    if code.is_empty() {
        return message.to_string();
    }
    message.replace(code, &mask_code(code))
}

/// Mask a contact value for logging.
///
/// Emails keep the first character and the domain; phones keep the country
/// prefix and last four digits.
pub fn mask_contact(contact: &str) -> String {
    if let Some((local, domain)) = contact.split_once('@') {
        let head = local.chars().next().map(String::from).unwrap_or_default();
        return format!("{head}***@{domain}");
    }
    let chars: Vec<char> = contact.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible_tail: String = chars[chars.len() - 4..].iter().collect();
    let prefix_len = if contact.starts_with('+') { 3 } else { 0 };
    let prefix: String = chars[..prefix_len.min(chars.len() - 4)].iter().collect();
    let masked = chars.len() - prefix.chars().count() - 4;
    format!("{prefix}{}{visible_tail}", "*".repeat(masked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fully_masked() {
        assert_eq!(mask_code("482913"), "******");
    }

    #[test]
    fn message_hides_code() {
        let msg = "Your Carelink code is 482913. Valid for 5 minutes.";
        let masked = mask_message(msg, "482913");
        assert!(!masked.contains("482913"));
        assert!(masked.contains("******"));
    }

    #[test]
    fn email_keeps_domain() {
        assert_eq!(mask_contact("holder@example.com"), "h***@example.com");
    }

    #[test]
    fn phone_keeps_prefix_and_tail() {
        assert_eq!(mask_contact("+15551234567"), "+15*****4567");
    }

    #[test]
    fn short_values_fully_masked() {
        assert_eq!(mask_contact("123"), "***");
    }
}

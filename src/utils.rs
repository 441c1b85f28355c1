/// Mask a token for display, keeping enough of both ends to recognize it.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 15 {
        // Too short to safely show, just show dots
        return "●".repeat(len);
    }

    let first: String = token.chars().take(7).collect();
    let last: String = token.chars().skip(len - 6).collect();
    format!("{}...{}", first, last)
}

/// Clip display text to `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_short_is_all_dots() {
        assert_eq!(mask_token("abc"), "●●●");
    }

    #[test]
    fn test_mask_token_keeps_ends() {
        let token = "eyJhbGciOiJIUzI1NiJ9.payload.signature";
        let masked = mask_token(token);
        assert!(masked.starts_with("eyJhbGc"));
        assert!(masked.ends_with("nature"));
        assert!(masked.contains("..."));
    }

    #[test]
    fn test_mask_token_handles_multibyte_tokens() {
        // 16 chars but 32 bytes: ends must be cut on character boundaries
        let token = "é".repeat(16);
        let masked = mask_token(&token);
        assert!(masked.starts_with(&"é".repeat(7)));
        assert!(masked.ends_with(&"é".repeat(6)));
    }

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        assert_eq!(truncate("Cardiology", 20), "Cardiology");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate("Internal Medicine", 9), "Internal…");
    }
}

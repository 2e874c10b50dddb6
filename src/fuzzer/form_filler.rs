// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/// Plausible value for an empty form field, keyed on its name.
///
/// Keeps validation on unrelated fields ("field X is required") from
/// rejecting a mutant before the fuzzed value is ever processed.
pub fn smart_fill(field_name: &str) -> String {
    let name_lower = field_name.to_lowercase();

    // Address fields
    if name_lower.contains("address") || name_lower.contains("street") {
        return "Bonsai Street 123".to_string();
    }

    // Email fields
    if name_lower.contains("email") || name_lower.contains("mail") {
        return "w3af@email.com".to_string();
    }

    // Phone fields
    if name_lower.contains("phone") || name_lower.contains("tel") || name_lower.contains("mobile") {
        return "55550178".to_string();
    }

    // User/login fields
    if name_lower.contains("user") || name_lower.contains("login") || name_lower.contains("nick") {
        return "john8212".to_string();
    }

    // Name fields
    if name_lower.contains("name") {
        return "John".to_string();
    }

    if name_lower.contains("pass") || name_lower.contains("pwd") {
        return "FrAmE30.".to_string();
    }

    if name_lower.contains("url") || name_lower.contains("website") || name_lower.contains("link") {
        return "http://www.w3af.com/".to_string();
    }

    if name_lower.contains("city") || name_lower.contains("town") {
        return "Buenos Aires".to_string();
    }

    if name_lower.contains("country") {
        return "Argentina".to_string();
    }

    if name_lower.contains("zip") || name_lower.contains("postal") {
        return "90210".to_string();
    }

    if name_lower.contains("company") || name_lower.contains("organization") {
        return "Bonsai Sec".to_string();
    }

    if name_lower.contains("date") || name_lower.contains("birth") {
        return "2000-01-01".to_string();
    }

    // Message/comment fields
    if name_lower.contains("message")
        || name_lower.contains("comment")
        || name_lower.contains("subject")
        || name_lower.contains("title")
    {
        return "Hello World".to_string();
    }

    // Numbers pass the widest range of checks
    "56".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields() {
        assert_eq!(smart_fill("address"), "Bonsai Street 123");
        assert_eq!(smart_fill("E-Mail"), "w3af@email.com");
        assert_eq!(smart_fill("username"), "john8212");
        assert_eq!(smart_fill("first_name"), "John");
    }

    #[test]
    fn test_default_is_numeric() {
        assert_eq!(smart_fill("foo"), "56");
        assert_eq!(smart_fill(""), "56");
    }
}

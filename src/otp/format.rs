/// Block size used when rendering secrets for display.
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Render a Base32 secret as space-separated blocks for reading aloud or
/// retyping.
///
/// Trailing `=` padding becomes its own final group so it is not mistaken
/// for data. Works on any string; a `group_size` of 0 is treated as 1.
pub fn format_secret(secret: &str, group_size: usize) -> String {
    let group_size = group_size.max(1);
    let compact: Vec<char> = secret
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    let body_len = compact.len() - compact.iter().rev().take_while(|&&c| c == '=').count();
    let (body, padding) = compact.split_at(body_len);

    let mut groups: Vec<String> = body
        .chunks(group_size)
        .map(|chunk| chunk.iter().collect())
        .collect();
    if !padding.is_empty() {
        groups.push(padding.iter().collect());
    }

    groups.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_of_four() {
        assert_eq!(format_secret("JBSWY3DPEHPK3PXP", 4), "JBSW Y3DP EHPK 3PXP");
    }

    #[test]
    fn test_padding_is_separate_group() {
        assert_eq!(format_secret("MFRGGZDF==", 4), "MFRG GZDF ==");
        assert_eq!(format_secret("MFRGG===", 4), "MFRG G ===");
    }

    #[test]
    fn test_canonicalizes_input() {
        assert_eq!(format_secret(" jbsw y3dp\tehpk ", 4), "JBSW Y3DP EHPK");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(format_secret("", 4), "");
        assert_eq!(format_secret("   ", 4), "");
        assert_eq!(format_secret("===", 4), "===");
        assert_eq!(format_secret("ABC", 0), "A B C");
    }

    #[test]
    fn test_other_group_sizes() {
        assert_eq!(format_secret("JBSWY3DPEHPK3PXP", 6), "JBSWY3 DPEHPK 3PXP");
        assert_eq!(format_secret("JBSWY3DPEHPK3PXP", 32), "JBSWY3DPEHPK3PXP");
    }
}

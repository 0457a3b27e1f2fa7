//! Small pure helpers shared across the crate.

/// Derives a machine-friendly snake_case identifier from a device path.
///
/// Used to default a path's field name when the configuration does not
/// set one explicitly. Non-alphanumeric characters separate words, a
/// lowercase-to-uppercase transition starts a new word, an uppercase run
/// followed by a lowercase letter is treated as an acronym boundary, and
/// digits attach to the preceding word.
///
/// `"Input1/SignalPresent"` becomes `"input1_signal_present"`.
pub fn snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    let mut pending_sep = false;

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            // Separator run; emitted lazily so we never produce leading,
            // trailing or doubled underscores.
            if !out.is_empty() {
                pending_sep = true;
            }
            continue;
        }

        let starts_word = if c.is_uppercase() {
            match chars[..i].iter().rev().find(|p| p.is_alphanumeric()) {
                // aB and 1B are boundaries; ABc splits before the 'B'
                // when the next char is lowercase (acronym end).
                Some(p) if p.is_lowercase() || p.is_numeric() => true,
                Some(p) if p.is_uppercase() => {
                    chars.get(i + 1).is_some_and(|n| n.is_lowercase())
                }
                _ => false,
            }
        } else {
            false
        };

        if (pending_sep || starts_word) && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;

        out.extend(c.to_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_camel_words() {
        assert_eq!(snake_case("SignalPresent"), "signal_present");
        assert_eq!(snake_case("helloWorld"), "hello_world");
    }

    #[test]
    fn test_snake_case_path_separators() {
        assert_eq!(snake_case("Input1/SignalPresent"), "input1_signal_present");
        assert_eq!(
            snake_case("/api/V1/MEDIA/VIDEO/I1/SETTINGS/Enable"),
            "api_v1_media_video_i1_settings_enable"
        );
    }

    #[test]
    fn test_snake_case_acronyms_and_digits() {
        assert_eq!(snake_case("MACAddress"), "mac_address");
        assert_eq!(snake_case("HdcpEnable2"), "hdcp_enable2");
        assert_eq!(snake_case("Input1"), "input1");
    }

    #[test]
    fn test_snake_case_is_stable() {
        let once = snake_case("Input1/SignalPresent");
        let twice = snake_case(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_snake_case_edge_inputs() {
        assert_eq!(snake_case(""), "");
        assert_eq!(snake_case("///"), "");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }
}

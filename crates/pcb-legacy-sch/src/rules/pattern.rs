//! Rule keys → regular expressions

use regex::Regex;

/// A compiled rule key
///
/// Bare keys such as `R` or `C|CP` must match the whole subject. Keys written
/// as `/body/flags` are searched for anywhere in the subject.
#[derive(Debug, Clone)]
pub enum Pattern {
    Anchored(Regex),
    Search(Regex),
    /// The key could not be compiled; it never matches
    Invalid,
}

impl Pattern {
    /// Compile a rule key.
    ///
    /// A `/body/flags` key is split at its last `/`, so the body may itself
    /// contain slashes (`/a/b/i` searches for `a/b`).
    pub fn parse(key: &str) -> Self {
        let (source, anchored) = match key.strip_prefix('/') {
            Some(rest) => {
                let (body, flags) = rest.rsplit_once('/').unwrap_or((rest, ""));
                match inline_flags(flags) {
                    Ok(inline) if inline.is_empty() => (body.to_string(), false),
                    Ok(inline) => (format!("(?{inline}){body}"), false),
                    Err(flag) => {
                        log::warn!("Ignoring rule `{key}`: unsupported flag `{flag}`");
                        return Pattern::Invalid;
                    }
                }
            }
            None => (format!("^(?:{key})$"), true),
        };

        match Regex::new(&source) {
            Ok(re) if anchored => Pattern::Anchored(re),
            Ok(re) => Pattern::Search(re),
            Err(e) => {
                log::warn!("Ignoring rule `{key}`: {e}");
                Pattern::Invalid
            }
        }
    }

    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Pattern::Anchored(re) | Pattern::Search(re) => re.is_match(subject),
            Pattern::Invalid => false,
        }
    }
}

/// Map `/.../flags` letters onto inline regex flags.
///
/// `g`, `y` and `u` change nothing for a plain match test and are dropped.
fn inline_flags(flags: &str) -> Result<String, char> {
    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' => {
                if !inline.contains(flag) {
                    inline.push(flag);
                }
            }
            'g' | 'y' | 'u' => {}
            other => return Err(other),
        }
    }
    Ok(inline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_key_is_anchored() {
        let p = Pattern::parse("R");
        assert!(matches!(p, Pattern::Anchored(_)));
        assert!(p.matches("R"));
        assert!(!p.matches("RV"));
        assert!(!p.matches("FR"));
    }

    #[test]
    fn test_bare_alternation_is_anchored_as_a_whole() {
        let p = Pattern::parse("C|CP");
        assert!(p.matches("C"));
        assert!(p.matches("CP"));
        assert!(!p.matches("CPX"));
        assert!(!p.matches("XC"));
    }

    #[test]
    fn test_delimited_key_searches() {
        let p = Pattern::parse("/^Device:R/");
        assert!(matches!(p, Pattern::Search(_)));
        assert!(p.matches("Device:R_Small"));
        assert!(!p.matches("device:r"));

        let p = Pattern::parse("/_small$/i");
        assert!(p.matches("Device:C_Small"));
    }

    #[test]
    fn test_body_may_contain_slashes() {
        let p = Pattern::parse("/a/b/");
        assert!(p.matches("xa/by"));
    }

    #[test]
    fn test_ignored_flags() {
        assert!(Pattern::parse("/led/giu").matches("Device:LED"));
    }

    #[test]
    fn test_invalid_keys_never_match() {
        let p = Pattern::parse("/R/q");
        assert!(matches!(p, Pattern::Invalid));
        assert!(!p.matches("R"));

        let p = Pattern::parse("R(");
        assert!(matches!(p, Pattern::Invalid));
        assert!(!p.matches("R("));
    }
}

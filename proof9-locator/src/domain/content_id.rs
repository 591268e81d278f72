use std::fmt;

const CIDV0_PREFIX: &str = "Qm";
const CIDV0_SUFFIX_LEN: usize = 44;

const CIDV1_PREFIX: &str = "bafy";
const CIDV1_SUFFIX_LEN: usize = 55;

const SCHEME_PREFIX: &str = "ipfs://";
const GATEWAY_MARKER: &str = "/ipfs/";

/// A validated content-addressed identifier.
///
/// Two textual shapes are accepted: `Qm` followed by exactly 44 base58
/// characters, or `bafy` followed by exactly 55 lowercase alphanumeric
/// characters. Anything else is rejected at construction, so a held
/// `ContentId` is always resolvable against a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ContentId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseContentIdError {
    #[error("not a valid content identifier")]
    Invalid,
}

impl std::str::FromStr for ContentId {
    type Err = ParseContentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match leading_identifier(s) {
            Some(run) if run.len() == s.len() => Ok(Self(run.to_owned())),
            _ => Err(ParseContentIdError::Invalid),
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ContentId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseContentIdError> {
        let s = raw.into();
        s.parse()
    }

    /// Extracts the identifier from a content reference, trying the three
    /// accepted forms in order:
    ///
    /// 1. a bare identifier (the whole string matches the grammar),
    /// 2. an `ipfs://` URI (identifier must start the remainder; trailing
    ///    path content after the fixed-length run is ignored),
    /// 3. a gateway URL containing `/ipfs/` followed by an identifier.
    ///
    /// Returns `None` for anything else, including empty input.
    pub fn extract(reference: &str) -> Option<Self> {
        if let Some(run) = leading_identifier(reference) {
            if run.len() == reference.len() {
                return Some(Self(run.to_owned()));
            }
        }

        if let Some(rest) = reference.strip_prefix(SCHEME_PREFIX) {
            return leading_identifier(rest).map(|run| Self(run.to_owned()));
        }

        for (pos, _) in reference.match_indices(GATEWAY_MARKER) {
            let rest = &reference[pos + GATEWAY_MARKER.len()..];
            if let Some(run) = leading_identifier(rest) {
                return Some(Self(run.to_owned()));
            }
        }

        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Returns the identifier run anchored at the start of `s`, if any.
/// Trailing content after the fixed-length run is not inspected.
fn leading_identifier(s: &str) -> Option<&str> {
    if let Some(rest) = s.strip_prefix(CIDV0_PREFIX) {
        if run_matches(rest, CIDV0_SUFFIX_LEN, is_base58_char) {
            return Some(&s[..CIDV0_PREFIX.len() + CIDV0_SUFFIX_LEN]);
        }
    }

    if let Some(rest) = s.strip_prefix(CIDV1_PREFIX) {
        if run_matches(rest, CIDV1_SUFFIX_LEN, is_lower_alphanumeric) {
            return Some(&s[..CIDV1_PREFIX.len() + CIDV1_SUFFIX_LEN]);
        }
    }

    None
}

/// True when the first `len` characters of `s` all satisfy `accepts`.
/// The accepted alphabets are ASCII, so a `true` result guarantees the
/// run is exactly `len` bytes long.
fn run_matches(s: &str, len: usize, accepts: fn(char) -> bool) -> bool {
    let mut chars = s.chars();
    for _ in 0..len {
        match chars.next() {
            Some(c) if accepts(c) => {}
            _ => return false,
        }
    }
    true
}

// Bitcoin-style base58: alphanumerics minus 0, I, O and l.
fn is_base58_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'I' | 'O' | 'l')
}

fn is_lower_alphanumeric(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

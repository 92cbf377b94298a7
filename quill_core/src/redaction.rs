use regex::Regex;
use std::sync::OnceLock;

/// Masks credentials that may appear in transport errors (request URLs,
/// echoed headers, provider error bodies) before they reach the log file.
pub fn redact_sensitive_text(input: &str) -> String {
    static AUTH_BEARER_RE: OnceLock<Regex> = OnceLock::new();
    static QUERY_KEY_RE: OnceLock<Regex> = OnceLock::new();
    static GOOGLE_KEY_RE: OnceLock<Regex> = OnceLock::new();
    static SK_KEY_RE: OnceLock<Regex> = OnceLock::new();

    let auth_bearer_re = AUTH_BEARER_RE.get_or_init(|| {
        Regex::new(r#"(?i)(authorization\s*:\s*bearer\s+)([A-Za-z0-9._~+/=-]+)"#).unwrap()
    });
    let query_key_re = QUERY_KEY_RE.get_or_init(|| {
        Regex::new(r#"(?i)([?&](?:key|api_key|apikey|access_token|token)=)([^&\s"']+)"#).unwrap()
    });
    let google_key_re =
        GOOGLE_KEY_RE.get_or_init(|| Regex::new(r#"\bAIza[0-9A-Za-z_-]{20,}"#).unwrap());
    let sk_key_re =
        SK_KEY_RE.get_or_init(|| Regex::new(r#"(?i)\bsk-[A-Za-z0-9_-]{12,}\b"#).unwrap());

    let masked = auth_bearer_re.replace_all(input, "$1[REDACTED]");
    let masked = query_key_re.replace_all(&masked, "$1[REDACTED]");
    let masked = google_key_re.replace_all(&masked, "[REDACTED]");
    sk_key_re.replace_all(&masked, "[REDACTED]").into_owned()
}

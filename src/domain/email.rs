//! Email address syntax check.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 254;
const MAX_LABEL_LEN: usize = 63;

static LOCAL_ATOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~\-\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]+$")
        .expect("Failed to compile email local part regex")
});

static DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9\x{00A1}-\x{D7FF}\x{E000}-\x{FFFF}\-]+$")
        .expect("Failed to compile domain label regex")
});

static TLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z\x{00A1}-\x{00A8}\x{00AA}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]{2,}|xn[a-z0-9\-]{2,})$")
        .expect("Failed to compile TLD regex")
});

/// Check that `email` has the usual `local@domain.tld` shape.
///
/// - the local part is a dot-separated run of atoms, or a quoted string
/// - the domain is a fully qualified name with an alphabetic (or punycode) TLD
/// - IP-literal domains, trailing-dot domains and display names
///   (`Name <a@b.c>`) are rejected
///
/// # Example
///
/// ```
/// use contact_book::domain::is_valid_email;
///
/// assert!(is_valid_email("ana@x.com"));
/// assert!(!is_valid_email("ana@x.com."));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > MAX_LOCAL_LEN || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }

    is_valid_domain(&domain.to_lowercase()) && is_valid_local(local)
}

fn is_valid_local(local: &str) -> bool {
    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        return is_valid_quoted(&local[1..local.len() - 1]);
    }

    // Empty atoms mean a leading, trailing or doubled dot
    local
        .split('.')
        .all(|atom| !atom.is_empty() && LOCAL_ATOM_RE.is_match(atom))
}

fn is_valid_quoted(inner: &str) -> bool {
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '"' | '\r' | '\n' => return false,
            _ => {}
        }
    }
    true
}

// A trailing dot leaves an empty last label, which the TLD check rejects
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 {
        return false;
    }

    let tld = labels[labels.len() - 1];
    if !TLD_RE.is_match(tld) {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && DOMAIN_LABEL_RE.is_match(label)
            && !label.starts_with('-')
            && !label.ends_with('-')
            && !label.chars().any(|c| ('\u{FF01}'..='\u{FF5E}').contains(&c))
    })
}

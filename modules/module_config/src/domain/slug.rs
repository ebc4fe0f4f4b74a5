//! Machine-key derivation from human labels

/// Lowercase a label into a `snake_case` key.
///
/// Runs of non-alphanumeric characters collapse into a single underscore;
/// leading and trailing underscores are trimmed. `"Lease Expiry (Date)"`
/// becomes `"lease_expiry_date"`.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_underscore = true;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Reduces a user-provided profile name to a filesystem-safe token:
/// whitespace runs become single underscores, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading or trailing dots and
/// underscores are trimmed. Returns `None` when nothing usable is left.
pub fn sanitize_profile_name(name: &str) -> Option<String> {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered = joined
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
        .collect::<String>();
    let trimmed = filtered.trim_matches(|ch| ch == '.' || ch == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

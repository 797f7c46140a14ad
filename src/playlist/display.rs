/// Strip the last extension from a file name.
///
/// Only a trailing `.ext` with a non-empty extension is removed, so
/// `"a.b.mp3"` becomes `"a.b"`, `"trail."` stays as is and `".mp3"`
/// becomes empty.
pub fn display_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}

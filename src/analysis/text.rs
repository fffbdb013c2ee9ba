/// Collapses every run of whitespace (newlines and tabs included) to one
/// space and trims both ends.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }

    result
}

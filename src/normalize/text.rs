/// Trim and collapse every whitespace run to a single space.
pub fn clean_description(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}

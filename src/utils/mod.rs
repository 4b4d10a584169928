pub mod data;
pub mod pick_parser;
pub mod settlement;
pub mod team_resolver;

/// Title-case a name: uppercase the first letter of each run of letters
///
/// "new york knicks" -> "New York Knicks", "o'neil" -> "O'Neil"
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

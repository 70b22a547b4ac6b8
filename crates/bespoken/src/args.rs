//! Splitting the argument text of a scraped call like `write_file("a.txt", 'hi, there')`.

const QUOTES: [char; 2] = ['"', '\''];

/// Split raw argument text into positional string arguments.
///
/// Commas separate arguments unless they sit inside quotes. Either quote character opens a
/// quoted run and only the same character closes it; the quote characters themselves are
/// dropped. Each argument is trimmed, then stripped of any quote characters left at its ends.
/// Input that is blank yields no arguments.
pub fn parse_args(args: &str) -> Vec<String> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut parsed = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;

    for ch in args.chars() {
        match open_quote {
            None if QUOTES.contains(&ch) => open_quote = Some(ch),
            Some(quote) if ch == quote => open_quote = None,
            None if ch == ',' => parsed.push(finish(&mut current)),
            _ => current.push(ch),
        }
    }
    parsed.push(finish(&mut current));

    parsed
}

fn finish(current: &mut String) -> String {
    let token = current.trim().trim_matches(&QUOTES[..]).to_string();
    current.clear();
    token
}

//! HTML character entity decoding for feed text.
//!
//! Feeds sometimes encode twice (`&amp;amp;`), so decoding repeats until a
//! pass changes nothing, bounded by `MAX_PASSES`.

const MAX_PASSES: usize = 8;

// Longest entity body we try to match, e.g. "#1114111" or "#x10FFFF".
const MAX_ENTITY_LEN: usize = 9;

pub fn decode(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        match decode_pass(&current) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

pub fn decode_opt(text: Option<&str>) -> Option<String> {
    text.map(decode)
}

/// One left-to-right pass. Returns `None` when nothing was replaced.
fn decode_pass(text: &str) -> Option<String> {
    if !text.contains('&') {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut changed = false;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let resolved = after
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| resolve_entity(&after[..semi]).map(|c| (c, semi)));

        match resolved {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
                changed = true;
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    changed.then_some(out)
}

fn resolve_entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                Some(_) => return None,
                None if num.bytes().all(|b| b.is_ascii_digit()) => num.parse().ok()?,
                None => return None,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode("This &amp; that &lt;div&gt;"), "This & that <div>");
        assert_eq!(decode("say &quot;hi&quot;"), "say \"hi\"");
    }

    #[test]
    fn test_decode_double_encoded() {
        assert_eq!(decode("&amp;amp;"), "&");
        assert_eq!(decode("&amp;lt;b&amp;gt;"), "<b>");
        assert_eq!(decode("&amp;amp;amp;amp;"), "&");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode("It&#39;s"), "It's");
        assert_eq!(decode("caf&#233;"), "café");
        assert_eq!(decode("&#x41;&#X42;"), "AB");
        assert_eq!(decode("&amp;#8211;"), "\u{2013}");
    }

    #[test]
    fn test_decode_empty_and_none() {
        assert_eq!(decode(""), "");
        assert_eq!(decode_opt(None), None);
        assert_eq!(decode_opt(Some("a &amp; b")), Some("a & b".to_string()));
    }

    #[test]
    fn test_unrecognized_left_verbatim() {
        assert_eq!(decode("&nbsp;&copy;"), "&nbsp;&copy;");
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("a & b"), "a & b");
        assert_eq!(decode("&#;&#xZZ;&#12a;"), "&#;&#xZZ;&#12a;");
        assert_eq!(decode("&#55296;"), "&#55296;"); // lone surrogate
        assert_eq!(decode("&#x+41;&#x-41;&#x;"), "&#x+41;&#x-41;&#x;");
        assert_eq!(decode("&amp;#x+41;"), "&#x+41;");
        assert_eq!(decode("trailing &"), "trailing &");
    }

    #[test]
    fn test_adjacent_ampersands() {
        assert_eq!(decode("&&amp;"), "&&");
        assert_eq!(decode("R&amp;D &amp;&amp; QA"), "R&D && QA");
    }

    #[test]
    fn test_pass_cap_terminates() {
        let nested = format!("&{}", "amp;".repeat(20));
        assert_eq!(decode(&nested), format!("&{}", "amp;".repeat(20 - MAX_PASSES)));
    }
}

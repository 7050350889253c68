//! URL slug construction for the lyrics-site fallback
//!
//! greeklyrics.gr addresses songs as `/{artist-slug}-{title-slug}` with
//! Greek characters transliterated to Latin.

/// Convert free text to a URL slug: strip punctuation, hyphenate
/// whitespace runs, lowercase, transliterate Greek to Latin
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let hyphenated = cleaned.split_whitespace().collect::<Vec<_>>().join("-");

    transliterate_greek(&hyphenated.to_lowercase())
}

/// Map lowercase Greek characters to their Latin URL form
fn transliterate_greek(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'α' | 'ά' => out.push('a'),
            'β' => out.push('v'),
            'γ' => out.push('g'),
            'δ' => out.push('d'),
            'ε' | 'έ' => out.push('e'),
            'ζ' => out.push('z'),
            'η' | 'ή' => out.push('i'),
            'θ' => out.push_str("th"),
            'ι' | 'ί' | 'ϊ' | 'ΐ' => out.push('i'),
            'κ' => out.push('k'),
            'λ' => out.push('l'),
            'μ' => out.push('m'),
            'ν' => out.push('n'),
            'ξ' => out.push_str("ks"),
            'ο' | 'ό' => out.push('o'),
            'π' => out.push('p'),
            'ρ' => out.push('r'),
            'σ' | 'ς' => out.push('s'),
            'τ' => out.push('t'),
            'υ' | 'ύ' | 'ϋ' | 'ΰ' => out.push('y'),
            'φ' => out.push('f'),
            'χ' => out.push('x'),
            'ψ' => out.push_str("ps"),
            'ω' | 'ώ' => out.push('o'),
            _ => out.push(c),
        }
    }
    out
}

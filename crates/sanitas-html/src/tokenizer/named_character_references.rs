//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The standard defines 2,231 entities. This table carries the Latin-1 set,
//! the HTML 4 symbol and Greek entities, and the punctuation entities that
//! show up in obfuscated URLs (`&colon;`, `&Tab;`, `&NewLine;`). Unknown
//! references pass through as literal text, so a missing entry is never unsafe.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Longest name in [`ENTITIES`], in bytes, not counting the semicolon.
const MAX_ENTITY_NAME_LEN: usize = 8;

/// `(name, replacement, legacy)`. Legacy entities also match without the
/// trailing semicolon, e.g. `&amp` and `&copy`.
const ENTITIES: &[(&str, &str, bool)] = &[
    // The five that matter most
    ("amp", "&", true),
    ("AMP", "&", true),
    ("lt", "<", true),
    ("LT", "<", true),
    ("gt", ">", true),
    ("GT", ">", true),
    ("quot", "\"", true),
    ("QUOT", "\"", true),
    ("apos", "'", false),
    // Latin-1 (U+00A0 - U+00FF), all legacy
    ("nbsp", "\u{00A0}", true),
    ("iexcl", "\u{00A1}", true),
    ("cent", "\u{00A2}", true),
    ("pound", "\u{00A3}", true),
    ("curren", "\u{00A4}", true),
    ("yen", "\u{00A5}", true),
    ("brvbar", "\u{00A6}", true),
    ("sect", "\u{00A7}", true),
    ("uml", "\u{00A8}", true),
    ("copy", "\u{00A9}", true),
    ("COPY", "\u{00A9}", true),
    ("ordf", "\u{00AA}", true),
    ("laquo", "\u{00AB}", true),
    ("not", "\u{00AC}", true),
    ("shy", "\u{00AD}", true),
    ("reg", "\u{00AE}", true),
    ("REG", "\u{00AE}", true),
    ("macr", "\u{00AF}", true),
    ("deg", "\u{00B0}", true),
    ("plusmn", "\u{00B1}", true),
    ("sup2", "\u{00B2}", true),
    ("sup3", "\u{00B3}", true),
    ("acute", "\u{00B4}", true),
    ("micro", "\u{00B5}", true),
    ("para", "\u{00B6}", true),
    ("middot", "\u{00B7}", true),
    ("cedil", "\u{00B8}", true),
    ("sup1", "\u{00B9}", true),
    ("ordm", "\u{00BA}", true),
    ("raquo", "\u{00BB}", true),
    ("frac14", "\u{00BC}", true),
    ("frac12", "\u{00BD}", true),
    ("frac34", "\u{00BE}", true),
    ("iquest", "\u{00BF}", true),
    ("Agrave", "\u{00C0}", true),
    ("Aacute", "\u{00C1}", true),
    ("Acirc", "\u{00C2}", true),
    ("Atilde", "\u{00C3}", true),
    ("Auml", "\u{00C4}", true),
    ("Aring", "\u{00C5}", true),
    ("AElig", "\u{00C6}", true),
    ("Ccedil", "\u{00C7}", true),
    ("Egrave", "\u{00C8}", true),
    ("Eacute", "\u{00C9}", true),
    ("Ecirc", "\u{00CA}", true),
    ("Euml", "\u{00CB}", true),
    ("Igrave", "\u{00CC}", true),
    ("Iacute", "\u{00CD}", true),
    ("Icirc", "\u{00CE}", true),
    ("Iuml", "\u{00CF}", true),
    ("ETH", "\u{00D0}", true),
    ("Ntilde", "\u{00D1}", true),
    ("Ograve", "\u{00D2}", true),
    ("Oacute", "\u{00D3}", true),
    ("Ocirc", "\u{00D4}", true),
    ("Otilde", "\u{00D5}", true),
    ("Ouml", "\u{00D6}", true),
    ("times", "\u{00D7}", true),
    ("Oslash", "\u{00D8}", true),
    ("Ugrave", "\u{00D9}", true),
    ("Uacute", "\u{00DA}", true),
    ("Ucirc", "\u{00DB}", true),
    ("Uuml", "\u{00DC}", true),
    ("Yacute", "\u{00DD}", true),
    ("THORN", "\u{00DE}", true),
    ("szlig", "\u{00DF}", true),
    ("agrave", "\u{00E0}", true),
    ("aacute", "\u{00E1}", true),
    ("acirc", "\u{00E2}", true),
    ("atilde", "\u{00E3}", true),
    ("auml", "\u{00E4}", true),
    ("aring", "\u{00E5}", true),
    ("aelig", "\u{00E6}", true),
    ("ccedil", "\u{00E7}", true),
    ("egrave", "\u{00E8}", true),
    ("eacute", "\u{00E9}", true),
    ("ecirc", "\u{00EA}", true),
    ("euml", "\u{00EB}", true),
    ("igrave", "\u{00EC}", true),
    ("iacute", "\u{00ED}", true),
    ("icirc", "\u{00EE}", true),
    ("iuml", "\u{00EF}", true),
    ("eth", "\u{00F0}", true),
    ("ntilde", "\u{00F1}", true),
    ("ograve", "\u{00F2}", true),
    ("oacute", "\u{00F3}", true),
    ("ocirc", "\u{00F4}", true),
    ("otilde", "\u{00F5}", true),
    ("ouml", "\u{00F6}", true),
    ("divide", "\u{00F7}", true),
    ("oslash", "\u{00F8}", true),
    ("ugrave", "\u{00F9}", true),
    ("uacute", "\u{00FA}", true),
    ("ucirc", "\u{00FB}", true),
    ("uuml", "\u{00FC}", true),
    ("yacute", "\u{00FD}", true),
    ("thorn", "\u{00FE}", true),
    ("yuml", "\u{00FF}", true),
    // ASCII punctuation
    ("Tab", "\t", false),
    ("NewLine", "\n", false),
    ("excl", "!", false),
    ("num", "#", false),
    ("dollar", "$", false),
    ("percnt", "%", false),
    ("lpar", "(", false),
    ("rpar", ")", false),
    ("ast", "*", false),
    ("plus", "+", false),
    ("comma", ",", false),
    ("period", ".", false),
    ("sol", "/", false),
    ("colon", ":", false),
    ("semi", ";", false),
    ("equals", "=", false),
    ("quest", "?", false),
    ("commat", "@", false),
    ("lsqb", "[", false),
    ("bsol", "\\", false),
    ("rsqb", "]", false),
    ("Hat", "^", false),
    ("lowbar", "_", false),
    ("grave", "`", false),
    ("lcub", "{", false),
    ("verbar", "|", false),
    ("vert", "|", false),
    ("rcub", "}", false),
    // Latin Extended
    ("OElig", "\u{0152}", false),
    ("oelig", "\u{0153}", false),
    ("Scaron", "\u{0160}", false),
    ("scaron", "\u{0161}", false),
    ("Yuml", "\u{0178}", false),
    ("fnof", "\u{0192}", false),
    ("circ", "\u{02C6}", false),
    ("tilde", "\u{02DC}", false),
    ("fjlig", "fj", false),
    // Greek
    ("Alpha", "\u{0391}", false),
    ("Beta", "\u{0392}", false),
    ("Gamma", "\u{0393}", false),
    ("Delta", "\u{0394}", false),
    ("Epsilon", "\u{0395}", false),
    ("Zeta", "\u{0396}", false),
    ("Eta", "\u{0397}", false),
    ("Theta", "\u{0398}", false),
    ("Iota", "\u{0399}", false),
    ("Kappa", "\u{039A}", false),
    ("Lambda", "\u{039B}", false),
    ("Mu", "\u{039C}", false),
    ("Nu", "\u{039D}", false),
    ("Xi", "\u{039E}", false),
    ("Omicron", "\u{039F}", false),
    ("Pi", "\u{03A0}", false),
    ("Rho", "\u{03A1}", false),
    ("Sigma", "\u{03A3}", false),
    ("Tau", "\u{03A4}", false),
    ("Upsilon", "\u{03A5}", false),
    ("Phi", "\u{03A6}", false),
    ("Chi", "\u{03A7}", false),
    ("Psi", "\u{03A8}", false),
    ("Omega", "\u{03A9}", false),
    ("alpha", "\u{03B1}", false),
    ("beta", "\u{03B2}", false),
    ("gamma", "\u{03B3}", false),
    ("delta", "\u{03B4}", false),
    ("epsilon", "\u{03B5}", false),
    ("zeta", "\u{03B6}", false),
    ("eta", "\u{03B7}", false),
    ("theta", "\u{03B8}", false),
    ("iota", "\u{03B9}", false),
    ("kappa", "\u{03BA}", false),
    ("lambda", "\u{03BB}", false),
    ("mu", "\u{03BC}", false),
    ("nu", "\u{03BD}", false),
    ("xi", "\u{03BE}", false),
    ("omicron", "\u{03BF}", false),
    ("pi", "\u{03C0}", false),
    ("rho", "\u{03C1}", false),
    ("sigmaf", "\u{03C2}", false),
    ("sigma", "\u{03C3}", false),
    ("tau", "\u{03C4}", false),
    ("upsilon", "\u{03C5}", false),
    ("phi", "\u{03C6}", false),
    ("chi", "\u{03C7}", false),
    ("psi", "\u{03C8}", false),
    ("omega", "\u{03C9}", false),
    ("thetasym", "\u{03D1}", false),
    ("upsih", "\u{03D2}", false),
    ("piv", "\u{03D6}", false),
    // General punctuation
    ("ensp", "\u{2002}", false),
    ("emsp", "\u{2003}", false),
    ("thinsp", "\u{2009}", false),
    ("zwnj", "\u{200C}", false),
    ("zwj", "\u{200D}", false),
    ("lrm", "\u{200E}", false),
    ("rlm", "\u{200F}", false),
    ("ndash", "\u{2013}", false),
    ("mdash", "\u{2014}", false),
    ("lsquo", "\u{2018}", false),
    ("rsquo", "\u{2019}", false),
    ("sbquo", "\u{201A}", false),
    ("ldquo", "\u{201C}", false),
    ("rdquo", "\u{201D}", false),
    ("bdquo", "\u{201E}", false),
    ("dagger", "\u{2020}", false),
    ("Dagger", "\u{2021}", false),
    ("bull", "\u{2022}", false),
    ("hellip", "\u{2026}", false),
    ("permil", "\u{2030}", false),
    ("prime", "\u{2032}", false),
    ("Prime", "\u{2033}", false),
    ("lsaquo", "\u{2039}", false),
    ("rsaquo", "\u{203A}", false),
    ("oline", "\u{203E}", false),
    ("frasl", "\u{2044}", false),
    ("euro", "\u{20AC}", false),
    // Letterlike symbols and arrows
    ("image", "\u{2111}", false),
    ("weierp", "\u{2118}", false),
    ("real", "\u{211C}", false),
    ("trade", "\u{2122}", false),
    ("alefsym", "\u{2135}", false),
    ("larr", "\u{2190}", false),
    ("uarr", "\u{2191}", false),
    ("rarr", "\u{2192}", false),
    ("darr", "\u{2193}", false),
    ("harr", "\u{2194}", false),
    ("crarr", "\u{21B5}", false),
    ("lArr", "\u{21D0}", false),
    ("uArr", "\u{21D1}", false),
    ("rArr", "\u{21D2}", false),
    ("dArr", "\u{21D3}", false),
    ("hArr", "\u{21D4}", false),
    // Mathematical operators
    ("forall", "\u{2200}", false),
    ("part", "\u{2202}", false),
    ("exist", "\u{2203}", false),
    ("empty", "\u{2205}", false),
    ("nabla", "\u{2207}", false),
    ("isin", "\u{2208}", false),
    ("notin", "\u{2209}", false),
    ("ni", "\u{220B}", false),
    ("prod", "\u{220F}", false),
    ("sum", "\u{2211}", false),
    ("minus", "\u{2212}", false),
    ("lowast", "\u{2217}", false),
    ("radic", "\u{221A}", false),
    ("prop", "\u{221D}", false),
    ("infin", "\u{221E}", false),
    ("ang", "\u{2220}", false),
    ("and", "\u{2227}", false),
    ("or", "\u{2228}", false),
    ("cap", "\u{2229}", false),
    ("cup", "\u{222A}", false),
    ("int", "\u{222B}", false),
    ("there4", "\u{2234}", false),
    ("sim", "\u{223C}", false),
    ("cong", "\u{2245}", false),
    ("asymp", "\u{2248}", false),
    ("ne", "\u{2260}", false),
    ("equiv", "\u{2261}", false),
    ("le", "\u{2264}", false),
    ("ge", "\u{2265}", false),
    ("sub", "\u{2282}", false),
    ("sup", "\u{2283}", false),
    ("nsub", "\u{2284}", false),
    ("sube", "\u{2286}", false),
    ("supe", "\u{2287}", false),
    ("oplus", "\u{2295}", false),
    ("otimes", "\u{2297}", false),
    ("perp", "\u{22A5}", false),
    ("sdot", "\u{22C5}", false),
    ("lceil", "\u{2308}", false),
    ("rceil", "\u{2309}", false),
    ("lfloor", "\u{230A}", false),
    ("rfloor", "\u{230B}", false),
    ("lang", "\u{27E8}", false),
    ("rang", "\u{27E9}", false),
    // Shapes
    ("loz", "\u{25CA}", false),
    ("spades", "\u{2660}", false),
    ("clubs", "\u{2663}", false),
    ("hearts", "\u{2665}", false),
    ("diams", "\u{2666}", false),
];

/// Maps entity names (without the leading '&') to their replacement strings.
///
/// Every entity appears with its semicolon; legacy entities appear a second
/// time without it.
static NAMED_ENTITIES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(ENTITIES.len() * 2);
    for &(name, replacement, legacy) in ENTITIES {
        let _ = map.insert(format!("{name};"), replacement);
        if legacy {
            let _ = map.insert(name.to_string(), replacement);
        }
    }
    map
});

/// Look up a named character reference.
///
/// The `name` should NOT include the leading '&'.
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Some("&")
/// lookup_entity("amp")   // Some("&"), legacy form
/// lookup_entity("apos")  // None, only "apos;" exists
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the first column of the named
/// character references table."
///
/// `input` starts just after the `&`. Returns the byte length of the longest
/// entity name at the start of `input` (semicolon included when matched) and
/// its replacement.
///
/// # Example
/// ```ignore
/// longest_entity_prefix("notin; x") // Some((6, "∉"))
/// longest_entity_prefix("notit;")   // Some((3, "¬")), legacy "not"
/// longest_entity_prefix("bogus;")   // None
/// ```
#[must_use]
pub fn longest_entity_prefix(input: &str) -> Option<(usize, &'static str)> {
    let run = input
        .bytes()
        .take(MAX_ENTITY_NAME_LEN)
        .take_while(u8::is_ascii_alphanumeric)
        .count();

    // The run is ASCII, so every prefix length is a char boundary.
    if input.as_bytes().get(run) == Some(&b';')
        && let Some(replacement) = input.get(..=run).and_then(lookup_entity)
    {
        return Some((run + 1, replacement));
    }
    (1..=run).rev().find_map(|len| {
        input
            .get(..len)
            .and_then(lookup_entity)
            .map(|replacement| (len, replacement))
    })
}

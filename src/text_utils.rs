use std::ops::Index;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    lazy_static! {
            static ref DATE_REGEX : Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap();
        }

    let Some(caps) = DATE_REGEX.captures(buf.trim()) else {
        return Err(format!("Unable to parse date {}. Expected YYYY-MM-DD", buf));
    };

    let y: i32 = to_int(caps.index(1), buf)?;
    let m: u32 = to_int(caps.index(2), buf)?;
    let d: u32 = to_int(caps.index(3), buf)?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("Invalid calendar date {}", buf))
}

fn drop_digit_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars.iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let between_digits = i > 0 && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit();
            !(c == ',' && between_digits)
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Decodes character references such as `&amp;` or `&#39;`. Unknown entities
/// are left as they are.
fn decode_entities(text: &str) -> String {
    lazy_static! {
            static ref ENTITY_REGEX : Regex = Regex::new(r"&#?[A-Za-z0-9]+;").unwrap();
        }

    let decoded = ENTITY_REGEX.replace_all(text, |caps: &regex::Captures| {
        let entity = caps.index(0);
        match quick_xml::escape::unescape(entity) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => entity.to_string(),
        }
    });

    decoded.into_owned()
}

/// Turns an arbitrary title into a lowercase, hyphen separated ASCII slug.
///
/// Character references are decoded and non-ASCII characters are
/// transliterated first, so `Ábaco` becomes `abaco` and CJK titles become
/// their romanization.
pub fn slugify(title: &str) -> String {
    lazy_static! {
            static ref SEPARATOR_REGEX : Regex = Regex::new(r"[^a-z0-9]+").unwrap();
        }

    let decoded = decode_entities(title);
    let ascii = unidecode::unidecode(&decoded).to_lowercase();
    let ascii = drop_digit_commas(&ascii);
    let slug = SEPARATOR_REGEX.replace_all(&ascii, "-");

    slug.trim_matches('-').to_string()
}

/// Splits a comma separated tag line. Pieces are trimmed and unquoted,
/// empty ones are dropped. Order and duplicates are kept.
pub fn parse_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(|tag| tag.trim().trim_matches('"').trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

/// Double-quoted front matter scalar.
pub fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

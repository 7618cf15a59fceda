use std::collections::HashMap;

use crate::error::{ReliabilityError, Result};

/// One entry of a `Link` response header.
///
/// Sentry paginates with entries like
/// `<https://sentry.io/api/0/projects/?&cursor=0:100:0>; rel="next"; results="true"; cursor="0:100:0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub params: HashMap<String, String>,
}

impl Link {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Parses a full `Link` header into its entries.
pub fn parse_link_header(header: &str) -> Result<Vec<Link>> {
    split_outside_quotes(header, ',')
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_link)
        .collect()
}

/// Returns the cursor of the next page, or `None` when Sentry reports no more results.
pub fn next_cursor(header: &str) -> Result<Option<String>> {
    let links = parse_link_header(header)?;

    let next = links
        .iter()
        .find(|link| link.param("rel") == Some("next"))
        .ok_or_else(|| malformed(header, "no rel=\"next\" entry"))?;

    match next.param("results") {
        Some("true") => {
            log::debug!("Next page at {}", next.url);
            next.param("cursor")
                .map(|cursor| Some(cursor.to_string()))
                .ok_or_else(|| malformed(header, "next entry has no cursor"))
        }
        Some("false") => Ok(None),
        Some(other) => Err(malformed(
            header,
            &format!("unexpected results value '{other}'"),
        )),
        None => Err(malformed(header, "next entry has no results flag")),
    }
}

fn parse_link(entry: &str) -> Result<Link> {
    let rest = entry
        .strip_prefix('<')
        .ok_or_else(|| malformed(entry, "expected '<'"))?;
    let (url, rest) = rest
        .split_once('>')
        .ok_or_else(|| malformed(entry, "unterminated '<'"))?;

    let mut params = HashMap::new();
    for param in split_outside_quotes(rest, ';')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| malformed(entry, &format!("parameter '{param}' has no value")))?;
        params.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().trim_matches('"').to_string(),
        );
    }

    Ok(Link {
        url: url.to_string(),
        params,
    })
}

// Separators inside quoted values or the <url> part don't count.
fn split_outside_quotes(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut in_url = false;
    let mut start = 0;

    for (index, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            c if c == separator && !in_quotes && !in_url => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
}

fn malformed(header: &str, reason: &str) -> ReliabilityError {
    ReliabilityError::Pagination(format!("{reason} in '{header}'"))
}

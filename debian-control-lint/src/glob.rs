//! Glob patterns of `Files` fields in machine-readable copyright files.

use regex::Regex;
use std::collections::HashMap;

/// Strip leading `./` segments and collapse `/./`.
fn normalize(pattern: &str) -> String {
    let mut pattern = pattern;
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern.replace("/./", "/")
}

/// Convert a glob pattern to the source of an anchored regular expression.
///
/// `*` matches any run of characters (including `/`), `?` matches a single
/// character, and a backslash takes the next character literally. The
/// result also accepts a leading `./`.
pub fn to_regex(glob: &str) -> String {
    let glob = normalize(glob);
    let mut it = glob.chars();
    let mut r = r"^(\./)?".to_string();

    while let Some(c) = it.next() {
        match c {
            '*' => r.push_str(".*"),
            '?' => r.push('.'),
            '\\' => match it.next() {
                Some(escaped) => r.push_str(&regex::escape(&escaped.to_string())),
                None => r.push_str(r"\\"),
            },
            c => r.push_str(&regex::escape(&c.to_string())),
        }
    }

    r.push('$');
    r
}

/// Compile a glob pattern; see [`to_regex`].
pub fn glob_to_regex(glob: &str) -> Regex {
    // every character of the input is escaped, so the source is always valid
    Regex::new(&to_regex(glob)).unwrap()
}

/// Compiled patterns, keyed by normalized pattern.
///
/// One cache lives for a single lint run.
#[derive(Debug, Default)]
pub struct GlobCache {
    compiled: HashMap<String, Regex>,
}

impl GlobCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled form of `glob`.
    pub fn regex(&mut self, glob: &str) -> Regex {
        self.compiled
            .entry(normalize(glob))
            .or_insert_with(|| glob_to_regex(glob))
            .clone()
    }

    /// Whether every path matched by `b` is also matched by `a`.
    ///
    /// Wildcards in `b` are replaced by runs of a filler character and the
    /// result is tested against `a`, once per filler. This can miss some
    /// containments but never reports a false one for ordinary patterns.
    pub fn is_more_generic(&mut self, a: &str, b: &str) -> bool {
        let regex = self.regex(a);
        ['a', 'b', 'c'].iter().all(|&tester| {
            let filler = tester.to_string().repeat(a.len() + b.len() + 1);
            regex.is_match(&instantiate(b, &filler, tester))
        })
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Replace unescaped wildcards in `glob` by `filler` (for `*`) and `tester`
/// (for `?`). Escaped characters become their literal selves.
fn instantiate(glob: &str, filler: &str, tester: char) -> String {
    let mut out = String::with_capacity(glob.len() + filler.len());
    let mut it = glob.chars();
    while let Some(c) = it.next() {
        match c {
            '*' => out.push_str(filler),
            '?' => out.push(tester),
            '\\' => out.push(it.next().unwrap_or('\\')),
            c => out.push(c),
        }
    }
    out
}

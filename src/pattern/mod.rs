//! # Include/exclude name patterns
//!
//! Decides whether a name (typically a request URL) is of interest, given an
//! ordered include list and an exclude list of regular expressions.
//!
//! A name is admitted when some include matches it and no exclude does.
//! Includes are tried in order and the first hit settles the include side;
//! excludes are only looked at after an include hit. With no includes
//! nothing is admitted. Matching is an unanchored search.

pub mod cache;

pub use cache::PatternCache;

use crate::error::{Error, Result};
use regex::Regex;

/// Decide admission of `subject` against pattern sources.
///
/// Patterns are compiled through the global [`PatternCache`]. An invalid
/// pattern is an error as soon as evaluation reaches it.
///
/// ```
/// use cdp_dispatch::pattern::match_with_filter;
///
/// assert!(match_with_filter("https://a.com/x.js", &[r"\.js$"], &[] as &[&str]).unwrap());
/// assert!(!match_with_filter("https://a.com/x.js", &[r"\.js$"], &[r"a\.com"]).unwrap());
/// ```
pub fn match_with_filter<I, X>(subject: &str, includes: &[I], excludes: &[X]) -> Result<bool>
where
    I: AsRef<str>,
    X: AsRef<str>,
{
    let cache = PatternCache::global();

    for include in includes {
        if cache.get(include.as_ref())?.is_match(subject) {
            for exclude in excludes {
                if cache.get(exclude.as_ref())?.is_match(subject) {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
    }

    Ok(false)
}

/// Pre-compiled include/exclude filter.
///
/// Same admission rule as [`match_with_filter`], but every pattern is
/// validated up front so `admits` cannot fail.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl UrlFilter {
    /// Compile both lists, failing on the first invalid pattern
    pub fn new<I, X>(includes: &[I], excludes: &[X]) -> Result<Self>
    where
        I: AsRef<str>,
        X: AsRef<str>,
    {
        Ok(Self {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
        })
    }

    /// Whether `subject` is admitted
    pub fn admits(&self, subject: &str) -> bool {
        match self.includes.iter().find(|re| re.is_match(subject)) {
            Some(_) => !self.excludes.iter().any(|re| re.is_match(subject)),
            None => false,
        }
    }

    /// Include pattern sources, in evaluation order
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(Regex::as_str)
    }

    /// Exclude pattern sources
    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(Regex::as_str)
    }
}

fn compile_all<P: AsRef<str>>(patterns: &[P]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Regex::new(p).map_err(|e| Error::invalid_pattern(p, e))
        })
        .collect()
}

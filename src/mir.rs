use std::fmt::{Display, Formatter};

/// A `key:value` term which carries search metadata instead of free text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Directive<'a> {
    /// `lang:en`
    Lang(&'a str),
    /// `site:github.com`
    Site(&'a str),
    /// `private:only`
    PrivateOnly,
    /// `user:<uuid>`
    User(&'a str),
}

impl<'a> Directive<'a> {
    /// Recognize a directive, or return `None` if the term is plain text.
    ///
    /// A known key with an empty value, `private:` with anything but `only`, and `user:` with
    /// something that isn't a UUID are all plain text.
    pub fn parse(term: &'a str) -> Option<Self> {
        match term.split_once(':')? {
            (_, "") => None,
            ("lang", value) => Some(Self::Lang(value)),
            ("site", value) => Some(Self::Site(value)),
            ("private", "only") => Some(Self::PrivateOnly),
            ("user", value) if is_uuid_like(value) => Some(Self::User(value)),
            _ => None,
        }
    }
}

impl Display for Directive<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lang(value) => write!(f, "lang:{value}"),
            Self::Site(value) => write!(f, "site:{value}"),
            Self::PrivateOnly => f.write_str("private:only"),
            Self::User(value) => write!(f, "user:{value}"),
        }
    }
}

/// Only the hyphenated form, which is how user ids are stored.
fn is_uuid_like(value: &str) -> bool {
    value.len() == 36 && uuid::Uuid::parse_str(value).is_ok()
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpecialSearchTerms<'a> {
    /// Parsed, but not compiled into a filter yet.
    pub lang: Option<&'a str>,
    pub site: Option<&'a str>,
    pub private_only: bool,
    pub user_id: Option<&'a str>,
}

impl<'a> SpecialSearchTerms<'a> {
    /// Record a directive. A later directive for the same key replaces an earlier one.
    pub fn apply(&mut self, directive: Directive<'a>) {
        match directive {
            Directive::Lang(lang) => self.lang = Some(lang),
            Directive::Site(site) => self.site = Some(site),
            Directive::PrivateOnly => self.private_only = true,
            Directive::User(user_id) => self.user_id = Some(user_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchTerms<'a> {
    pub fulltext: Vec<&'a str>,
    pub special: SpecialSearchTerms<'a>,
}

/// Separate directives from free text terms.
pub fn extract_fulltext_and_special_search_terms<'a>(terms: &[&'a str]) -> SearchTerms<'a> {
    let mut result = SearchTerms::default();

    for &term in terms {
        match Directive::parse(term) {
            Some(directive) => result.special.apply(directive),
            None => result.fulltext.push(term),
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const USER: &str = "12345678-abcd-1234-abcd-123456789abc";

    #[test]
    fn test_extract() {
        let user = format!("user:{USER}");
        let result = extract_fulltext_and_special_search_terms(&[
            "lang:en",
            "site:github.com",
            "private:only",
            "term1",
            user.as_str(),
        ]);

        assert_eq!(
            SearchTerms {
                fulltext: vec!["term1"],
                special: SpecialSearchTerms {
                    lang: Some("en"),
                    site: Some("github.com"),
                    private_only: true,
                    user_id: Some(USER),
                },
            },
            result
        );
    }

    #[test]
    fn test_plain_terms() {
        let result = extract_fulltext_and_special_search_terms(&["rust", "-unsafe", "\"async\""]);

        assert_eq!(vec!["rust", "-unsafe", "\"async\""], result.fulltext);
        assert!(result.special.is_empty());
    }

    #[test]
    fn test_private_other_value() {
        let result = extract_fulltext_and_special_search_terms(&["private:all"]);

        assert_eq!(vec!["private:all"], result.fulltext);
        assert!(!result.special.private_only);
    }

    #[test]
    fn test_unknown_key() {
        let result = extract_fulltext_and_special_search_terms(&["foo:bar", "http://example.com"]);

        assert_eq!(vec!["foo:bar", "http://example.com"], result.fulltext);
        assert!(result.special.is_empty());
    }

    #[test]
    fn test_user_not_a_uuid() {
        let result = extract_fulltext_and_special_search_terms(&["user:someone"]);

        assert_eq!(vec!["user:someone"], result.fulltext);
        assert_eq!(None, result.special.user_id);
    }

    #[test]
    fn test_user_other_uuid_forms() {
        let terms = [
            "user:{12345678-abcd-1234-abcd-123456789abc}",
            "user:urn:uuid:12345678-abcd-1234-abcd-123456789abc",
            "user:12345678abcd1234abcd123456789abc",
        ];
        let result = extract_fulltext_and_special_search_terms(&terms);

        assert_eq!(terms.to_vec(), result.fulltext);
        assert_eq!(None, result.special.user_id);
    }

    #[test]
    fn test_empty_value() {
        let result = extract_fulltext_and_special_search_terms(&["lang:", "site:"]);

        assert_eq!(vec!["lang:", "site:"], result.fulltext);
        assert!(result.special.is_empty());
    }

    #[test]
    fn test_last_wins() {
        let result = extract_fulltext_and_special_search_terms(&[
            "site:github.com",
            "lang:de",
            "site:gitlab.com",
            "lang:en",
        ]);

        assert_eq!(Some("gitlab.com"), result.special.site);
        assert_eq!(Some("en"), result.special.lang);
        assert!(result.fulltext.is_empty());
    }

    #[test]
    fn test_site_keeps_colons() {
        let result = extract_fulltext_and_special_search_terms(&["site:localhost:8080"]);

        assert_eq!(Some("localhost:8080"), result.special.site);
    }

    #[test]
    fn test_display() {
        assert_eq!("site:github.com", Directive::Site("github.com").to_string());
        assert_eq!("private:only", Directive::PrivateOnly.to_string());
        assert_eq!(
            Some(Directive::PrivateOnly),
            Directive::parse(&Directive::PrivateOnly.to_string())
        );
    }
}

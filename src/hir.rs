#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// A bracketed tag, brackets stripped: `[rust]`
    Tag(&'a str),
    /// Any other whitespace separated token
    Term(&'a str),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedQuery<'a> {
    pub terms: Vec<&'a str>,
    pub tags: Vec<&'a str>,
}

impl<'a> FromIterator<Token<'a>> for ParsedQuery<'a> {
    fn from_iter<T: IntoIterator<Item = Token<'a>>>(iter: T) -> Self {
        let mut result = Self::default();
        for token in iter {
            match token {
                Token::Tag(tag) => result.tags.push(tag),
                Token::Term(term) => result.terms.push(term),
            }
        }
        result
    }
}

impl ParsedQuery<'_> {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.tags.is_empty()
    }
}

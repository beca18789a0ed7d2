// URL template filling for OpenSearch placeholder tokens

pub const SEARCH_TERMS: &str = "{searchTerms}";
pub const FILTERS: &str = "{filters}";
pub const START_PAGE: &str = "{startPage}";
pub const START_PAGE_OPTIONAL: &str = "{startPage?}";

/// Every token the engine substitutes, in substitution order
pub const TOKENS: [&str; 4] = [SEARCH_TERMS, FILTERS, START_PAGE, START_PAGE_OPTIONAL];

/// Values substituted into a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateParams<'a> {
    pub search_terms: &'a str,
    pub filters: &'a str,
    pub start_page: &'a str,
}

impl<'a> TemplateParams<'a> {
    pub fn new(search_terms: &'a str) -> Self {
        Self {
            search_terms,
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: &'a str) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_start_page(mut self, start_page: &'a str) -> Self {
        self.start_page = start_page;
        self
    }

    pub fn fill(&self, template: &str) -> String {
        fill_template(template, self.search_terms, self.filters, self.start_page)
    }
}

/// Substitute the OpenSearch tokens in `template`.
///
/// Only the first occurrence of each token is replaced. `{startPage}` and
/// `{startPage?}` both receive `start_page`; empty values become empty strings.
/// Tokens the engine does not know, such as `{count}`, are left as they are.
pub fn fill_template(template: &str, search_terms: &str, filters: &str, start_page: &str) -> String {
    let search_terms = query_escape(search_terms);
    let filters = query_escape(filters);
    let start_page = query_escape(start_page);

    template
        .replacen(SEARCH_TERMS, &search_terms, 1)
        .replacen(FILTERS, &filters, 1)
        .replacen(START_PAGE, &start_page, 1)
        .replacen(START_PAGE_OPTIONAL, &start_page, 1)
}

/// Escape a value for a URL query component, spaces become `+`
fn query_escape(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    urlencoding::encode(value).replace("%20", "+")
}

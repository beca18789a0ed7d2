// Common fixtures shared across test files

use opensearch_description::{
    Description, Image, Language, QueryExample, SyndicationRight, UrlTemplate,
};

/// The sample document published with OpenSearch 1.1
#[allow(dead_code)]
pub const EXAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
  <ShortName>Web Search</ShortName>
  <Description>Use Example.com to search the Web.</Description>
  <Tags>example web</Tags>
  <Contact>admin@example.com</Contact>
  <Url type="application/atom+xml"
       template="http://example.com/?q={searchTerms}&amp;pw={startPage?}&amp;format=atom"/>
  <Url type="application/rss+xml"
       template="http://example.com/?q={searchTerms}&amp;pw={startPage?}&amp;format=rss"/>
  <Url type="text/html"
       template="http://example.com/?q={searchTerms}&amp;pw={startPage?}"/>
  <LongName>Example.com Web Search</LongName>
  <Image height="64" width="64" type="image/png">http://example.com/websearch.png</Image>
  <Image height="16" width="16" type="image/vnd.microsoft.icon">http://example.com/websearch.ico</Image>
  <Query role="example" searchTerms="cat" />
  <Developer>Example.com Development Team</Developer>
  <Attribution>
    Search data Copyright 2005, Example.com, Inc., All Rights Reserved
  </Attribution>
  <SyndicationRight>open</SyndicationRight>
  <AdultContent>false</AdultContent>
  <Language>en-us</Language>
  <OutputEncoding>UTF-8</OutputEncoding>
  <InputEncoding>UTF-8</InputEncoding>
</OpenSearchDescription>
"#;

/// The model `EXAMPLE_XML` decodes to
#[allow(dead_code)]
pub fn example_description() -> Description {
    Description {
        short_name: "Web Search".to_string(),
        description: "Use Example.com to search the Web.".to_string(),
        tags: "example web".to_string(),
        contact: "admin@example.com".to_string(),
        urls: vec![
            UrlTemplate::new(
                "application/atom+xml",
                "http://example.com/?q={searchTerms}&pw={startPage?}&format=atom",
            ),
            UrlTemplate::new(
                "application/rss+xml",
                "http://example.com/?q={searchTerms}&pw={startPage?}&format=rss",
            ),
            UrlTemplate::new("text/html", "http://example.com/?q={searchTerms}&pw={startPage?}"),
        ],
        long_name: "Example.com Web Search".to_string(),
        images: vec![
            Image {
                height: Some(64),
                width: Some(64),
                media_type: "image/png".to_string(),
                url: "http://example.com/websearch.png".to_string(),
            },
            Image {
                height: Some(16),
                width: Some(16),
                media_type: "image/vnd.microsoft.icon".to_string(),
                url: "http://example.com/websearch.ico".to_string(),
            },
        ],
        query: Some(QueryExample::new("example", "cat")),
        developer: "Example.com Development Team".to_string(),
        attribution:
            "\n    Search data Copyright 2005, Example.com, Inc., All Rights Reserved\n  "
                .to_string(),
        syndication_right: Some(SyndicationRight::Open),
        adult_content: false,
        language: Some("en-US".parse::<Language>().unwrap()),
        output_encoding: "UTF-8".to_string(),
        input_encoding: "UTF-8".to_string(),
    }
}

/// Wrap children in a root element with the OpenSearch namespace
#[allow(dead_code)]
pub fn document(children: &str) -> String {
    format!(
        r#"<?xml version="1.0"?><OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">{}</OpenSearchDescription>"#,
        children
    )
}

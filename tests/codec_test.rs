// Decoding and encoding of description documents

use opensearch_description::codec::{self, DecodeOptions};
use opensearch_description::{Description, Image, OpenSearchError, QueryExample, UrlTemplate};

mod common;

#[test]
fn test_decode_example_document() {
    let description = codec::decode(common::EXAMPLE_XML.as_bytes()).unwrap();
    assert_eq!(description, common::example_description());
}

#[test]
fn test_decode_reader_matches_decode() {
    let from_reader = codec::decode_reader(std::io::BufReader::new(
        common::EXAMPLE_XML.as_bytes(),
    ))
    .unwrap();
    assert_eq!(from_reader, common::example_description());
}

#[test]
fn test_round_trip_example() {
    let original = common::example_description();
    let xml = codec::encode(&original).unwrap();
    assert_eq!(codec::decode(&xml).unwrap(), original);
}

#[test]
fn test_round_trip_special_characters() {
    let original = Description {
        short_name: "Q&A <beta>".to_string(),
        description: "Say \"hi\" & 'bye'".to_string(),
        urls: vec![UrlTemplate::new(
            "application/x-suggestions+json",
            "https://example.com/s?q={searchTerms}&f={filters}&p={startPage}&l=\"x\"<y>",
        )],
        images: vec![Image {
            height: None,
            width: Some(32),
            media_type: String::new(),
            url: "https://example.com/i.png?a=1&b=2".to_string(),
        }],
        query: Some(QueryExample::new("example", "fish & chips")),
        attribution: "  padded  ".to_string(),
        adult_content: true,
        ..Default::default()
    };
    let xml = codec::encode(&original).unwrap();
    assert_eq!(codec::decode(&xml).unwrap(), original);
}

#[test]
fn test_encode_keeps_tokens_unescaped() {
    let xml = String::from_utf8(codec::encode(&common::example_description()).unwrap()).unwrap();
    assert!(xml.contains("template=\"http://example.com/?q={searchTerms}&amp;pw={startPage?}&amp;format=atom\""));
    assert!(xml.contains("<Query role=\"example\" searchTerms=\"cat\"/>"));
    assert!(xml.contains("<Language>en-US</Language>"));
    assert!(xml.contains("<SyndicationRight>open</SyndicationRight>"));
}

#[test]
fn test_encode_to_writer_matches_encode() {
    let description = common::example_description();
    let mut buffer = Vec::new();
    codec::encode_to_writer(&description, &mut buffer).unwrap();
    assert_eq!(buffer, codec::encode(&description).unwrap());
}

#[test]
fn test_unknown_extension_elements_ignored() {
    let xml = r#"<?xml version="1.0"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"
                       xmlns:moz="http://www.mozilla.org/2006/browser/search/">
  <ShortName>Ext</ShortName>
  <moz:SearchForm>http://example.com/search</moz:SearchForm>
  <Url type="text/html" template="http://example.com/?q={searchTerms}" method="get">
    <Param name="q" value="{searchTerms}"/>
  </Url>
  <Unknown><ShortName>not me</ShortName></Unknown>
  <Description>Kept</Description>
</OpenSearchDescription>"#;
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.short_name, "Ext");
    assert_eq!(description.description, "Kept");
    assert_eq!(
        description.urls,
        vec![UrlTemplate::new("text/html", "http://example.com/?q={searchTerms}")]
    );
}

#[test]
fn test_foreign_namespace_with_known_name_ignored() {
    let xml = common::document(
        r#"<ShortName>Real</ShortName><x:ShortName xmlns:x="urn:other">Fake</x:ShortName>"#,
    );
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.short_name, "Real");
}

#[test]
fn test_prefixed_root_accepted() {
    let xml = r#"<os:OpenSearchDescription xmlns:os="http://a9.com/-/spec/opensearch/1.1/"><os:ShortName>Prefixed</os:ShortName></os:OpenSearchDescription>"#;
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.short_name, "Prefixed");
}

#[test]
fn test_missing_namespace_rejected() {
    let xml = "<OpenSearchDescription><ShortName>x</ShortName></OpenSearchDescription>";
    let err = codec::decode(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_wrong_root_rejected() {
    let xml = r#"<feed xmlns="http://a9.com/-/spec/opensearch/1.1/"/>"#;
    let err = codec::decode(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_empty_input_rejected() {
    let err = codec::decode(b"").unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_malformed_xml_rejected() {
    let cases = [
        common::document("<ShortName>x</Description>"),
        r#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"><ShortName>x</ShortName>"#.to_string(),
        common::document("<ShortName>&bogus;</ShortName>"),
    ];
    for xml in cases {
        let err = codec::decode(xml.as_bytes()).unwrap_err();
        assert!(
            matches!(err, OpenSearchError::MalformedXml(_)),
            "expected MalformedXml for {}, got {:?}",
            xml,
            err
        );
    }
}

#[test]
fn test_entities_and_cdata_decoded() {
    let xml = common::document(
        "<ShortName>A &amp; B &#x263A;</ShortName><Description><![CDATA[<raw> & ok]]></Description>",
    );
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.short_name, "A & B \u{263A}");
    assert_eq!(description.description, "<raw> & ok");
}

#[test]
fn test_adult_content_values() {
    let yes = codec::decode(common::document("<AdultContent>true</AdultContent>").as_bytes()).unwrap();
    assert!(yes.adult_content);

    let absent = codec::decode(common::document("").as_bytes()).unwrap();
    assert!(!absent.adult_content);

    let err = codec::decode(common::document("<AdultContent>TRUE</AdultContent>").as_bytes())
        .unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_bad_image_dimension_rejected() {
    let xml = common::document(r#"<Image height="big" width="16">http://example.com/i.png</Image>"#);
    let err = codec::decode(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_zero_image_dimension_rejected() {
    let xml = common::document(r#"<Image height="0" width="0">http://example.com/i.png</Image>"#);
    let err = codec::decode(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_unknown_syndication_right_rejected() {
    let xml = common::document("<SyndicationRight>shared</SyndicationRight>");
    let err = codec::decode(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, OpenSearchError::SchemaMismatch(_)));
}

#[test]
fn test_invalid_language_lenient() {
    let xml = common::document("<ShortName>Lang</ShortName><Language>en_US!</Language><InputEncoding>UTF-8</InputEncoding>");
    let decoded = codec::decode_with(xml.as_bytes(), &DecodeOptions::default()).unwrap();

    assert_eq!(decoded.description.language, None);
    assert_eq!(decoded.description.short_name, "Lang");
    assert_eq!(decoded.description.input_encoding, "UTF-8");
    assert_eq!(decoded.warnings.len(), 1);
    assert!(matches!(
        decoded.warnings[0],
        OpenSearchError::InvalidLanguageTag { .. }
    ));
}

#[test]
fn test_invalid_language_strict() {
    let xml = common::document("<Language>en_US!</Language>");
    let err = codec::decode_with(xml.as_bytes(), &DecodeOptions::strict()).unwrap_err();
    assert!(matches!(err, OpenSearchError::InvalidLanguageTag { .. }));
}

#[test]
fn test_valid_language_normalized() {
    let xml = common::document("<Language>sr-latn-rs</Language>");
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.language.unwrap().as_str(), "sr-Latn-RS");
}

#[test]
fn test_first_query_kept() {
    let xml = common::document(
        r#"<Query role="example" searchTerms="cat"/><Query role="related" searchTerms="dog"/>"#,
    );
    let description = codec::decode(xml.as_bytes()).unwrap();
    assert_eq!(description.query, Some(QueryExample::new("example", "cat")));
}

#[test]
fn test_empty_root_element() {
    let xml = r#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"/>"#;
    assert_eq!(codec::decode(xml.as_bytes()).unwrap(), Description::default());
}

//! Extraction module tests
//!
//! These tests drive the extractor over realistic page markup without any
//! network access.

use pretty_assertions::assert_eq;
use thumbread::error::ExtractionError;
use thumbread::extraction::{
    locate_body, parse_document, resolve, ContentElement, ContentExtractor, ExtractorConfig,
    Image, Paragraph, FALLBACK_IMAGE_SOURCE,
};
use thumbread::fetch::UrlNormalizer;

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Test article</title>
  <style>body { color: red; }</style>
  <script>window.analytics = true;</script>
</head>
<body>
  <nav><a href="/">Home</a></nav>
  <article>
    <h1>A short story</h1>
    <p>Hello world. This is a test. </p>
    <figure>
      <img src="/images/cat.jpg" alt="A cat">
    </figure>
    <p>The cat sat down.<script>track("sat")</script> It was   tired.</p>
    <img src="https://cdn.example.org/dog.png">
  </article>
  <footer>Copyright</footer>
</body>
</html>"#;

fn extract(html: &str, page_url: &str) -> Vec<ContentElement> {
    ContentExtractor::default()
        .extract_document(html.as_bytes(), page_url)
        .expect("extraction should succeed")
}

#[test]
fn test_article_structure() {
    let elements = extract(ARTICLE, "https://blog.example.com/posts/1");

    let expected = vec![
        ContentElement::Paragraph(
            Paragraph::new("HomeA short storyHello world. This is a test.").unwrap(),
        ),
        ContentElement::Image(Image::new("https://blog.example.com/images/cat.jpg", "A cat")),
        ContentElement::Paragraph(Paragraph::new("The cat sat down.It was   tired.").unwrap()),
        ContentElement::Image(Image::new("https://cdn.example.org/dog.png", "")),
        ContentElement::Paragraph(Paragraph::new("Copyright").unwrap()),
    ];

    assert_eq!(elements, expected);
}

#[test]
fn test_article_sentences() {
    let elements = extract(ARTICLE, "https://blog.example.com/posts/1");
    let first = elements[0].as_paragraph().unwrap();
    assert_eq!(
        first.sentences,
        vec!["HomeA short storyHello world.", "This is a test."]
    );
    let third = elements[2].as_paragraph().unwrap();
    assert_eq!(third.sentences, vec!["The cat sat down.", "It was   tired."]);
}

#[test]
fn test_segmentation_example() {
    let p = Paragraph::new("Hello world. This is a test. ").unwrap();
    assert_eq!(p.sentences, vec!["Hello world.", "This is a test."]);
    for sentence in &p.sentences {
        assert_eq!(sentence.trim(), sentence);
    }
}

#[test]
fn test_ordering_example() {
    let elements = extract(
        r#"<html><body><p>A</p><img src="i.png"><p>B</p></body></html>"#,
        "http://a.com",
    );

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].as_paragraph().unwrap().sentences, vec!["A."]);
    assert_eq!(elements[1].as_image().unwrap().source, "http://a.comi.png");
    assert_eq!(elements[2].as_paragraph().unwrap().sentences, vec!["B."]);
}

#[test]
fn test_nested_script_contributes_nothing() {
    let with_script = extract(
        "<body><div><p>Before <span><script>alert(1)</script></span>after</p></div></body>",
        "http://a.com",
    );
    let without_script = extract(
        "<body><div><p>Before <span></span>after</p></div></body>",
        "http://a.com",
    );
    assert_eq!(with_script, without_script);
    assert_eq!(with_script[0].as_paragraph().unwrap().text, "Beforeafter");
}

#[test]
fn test_render_full_article() {
    let html: String = extract(ARTICLE, "https://blog.example.com/posts/1")
        .iter()
        .map(ContentElement::render)
        .collect();

    assert!(html.contains("<p>This is a test.</p>"));
    assert!(html.contains(
        "<img src=\"https://blog.example.com/images/cat.jpg\" alt=\"A cat\">"
    ));
    assert!(!html.contains("analytics"));
    assert!(!html.contains("track("));
}

#[test]
fn test_no_body_document() {
    let result = ContentExtractor::default().extract_document(
        b"<html><head><title>Frames</title></head><frameset cols=\"50%,50%\"><frame src=\"a.html\"><frame src=\"b.html\"></frameset></html>",
        "http://a.com",
    );
    assert_eq!(result, Err(ExtractionError::NoBodyFound));
}

#[test]
fn test_empty_body_succeeds() {
    let elements = extract("<html><head></head><body></body></html>", "http://a.com");
    assert!(elements.is_empty());
}

#[test]
fn test_binary_payload_is_parse_failure() {
    let mut gif = b"GIF89a".to_vec();
    gif.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00]);
    let result = ContentExtractor::default().extract_document(&gif, "http://a.com");
    assert!(matches!(result, Err(ExtractionError::ParsingFailed(_))));
}

#[test]
fn test_idempotent_extraction() {
    let document = parse_document(ARTICLE.as_bytes()).unwrap();
    let body = locate_body(&document).unwrap();
    let extractor = ContentExtractor::default();

    let first = extractor.extract(body, "https://blog.example.com");
    let second = extractor.extract(body, "https://blog.example.com");
    assert_eq!(first, second);
}

#[test]
fn test_origin_is_per_call() {
    let document = parse_document(br#"<body><img src="/a.png"></body>"#).unwrap();
    let body = locate_body(&document).unwrap();
    let extractor = ContentExtractor::default();

    let one = extractor.extract(body, "https://one.example");
    let two = extractor.extract(body, "https://two.example");
    let three = extractor.extract(body, "garbage");

    assert_eq!(one[0].as_image().unwrap().source, "https://one.example/a.png");
    assert_eq!(two[0].as_image().unwrap().source, "https://two.example/a.png");
    assert_eq!(three[0].as_image().unwrap().source, FALLBACK_IMAGE_SOURCE);
}

#[test]
fn test_depth_config_respected() {
    let extractor = ContentExtractor::new(ExtractorConfig { max_depth: 1 });
    // body > p > text: the text sits at depth 2
    let elements = extractor
        .extract_document(b"<body>Top<p>Nested</p></body>", "http://a.com")
        .unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].as_paragraph().unwrap().text, "Top");
}

#[test]
fn test_normalizer_examples() {
    assert_eq!(UrlNormalizer::normalize("example.com").unwrap(), "https://example.com");
    assert_eq!(UrlNormalizer::normalize("HTTP://x.com").unwrap(), "HTTP://x.com");
    assert!(UrlNormalizer::normalize("").is_err());
}

#[test]
fn test_resolver_examples() {
    assert_eq!(resolve("http://a.com/x.png", "https://b.com"), "http://a.com/x.png");
    assert_eq!(resolve("/x.png", "http://a.com"), "http://a.com/x.png");
    assert_eq!(resolve("/x.png", "not a url"), FALLBACK_IMAGE_SOURCE);
}

#[test]
fn test_element_json_shape() {
    let elements = extract(
        r#"<body><p>One. Two.</p><img src="/x.png" alt="x"></body>"#,
        "https://a.com",
    );
    let json = serde_json::to_value(&elements).unwrap();
    assert_eq!(json[0]["type"], "paragraph");
    assert_eq!(json[0]["sentences"], serde_json::json!(["One.", "Two."]));
    assert_eq!(json[1]["type"], "image");
    assert_eq!(json[1]["source"], "https://a.com/x.png");
    assert_eq!(json[1]["alt_text"], "x");
}

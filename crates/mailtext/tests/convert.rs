use mailtext::{convert_to_text, normalize_whitespace};
use proptest::prelude::*;
use rstest::rstest;

fn convert(html: &str) -> String {
    convert_to_text(html, None)
}

#[test]
fn converts_a_fragment() {
    assert!(convert("<p>Test</p>").contains("Test"));
}

#[test]
fn converts_a_body_and_ignores_title() {
    let text = convert(
        "
    <html>
    <title>Ignore me</title>
    <body>
    <p>Test</p>
    </body>
    </html>
    ",
    );
    assert_eq!(text, "Test");
}

#[test]
fn ignores_head_content() {
    let text = convert(
        "
    <html>
    <head>
    <title>Ignore me</title>
    <link href=\"http://example.com/should/be/ignored.css\" rel=\"stylesheet\" />
    </head>
    <body>
    <p>Test</p>
    </body>
    </html>
    ",
    );
    assert!(!text.contains("Ignore me"));
    assert!(!text.contains('*'));
    assert_eq!(text, "Test");
}

#[test]
fn converts_a_malformed_body() {
    let text = convert(
        "
    <html>
    <title>Ignore me</title>
    <body>
    <p>Test
    ",
    );
    assert_eq!(text, "Test");
}

#[rstest]
#[case("<p>Test", "Test")]
#[case("<p>Test</p><p", "Test")]
#[case("<p>Test<a href=\"http://example.com/", "Test")]
#[case("<p>Test<!-- comment", "Test")]
#[case("<p>Test<script>alert(1)", "Test")]
fn survives_truncated_markup(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn decodes_html_entities() {
    let html = "
      c&eacute;dille gar&#231;on &amp; &agrave; &ntilde;
    ";
    assert_eq!(convert(html), "cédille garçon & à ñ");
    assert_eq!(convert(&String::from(html)), "cédille garçon & à ñ");
}

#[rstest]
#[case("&amp;", "&")]
#[case("&eacute;", "é")]
#[case("&#231;", "ç")]
#[case("&#xE7;", "ç")]
#[case("&zzfoo; stays", "&zzfoo; stays")]
fn decodes_single_entities(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[rstest]
#[case("  \ttext\ntext\n", "text\ntext")]
#[case("  \na \n a \t", "a\na")]
#[case("  \na \n\t \n \n a \t", "a\n\na")]
#[case("test text&nbsp;", "test text")]
#[case("test        text", "test text")]
#[case("a   b", "a b")]
#[case("", "")]
#[case(" \n\t ", "")]
fn strips_whitespace(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn leaves_spaces_for_spans() {
    let text = convert(
        "
    <html>
    <body>
    <p><span>Test</span>
    <span>line 2</span>
    </p>
    ",
    );
    assert_eq!(text, "Test line 2");
}

#[rstest]
#[case("Test text\r\nTest text", "Test text\nTest text")]
#[case("Test text\nTest text", "Test text\nTest text")]
#[case("Test text\rTest text", "Test text\nTest text")]
fn normalizes_line_breaks(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[rstest]
#[case("<li class='123'>item 1</li> <li>item 2</li>\n", "* item 1\n* item 2")]
#[case(
    "<li>item 1</li> \t\n <li>item 2</li> <li> item 3</li>\n",
    "* item 1\n* item 2\n* item 3"
)]
#[case("<li>x</li><li>y</li>", "* x\n* y")]
#[case("Intro<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>Outro", "Intro\n* a\n* b\nOutro")]
#[case("<p>Intro</p><ul><li>a</li></ul><p>Outro</p>", "Intro\n\n* a\n\nOutro")]
#[case("<li></li><li>b</li>", "* b")]
#[case("<ul><li> \n </li><li><br></li></ul>", "")]
fn formats_lists(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn strips_html() {
    assert_eq!(
        convert("<p class=\"123'45 , att\" att=tester>test <span class='te\"st'>text</span>\n"),
        "test text"
    );
}

#[rstest]
#[case("<p>Test text</p><p>Test text</p>", "Test text\n\nTest text")]
#[case("\n<p>Test text</p>\n\n\n\t<p>Test text</p>\n", "Test text\n\nTest text")]
#[case("\n<p>Test text<br/>Test text</p>\n", "Test text\nTest text")]
#[case("\n<p>Test text<br> \tTest text<br></p>\n", "Test text\nTest text")]
#[case("Test text<br><BR />Test text", "Test text\n\nTest text")]
#[case("<p>A</p><p>B</p>", "A\n\nB")]
#[case("A<br><br>B", "A\n\nB")]
#[case("A<br><br><br><br>B", "A\n\nB")]
fn creates_line_breaks_for_p_and_br(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[rstest]
#[case("<h1>Test</h1>", "****\nTest\n****")]
#[case("\t<h1>\nTest</h1> ", "****\nTest\n****")]
#[case(
    "\t<h1>\nTest line 1<br>Test 2</h1> ",
    "***********\nTest line 1\nTest 2\n***********"
)]
#[case("<h1>Test</h1> <h1>Test</h1>", "****\nTest\n****\n\n****\nTest\n****")]
#[case("<h2>Test</h2>", "----\nTest\n----")]
#[case("<h3> <span class='a'>Test </span></h3>", "Test\n----")]
#[case("<H4>Deep</H4>", "Deep\n----")]
#[case("<h1> </h1>Body", "Body")]
#[case("<p>Intro</p><h2>Part</h2><p>Body</p>", "Intro\n\n----\nPart\n----\n\nBody")]
fn converts_headings(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn wraps_lines() {
    let raw = "test ".repeat(100);
    let text = convert_to_text(&raw, Some(20));

    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    assert!(longest <= 20);
    assert_eq!(text.split_whitespace().count(), 100);
}

#[test]
fn never_splits_a_link_token() {
    let html = "Please read <a href=\"http://example.com/privacy\">the policy</a> today";
    let text = convert_to_text(html, Some(10));
    assert!(text
        .lines()
        .any(|l| l == "the policy ( http://example.com/privacy )"));
}

#[rstest]
#[case("<a href=\"http://example.com/\">Link</a>", "Link ( http://example.com/ )")]
#[case(
    "<a href=\"http://example.com/\"><span class=\"a\">Link</span></a>",
    "Link ( http://example.com/ )"
)]
#[case(
    "<a href=\"http://example.com:80/~user?aaa=bb&amp;c=d,e,f#foo\">Link</a>",
    "Link ( http://example.com:80/~user?aaa=bb&c=d,e,f#foo )"
)]
#[case(
    "<a title='title' href=\"http://example.com/\">Link</a>",
    "Link ( http://example.com/ )"
)]
#[case("<a href=\"   http://example.com/ \"> Link </a>", "Link ( http://example.com/ )")]
#[case(
    "<a href=\"http://example.com/a/\">Link A</a> <a href=\"http://example.com/b/\">Link B</a>",
    "Link A ( http://example.com/a/ ) Link B ( http://example.com/b/ )"
)]
#[case("<a href=\"%%LINK%%\">Link</a>", "Link ( %%LINK%% )")]
#[case("<a href=\"[LINK]\">Link</a>", "Link ( [LINK] )")]
#[case("<a href=\"{LINK}\">Link</a>", "Link ( {LINK} )")]
#[case("<a href=\"[[!unsubscribe]]\">Link</a>", "Link ( [[!unsubscribe]] )")]
#[case("<a href=http://example.com/>Link</a>", "Link ( http://example.com/ )")]
#[case("<a name=\"top\">Top</a>", "Top")]
#[case("<a href='u'><p>One</p><p>Two</p></a>", "One Two ( u )")]
#[case("<a href='u'><h2>Sale</h2>Shop now</a>", "Sale Shop now ( u )")]
#[case("<a href='u'><li>a</li><li>b</li></a>", "a b ( u )")]
fn converts_links(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn unclosed_link_keeps_following_structure() {
    let html = "<p><a href='http://x/'>Click here</p><h1>Title</h1>\
                <ul><li>one</li><li>two</li></ul><p>Bye</p>";
    assert_eq!(
        convert(html),
        "Click here ( http://x/ )\n\n*****\nTitle\n*****\n\n* one\n* two\n\nBye"
    );
}

#[test]
fn unclosed_link_ends_at_next_heading() {
    assert_eq!(
        convert("<a href='http://x/'>Click here<h2>Title</h2>"),
        "Click here ( http://x/ )\n\n-----\nTitle\n-----"
    );
}

#[test]
fn ignores_empty_links() {
    let html = "<a href=\"http://example.com/a/\">Link A</a> <a href=\"http://example.com/b/\"></a> <a href=\"http://example.com/c/\">Link C</a>";
    assert_eq!(
        convert(html),
        "Link A ( http://example.com/a/ ) Link C ( http://example.com/c/ )"
    );
}

#[test]
fn converts_multiple_links_per_line() {
    let html = "<p>This is <a href=\"http://www.google.com\" >link1</a> and <a href=\"http://www.google.com\" >link2 </a> is next.</p>";
    assert_eq!(
        convert_to_text(html, Some(10_000)),
        "This is link1 ( http://www.google.com ) and link2 ( http://www.google.com ) is next."
    );
}

#[test]
fn converts_links_within_headings() {
    let stars = "*".repeat(28);
    assert_eq!(
        convert("<h1><a href='http://example.com/'>Test</a></h1>"),
        format!("{stars}\nTest ( http://example.com/ )\n{stars}")
    );
}

#[test]
fn replaces_images_with_alt_text() {
    assert_eq!(
        convert("<p><img src=\"logo.png\" alt=\"ACME\"> News</p>"),
        "ACME News"
    );
}

#[test]
fn removes_html_only_regions() {
    let html = "<p>Hi</p><!-- start text/html --><p>View in browser</p><!-- end text/html --><p>Bye</p>";
    assert_eq!(convert(html), "Hi\n\nBye");
}

#[test]
fn wrapping_keeps_list_marker_with_first_word() {
    assert_eq!(
        convert_to_text("<li>https://example.com/a/long/path tail</li>", Some(20)),
        "* https://example.com/a/long/path\ntail"
    );
}

#[rstest]
#[case("a<!-->b<p>c</p>", "ab\n\nc")]
#[case("if a </ b then <b>x</b> end", "if a </ b then x end")]
#[case("1 </ 2 and more text", "1 </ 2 and more text")]
fn keeps_text_around_malformed_markup(#[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(html), expected);
}

#[test]
fn many_unclosed_heads_convert() {
    let html = "<head><body>".repeat(20_000) + "Test";
    assert_eq!(convert(&html), "Test");
}

#[test]
fn markup_in_entities_stays_text() {
    assert_eq!(convert("&lt;p&gt;not a tag&lt;/p&gt;"), "<p>not a tag</p>");
}

proptest! {
    #[test]
    fn plain_text_only_normalizes_whitespace(s in "[a-zA-Z0-9 \t\r\n.,;:!?()*-]{0,200}") {
        prop_assert_eq!(convert(&s), normalize_whitespace(&s));
    }

    #[test]
    fn wrapped_lines_fit_or_hold_one_word(
        words in proptest::collection::vec("[a-z]{1,15}", 1..80),
        width in 1usize..50,
    ) {
        let text = convert_to_text(words.join(" "), Some(width));
        for line in text.lines() {
            prop_assert!(line.chars().count() <= width || !line.contains(' '));
        }
    }

    #[test]
    fn conversion_is_total(s in any::<String>()) {
        let text = convert(&s);
        prop_assert!(!text.contains("\n\n\n"));
        prop_assert_eq!(text.trim_matches('\n'), text.as_str());
    }

    #[test]
    fn markup_noise_is_total(s in "[<>a-z/\"'= &;#!\n-]{0,120}") {
        let text = convert(&s);
        prop_assert!(!text.contains("\n\n\n"));
        for line in text.lines() {
            prop_assert_eq!(line.trim(), line);
        }
    }
}

//! `<ruby>` annotation of a target string inside text content.
//!
//! Eligible text nodes are selected once, in document order, excluding
//! anything under `<head>` or `<ruby>`. A single occurrence counter is
//! threaded through a fold over those nodes, so `limit` caps the n-th
//! occurrence across the whole document rather than per node. Replacements
//! are planned during the fold and spliced in afterwards, last node first,
//! so no path is invalidated while the plan is being built or applied.
//!
//! Matching is strictly within one text node; a target split by markup is
//! never found.

use regex::Regex;

use super::HtmlModifier;
use crate::debug;
use crate::dom::{Element, Node, NodePath};
use crate::error::{Error, Result};

/// Subtrees whose text is never annotated.
const EXCLUDED: [&str; 2] = ["head", "ruby"];

/// Options for [`HtmlModifier::add_ruby_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RubyOptions {
    /// Annotate at most this many occurrences (document-wide); 0 = all.
    pub limit: usize,
    /// Wrap the base text in `<rb>`.
    pub wrap_rb: bool,
    /// Surround `<rt>` with `<rp>(</rp>` / `<rp>)</rp>` fallbacks.
    pub parentheses: bool,
}

impl RubyOptions {
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub const fn wrap_rb(mut self, wrap_rb: bool) -> Self {
        self.wrap_rb = wrap_rb;
        self
    }

    pub const fn parentheses(mut self, parentheses: bool) -> Self {
        self.parentheses = parentheses;
        self
    }

    const fn allows(&self, occurrence: usize) -> bool {
        self.limit == 0 || occurrence <= self.limit
    }
}

/// Fold state for one `add_ruby_text` call.
#[derive(Debug, Default)]
struct Annotation {
    /// Occurrences seen so far, annotated or not.
    seen: usize,
    annotated: usize,
    /// Replacement nodes per changed text node, document order.
    plan: Vec<(NodePath, Vec<Node>)>,
}

/// What to insert for each occurrence.
struct Markup<'a> {
    pattern: Regex,
    reading: &'a str,
    options: RubyOptions,
}

impl HtmlModifier {
    /// Wrap occurrences of `target` in `<ruby>` with `reading` as `<rt>`.
    ///
    /// An empty `target` is a no-op. Occurrences are found left to right
    /// without overlap; the count is available from [`Self::last_annotated`].
    pub fn add_ruby_text(&mut self, target: &str, reading: &str, options: RubyOptions) -> Result<&mut Self> {
        self.last_annotated = 0;
        if target.is_empty() {
            debug!("ruby"; "empty target, nothing to annotate");
            return Ok(self);
        }

        let markup = Markup {
            pattern: Regex::new(&regex::escape(target))?,
            reading,
            options,
        };

        let candidates = self.doc.text_nodes_excluding(&EXCLUDED);
        let doc = &self.doc;
        let annotation = candidates
            .into_iter()
            .filter(|path| !doc.has_ancestor(path, "ruby"))
            .try_fold(Annotation::default(), |acc, path| {
                let text = doc
                    .node(&path)
                    .and_then(Node::as_text)
                    .ok_or_else(|| Error::UnexpectedNodeType {
                        expected: "text",
                        found: doc.node(&path).map_or("detached node", Node::kind),
                    })?;
                Ok::<_, Error>(acc.visit(path, text, &markup))
            })?;

        let Annotation {
            seen,
            annotated,
            plan,
        } = annotation;
        let nodes = plan.len();
        for (path, replacement) in plan.into_iter().rev() {
            self.doc.replace_with(&path, replacement);
        }

        self.last_annotated = annotated;
        debug!("ruby"; "`{}`: {} of {} occurrence(s) annotated in {} text node(s)",
            target, annotated, seen, nodes);
        Ok(self)
    }
}

impl Annotation {
    /// Scan one text node, counting every occurrence and planning a
    /// replacement if any occurrence is within the limit.
    fn visit(mut self, path: NodePath, text: &str, markup: &Markup<'_>) -> Self {
        let mut nodes = Vec::new();
        let mut cursor = 0;

        for m in markup.pattern.find_iter(text) {
            self.seen += 1;
            if !markup.options.allows(self.seen) {
                continue;
            }
            if cursor < m.start() {
                nodes.push(Node::text(&text[cursor..m.start()]));
            }
            nodes.push(Node::Element(ruby_element(m.as_str(), markup.reading, markup.options)));
            cursor = m.end();
            self.annotated += 1;
        }

        if cursor > 0 {
            if cursor < text.len() {
                nodes.push(Node::text(&text[cursor..]));
            }
            self.plan.push((path, nodes));
        }
        self
    }
}

/// `<ruby>base<rt>reading</rt></ruby>` with optional `<rb>` and `<rp>`.
fn ruby_element(base: &str, reading: &str, options: RubyOptions) -> Element {
    let mut ruby = Element::new("ruby");
    if options.wrap_rb {
        ruby = ruby.with_child(Node::Element(Element::new("rb").with_text(base)));
    } else {
        ruby = ruby.with_text(base);
    }
    if options.parentheses {
        ruby = ruby.with_child(Node::Element(Element::new("rp").with_text("(")));
    }
    ruby = ruby.with_child(Node::Element(Element::new("rt").with_text(reading)));
    if options.parentheses {
        ruby = ruby.with_child(Node::Element(Element::new("rp").with_text(")")));
    }
    ruby
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARO: &str = "<p>こんにちは、私の名前は太郎です。太郎は学生です。</p>";

    fn annotate(html: &str, options: RubyOptions) -> (String, usize) {
        let mut modifier = HtmlModifier::new(html).unwrap();
        modifier.add_ruby_text("太郎", "タロウ", options).unwrap();
        (modifier.save(), modifier.last_annotated())
    }

    #[test]
    fn test_add_ruby_text() {
        let (out, count) = annotate(TARO, RubyOptions::default());
        assert_eq!(
            out,
            "<p>こんにちは、私の名前は<ruby>太郎<rt>タロウ</rt></ruby>です。<ruby>太郎<rt>タロウ</rt></ruby>は学生です。</p>"
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_limit_with_rb() {
        let (out, count) = annotate(TARO, RubyOptions::default().limit(1).wrap_rb(true));
        assert_eq!(
            out,
            "<p>こんにちは、私の名前は<ruby><rb>太郎</rb><rt>タロウ</rt></ruby>です。太郎は学生です。</p>"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_parentheses() {
        let (out, _) = annotate(TARO, RubyOptions::default().parentheses(true));
        assert_eq!(
            out,
            "<p>こんにちは、私の名前は<ruby>太郎<rp>(</rp><rt>タロウ</rt><rp>)</rp></ruby>です。<ruby>太郎<rp>(</rp><rt>タロウ</rt><rp>)</rp></ruby>は学生です。</p>"
        );
    }

    #[test]
    fn test_limit_is_document_wide() {
        let html = "<div><p>太郎と太郎</p><p>太郎</p></div>";
        let (out, count) = annotate(html, RubyOptions::default().limit(2));
        assert_eq!(
            out,
            "<div><p><ruby>太郎<rt>タロウ</rt></ruby>と<ruby>太郎<rt>タロウ</rt></ruby></p><p>太郎</p></div>"
        );
        assert_eq!(count, 2);

        let html = "<div><p>太郎</p><p>太郎と太郎</p></div>";
        let (out, _) = annotate(html, RubyOptions::default().limit(2));
        assert_eq!(
            out,
            "<div><p><ruby>太郎<rt>タロウ</rt></ruby></p><p><ruby>太郎<rt>タロウ</rt></ruby>と太郎</p></div>"
        );
    }

    #[test]
    fn test_skips_existing_ruby_and_head() {
        let html = "<html><head><title>太郎</title></head><body><p>こんにちは、<ruby>太郎<rt>タロウ</rt></ruby>さん。太郎</p></body></html>";
        let (out, count) = annotate(html, RubyOptions::default());
        assert_eq!(
            out,
            "<html><head><title>太郎</title></head><body><p>こんにちは、<ruby>太郎<rt>タロウ</rt></ruby>さん。<ruby>太郎<rt>タロウ</rt></ruby></p></body></html>"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_target_split_by_markup_is_not_matched() {
        let html = "<p>太<b>郎</b></p>";
        let (out, count) = annotate(html, RubyOptions::default());
        assert_eq!(out, html);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cdata_is_not_annotated() {
        let (out, count) = annotate("<p><![CDATA[太郎]]>と太郎</p>", RubyOptions::default());
        assert_eq!(
            out,
            "<p><![CDATA[太郎]]>と<ruby>太郎<rt>タロウ</rt></ruby></p>"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_target_is_no_op() {
        let mut modifier = HtmlModifier::new(TARO).unwrap();
        modifier.add_ruby_text("", "x", RubyOptions::default()).unwrap();
        assert_eq!(modifier.save(), TARO);
        assert_eq!(modifier.last_annotated(), 0);
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let mut modifier = HtmlModifier::new("<p>aaa</p>").unwrap();
        modifier.add_ruby_text("aa", "x", RubyOptions::default()).unwrap();
        assert_eq!(modifier.save(), "<p><ruby>aa<rt>x</rt></ruby>a</p>");
        assert_eq!(modifier.last_annotated(), 1);
    }

    #[test]
    fn test_target_with_regex_metacharacters() {
        let mut modifier = HtmlModifier::new("<p>a.b axb</p>").unwrap();
        modifier.add_ruby_text("a.b", "r", RubyOptions::default()).unwrap();
        assert_eq!(modifier.save(), "<p><ruby>a.b<rt>r</rt></ruby> axb</p>");
    }

    #[test]
    fn test_reading_and_text_are_escaped() {
        let mut modifier = HtmlModifier::new("<p>A &amp; B</p>").unwrap();
        modifier.add_ruby_text("&", "<and>", RubyOptions::default()).unwrap();
        assert_eq!(
            modifier.save(),
            "<p>A <ruby>&amp;<rt>&lt;and&gt;</rt></ruby> B</p>"
        );
    }

    #[test]
    fn test_fragment_input() {
        let mut modifier = HtmlModifier::new("太郎と<b>太郎</b>").unwrap();
        modifier.add_ruby_text("太郎", "たろう", RubyOptions::default()).unwrap();
        assert_eq!(
            modifier.save(),
            "<ruby>太郎<rt>たろう</rt></ruby>と<b><ruby>太郎<rt>たろう</rt></ruby></b>"
        );
    }

    #[test]
    fn test_untouched_nodes_keep_identity() {
        let html = "<div><p>other</p><p>太郎</p></div>";
        let mut modifier = HtmlModifier::new(html).unwrap();
        let before = modifier.document().root.children[0].clone();
        modifier.add_ruby_text("太郎", "タロウ", RubyOptions::default()).unwrap();
        assert_eq!(modifier.document().root.children[0], before);
    }

    #[test]
    fn test_visit_counts_beyond_limit() {
        let markup = Markup {
            pattern: Regex::new("x").unwrap(),
            reading: "r",
            options: RubyOptions::default().limit(1),
        };
        let acc = Annotation::default().visit(NodePath::from(vec![0]), "x x x", &markup);
        assert_eq!(acc.seen, 3);
        assert_eq!(acc.annotated, 1);
        assert_eq!(acc.plan.len(), 1);

        let acc = acc.visit(NodePath::from(vec![1]), "x", &markup);
        assert_eq!(acc.seen, 4);
        assert_eq!(acc.plan.len(), 1);
    }
}

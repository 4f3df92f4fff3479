//! Minimal XML reader for documentation files
//!
//! Handles what compiler-generated documentation files contain: elements,
//! quoted attributes, text, the predefined and numeric entities, CDATA,
//! comments, processing instructions and a DOCTYPE line. Namespaces and DTD
//! internals are not interpreted.

use super::tree::{DocElement, DocNode};
use crate::error::{XmlError, XmlResult};

/// Parse a complete document and return its root element
pub fn parse_document(input: &str) -> XmlResult<DocElement> {
    let nodes = Reader::new(input).read_nodes(None)?;
    let mut roots = nodes.into_iter().filter_map(|node| match node {
        DocNode::Element(element) => Some(element),
        DocNode::Text(_) => None,
    });
    roots.next().ok_or(XmlError::NoRoot)
}

/// Parse a fragment (any mix of text and elements)
pub fn parse_fragment(input: &str) -> XmlResult<Vec<DocNode>> {
    Reader::new(input).read_nodes(None)
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn malformed(&self, reason: impl Into<String>) -> XmlError {
        XmlError::Malformed {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    /// Skip past `terminator`, failing at end of input
    fn skip_past(&mut self, terminator: &str, context: &'static str) -> XmlResult<&'a str> {
        let rest = self.rest();
        let end = rest
            .find(terminator)
            .ok_or(XmlError::UnexpectedEof { context })?;
        self.pos += end + terminator.len();
        Ok(&rest[..end])
    }

    /// Read sibling nodes until `</closing>` (or end of input at the top level)
    fn read_nodes(&mut self, closing: Option<&str>) -> XmlResult<Vec<DocNode>> {
        let mut nodes = Vec::new();

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return match closing {
                    Some(_) => Err(XmlError::UnexpectedEof { context: "element" }),
                    None => Ok(nodes),
                };
            }

            if rest.starts_with("<!--") {
                self.pos += 4;
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<![CDATA[") {
                self.pos += 9;
                let data = self.skip_past("]]>", "CDATA section")?;
                push_text(&mut nodes, data.to_string());
            } else if rest.starts_with("<?") {
                self.pos += 2;
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with("<!") {
                self.pos += 2;
                self.skip_past(">", "declaration")?;
            } else if rest.starts_with("</") {
                let offset = self.pos;
                self.pos += 2;
                let found = self.skip_past(">", "closing tag")?.trim();
                return match closing {
                    Some(expected) if expected == found => Ok(nodes),
                    Some(expected) => Err(XmlError::MismatchedTag {
                        offset,
                        expected: expected.to_string(),
                        found: found.to_string(),
                    }),
                    None => Err(XmlError::Malformed {
                        offset,
                        reason: format!("unexpected closing tag </{found}>"),
                    }),
                };
            } else if rest.starts_with('<') {
                let element = self.read_element()?;
                nodes.push(DocNode::Element(element));
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                let text = decode_entities(&rest[..end]);
                self.pos += end;
                push_text(&mut nodes, text);
            }
        }
    }

    fn read_element(&mut self) -> XmlResult<DocElement> {
        self.pos += 1;
        let name = self.read_name()?;
        let mut element = DocElement::new(name);

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok(element);
            }
            if rest.starts_with('>') {
                self.pos += 1;
                element.children = self.read_nodes(Some(&element.name))?;
                return Ok(element);
            }
            if rest.is_empty() {
                return Err(XmlError::UnexpectedEof { context: "start tag" });
            }

            let key = self.read_name()?;
            self.skip_whitespace();
            if !self.rest().starts_with('=') {
                return Err(self.malformed(format!("attribute '{key}' has no value")));
            }
            self.pos += 1;
            self.skip_whitespace();
            let value = self.read_quoted()?;
            element.attributes.push((key, value));
        }
    }

    fn read_name(&mut self) -> XmlResult<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '>' | '/' | '<' | '"' | '\''))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.malformed("expected a name"));
        }
        self.pos += end;
        Ok(rest[..end].to_string())
    }

    fn read_quoted(&mut self) -> XmlResult<String> {
        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.malformed("expected a quoted attribute value")),
        };
        self.pos += 1;
        let rest = self.rest();
        let end = rest
            .find(quote)
            .ok_or(XmlError::UnexpectedEof { context: "attribute value" })?;
        self.pos += end + 1;
        Ok(decode_entities(&rest[..end]))
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }
}

/// Merge adjacent text so CDATA and entity runs stay one node
fn push_text(nodes: &mut Vec<DocNode>, text: String) {
    if let Some(DocNode::Text(previous)) = nodes.last_mut() {
        previous.push_str(&text);
    } else {
        nodes.push(DocNode::Text(text));
    }
}

/// Longest reference we decode, `&#x10FFFF;`
const MAX_ENTITY_LEN: usize = 10;

/// Replace predefined and numeric character references; unknown ones stay literal
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .bytes()
            .take(MAX_ENTITY_LEN)
            .position(|byte| byte == b';')
            .and_then(|semi| {
                let entity = &rest[1..semi];
                let ch = match entity {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                        .map(|hex| u32::from_str_radix(hex, 16).ok())
                        .unwrap_or_else(|| {
                            entity.strip_prefix('#').and_then(|dec| dec.parse().ok())
                        })
                        .and_then(char::from_u32),
                };
                ch.map(|ch| (ch, semi))
            });

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_with_prolog() {
        let xml = r#"<?xml version="1.0"?>
<!-- generated -->
<doc>
    <assembly><name>MyLibrary</name></assembly>
</doc>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "doc");
        let assembly = root.children.iter().find_map(DocNode::as_element).unwrap();
        assert_eq!(assembly.name, "assembly");
        assert_eq!(assembly.text_content(), "MyLibrary");
    }

    #[test]
    fn test_attributes_and_self_closing() {
        let nodes =
            parse_fragment(r#"<inheritdoc cref='T:MyApp.IFoo' path="/summary"/><see langword="null" />"#)
                .unwrap();
        assert_eq!(nodes.len(), 2);
        let marker = nodes[0].as_element().unwrap();
        assert!(marker.is_inheritdoc());
        assert_eq!(marker.attribute("cref"), Some("T:MyApp.IFoo"));
        assert_eq!(marker.attribute("path"), Some("/summary"));
        assert!(marker.children.is_empty());
    }

    #[test]
    fn test_entities_and_cdata() {
        let nodes = parse_fragment("<code>a &lt; b &amp;&amp; c &#65;&#x42; &bogus;<![CDATA[<raw>]]></code>").unwrap();
        let code = nodes[0].as_element().unwrap();
        assert_eq!(code.children, vec![DocNode::text("a < b && c AB &bogus;<raw>")]);
    }

    #[test]
    fn test_bare_ampersands_stay_literal() {
        assert_eq!(decode_entities("a & b; c &amp; d"), "a & b; c & d");
        assert_eq!(decode_entities("&&&& then later;"), "&&&& then later;");
        assert_eq!(decode_entities("&#x10FFFF;"), "\u{10FFFF}");
        assert_eq!(decode_entities("&averyveryverylongname;"), "&averyveryverylongname;");
    }

    #[test]
    fn test_mismatched_tag() {
        let err = parse_fragment("<summary>text</remarks>").unwrap_err();
        assert!(matches!(err, XmlError::MismatchedTag { .. }));
    }

    #[test]
    fn test_unterminated_element() {
        assert_eq!(
            parse_fragment("<summary>text"),
            Err(XmlError::UnexpectedEof { context: "element" })
        );
        assert!(parse_fragment("<param name=\"x>").is_err());
    }

    #[test]
    fn test_no_root() {
        assert_eq!(parse_document("  <!-- nothing -->  "), Err(XmlError::NoRoot));
    }
}

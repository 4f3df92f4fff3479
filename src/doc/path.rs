//! Path expressions for partial inheritance (`<inheritdoc path="/remarks/para[1]"/>`)
//!
//! Supports the XPath subset found in documentation comments: child and
//! descendant steps over element names, `*`, `node()` and `text()`, with an
//! optional `[n]` position or `[@attr='value']` / `[@attr]` predicate.
//! Expressions are always evaluated relative to the documentation root, so a
//! leading `/` means the same as `./`.

use super::tree::{DocElement, DocNode};
use crate::error::PathError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Axis {
    Child,
    DescendantOrSelf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Name(String),
    AnyElement,
    AnyNode,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Position(usize),
    HasAttribute(String),
    AttributeEquals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicate: Option<Predicate>,
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    steps: Vec<Step>,
}

/// Attributes that tell sibling sections apart (`param`, `typeparam`, `exception`, ...)
const IDENTIFYING_ATTRIBUTES: [&str; 2] = ["name", "cref"];

#[derive(Clone, Copy)]
enum Cursor<'a> {
    Root(&'a [DocNode]),
    Node(&'a DocNode),
}

impl<'a> Cursor<'a> {
    fn children(self) -> &'a [DocNode] {
        match self {
            Cursor::Root(nodes) => nodes,
            Cursor::Node(DocNode::Element(element)) => &element.children,
            Cursor::Node(DocNode::Text(_)) => &[],
        }
    }
}

impl PathExpr {
    /// `a[@name='x']/b/node()`: the content of the element matching each
    /// enclosing element in turn, keyed by its `name` or `cref` attribute
    pub fn content_of(ancestors: &[DocElement]) -> Self {
        let mut steps: Vec<Step> = ancestors
            .iter()
            .map(|element| Step {
                axis: Axis::Child,
                test: NodeTest::Name(element.name.clone()),
                predicate: IDENTIFYING_ATTRIBUTES.iter().find_map(|key| {
                    element
                        .attribute(key)
                        .map(|value| Predicate::AttributeEquals(key.to_string(), value.to_string()))
                }),
            })
            .collect();
        steps.push(Step {
            axis: Axis::Child,
            test: NodeTest::AnyNode,
            predicate: None,
        });
        Self { steps }
    }

    /// Evaluate against the top-level nodes of a documentation tree
    pub fn select(&self, nodes: &[DocNode]) -> Vec<DocNode> {
        let mut context = vec![Cursor::Root(nodes)];

        for step in &self.steps {
            let mut next = Vec::new();
            for cursor in context {
                let mut candidates = Vec::new();
                match step.axis {
                    Axis::Child => candidates.extend(cursor.children().iter()),
                    Axis::DescendantOrSelf => collect_descendants(cursor.children(), &mut candidates),
                }

                let matched = candidates.into_iter().filter(|node| step.test.matches(node));
                match &step.predicate {
                    Some(Predicate::Position(position)) => {
                        next.extend(matched.skip(position - 1).take(1).map(Cursor::Node))
                    }
                    Some(predicate) => next.extend(
                        matched
                            .filter(|node| predicate.matches_attributes(node))
                            .map(Cursor::Node),
                    ),
                    None => next.extend(matched.map(Cursor::Node)),
                }
            }
            context = next;
        }

        context
            .into_iter()
            .filter_map(|cursor| match cursor {
                Cursor::Node(node) => Some(node.clone()),
                Cursor::Root(_) => None,
            })
            .collect()
    }
}

fn collect_descendants<'a>(nodes: &'a [DocNode], out: &mut Vec<&'a DocNode>) {
    for node in nodes {
        out.push(node);
        if let DocNode::Element(element) = node {
            collect_descendants(&element.children, out);
        }
    }
}

impl NodeTest {
    fn matches(&self, node: &DocNode) -> bool {
        match (self, node) {
            (NodeTest::AnyNode, _) => true,
            (NodeTest::Text, DocNode::Text(_)) => true,
            (NodeTest::AnyElement, DocNode::Element(_)) => true,
            (NodeTest::Name(name), DocNode::Element(element)) => &element.name == name,
            _ => false,
        }
    }
}

impl Predicate {
    fn matches_attributes(&self, node: &DocNode) -> bool {
        let element: Option<&DocElement> = node.as_element();
        match (self, element) {
            (Predicate::HasAttribute(name), Some(element)) => element.attribute(name).is_some(),
            (Predicate::AttributeEquals(name, value), Some(element)) => {
                element.attribute(name) == Some(value.as_str())
            }
            _ => false,
        }
    }
}

impl FromStr for PathExpr {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }

        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        for raw in split_steps(trimmed)? {
            match raw {
                // `//` leaves an empty segment between the slashes
                "" => axis = Axis::DescendantOrSelf,
                "." => {}
                raw => {
                    steps.push(parse_step(raw, axis, trimmed)?);
                    axis = Axis::Child;
                }
            }
        }

        if steps.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { steps })
    }
}

/// Split on `/` outside brackets and quotes; the leading `/` is dropped
fn split_steps(path: &str) -> Result<Vec<&str>, PathError> {
    let body = path.strip_prefix('/').unwrap_or(path);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;

    for (index, ch) in body.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => {
                depth = depth.checked_sub(1).ok_or_else(|| PathError::UnbalancedBracket {
                    path: path.to_string(),
                })?
            }
            (None, '/') if depth == 0 => {
                segments.push(&body[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    if depth != 0 || quote.is_some() {
        return Err(PathError::UnbalancedBracket {
            path: path.to_string(),
        });
    }
    segments.push(&body[start..]);

    // A trailing `/` is not a step
    if segments.last() == Some(&"") {
        return Err(PathError::InvalidStep {
            step: String::new(),
            path: path.to_string(),
        });
    }
    Ok(segments)
}

fn parse_step(raw: &str, axis: Axis, path: &str) -> Result<Step, PathError> {
    let invalid = || PathError::InvalidStep {
        step: raw.to_string(),
        path: path.to_string(),
    };

    let (test, predicate) = match raw.find('[') {
        Some(open) => {
            let inner = raw[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
            (&raw[..open], Some(parse_predicate(inner)?))
        }
        None => (raw, None),
    };

    let test = match test.trim() {
        "*" => NodeTest::AnyElement,
        "node()" => NodeTest::AnyNode,
        "text()" => NodeTest::Text,
        name if is_name(name) => NodeTest::Name(name.to_string()),
        _ => return Err(invalid()),
    };

    Ok(Step {
        axis,
        test,
        predicate,
    })
}

fn parse_predicate(inner: &str) -> Result<Predicate, PathError> {
    let invalid = || PathError::InvalidPredicate {
        predicate: inner.to_string(),
    };
    let inner = inner.trim();

    if let Ok(position) = inner.parse::<usize>() {
        return if position == 0 {
            Err(invalid())
        } else {
            Ok(Predicate::Position(position))
        };
    }

    let attribute = inner.strip_prefix('@').ok_or_else(invalid)?;
    match attribute.split_once('=') {
        None if is_name(attribute.trim()) => Ok(Predicate::HasAttribute(attribute.trim().to_string())),
        None => Err(invalid()),
        Some((name, value)) => {
            let name = name.trim();
            let value = value.trim();
            let unquoted = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .ok_or_else(invalid)?;
            if !is_name(name) {
                return Err(invalid());
            }
            Ok(Predicate::AttributeEquals(name.to_string(), unquoted.to_string()))
        }
    }
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

//! Parsing of prefixed documentation ids (`M:MyApp.Worker.Execute(System.String)`)
//!
//! The parser re-assembles member ids with the same grammar the encoder
//! produces, so a parsed id can be looked up directly in the registry.

use crate::error::DocIdError;
use crate::types::IdPrefix;

/// What a documentation id points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTarget {
    Type {
        type_id: String,
    },
    Member {
        type_id: String,
        member_id: String,
    },
}

/// A parsed `<prefix>:<name>` documentation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocId {
    pub prefix: IdPrefix,
    pub target: DocTarget,
}

impl DocId {
    /// Parse a prefixed id as found in `<member name="...">` and `cref` attributes
    pub fn parse(raw: &str) -> Result<Self, DocIdError> {
        let raw = raw.trim();
        let (prefix, name) = raw.split_once(':').ok_or_else(|| DocIdError::MissingPrefix {
            raw: raw.to_string(),
        })?;

        let prefix: IdPrefix = prefix.parse().map_err(|_| DocIdError::UnknownPrefix {
            prefix: prefix.to_string(),
            raw: raw.to_string(),
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DocIdError::EmptyName {
                raw: raw.to_string(),
            });
        }

        let target = match prefix {
            IdPrefix::Type => DocTarget::Type {
                type_id: name.to_string(),
            },
            _ => parse_member(name, raw)?,
        };

        Ok(Self { prefix, target })
    }

    /// Parse a reference without a prefix (`MyApp.IFoo.Run(System.String)`)
    ///
    /// Both readings are returned, type first, since an unprefixed name can
    /// denote either kind of element.
    pub fn parse_unprefixed(name: &str) -> Vec<DocTarget> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }

        let mut targets = Vec::new();
        if !name.contains('(') {
            targets.push(DocTarget::Type {
                type_id: name.to_string(),
            });
        }
        if let Ok(member) = parse_member(name, name) {
            targets.push(member);
        }
        targets
    }

    /// The registry key this id refers to
    pub fn qualified_id(&self) -> String {
        self.target.qualified_id()
    }
}

impl DocTarget {
    pub fn qualified_id(&self) -> String {
        match self {
            DocTarget::Type { type_id } => type_id.clone(),
            DocTarget::Member { type_id, member_id } => format!("{type_id}.{member_id}"),
        }
    }
}

/// Split `Owner.Type.Member(params)~Ret` into owner and normalized member id
fn parse_member(name: &str, raw: &str) -> Result<DocTarget, DocIdError> {
    let signature_start = name.find('(').unwrap_or(name.len());
    let (qualified_name, signature) = name.split_at(signature_start);

    // A conversion suffix without parameters (`op_Implicit~Foo`) stays on the name
    let (qualified_name, bare_return) = match qualified_name.split_once('~') {
        Some((head, ret)) if signature.is_empty() => (head, Some(ret)),
        _ => (qualified_name, None),
    };

    let dot = last_top_level_dot(qualified_name).ok_or_else(|| DocIdError::MissingOwner {
        raw: raw.to_string(),
    })?;
    let type_id = qualified_name[..dot].trim();
    let member_name = qualified_name[dot + 1..].trim();
    if type_id.is_empty() || member_name.is_empty() {
        return Err(DocIdError::EmptyName {
            raw: raw.to_string(),
        });
    }

    let mut member_id = member_name.to_string();

    let return_type = if signature.is_empty() {
        bare_return.map(str::trim)
    } else {
        let (parameters, rest) = split_parameter_list(signature, raw)?;
        if !parameters.is_empty() {
            member_id.push('(');
            member_id.push_str(&parameters.join(","));
            member_id.push(')');
        }
        match rest.trim() {
            "" => None,
            rest => Some(rest.strip_prefix('~').map(str::trim).ok_or(
                DocIdError::MalformedParameters {
                    raw: raw.to_string(),
                    reason: "unexpected text after parameter list",
                },
            )?),
        }
    };

    if let Some(return_type) = return_type {
        if return_type.is_empty() {
            return Err(DocIdError::MalformedParameters {
                raw: raw.to_string(),
                reason: "empty conversion target",
            });
        }
        member_id.push('~');
        member_id.push_str(return_type);
    }

    Ok(DocTarget::Member {
        type_id: type_id.to_string(),
        member_id,
    })
}

/// Split `(A,B{C,D},E[,])rest` into trimmed top-level parameters and `rest`
fn split_parameter_list<'a>(
    signature: &'a str,
    raw: &str,
) -> Result<(Vec<String>, &'a str), DocIdError> {
    let malformed = |reason| DocIdError::MalformedParameters {
        raw: raw.to_string(),
        reason,
    };

    let mut depth = 0usize;
    let mut parameters = Vec::new();
    let mut current = String::new();

    for (index, ch) in signature.char_indices().skip(1) {
        match ch {
            '{' | '[' | '(' => {
                depth += 1;
                current.push(ch);
            }
            '}' | ']' => {
                depth = depth.checked_sub(1).ok_or_else(|| malformed("unbalanced brackets"))?;
                current.push(ch);
            }
            ')' if depth == 0 => {
                let parameter = current.trim();
                if parameter.is_empty() {
                    if !parameters.is_empty() {
                        return Err(malformed("empty parameter"));
                    }
                } else {
                    parameters.push(parameter.to_string());
                }
                return Ok((parameters, &signature[index + 1..]));
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                let parameter = current.trim();
                if parameter.is_empty() {
                    return Err(malformed("empty parameter"));
                }
                parameters.push(parameter.to_string());
                current.clear();
            }
            c if c.is_whitespace() => {}
            _ => current.push(ch),
        }
    }

    Err(malformed("unterminated parameter list"))
}

/// Last `.` outside `{}` generic argument lists
fn last_top_level_dot(name: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut last = None;
    for (index, ch) in name.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => last = Some(index),
            _ => {}
        }
    }
    last
}

//! v2 tree → v1 tree
//!
//! Object fields map as follows:
//!
//! | v2                         | v1                                         |
//! |----------------------------|--------------------------------------------|
//! | `@type` (string)           | `internal_type`                            |
//! | `@token` (string)          | `token`                                    |
//! | `@role` (array of strings) | `roles`                                    |
//! | `@pos.start` / `@pos.end`  | `start_position` / `end_position`          |
//! | scalar field               | `properties[field]` (stringified)          |
//! | object field               | child, `properties["internalRole"] = field` |
//! | array of objects           | one child per element, same role marker    |
//! | `null` field / element     | dropped (absent)                           |
//!
//! v1 has no null value: an absent property or child is how it spells one,
//! so dropping `null` loses nothing. Anything else is rejected with a
//! [`ConversionError`] rather than dropped, including a child whose own
//! `internalRole` field would be overwritten by the marker.

use crate::error::ConversionError;
use crate::nodes::{self, Node as Tree, Object};

use super::uast::{Node, Position, Role, INTERNAL_ROLE_KEY};

const POSITION_TYPE: &str = "uast:Position";
const POSITIONS_TYPE: &str = "uast:Positions";

/// Convert a decoded v2 tree into the legacy shape.
///
/// A `Null` root (empty payload) yields `None`.
pub fn to_legacy(tree: &Tree) -> Result<Option<Node>, ConversionError> {
    match tree {
        Tree::Null => Ok(None),
        Tree::Object(obj) => convert_object(obj).map(Some),
        other => Err(ConversionError::UnexpectedRoot(other.kind())),
    }
}

fn convert_object(obj: &Object) -> Result<Node, ConversionError> {
    let mut node = Node::default();

    for (key, value) in obj {
        match key.as_str() {
            nodes::KEY_TYPE => node.internal_type = expect_string(key, value)?,
            nodes::KEY_TOKEN => node.token = expect_string(key, value)?,
            nodes::KEY_ROLES => node.roles = convert_roles(value)?,
            nodes::KEY_POS => {
                let (start, end) = convert_positions(value)?;
                node.start_position = start;
                node.end_position = end;
            }
            reserved if reserved.starts_with('@') => {
                return Err(ConversionError::ReservedKey(reserved.to_string()));
            }
            _ => convert_field(&mut node, key, value)?,
        }
    }

    Ok(node)
}

fn convert_field(node: &mut Node, key: &str, value: &Tree) -> Result<(), ConversionError> {
    match value {
        Tree::Null => {}
        Tree::Bool(b) => {
            node.properties.insert(key.to_string(), b.to_string());
        }
        Tree::Int(v) => {
            node.properties.insert(key.to_string(), v.to_string());
        }
        Tree::Uint(v) => {
            node.properties.insert(key.to_string(), v.to_string());
        }
        Tree::Float(v) => {
            node.properties.insert(key.to_string(), v.to_string());
        }
        Tree::String(s) => {
            node.properties.insert(key.to_string(), s.clone());
        }
        Tree::Object(child) => node.children.push(convert_child(key, child)?),
        Tree::Array(items) => {
            for item in items {
                match item {
                    Tree::Null => {}
                    Tree::Object(child) => node.children.push(convert_child(key, child)?),
                    other => {
                        return Err(ConversionError::ArrayElement {
                            key: key.to_string(),
                            found: other.kind(),
                        })
                    }
                }
            }
        }
    }
    Ok(())
}

fn convert_child(key: &str, obj: &Object) -> Result<Node, ConversionError> {
    let mut child = convert_object(obj)?;
    if child.properties.contains_key(INTERNAL_ROLE_KEY) {
        return Err(ConversionError::PropertyCollision {
            key: INTERNAL_ROLE_KEY.to_string(),
            parent: key.to_string(),
        });
    }
    child
        .properties
        .insert(INTERNAL_ROLE_KEY.to_string(), key.to_string());
    Ok(child)
}

fn convert_roles(value: &Tree) -> Result<Vec<Role>, ConversionError> {
    let items = match value {
        Tree::Null => return Ok(Vec::new()),
        Tree::Array(items) => items,
        other => {
            return Err(ConversionError::InvalidField {
                key: nodes::KEY_ROLES.to_string(),
                expected: "an array of role names",
                found: other.kind(),
            })
        }
    };

    items
        .iter()
        .map(|item| {
            let name = item.as_str().ok_or(ConversionError::InvalidField {
                key: nodes::KEY_ROLES.to_string(),
                expected: "an array of role names",
                found: item.kind(),
            })?;
            Role::from_name(name).ok_or_else(|| ConversionError::UnknownRole(name.to_string()))
        })
        .collect()
}

fn convert_positions(
    value: &Tree,
) -> Result<(Option<Position>, Option<Position>), ConversionError> {
    let obj = match value {
        Tree::Null => return Ok((None, None)),
        Tree::Object(obj) => obj,
        other => {
            return Err(ConversionError::InvalidField {
                key: nodes::KEY_POS.to_string(),
                expected: "an object",
                found: other.kind(),
            })
        }
    };

    let mut start = None;
    let mut end = None;
    for (key, value) in obj {
        match key.as_str() {
            nodes::KEY_TYPE if value.as_str() == Some(POSITIONS_TYPE) => {}
            "start" => start = convert_position(key, value)?,
            "end" => end = convert_position(key, value)?,
            _ => {
                return Err(ConversionError::Position {
                    key: key.clone(),
                    reason: "only 'start' and 'end' are representable".to_string(),
                })
            }
        }
    }
    Ok((start, end))
}

fn convert_position(key: &str, value: &Tree) -> Result<Option<Position>, ConversionError> {
    let obj = match value {
        Tree::Null => return Ok(None),
        Tree::Object(obj) => obj,
        other => {
            return Err(ConversionError::Position {
                key: key.to_string(),
                reason: format!("expected an object, got {}", other.kind()),
            })
        }
    };

    let mut pos = Position::default();
    for (field, v) in obj {
        let slot = match field.as_str() {
            nodes::KEY_TYPE if v.as_str() == Some(POSITION_TYPE) => continue,
            "offset" => &mut pos.offset,
            "line" => &mut pos.line,
            "col" => &mut pos.col,
            _ => {
                return Err(ConversionError::Position {
                    key: key.to_string(),
                    reason: format!("unexpected field '{}'", field),
                })
            }
        };
        *slot = position_number(key, field, v)?;
    }
    Ok(Some(pos))
}

fn position_number(key: &str, field: &str, value: &Tree) -> Result<u32, ConversionError> {
    let n = match value {
        Tree::Uint(v) => u32::try_from(*v).ok(),
        Tree::Int(v) => u32::try_from(*v).ok(),
        _ => None,
    };
    n.ok_or_else(|| ConversionError::Position {
        key: key.to_string(),
        reason: format!("'{}' must fit in u32, got {:?}", field, value),
    })
}

fn expect_string(key: &str, value: &Tree) -> Result<String, ConversionError> {
    match value {
        Tree::String(s) => Ok(s.clone()),
        Tree::Null => Ok(String::new()),
        other => Err(ConversionError::InvalidField {
            key: key.to_string(),
            expected: "a string",
            found: other.kind(),
        }),
    }
}

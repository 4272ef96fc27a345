use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property set on a child to record which parent field it came from
pub const INTERNAL_ROLE_KEY: &str = "internalRole";

/// Legacy tree node (fixed shape)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub internal_type: String,
    pub properties: BTreeMap<String, String>,
    pub children: Vec<Node>,
    pub token: String,
    pub start_position: Option<Position>,
    pub end_position: Option<Position>,
    pub roles: Vec<Role>,
}

impl Node {
    pub fn new(internal_type: impl Into<String>) -> Self {
        Self {
            internal_type: internal_type.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_span(mut self, start: Position, end: Position) -> Self {
        self.start_position = Some(start);
        self.end_position = Some(end);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

macro_rules! roles {
    ($($name:ident),+ $(,)?) => {
        /// Language-independent role of a legacy node
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Role {
            $($name),+
        }

        impl Role {
            pub const ALL: &'static [Role] = &[$(Role::$name),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Role::$name => stringify!($name)),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($name) => Some(Role::$name),)+
                    _ => None,
                }
            }
        }
    };
}

roles! {
    Invalid, Identifier, Qualified, Operator, Binary, Unary, Left, Right, Infix,
    Postfix, Bitwise, Boolean, Unsigned, LeftShift, RightShift, Or, Xor, And,
    Expression, Statement, Equal, Not, LessThan, LessThanOrEqual, GreaterThan,
    GreaterThanOrEqual, Identical, Contains, Increment, Decrement, Negative,
    Positive, Dereference, TakeAddress, File, Add, Substract, Multiply, Divide,
    Modulo, Package, Declaration, Import, Pathname, Alias, Function, Body, Name,
    Receiver, Argument, Value, ArgsList, Base, Implements, Instance, Subtype,
    Subpackage, Module, Friend, World, If, Condition, Then, Else, Switch, Case,
    Default, For, Initialization, Update, Iterator, While, DoWhile, Break,
    Continue, Goto, Block, Scope, Return, Try, Catch, Finally, Throw, Assert,
    Call, Callee, Positional, Noop, Literal, Byte, ByteString, Character, List,
    Map, Null, Number, Regexp, Set, String, Tuple, Type, Entry, Key, Primitive,
    Assignment, This, Comment, Documentation, Whitespace, Incomplete,
    Unannotated, Visibility, Annotation, Anonymous, Enumeration, Arithmetic,
    Relational, Variable,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.as_str()), Some(*role));
        }
        assert_eq!(Role::from_name("identifier"), None);
        assert_eq!(Role::from_name("Nope"), None);
    }

    #[test]
    fn test_node_builder() {
        let node = Node::new("Name")
            .with_token("x")
            .with_roles([Role::Identifier, Role::Expression])
            .with_property("ctx", "Load");
        assert_eq!(node.internal_type, "Name");
        assert_eq!(node.token, "x");
        assert_eq!(node.roles.len(), 2);
        assert_eq!(node.properties["ctx"], "Load");
        assert!(node.children.is_empty());
    }
}

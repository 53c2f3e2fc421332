use crate::mods::tree::{as_list, Node};
use crate::vocab::relators::{resolve_role, RoleTerm};

/// Entity type of a contributor, as written into the linked-agent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameType {
    Person,
    #[default]
    CorporateBody,
}

impl NameType {
    /// Only an explicit `type="personal"` makes a person.
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("personal") => NameType::Person,
            _ => NameType::CorporateBody,
        }
    }
}

impl std::fmt::Display for NameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameType::Person => write!(f, "person"),
            NameType::CorporateBody => write!(f, "corporate_body"),
        }
    }
}

/// One `<name>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub name_type: NameType,
    pub display_name: String,
    /// Capitalized role label; empty when the entry has no usable role.
    pub role: String,
}

impl ParsedName {
    pub fn from_node(node: &Node) -> Self {
        let name_type = NameType::from_attr(node.attr("type"));

        let display_name = as_list(node.get("namePart"))
            .into_iter()
            .map(Node::text_content)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let role = node.get("role").map(role_label).unwrap_or_default();

        ParsedName {
            name_type,
            display_name,
            role,
        }
    }

    pub fn role_term(&self) -> RoleTerm {
        resolve_role(&self.role)
    }

    /// `relators:<code>:<type>:<name>`
    pub fn to_agent(&self) -> String {
        format!(
            "{}:{}:{}",
            self.role_term().term(),
            self.name_type,
            self.display_name
        )
    }
}

/// Serialize a `<name>` node straight to its linked-agent value.
pub fn parse_name(node: &Node) -> String {
    ParsedName::from_node(node).to_agent()
}

/// Role text of a `<role>` value.
///
/// A bare string role is ignored: MODS only defines roles through
/// `<roleTerm>`. Of several `<role>` entries only the first is read.
fn role_label(role: &Node) -> String {
    let entry = match role {
        Node::Element(_) => role,
        Node::List(items) => match items.first() {
            Some(first @ Node::Element(_)) => first,
            _ => return String::new(),
        },
        Node::Text(_) | Node::Empty => return String::new(),
    };

    let term = match entry.get("roleTerm") {
        Some(Node::List(terms)) => terms
            .iter()
            .find(|t| t.attr("type") == Some("text"))
            .or_else(|| terms.iter().find(|t| !t.text_content().is_empty()))
            .map(Node::text_content)
            .unwrap_or_default(),
        Some(term) => term.text_content(),
        None => String::new(),
    };

    capitalize(&term)
}

/// First character upper case, the rest lower case.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

//! Assembled documentation: decoded records plus their free text

use crate::identifier::{MemberKind, MemberRecord};
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One documented member ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedMember {
    /// Identifier as it appeared in the export
    pub identifier: String,
    pub record: MemberRecord,
    pub summary: String,
    pub returns: String,
    pub remarks: String,
    pub decorations: Vec<String>,
    pub position: Position,
}

impl DocumentedMember {
    pub fn kind(&self) -> MemberKind {
        self.record.kind
    }

    pub fn namespace(&self) -> &str {
        &self.record.namespace_path
    }

    /// Entries without a member name are rendered as class headings
    pub fn is_class_heading(&self) -> bool {
        self.record.member_name.is_empty()
    }
}

/// Documented members in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    members: Vec<DocumentedMember>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, member: DocumentedMember) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[DocumentedMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentedMember> {
        self.members.iter()
    }

    /// Distinct namespaces, sorted
    pub fn namespaces(&self) -> Vec<&str> {
        self.members
            .iter()
            .map(DocumentedMember::namespace)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Members of one namespace, in document order
    pub fn members_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a DocumentedMember> + 'a {
        self.members.iter().filter(move |m| m.namespace() == namespace)
    }

    /// Members grouped by namespace; groups sorted, members in document order
    pub fn group_by_namespace(&self) -> BTreeMap<&str, Vec<&DocumentedMember>> {
        let mut groups: BTreeMap<&str, Vec<&DocumentedMember>> = BTreeMap::new();
        for member in &self.members {
            groups.entry(member.namespace()).or_default().push(member);
        }
        groups
    }

    pub fn count_by_kind(&self, kind: MemberKind) -> usize {
        self.members.iter().filter(|m| m.kind() == kind).count()
    }
}

impl FromIterator<DocumentedMember> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = DocumentedMember>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DocumentSet {
    type Item = &'a DocumentedMember;
    type IntoIter = std::slice::Iter<'a, DocumentedMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(namespace: &str, class: &str, name: &str) -> DocumentedMember {
        DocumentedMember {
            identifier: format!("M:MW.{}.{}.{}", namespace, class, name),
            record: MemberRecord {
                kind: MemberKind::Member,
                namespace_path: namespace.to_string(),
                class_name: class.to_string(),
                member_name: name.to_string(),
                ..Default::default()
            },
            summary: String::new(),
            returns: String::new(),
            remarks: String::new(),
            decorations: Vec::new(),
            position: Position::start(),
        }
    }

    #[test]
    fn test_grouping_keeps_document_order() {
        let set: DocumentSet = vec![
            member("Shapes", "Circle", "B"),
            member("Kinetic", "Body", "Move"),
            member("Shapes", "Circle", "A"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.namespaces(), vec!["Kinetic", "Shapes"]);

        let groups = set.group_by_namespace();
        let shapes: Vec<&str> = groups["Shapes"]
            .iter()
            .map(|m| m.record.member_name.as_str())
            .collect();
        assert_eq!(shapes, vec!["B", "A"]);

        assert_eq!(set.members_in("Kinetic").count(), 1);
        assert_eq!(set.count_by_kind(MemberKind::Member), 3);
        assert_eq!(set.count_by_kind(MemberKind::Type), 0);
    }

    #[test]
    fn test_class_heading() {
        let mut heading = member("Shapes", "Circle", "");
        heading.record.kind = MemberKind::Type;
        assert!(heading.is_class_heading());
        assert!(!member("Shapes", "Circle", "Area").is_class_heading());
    }
}

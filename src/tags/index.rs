//! Tag → documents index.

use rustc_hash::FxHashMap;

use crate::config::TagOrder;
use crate::page::Document;

/// One tag and the documents declaring it, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry<'a> {
    pub tag: &'a str,
    pub documents: Vec<&'a Document>,
}

/// Ordered tag index, borrowing the documents it was built from.
///
/// Tags compare by exact string: `Testing` and `testing` are two tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagIndex<'a> {
    entries: Vec<TagEntry<'a>>,
}

impl<'a> TagIndex<'a> {
    /// Build the index in one pass over `documents`.
    ///
    /// Tags appear in the order they are first seen, walking documents in
    /// slice order and each document's tags in frontmatter order. A document
    /// is listed at most once per tag.
    pub fn build(documents: &'a [Document]) -> Self {
        let mut entries: Vec<TagEntry<'a>> = Vec::new();
        let mut positions: FxHashMap<&'a str, usize> = FxHashMap::default();

        for document in documents {
            for tag in document.tags() {
                let position = *positions.entry(tag.as_str()).or_insert_with(|| {
                    entries.push(TagEntry {
                        tag,
                        documents: Vec::new(),
                    });
                    entries.len() - 1
                });

                // Documents are visited once, so a repeat can only be the last one.
                let entry = &mut entries[position];
                if entry
                    .documents
                    .last()
                    .is_some_and(|last| std::ptr::eq(*last, document))
                {
                    continue;
                }
                entry.documents.push(document);
            }
        }

        Self { entries }
    }

    /// Reorder tags. Documents within a tag keep their order.
    pub fn sorted(mut self, order: TagOrder) -> Self {
        match order {
            TagOrder::FirstSeen => {}
            // Stable: tags differing only in case stay in first-seen order.
            TagOrder::Alphabetical => self
                .entries
                .sort_by_cached_key(|entry| entry.tag.to_lowercase()),
        }
        self
    }

    pub fn get(&self, tag: &str) -> Option<&TagEntry<'a>> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry<'a>> {
        self.entries.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|entry| entry.tag)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageMeta;

    fn doc(path: &str, tags: &[&str]) -> Document {
        Document::new(
            path,
            PageMeta {
                title: Some(path.trim_end_matches(".md").to_string()),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..PageMeta::default()
            },
        )
    }

    fn paths<'a>(entry: &TagEntry<'a>) -> Vec<&'a str> {
        entry.documents.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_first_seen_order() {
        let docs = [doc("a.md", &["x", "y"]), doc("b.md", &["y", "z"])];
        let index = TagIndex::build(&docs);

        assert_eq!(index.tags().collect::<Vec<_>>(), ["x", "y", "z"]);
        assert_eq!(paths(index.get("x").unwrap()), ["a.md"]);
        assert_eq!(paths(index.get("y").unwrap()), ["a.md", "b.md"]);
        assert_eq!(paths(index.get("z").unwrap()), ["b.md"]);
    }

    #[test]
    fn test_insertion_not_sorted() {
        let docs = [doc("a.md", &["zeta", "alpha"]), doc("b.md", &["mid"])];
        let index = TagIndex::build(&docs);
        assert_eq!(index.tags().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_tag_in_document() {
        let docs = [doc("a.md", &["x", "x", "y", "x"])];
        let index = TagIndex::build(&docs);
        assert_eq!(index.len(), 2);
        assert_eq!(paths(index.get("x").unwrap()), ["a.md"]);
    }

    #[test]
    fn test_identical_documents_both_listed() {
        // Equal content, different documents.
        let docs = [doc("a.md", &["x"]), doc("a.md", &["x"])];
        let index = TagIndex::build(&docs);
        assert_eq!(index.get("x").unwrap().documents.len(), 2);
    }

    #[test]
    fn test_exact_match() {
        let docs = [doc("a.md", &["Testing"]), doc("b.md", &["testing", " testing"])];
        let index = TagIndex::build(&docs);
        assert_eq!(
            index.tags().collect::<Vec<_>>(),
            ["Testing", "testing", " testing"]
        );
    }

    #[test]
    fn test_untagged_documents() {
        let docs = [doc("a.md", &[]), doc("b.md", &[])];
        let index = TagIndex::build(&docs);
        assert!(index.is_empty());
        assert!(TagIndex::build(&[]).is_empty());
    }

    #[test]
    fn test_alphabetical_is_case_insensitive() {
        let docs = [
            doc("a.md", &["beta", "Alpha"]),
            doc("b.md", &["alpha", "Gamma"]),
        ];
        let index = TagIndex::build(&docs).sorted(TagOrder::Alphabetical);
        assert_eq!(
            index.tags().collect::<Vec<_>>(),
            ["Alpha", "alpha", "beta", "Gamma"]
        );
        assert_eq!(paths(index.get("alpha").unwrap()), ["b.md"]);
    }

    #[test]
    fn test_first_seen_sort_is_identity() {
        let docs = [doc("a.md", &["b", "a"])];
        let index = TagIndex::build(&docs);
        assert_eq!(index.clone().sorted(TagOrder::FirstSeen), index);
    }
}

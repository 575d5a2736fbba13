//! Document splitting stage
//!
//! The pipeline reserves a chunking stage between loading and embedding.
//! Product titles rarely need it, so the default splitter passes
//! documents through untouched; `CharacterSplitter` is the pluggable
//! alternative for longer content.

use shopvec_core::Document;

/// Trait for the chunking stage of the pipeline
pub trait DocumentSplitter: Send + Sync {
    fn split(&self, documents: Vec<Document>) -> Vec<Document>;
}

/// Default splitter: one product document stays one document
pub struct PassthroughSplitter;

impl DocumentSplitter for PassthroughSplitter {
    fn split(&self, documents: Vec<Document>) -> Vec<Document> {
        documents
    }
}

/// Character-window splitter with overlap
pub struct CharacterSplitter {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl CharacterSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        // overlap must leave room for forward progress
        let overlap = overlap.min(chunk_size.saturating_sub(1));
        Self {
            chunk_size: chunk_size.max(1),
            overlap,
        }
    }

    fn split_one(&self, doc: Document) -> Vec<Document> {
        let chars: Vec<char> = doc.content.chars().collect();
        if chars.len() <= self.chunk_size {
            return vec![doc];
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut index = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();
            let mut chunk = Document::new(format!("{}#{index}", doc.id), content);
            chunk.metadata = doc.metadata.clone();
            chunk = chunk.with_metadata("chunk_index", index);
            chunks.push(chunk);

            if end == chars.len() {
                break;
            }
            start += step;
            index += 1;
        }

        chunks
    }
}

impl DocumentSplitter for CharacterSplitter {
    fn split(&self, documents: Vec<Document>) -> Vec<Document> {
        documents
            .into_iter()
            .flat_map(|doc| self.split_one(doc))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_preserves_documents() {
        let docs = vec![Document::new("1", "Shirt")];
        let out = PassthroughSplitter.split(docs);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn test_character_splitter_short_content_untouched() {
        let splitter = CharacterSplitter::new(100, 20);
        let out = splitter.split(vec![Document::new("1", "Shirt")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn test_character_splitter_chunks_with_overlap() {
        let splitter = CharacterSplitter::new(10, 2);
        let content = "abcdefghijklmnopqrst"; // 20 chars
        let out = splitter.split(vec![Document::new("p", content)]);

        assert!(out.len() > 1);
        assert_eq!(out[0].content, "abcdefghij");
        // next chunk starts 8 chars in (chunk_size - overlap)
        assert!(out[1].content.starts_with("ij"));
        assert_eq!(out[0].id, "p#0");
        assert_eq!(out[1].id, "p#1");
    }
}

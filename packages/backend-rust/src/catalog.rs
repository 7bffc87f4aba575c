//! Read-only vocabulary metadata.
//!
//! `word.json` and `lesson_index.json` live in the data directory and are read
//! on every request, so edits show up without a restart. The raw documents are
//! served unchanged; the typed view only needs `id`, `char` and `lesson` from
//! each word entry.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const WORDS_FILE: &str = "word.json";
pub const LESSONS_FILE: &str = "lesson_index.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("读取 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析 {path} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} 格式错误: {message}")]
    Format { path: PathBuf, message: String },
}

/// One word as the scheduler needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub id: String,
    #[serde(rename = "char")]
    pub character: String,
    pub lesson: u32,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
}

impl Catalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 获取汉字数据（原样返回）
    pub async fn words_json(&self) -> Result<Value, CatalogError> {
        read_json(&self.data_dir.join(WORDS_FILE)).await
    }

    /// 获取课程索引（原样返回）
    pub async fn lessons_json(&self) -> Result<Value, CatalogError> {
        read_json(&self.data_dir.join(LESSONS_FILE)).await
    }

    pub async fn words(&self) -> Result<Vec<WordEntry>, CatalogError> {
        let path = self.data_dir.join(WORDS_FILE);
        let doc = read_json(&path).await?;
        parse_words(&path, &doc)
    }

    /// Words of one lesson in file order
    pub async fn words_in_lesson(&self, lesson: u32) -> Result<Vec<WordEntry>, CatalogError> {
        Ok(self
            .words()
            .await?
            .into_iter()
            .filter(|w| w.lesson == lesson)
            .collect())
    }
}

async fn read_json(path: &Path) -> Result<Value, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts a root array of entries or an object with a `words` array.
/// Entries without a usable id, char or lesson are skipped.
fn parse_words(path: &Path, doc: &Value) -> Result<Vec<WordEntry>, CatalogError> {
    let entries = match doc {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("words") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(CatalogError::Format {
                    path: path.to_path_buf(),
                    message: "expected an array or an object with a `words` array".to_string(),
                })
            }
        },
        _ => {
            return Err(CatalogError::Format {
                path: path.to_path_buf(),
                message: "expected an array of words".to_string(),
            })
        }
    };

    let mut words = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match word_entry(entry) {
            Some(word) => words.push(word),
            None => tracing::warn!(index, path = %path.display(), "skipping malformed word entry"),
        }
    }
    Ok(words)
}

fn word_entry(entry: &Value) -> Option<WordEntry> {
    let id = match entry.get("id")? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let character = entry.get("char")?.as_str()?.to_string();
    let lesson = u32::try_from(entry.get("lesson")?.as_u64()?).ok()?;
    Some(WordEntry {
        id,
        character,
        lesson,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_root_array() {
        let doc = json!([
            {"id": "1", "char": "人", "lesson": 1, "pinyin": "rén"},
            {"id": 2, "char": "口", "lesson": 1},
            {"id": "3", "char": "山", "lesson": 2}
        ]);
        let words = parse_words(Path::new("word.json"), &doc).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].id, "2");
        assert_eq!(words[2].lesson, 2);
    }

    #[test]
    fn test_parse_words_object() {
        let doc = json!({"words": [{"id": "a", "char": "木", "lesson": 3}]});
        let words = parse_words(Path::new("word.json"), &doc).unwrap();
        assert_eq!(words[0].character, "木");
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let doc = json!([
            {"id": "1", "char": "人"},
            {"char": "口", "lesson": 1},
            {"id": "3", "char": "山", "lesson": -1},
            {"id": "4", "char": "水", "lesson": 1}
        ]);
        let words = parse_words(Path::new("word.json"), &doc).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].id, "4");
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let err = parse_words(Path::new("word.json"), &json!("nope")).unwrap_err();
        assert!(matches!(err, CatalogError::Format { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let catalog = Catalog::new("/definitely/not/here");
        let err = catalog.words_json().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}

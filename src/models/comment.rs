use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment as listed in `comments_with_extra_info`.
///
/// Livestatus encodes each comment as the row
/// `[id, author, comment, entry_type, entry_time]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CommentRow")]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub comment: String,
    pub entry_type: i64,
    pub entry_time: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CommentRow(i64, String, String, i64, i64);

impl TryFrom<CommentRow> for Comment {
    type Error = String;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let CommentRow(id, author, comment, entry_type, entry_time) = row;
        let entry_time = DateTime::from_timestamp(entry_time, 0)
            .ok_or_else(|| format!("comment {} has an out of range entry time {}", id, entry_time))?;
        Ok(Self {
            id,
            author,
            comment,
            entry_type,
            entry_time,
        })
    }
}

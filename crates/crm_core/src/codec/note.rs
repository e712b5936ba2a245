use super::{CodecResult, EntityCodec, RowReader, RowWriter};
use crate::model::Note;
use rusqlite::types::Value;
use rusqlite::Row;

impl EntityCodec for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "createdBy",
        "dueAt",
        "status",
        "createdAt",
        "updatedAt",
        "assignedContactIds",
        "companyIds",
        "dealIds",
        "completedAt",
        "completedBy",
        "logo",
    ];

    fn encode(&self) -> CodecResult<Vec<Value>> {
        let mut row = RowWriter::new(Self::TABLE, Self::COLUMNS.len());
        row.text(&self.id);
        row.text(&self.title);
        row.text(&self.content);
        row.text(&self.created_by);
        row.timestamp(&self.due_at);
        row.text(&self.status);
        row.timestamp(&self.created_at);
        row.timestamp(&self.updated_at);
        // Always written, even when empty: both columns are NOT NULL.
        row.json("assignedContactIds", Some(&self.assigned_contact_ids))?;
        row.json("companyIds", Some(&self.company_ids))?;
        row.json("dealIds", self.deal_ids.as_ref())?;
        row.optional_timestamp(self.completed_at.as_ref());
        row.optional_text(self.completed_by.as_deref());
        row.optional_text(self.logo.as_deref());
        Ok(row.finish())
    }

    fn decode(row: &Row<'_>) -> CodecResult<Self> {
        let row = RowReader::new(Self::TABLE, row);
        Ok(Self {
            id: row.text("id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            created_by: row.text("createdBy")?,
            due_at: row.timestamp("dueAt")?,
            status: row.text("status")?,
            created_at: row.timestamp("createdAt")?,
            updated_at: row.timestamp("updatedAt")?,
            assigned_contact_ids: row.json("assignedContactIds")?,
            company_ids: row.json("companyIds")?,
            deal_ids: row.optional_json("dealIds")?,
            completed_at: row.optional_timestamp("completedAt")?,
            completed_by: row.optional_text("completedBy")?,
            logo: row.optional_text("logo")?,
        })
    }
}

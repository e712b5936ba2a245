use super::{CodecResult, EntityCodec, RowReader, RowWriter};
use crate::model::Task;
use rusqlite::types::Value;
use rusqlite::Row;

impl EntityCodec for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "companyIds",
        "contactIds",
        "dealIds",
        "createdBy",
        "dueAt",
        "completedAt",
        "completedBy",
        "assignedContactIds",
        "status",
        "priority",
        "createdAt",
        "updatedAt",
    ];

    fn encode(&self) -> CodecResult<Vec<Value>> {
        let mut row = RowWriter::new(Self::TABLE, Self::COLUMNS.len());
        row.text(&self.id);
        row.text(&self.title);
        row.text(&self.content);
        row.json("companyIds", self.company_ids.as_ref())?;
        row.json("contactIds", self.contact_ids.as_ref())?;
        row.json("dealIds", self.deal_ids.as_ref())?;
        row.text(&self.created_by);
        row.timestamp(&self.due_at);
        row.optional_timestamp(self.completed_at.as_ref());
        row.optional_text(self.completed_by.as_deref());
        row.json("assignedContactIds", self.assigned_contact_ids.as_ref())?;
        row.optional_text(self.status.as_deref());
        row.optional_text(self.priority.as_deref());
        row.timestamp(&self.created_at);
        row.timestamp(&self.updated_at);
        Ok(row.finish())
    }

    fn decode(row: &Row<'_>) -> CodecResult<Self> {
        let row = RowReader::new(Self::TABLE, row);
        Ok(Self {
            id: row.text("id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            company_ids: row.optional_json("companyIds")?,
            contact_ids: row.optional_json("contactIds")?,
            deal_ids: row.optional_json("dealIds")?,
            created_by: row.text("createdBy")?,
            due_at: row.timestamp("dueAt")?,
            completed_at: row.optional_timestamp("completedAt")?,
            completed_by: row.optional_text("completedBy")?,
            assigned_contact_ids: row.optional_json("assignedContactIds")?,
            status: row.optional_text("status")?,
            priority: row.optional_text("priority")?,
            created_at: row.timestamp("createdAt")?,
            updated_at: row.timestamp("updatedAt")?,
        })
    }
}

use super::{CodecResult, EntityCodec, RowReader, RowWriter};
use crate::model::Contact;
use rusqlite::types::Value;
use rusqlite::Row;

impl EntityCodec for Contact {
    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "avatar",
        "initials",
        "name",
        "email",
        "phone",
        "position",
        "company",
        "address",
        "state",
        "city",
        "zip",
        "country",
        "socialLinks",
        "createdAt",
        "updatedAt",
        "logo",
    ];

    fn encode(&self) -> CodecResult<Vec<Value>> {
        let mut row = RowWriter::new(Self::TABLE, Self::COLUMNS.len());
        row.text(&self.id);
        row.optional_text(Some(self.avatar.as_str()));
        row.optional_text(self.initials.as_deref());
        row.text(&self.name);
        row.optional_text(self.email.as_deref());
        row.optional_text(self.phone.as_deref());
        row.optional_text(self.position.as_deref());
        row.optional_text(self.company.as_deref());
        row.optional_text(self.address.as_deref());
        row.optional_text(self.state.as_deref());
        row.optional_text(self.city.as_deref());
        row.optional_text(self.zip.as_deref());
        row.optional_text(self.country.as_deref());
        row.json("socialLinks", self.social_links.as_ref())?;
        row.timestamp(&self.created_at);
        row.timestamp(&self.updated_at);
        row.optional_text(self.logo.as_deref());
        Ok(row.finish())
    }

    fn decode(row: &Row<'_>) -> CodecResult<Self> {
        let row = RowReader::new(Self::TABLE, row);
        Ok(Self {
            id: row.text("id")?,
            avatar: row.optional_text("avatar")?.unwrap_or_default(),
            initials: row.optional_text("initials")?,
            name: row.text("name")?,
            email: row.optional_text("email")?,
            phone: row.optional_text("phone")?,
            position: row.optional_text("position")?,
            company: row.optional_text("company")?,
            address: row.optional_text("address")?,
            state: row.optional_text("state")?,
            city: row.optional_text("city")?,
            zip: row.optional_text("zip")?,
            country: row.optional_text("country")?,
            social_links: row.optional_json("socialLinks")?,
            created_at: row.timestamp("createdAt")?,
            updated_at: row.timestamp("updatedAt")?,
            logo: row.optional_text("logo")?,
        })
    }
}

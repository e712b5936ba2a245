use super::{CodecResult, EntityCodec, RowReader, RowWriter};
use crate::model::Company;
use rusqlite::types::Value;
use rusqlite::Row;

impl EntityCodec for Company {
    const TABLE: &'static str = "companies";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "logo",
        "name",
        "domain",
        "email",
        "phone",
        "description",
        "categoryIds",
        "contactIds",
        "address",
        "state",
        "city",
        "zip",
        "country",
        "angelList",
        "linkedin",
        "connectionStrengthId",
        "x",
        "instagram",
        "facebook",
        "telegram",
        "createdAt",
        "updatedAt",
        "foundedAt",
        "estimatedArrId",
        "employeeRangeId",
        "lastInteractionAt",
        "lastContacted",
        "teamId",
        "badge",
    ];

    fn encode(&self) -> CodecResult<Vec<Value>> {
        let mut row = RowWriter::new(Self::TABLE, Self::COLUMNS.len());
        row.text(&self.id);
        row.optional_text(self.logo.as_deref());
        row.text(&self.name);
        row.optional_text(self.domain.as_deref());
        row.optional_text(self.email.as_deref());
        row.optional_text(self.phone.as_deref());
        row.optional_text(self.description.as_deref());
        row.json("categoryIds", self.category_ids.as_ref())?;
        row.json("contactIds", self.contact_ids.as_ref())?;
        row.optional_text(self.address.as_deref());
        row.optional_text(self.state.as_deref());
        row.optional_text(self.city.as_deref());
        row.optional_text(self.zip.as_deref());
        row.optional_text(self.country.as_deref());
        row.optional_text(self.angel_list.as_deref());
        row.optional_text(self.linkedin.as_deref());
        row.optional_text(self.connection_strength_id.as_deref());
        row.optional_text(self.x.as_deref());
        row.optional_text(self.instagram.as_deref());
        row.optional_text(self.facebook.as_deref());
        row.optional_text(self.telegram.as_deref());
        row.timestamp(&self.created_at);
        row.timestamp(&self.updated_at);
        row.optional_timestamp(self.founded_at.as_ref());
        row.optional_text(self.estimated_arr_id.as_deref());
        row.optional_text(self.employee_range_id.as_deref());
        row.optional_timestamp(self.last_interaction_at.as_ref());
        row.optional_text(self.last_contacted.as_deref());
        row.optional_text(self.team_id.as_deref());
        row.json(
            "badge",
            self.badge.as_ref().filter(|badge| !badge.is_null()),
        )?;
        Ok(row.finish())
    }

    fn decode(row: &Row<'_>) -> CodecResult<Self> {
        let row = RowReader::new(Self::TABLE, row);
        Ok(Self {
            id: row.text("id")?,
            logo: row.optional_text("logo")?,
            name: row.text("name")?,
            domain: row.optional_text("domain")?,
            email: row.optional_text("email")?,
            phone: row.optional_text("phone")?,
            description: row.optional_text("description")?,
            category_ids: row.optional_json("categoryIds")?,
            contact_ids: row.optional_json("contactIds")?,
            address: row.optional_text("address")?,
            state: row.optional_text("state")?,
            city: row.optional_text("city")?,
            zip: row.optional_text("zip")?,
            country: row.optional_text("country")?,
            angel_list: row.optional_text("angelList")?,
            linkedin: row.optional_text("linkedin")?,
            connection_strength_id: row.optional_text("connectionStrengthId")?,
            x: row.optional_text("x")?,
            instagram: row.optional_text("instagram")?,
            facebook: row.optional_text("facebook")?,
            telegram: row.optional_text("telegram")?,
            created_at: row.timestamp("createdAt")?,
            updated_at: row.timestamp("updatedAt")?,
            founded_at: row.optional_timestamp("foundedAt")?,
            estimated_arr_id: row.optional_text("estimatedArrId")?,
            employee_range_id: row.optional_text("employeeRangeId")?,
            last_interaction_at: row.optional_timestamp("lastInteractionAt")?,
            last_contacted: row.optional_text("lastContacted")?,
            team_id: row.optional_text("teamId")?,
            badge: row.optional_json("badge")?,
        })
    }
}

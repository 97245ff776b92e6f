use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use leakwatch_domain::patch::Patch;
use leakwatch_domain::validation::{FieldRules, FieldValue, Rule};

use crate::domain::record::{
    Embed, Exposure, Group, Link, Record, Relation, Resource, Table, optional_timestamp,
    timestamp,
};

/// An agency employing inspectors. Agency names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: Option<i32>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgencyPayload {
    #[serde(default)]
    pub name: Patch<String>,
}

impl Record for Agency {
    const TABLE: Table = Table::Agencies;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, _field: &str) -> Option<i32> {
        None
    }

    fn set_foreign_key(&mut self, _field: &str, _id: Option<i32>) {}

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl Resource for Agency {
    type Payload = AgencyPayload;

    const PATH: &'static str = "/api/agencies";
    const VIEW: Group = Group::Agencies;
    const RULES: &'static [FieldRules] = &[FieldRules {
        field: "name",
        rules: &[
            Rule::Required {
                message: "Agency name cannot be blank or null",
            },
            Rule::Length {
                min: 2,
                max: 150,
                min_message: "The name of an agency must contain at least {{ limit }} characters",
                max_message: "The name of an agency must contain a maximum of {{ limit }} characters",
            },
        ],
    }];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: &[Group::Agencies, Group::Users],
        },
        Exposure {
            key: "name",
            groups: &[Group::Agencies, Group::Users],
        },
        Exposure {
            key: "createdAt",
            groups: &[Group::Agencies],
        },
        Exposure {
            key: "updatedAt",
            groups: &[Group::Agencies],
        },
        Exposure {
            key: "_links",
            groups: &[Group::Agencies],
        },
    ];
    const EMBEDS: &'static [Embed] = &[Embed {
        key: "users",
        groups: &[Group::Agencies],
        relation: Relation::HasMany {
            target: Table::Users,
            field: "agency_id",
        },
    }];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: String::new(),
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: AgencyPayload) -> Vec<Link> {
        payload.name.apply(&mut self.name);
        Vec::new()
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(Some(self.name.as_str())),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "name" => json!(self.name),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            "_links" => match self.id {
                Some(id) => json!({ "self": { "href": format!("{}/{id}", Self::PATH) } }),
                None => Value::Null,
            },
            _ => Value::Null,
        }
    }
}

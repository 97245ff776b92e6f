//! Reference data recorded by users: gas types, severities and leak statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use leakwatch_domain::patch::Patch;
use leakwatch_domain::reference::RefId;
use leakwatch_domain::validation::{FieldRules, FieldValue, Rule};

use crate::domain::record::{
    Embed, Exposure, Group, Link, Record, Resource, Table, optional_timestamp, timestamp,
};

/// A gas type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gaz {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub gaz_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazPayload {
    #[serde(default)]
    pub gaz_name: Patch<String>,
    #[serde(default)]
    pub user_id: RefId,
}

impl Record for Gaz {
    const TABLE: Table = Table::Gaz;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, field: &str) -> Option<i32> {
        match field {
            "user_id" => self.user_id,
            _ => None,
        }
    }

    fn set_foreign_key(&mut self, field: &str, id: Option<i32>) {
        if field == "user_id" {
            self.user_id = id;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl Resource for Gaz {
    type Payload = GazPayload;

    const PATH: &'static str = "/api/gaz";
    const VIEW: Group = Group::Gaz;
    const RULES: &'static [FieldRules] = &[FieldRules {
        field: "gazName",
        rules: &[
            Rule::Required {
                message: "Gaz name cannot be blank or null",
            },
            Rule::Length {
                min: 2,
                max: 150,
                min_message: "Gaz name must contain at least {{ limit }} characters",
                max_message: "Gaz name must contain a maximum of {{ limit }} characters",
            },
        ],
    }];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: &[Group::Gaz],
        },
        Exposure {
            key: "gazName",
            groups: &[Group::Gaz],
        },
        Exposure {
            key: "createdAt",
            groups: &[Group::Gaz],
        },
        Exposure {
            key: "updatedAt",
            groups: &[Group::Gaz],
        },
    ];
    const EMBEDS: &'static [Embed] = &[];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: None,
            gaz_name: String::new(),
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: GazPayload) -> Vec<Link> {
        payload.gaz_name.apply(&mut self.gaz_name);
        vec![Link {
            field: "user_id",
            target: Table::Users,
            requested: payload.user_id,
        }]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "gazName" => FieldValue::Text(Some(self.gaz_name.as_str())),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "gazName" => json!(self.gaz_name),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            _ => Value::Null,
        }
    }
}

/// How serious a leak is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Severity {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub severity_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityPayload {
    #[serde(default)]
    pub severity_name: Patch<String>,
    #[serde(default)]
    pub user_id: RefId,
}

impl Record for Severity {
    const TABLE: Table = Table::Severities;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, field: &str) -> Option<i32> {
        match field {
            "user_id" => self.user_id,
            _ => None,
        }
    }

    fn set_foreign_key(&mut self, field: &str, id: Option<i32>) {
        if field == "user_id" {
            self.user_id = id;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl Resource for Severity {
    type Payload = SeverityPayload;

    const PATH: &'static str = "/api/severities";
    const VIEW: Group = Group::Severities;
    const RULES: &'static [FieldRules] = &[FieldRules {
        field: "severityName",
        rules: &[
            Rule::Required {
                message: "Severity name cannot be blank or null",
            },
            Rule::Length {
                min: 2,
                max: 150,
                min_message: "Severity name of an agency must contain at least {{ limit }} characters",
                max_message: "The name of an agency must contain a maximum of {{ limit }} characters",
            },
        ],
    }];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: &[Group::Severities],
        },
        Exposure {
            key: "severityName",
            groups: &[Group::Severities, Group::Leaks, Group::Campaigns],
        },
        Exposure {
            key: "createdAt",
            groups: &[Group::Severities],
        },
        Exposure {
            key: "updatedAt",
            groups: &[Group::Severities],
        },
    ];
    const EMBEDS: &'static [Embed] = &[];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: None,
            severity_name: String::new(),
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: SeverityPayload) -> Vec<Link> {
        payload.severity_name.apply(&mut self.severity_name);
        vec![Link {
            field: "user_id",
            target: Table::Users,
            requested: payload.user_id,
        }]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "severityName" => FieldValue::Text(Some(self.severity_name.as_str())),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "severityName" => json!(self.severity_name),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            _ => Value::Null,
        }
    }
}

/// Repair status of a leak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakStatus {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub status_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakStatusPayload {
    #[serde(default)]
    pub status_name: Patch<String>,
    #[serde(default)]
    pub user_id: RefId,
}

impl Record for LeakStatus {
    const TABLE: Table = Table::LeakStatuses;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, field: &str) -> Option<i32> {
        match field {
            "user_id" => self.user_id,
            _ => None,
        }
    }

    fn set_foreign_key(&mut self, field: &str, id: Option<i32>) {
        if field == "user_id" {
            self.user_id = id;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl Resource for LeakStatus {
    type Payload = LeakStatusPayload;

    const PATH: &'static str = "/api/status";
    const VIEW: Group = Group::LeaksStatus;
    const RULES: &'static [FieldRules] = &[FieldRules {
        field: "statusName",
        rules: &[
            Rule::Required {
                message: "Status name cannot be blank or null",
            },
            Rule::Length {
                min: 2,
                max: 150,
                min_message: "The status name of an agency must contain at least {{ limit }} characters",
                max_message: "The Status name of an agency must contain a maximum of {{ limit }} characters",
            },
        ],
    }];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: &[Group::LeaksStatus, Group::Leaks],
        },
        Exposure {
            key: "statusName",
            groups: &[Group::LeaksStatus, Group::Leaks, Group::Campaigns],
        },
        Exposure {
            key: "createdAt",
            groups: &[Group::LeaksStatus],
        },
        Exposure {
            key: "updatedAt",
            groups: &[Group::LeaksStatus],
        },
    ];
    const EMBEDS: &'static [Embed] = &[];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: None,
            status_name: String::new(),
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: LeakStatusPayload) -> Vec<Link> {
        payload.status_name.apply(&mut self.status_name);
        vec![Link {
            field: "user_id",
            target: Table::Users,
            requested: payload.user_id,
        }]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "statusName" => FieldValue::Text(Some(self.status_name.as_str())),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "statusName" => json!(self.status_name),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            _ => Value::Null,
        }
    }
}

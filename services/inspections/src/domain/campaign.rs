use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use leakwatch_domain::patch::Patch;
use leakwatch_domain::reference::RefId;
use leakwatch_domain::validation::{FieldRules, FieldValue, Rule};

use crate::domain::record::{
    Embed, Exposure, Group, Link, Record, Relation, Resource, Table, optional_timestamp,
    timestamp,
};

/// An inspection campaign at a customer site. Owns its leaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub society_name: String,
    pub location: String,
    pub kwh_price: f64,
    pub nbr_compressor_use_by_year: i32,
    pub electricity_price: f64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    #[serde(default)]
    pub society_name: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub kwh_price: Patch<f64>,
    #[serde(default)]
    pub nbr_compressor_use_by_year: Patch<i32>,
    #[serde(default)]
    pub electricity_price: Patch<f64>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub is_active: Patch<bool>,
    #[serde(default)]
    pub user_id: RefId,
}

impl Campaign {
    /// Flip the active flag and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }
}

impl Record for Campaign {
    const TABLE: Table = Table::Campaigns;

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

const GROUPS: &[Group] = &[Group::Campaigns];

impl Resource for Campaign {
    type Payload = CampaignPayload;

    const PATH: &'static str = "/api/campaigns";
    const VIEW: Group = Group::Campaigns;
    const RULES: &'static [FieldRules] = &[
        FieldRules {
            field: "societyName",
            rules: &[
                Rule::Required {
                    message: "Society name cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 150,
                    min_message: "The name of a society must contain at least {{ limit }} characters",
                    max_message: "The name of a society must contain a maximum of {{ limit }} characters",
                },
            ],
        },
        FieldRules {
            field: "location",
            rules: &[
                Rule::Required {
                    message: "location cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 150,
                    min_message: "location must contain at least {{ limit }} characters",
                    max_message: "location must contain a maximum of {{ limit }} characters",
                },
            ],
        },
        FieldRules {
            field: "kwhPrice",
            rules: &[Rule::Positive {
                message: "The KWH price should be positive",
            }],
        },
        FieldRules {
            field: "nbrCompressorUseByYear",
            rules: &[Rule::Positive {
                message: "The value should be positive",
            }],
        },
        FieldRules {
            field: "electricityPrice",
            rules: &[Rule::Positive {
                message: "The value should be positive",
            }],
        },
    ];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: GROUPS,
        },
        Exposure {
            key: "societyName",
            groups: GROUPS,
        },
        Exposure {
            key: "location",
            groups: GROUPS,
        },
        Exposure {
            key: "kwhPrice",
            groups: GROUPS,
        },
        Exposure {
            key: "nbrCompressorUseByYear",
            groups: GROUPS,
        },
        Exposure {
            key: "electricityPrice",
            groups: GROUPS,
        },
        Exposure {
            key: "description",
            groups: GROUPS,
        },
        Exposure {
            key: "createdAt",
            groups: GROUPS,
        },
        Exposure {
            key: "updatedAt",
            groups: GROUPS,
        },
        Exposure {
            key: "isActive",
            groups: GROUPS,
        },
    ];
    const EMBEDS: &'static [Embed] = &[
        Embed {
            key: "user",
            groups: GROUPS,
            relation: Relation::BelongsTo {
                field: "user_id",
                target: Table::Users,
            },
        },
        Embed {
            key: "leaks",
            groups: GROUPS,
            relation: Relation::HasMany {
                target: Table::Leaks,
                field: "campaign_id",
            },
        },
    ];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: None,
            society_name: String::new(),
            location: String::new(),
            kwh_price: 0.0,
            nbr_compressor_use_by_year: 0,
            electricity_price: 0.0,
            description: None,
            is_active: false,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: CampaignPayload) -> Vec<Link> {
        payload.society_name.apply(&mut self.society_name);
        payload.location.apply(&mut self.location);
        payload.kwh_price.apply(&mut self.kwh_price);
        payload
            .nbr_compressor_use_by_year
            .apply(&mut self.nbr_compressor_use_by_year);
        payload.electricity_price.apply(&mut self.electricity_price);
        payload.description.apply_opt(&mut self.description);
        payload.is_active.apply(&mut self.is_active);
        vec![Link {
            field: "user_id",
            target: Table::Users,
            requested: payload.user_id,
        }]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "societyName" => FieldValue::Text(Some(self.society_name.as_str())),
            "location" => FieldValue::Text(Some(self.location.as_str())),
            "kwhPrice" => FieldValue::Number(Some(self.kwh_price)),
            "nbrCompressorUseByYear" => {
                FieldValue::Number(Some(f64::from(self.nbr_compressor_use_by_year)))
            }
            "electricityPrice" => FieldValue::Number(Some(self.electricity_price)),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "societyName" => json!(self.society_name),
            "location" => json!(self.location),
            "kwhPrice" => json!(self.kwh_price),
            "nbrCompressorUseByYear" => json!(self.nbr_compressor_use_by_year),
            "electricityPrice" => json!(self.electricity_price),
            "description" => json!(self.description),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            "isActive" => json!(self.is_active),
            _ => Value::Null,
        }
    }
}

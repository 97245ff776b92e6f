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

/// Cubic meters lost per unit of measured flow.
pub const LOSS_FACTOR: f64 = 0.06;

/// A leak recorded during a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leak {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub lm_status_id: Option<i32>,
    pub severity_id: Option<i32>,
    pub leak_location: String,
    pub leak_description: Option<String>,
    pub leak_image_big: String,
    pub leak_image_small: String,
    pub leak_number: i32,
    pub measured_flow: Option<f64>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakPayload {
    #[serde(default)]
    pub leak_location: Patch<String>,
    #[serde(default)]
    pub leak_description: Patch<String>,
    #[serde(default)]
    pub leak_image_big: Patch<String>,
    #[serde(default)]
    pub leak_image_small: Patch<String>,
    #[serde(default)]
    pub leak_number: Patch<i32>,
    #[serde(default)]
    pub measured_flow: Patch<f64>,
    #[serde(default)]
    pub comment: Patch<String>,
    #[serde(default)]
    pub user_id: RefId,
    #[serde(default)]
    pub campaign_id: RefId,
    #[serde(default)]
    pub status_id: RefId,
    #[serde(default)]
    pub severity_id: RefId,
}

impl Leak {
    /// Gas lost, from the measured flow. Not part of any view.
    pub fn loss_in_cube_meter(&self) -> Option<f64> {
        self.measured_flow.map(|flow| flow * LOSS_FACTOR)
    }
}

impl Record for Leak {
    const TABLE: Table = Table::Leaks;

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn foreign_key(&self, field: &str) -> Option<i32> {
        match field {
            "user_id" => self.user_id,
            "campaign_id" => self.campaign_id,
            "lm_status_id" => self.lm_status_id,
            "severity_id" => self.severity_id,
            _ => None,
        }
    }

    fn set_foreign_key(&mut self, field: &str, id: Option<i32>) {
        match field {
            "user_id" => self.user_id = id,
            "campaign_id" => self.campaign_id = id,
            "lm_status_id" => self.lm_status_id = id,
            "severity_id" => self.severity_id = id,
            _ => {}
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

const SUMMARY: &[Group] = &[Group::Leaks, Group::Campaigns];
const DETAIL: &[Group] = &[Group::Leaks];

impl Resource for Leak {
    type Payload = LeakPayload;

    const PATH: &'static str = "/api/leaks";
    const VIEW: Group = Group::Leaks;
    const RULES: &'static [FieldRules] = &[
        FieldRules {
            field: "leakLocation",
            rules: &[
                Rule::Required {
                    message: "The leak location cannot be blank or null",
                },
                Rule::Length {
                    min: 2,
                    max: 150,
                    min_message: "The leak location name must contain at least {{ limit }} characters",
                    max_message: "The leak location name must contain a maximum of {{ limit }} characters",
                },
            ],
        },
        FieldRules {
            field: "leakImageBig",
            rules: &[Rule::Required {
                message: "The big leak image cannot be blank or null",
            }],
        },
        FieldRules {
            field: "leakImageSmall",
            rules: &[Rule::Required {
                message: "The small leak image cannot be blank or null",
            }],
        },
        FieldRules {
            field: "leakNumber",
            rules: &[Rule::Positive {
                message: "leak number must be positive",
            }],
        },
        FieldRules {
            field: "measuredFlow",
            rules: &[Rule::Positive {
                message: "measuredFlow must be positive",
            }],
        },
    ];
    const EXPOSED: &'static [Exposure] = &[
        Exposure {
            key: "id",
            groups: SUMMARY,
        },
        Exposure {
            key: "leakLocation",
            groups: DETAIL,
        },
        Exposure {
            key: "leakDescription",
            groups: DETAIL,
        },
        Exposure {
            key: "leakImageBig",
            groups: DETAIL,
        },
        Exposure {
            key: "leakImageSmall",
            groups: DETAIL,
        },
        Exposure {
            key: "leakNumber",
            groups: SUMMARY,
        },
        Exposure {
            key: "measuredFlow",
            groups: SUMMARY,
        },
        Exposure {
            key: "createdAt",
            groups: SUMMARY,
        },
        Exposure {
            key: "updatedAt",
            groups: DETAIL,
        },
        Exposure {
            key: "comment",
            groups: SUMMARY,
        },
    ];
    const EMBEDS: &'static [Embed] = &[
        Embed {
            key: "lmStatus",
            groups: SUMMARY,
            relation: Relation::BelongsTo {
                field: "lm_status_id",
                target: Table::LeakStatuses,
            },
        },
        Embed {
            key: "severity",
            groups: SUMMARY,
            relation: Relation::BelongsTo {
                field: "severity_id",
                target: Table::Severities,
            },
        },
    ];

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: None,
            campaign_id: None,
            lm_status_id: None,
            severity_id: None,
            leak_location: String::new(),
            leak_description: None,
            leak_image_big: String::new(),
            leak_image_small: String::new(),
            leak_number: 0,
            measured_flow: None,
            comment: None,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, payload: LeakPayload) -> Vec<Link> {
        payload.leak_location.apply(&mut self.leak_location);
        payload.leak_description.apply_opt(&mut self.leak_description);
        payload.leak_image_big.apply(&mut self.leak_image_big);
        payload.leak_image_small.apply(&mut self.leak_image_small);
        payload.leak_number.apply(&mut self.leak_number);
        payload.measured_flow.apply_opt(&mut self.measured_flow);
        payload.comment.apply_opt(&mut self.comment);
        vec![
            Link {
                field: "user_id",
                target: Table::Users,
                requested: payload.user_id,
            },
            Link {
                field: "campaign_id",
                target: Table::Campaigns,
                requested: payload.campaign_id,
            },
            Link {
                field: "lm_status_id",
                target: Table::LeakStatuses,
                requested: payload.status_id,
            },
            Link {
                field: "severity_id",
                target: Table::Severities,
                requested: payload.severity_id,
            },
        ]
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "leakLocation" => FieldValue::Text(Some(self.leak_location.as_str())),
            "leakImageBig" => FieldValue::Text(Some(self.leak_image_big.as_str())),
            "leakImageSmall" => FieldValue::Text(Some(self.leak_image_small.as_str())),
            "leakNumber" => FieldValue::Number(Some(f64::from(self.leak_number))),
            "measuredFlow" => FieldValue::Number(self.measured_flow),
            _ => FieldValue::Unchanged,
        }
    }

    fn expose(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "leakLocation" => json!(self.leak_location),
            "leakDescription" => json!(self.leak_description),
            "leakImageBig" => json!(self.leak_image_big),
            "leakImageSmall" => json!(self.leak_image_small),
            "leakNumber" => json!(self.leak_number),
            "measuredFlow" => json!(self.measured_flow),
            "createdAt" => timestamp(&self.created_at),
            "updatedAt" => optional_timestamp(&self.updated_at),
            "comment" => json!(self.comment),
            _ => Value::Null,
        }
    }
}
